use std::collections::BTreeMap;

use super::SeaOrmStorage;
use crate::entity::exercises::{Column as ExerciseColumn, Entity as Exercises};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::entity::submissions::Relation;
use crate::entity::users::Column as UserColumn;
use crate::errors::{PlatformError, Result};
use crate::models::submissions::{
    entities::{GradingStatus, Submission},
    requests::{CreateSubmissionRequest, SubmissionUpdate},
    responses::{ExerciseStatistics, TeacherStatisticsResponse},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Set,
};

impl SeaOrmStorage {
    /// 创建提交，初始状态为未评分
    pub async fn create_submission_impl(&self, req: CreateSubmissionRequest) -> Result<Submission> {
        let model = ActiveModel {
            student_id: Set(req.student_id),
            exercise_id: Set(req.exercise_id),
            file: Set(req.file),
            submitted_at: Set(chrono::Utc::now().timestamp()),
            score: Set(None),
            feedback: Set(None),
            grading_status: Set(GradingStatus::Pending.to_string()),
            is_locked: Set(false),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            PlatformError::database_operation(format!("Failed to create submission: {e}"))
        })?;

        Ok(result.into_submission())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id).one(&self.db).await.map_err(|e| {
            PlatformError::database_operation(format!("Failed to query submission: {e}"))
        })?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 部分更新提交
    pub async fn update_submission_impl(
        &self,
        id: i64,
        update: SubmissionUpdate,
    ) -> Result<Option<Submission>> {
        let existing = self.get_submission_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(score) = update.score {
            model.score = Set(score);
        }

        if let Some(feedback) = update.feedback {
            model.feedback = Set(feedback);
        }

        if let Some(status) = update.grading_status {
            model.grading_status = Set(status.to_string());
        }

        if let Some(is_locked) = update.is_locked {
            model.is_locked = Set(is_locked);
        }

        if let Some(file) = update.file {
            model.file = Set(file);
        }

        if !model.is_changed() {
            return Ok(existing);
        }

        model.update(&self.db).await.map_err(|e| {
            PlatformError::database_operation(format!("Failed to update submission: {e}"))
        })?;

        self.get_submission_by_id_impl(id).await
    }

    /// 学生自己的提交，最新的在前
    pub async fn list_submissions_by_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<Submission>> {
        let result = Submissions::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                PlatformError::database_operation(format!("Failed to list submissions: {e}"))
            })?;

        Ok(result.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 所有非教师账号的提交
    pub async fn list_student_submissions_impl(&self) -> Result<Vec<Submission>> {
        let result = Submissions::find()
            .join(JoinType::InnerJoin, Relation::Student.def())
            .filter(UserColumn::IsTeacher.eq(false))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                PlatformError::database_operation(format!("Failed to list submissions: {e}"))
            })?;

        Ok(result.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 某个练习的全部提交
    pub async fn list_submissions_by_exercise_impl(
        &self,
        exercise_id: i64,
    ) -> Result<Vec<Submission>> {
        let result = Submissions::find()
            .filter(Column::ExerciseId.eq(exercise_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                PlatformError::database_operation(format!("Failed to list submissions: {e}"))
            })?;

        Ok(result.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 每个练习的平均分（只统计非空分数，没有分数时为 0）与提交数
    pub async fn exercise_statistics_impl(&self) -> Result<TeacherStatisticsResponse> {
        let exercise_ids: Vec<i64> = Exercises::find()
            .select_only()
            .column(ExerciseColumn::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| {
                PlatformError::database_operation(format!("Failed to list exercises: {e}"))
            })?;

        let rows: Vec<(i64, Option<i32>)> = Submissions::find()
            .select_only()
            .column(Column::ExerciseId)
            .column(Column::Score)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| {
                PlatformError::database_operation(format!("Failed to list submissions: {e}"))
            })?;

        Ok(aggregate_statistics(&exercise_ids, &rows))
    }
}

// (score_sum, score_count, submission_count)
fn aggregate_statistics(
    exercise_ids: &[i64],
    rows: &[(i64, Option<i32>)],
) -> TeacherStatisticsResponse {
    let mut totals: BTreeMap<i64, (i64, u64, u64)> =
        exercise_ids.iter().map(|id| (*id, (0, 0, 0))).collect();

    for (exercise_id, score) in rows {
        let entry = totals.entry(*exercise_id).or_default();
        entry.2 += 1;
        if let Some(score) = score {
            entry.0 += i64::from(*score);
            entry.1 += 1;
        }
    }

    totals
        .into_iter()
        .map(|(id, (sum, scored, count))| {
            let average_score = if scored == 0 {
                0.0
            } else {
                sum as f64 / scored as f64
            };
            (
                id,
                ExerciseStatistics {
                    average_score,
                    submission_count: count,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_ignores_null_scores() {
        let stats = aggregate_statistics(&[1, 2], &[(1, Some(10)), (1, None), (1, Some(15))]);

        assert_eq!(stats[&1].submission_count, 3);
        assert!((stats[&1].average_score - 12.5).abs() < f64::EPSILON);
        assert_eq!(stats[&2].submission_count, 0);
        assert_eq!(stats[&2].average_score, 0.0);
    }

    #[test]
    fn test_all_null_scores_average_zero() {
        let stats = aggregate_statistics(&[7], &[(7, None), (7, None)]);
        assert_eq!(stats[&7].submission_count, 2);
        assert_eq!(stats[&7].average_score, 0.0);
    }
}
