use super::SeaOrmStorage;
use crate::entity::exercises::{ActiveModel, Column, Entity as Exercises};
use crate::errors::{PlatformError, Result};
use crate::models::exercises::{
    entities::Exercise,
    requests::{CreateExerciseRequest, UpdateExerciseRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建练习
    pub async fn create_exercise_impl(
        &self,
        teacher_id: i64,
        req: CreateExerciseRequest,
    ) -> Result<Exercise> {
        let model = ActiveModel {
            title: Set(req.title),
            teacher_id: Set(teacher_id),
            file: Set(Some(req.file)),
            correction_file: Set(req.correction_file),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            PlatformError::database_operation(format!("Failed to create exercise: {e}"))
        })?;

        Ok(result.into_exercise())
    }

    /// 通过 ID 获取练习
    pub async fn get_exercise_by_id_impl(&self, id: i64) -> Result<Option<Exercise>> {
        let result = Exercises::find_by_id(id).one(&self.db).await.map_err(|e| {
            PlatformError::database_operation(format!("Failed to query exercise: {e}"))
        })?;

        Ok(result.map(|m| m.into_exercise()))
    }

    /// 列出练习
    pub async fn list_exercises_impl(&self, teacher_id: Option<i64>) -> Result<Vec<Exercise>> {
        let mut select = Exercises::find();

        if let Some(teacher_id) = teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        let result = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                PlatformError::database_operation(format!("Failed to list exercises: {e}"))
            })?;

        Ok(result.into_iter().map(|m| m.into_exercise()).collect())
    }

    /// 批量获取练习
    pub async fn get_exercises_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Exercise>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Exercises::find()
            .filter(Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| {
                PlatformError::database_operation(format!("Failed to query exercises: {e}"))
            })?;

        Ok(result.into_iter().map(|m| m.into_exercise()).collect())
    }

    /// 更新练习
    pub async fn update_exercise_impl(
        &self,
        id: i64,
        update: UpdateExerciseRequest,
    ) -> Result<Option<Exercise>> {
        let existing = self.get_exercise_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(file) = update.file {
            model.file = Set(Some(file));
        }

        // 没有要修改的字段时直接返回原记录
        if !model.is_changed() {
            return Ok(existing);
        }

        model.update(&self.db).await.map_err(|e| {
            PlatformError::database_operation(format!("Failed to update exercise: {e}"))
        })?;

        self.get_exercise_by_id_impl(id).await
    }
}
