//! 提交实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub exercise_id: i64,
    pub file: String,
    pub submitted_at: i64,
    pub score: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,
    pub grading_status: String,
    pub is_locked: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::exercises::Entity",
        from = "Column::ExerciseId",
        to = "super::exercises::Column::Id"
    )]
    Exercise,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
}

impl Related<super::exercises::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exercise.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_submission(self) -> crate::models::submissions::entities::Submission {
        use crate::models::submissions::entities::{GradingStatus, Submission};
        use chrono::{DateTime, Utc};

        Submission {
            id: self.id,
            student_id: self.student_id,
            exercise_id: self.exercise_id,
            file: self.file,
            submitted_at: DateTime::<Utc>::from_timestamp(self.submitted_at, 0).unwrap_or_default(),
            score: self.score,
            feedback: self.feedback,
            grading_status: self
                .grading_status
                .parse::<GradingStatus>()
                .unwrap_or(GradingStatus::Pending),
            is_locked: self.is_locked,
        }
    }
}
