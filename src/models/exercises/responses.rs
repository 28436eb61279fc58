use serde::Serialize;
use ts_rs::TS;

/// 练习列表项；学生视角下 correction_models 始终为空
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exercise.ts")]
pub struct ExerciseListItem {
    pub id: i64,
    pub title: String,
    pub file: Option<String>,
    pub correction_models: Option<String>,
}

/// 教师自己的练习
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exercise.ts")]
pub struct TeacherExerciseItem {
    pub id: i64,
    pub title: String,
    pub file: Option<String>,
    pub correction_models: Option<String>,
    pub created_at: String,
}

/// 练习详情
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exercise.ts")]
pub struct ExerciseResponse {
    pub id: i64,
    pub title: String,
    pub file: Option<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exercise.ts")]
pub struct ExerciseCreatedResponse {
    pub id: i64,
}
