use std::collections::BTreeMap;

use serde::Serialize;
use ts_rs::TS;

use super::entities::GradingStatus;
use crate::models::users::responses::UserSummary;

/// 提交详情，嵌套学生信息，exercise 为练习标题
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionResponse {
    pub id: i64,
    pub student: UserSummary,
    pub exercise: String,
    pub file: Option<String>,
    pub submitted_at: String,
    pub score: Option<i32>,
    pub feedback: Option<String>,
    pub grading_status: GradingStatus,
    pub is_locked: bool,
}

/// 上传后的提交结果，exercise 为练习 ID
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionCreatedResponse {
    pub id: i64,
    pub exercise: i64,
    pub file: Option<String>,
    pub submitted_at: String,
    pub score: Option<i32>,
    pub feedback: Option<String>,
    pub grading_status: GradingStatus,
    pub is_locked: bool,
}

/// 提交列表项，教师视角下附带学生用户名
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListItem {
    pub id: i64,
    pub exercise_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub student_username: Option<String>,
    pub file: Option<String>,
    pub submitted_at: String,
    pub score: Option<i32>,
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct ExerciseStatistics {
    pub average_score: f64,
    pub submission_count: u64,
}

/// 按练习 ID 聚合的统计
pub type TeacherStatisticsResponse = BTreeMap<i64, ExerciseStatistics>;
