use serde::{Deserialize, Deserializer};
use ts_rs::TS;

use super::entities::GradingStatus;

/// 分数允许的范围（满分 20）
pub const MAX_SCORE: i32 = 20;

// 区分"字段缺失"和"显式为 null"
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// 学生修改自己的提交
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct EditSubmissionRequest {
    #[serde(default, deserialize_with = "double_option")]
    #[ts(optional, type = "number | null")]
    pub score: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[ts(optional, type = "string | null")]
    pub feedback: Option<Option<String>>,
}

/// 教师调整分数与评语，提交随后被锁定
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct AdjustSubmissionRequest {
    #[serde(default, deserialize_with = "double_option")]
    #[ts(optional, type = "number | null")]
    pub score: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[ts(optional, type = "string | null")]
    pub feedback: Option<Option<String>>,
}

/// 校验分数是否在 0..=20 之内，null 视为合法
pub fn score_in_range(score: Option<Option<i32>>) -> bool {
    match score {
        Some(Some(value)) => (0..=MAX_SCORE).contains(&value),
        _ => true,
    }
}

/// 新建提交（文件已写入媒体目录）
#[derive(Debug, Clone)]
pub struct CreateSubmissionRequest {
    pub student_id: i64,
    pub exercise_id: i64,
    pub file: String,
}

/// 存储层的部分更新，`None` 表示保持不变
#[derive(Debug, Clone, Default)]
pub struct SubmissionUpdate {
    pub score: Option<Option<i32>>,
    pub feedback: Option<Option<String>>,
    pub grading_status: Option<GradingStatus>,
    pub is_locked: Option<bool>,
    // 替换后的提交文件（相对路径）
    pub file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_null_fields_are_distinct() {
        let req: EditSubmissionRequest = serde_json::from_str(r#"{"score": null}"#).unwrap();
        assert_eq!(req.score, Some(None));
        assert_eq!(req.feedback, None);

        let req: EditSubmissionRequest =
            serde_json::from_str(r#"{"score": 12, "feedback": "ok"}"#).unwrap();
        assert_eq!(req.score, Some(Some(12)));
        assert_eq!(req.feedback, Some(Some("ok".to_string())));
    }

    #[test]
    fn test_score_range() {
        assert!(score_in_range(None));
        assert!(score_in_range(Some(None)));
        assert!(score_in_range(Some(Some(0))));
        assert!(score_in_range(Some(Some(20))));
        assert!(!score_in_range(Some(Some(21))));
        assert!(!score_in_range(Some(Some(-1))));
    }
}
