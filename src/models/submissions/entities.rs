use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 自动评分状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub enum GradingStatus {
    Pending, // 未评分（无参考答案或尚未完成）
    Graded,  // 已评分（自动或教师调整）
    Failed,  // 自动评分失败，原因写在 feedback 中
}

impl GradingStatus {
    pub const PENDING: &'static str = "pending";
    pub const GRADED: &'static str = "graded";
    pub const FAILED: &'static str = "failed";

    pub fn as_str(&self) -> &'static str {
        match self {
            GradingStatus::Pending => Self::PENDING,
            GradingStatus::Graded => Self::GRADED,
            GradingStatus::Failed => Self::FAILED,
        }
    }
}

impl std::fmt::Display for GradingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GradingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::PENDING => Ok(GradingStatus::Pending),
            Self::GRADED => Ok(GradingStatus::Graded),
            Self::FAILED => Ok(GradingStatus::Failed),
            _ => Err(format!("Invalid grading status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: i64,
    pub student_id: i64,
    pub exercise_id: i64,
    pub file: String,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub score: Option<i32>,
    pub feedback: Option<String>,
    pub grading_status: GradingStatus,
    pub is_locked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            GradingStatus::Pending,
            GradingStatus::Graded,
            GradingStatus::Failed,
        ] {
            assert_eq!(status.as_str().parse::<GradingStatus>(), Ok(status));
        }
        assert!("unknown".parse::<GradingStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(GradingStatus::Failed).unwrap(),
            serde_json::json!("failed")
        );
    }
}
