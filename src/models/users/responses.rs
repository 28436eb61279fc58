use serde::Serialize;
use ts_rs::TS;

use super::entities::User;

// 当前用户信息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserInfoResponse {
    pub username: String,
    pub email: String,
    pub is_teacher: bool,
}

impl From<&User> for UserInfoResponse {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            is_teacher: user.is_teacher,
        }
    }
}

// 嵌套在提交中的学生信息
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}
