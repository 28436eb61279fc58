use serde::Deserialize;
use ts_rs::TS;

// 用户创建请求（存储层使用，password 为哈希后的值）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_teacher: bool,
}
