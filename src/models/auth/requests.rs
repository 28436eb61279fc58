use serde::Deserialize;
use ts_rs::TS;

// 注册请求，字段缺失时返回 400 而不是反序列化错误
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub is_teacher: bool,
}

// 获取令牌请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// 刷新令牌请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RefreshTokenRequest {
    pub refresh: String,
}
