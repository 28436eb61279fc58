pub mod auth;

pub mod exercises;

pub mod statistics;

pub mod submissions;

pub use auth::configure_auth_routes;
pub use exercises::configure_exercise_routes;
pub use statistics::configure_statistics_routes;
pub use submissions::configure_submission_routes;

use actix_web::guard::GuardContext;
use actix_web::{http::header, web};

use crate::utils::{json_error_handler, path_error_handler};

/// 注册全部 `/api` 路由及请求体/路径参数的错误处理
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler));

    configure_auth_routes(cfg);
    configure_exercise_routes(cfg);
    configure_submission_routes(cfg);
    configure_statistics_routes(cfg);
}

/// 请求体为 multipart 表单时匹配，用于同一资源上区分文件上传与 JSON
pub(crate) fn is_multipart(ctx: &GuardContext) -> bool {
    ctx.head()
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"))
}
