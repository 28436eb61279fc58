use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, PathError},
};

use crate::models::{ApiResponse, ErrorCode};

/// JSON 请求体解析失败时返回统一的 400 响应
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = format!("Invalid JSON body: {err}");
    let response = HttpResponse::BadRequest()
        .json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(message, response).into()
}

/// 路径参数解析失败（例如 ID 不是数字）
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    let message = format!("Invalid path parameter: {err}");
    let response = HttpResponse::BadRequest()
        .json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(message, response).into()
}
