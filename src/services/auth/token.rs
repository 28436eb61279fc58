use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::require_jwt::RequireJWT;
use crate::models::auth::{AccessTokenResponse, RefreshTokenRequest};
use crate::models::users::responses::UserInfoResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::JwtUtils;

use super::AuthService;

pub async fn handle_refresh_token(
    service: &AuthService,
    refresh_request: RefreshTokenRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config(request);

    match JwtUtils::refresh_access_token(&config.jwt, &refresh_request.refresh) {
        Ok(access) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AccessTokenResponse { access },
            "Token refreshed successfully",
        ))),
        Err(e) => {
            tracing::info!("Refresh token rejected: {}", e);
            Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Refresh token is invalid or expired",
            )))
        }
    }
}

pub async fn handle_get_user(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match RequireJWT::extract_user_claims(request) {
        Some(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserInfoResponse::from(&user),
            "User information retrieved successfully",
        ))),
        None => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ))),
    }
}
