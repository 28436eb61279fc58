use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{RegisterRequest, RegisterResponse},
    users::requests::CreateUserRequest,
};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password, validate_username};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 1. 三个字段都必须提供
    let (Some(username), Some(password), Some(email)) = (
        register_request.username.filter(|s| !s.is_empty()),
        register_request.password.filter(|s| !s.is_empty()),
        register_request.email.filter(|s| !s.is_empty()),
    ) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Username, password and email are required",
        )));
    };

    if let Err(msg) = validate_password(&password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserPasswordInvalid, msg)));
    }

    if let Err(msg) = validate_username(&username) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
    }

    if let Err(msg) = validate_email(&email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }

    let storage = service.get_storage(request);

    // 2. 用户名和邮箱唯一
    if let Err(response) = check_username_exists(&storage, &username).await {
        return Ok(response);
    }

    if let Err(response) = check_email_exists(&storage, &email).await {
        return Ok(response);
    }

    // 3. 哈希密码
    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Password hashing failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Register failed",
                )),
            );
        }
    };

    // 4. 创建用户
    let create_request = CreateUserRequest {
        username,
        email,
        password: password_hash,
        is_teacher: register_request.is_teacher,
    };

    match storage.create_user(create_request).await {
        Ok(user) => {
            tracing::info!("User {} registered (teacher: {})", user.username, user.is_teacher);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                RegisterResponse { id: user.id },
                "User created successfully",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("Register failed: {e}"),
            )),
        ),
    }
}

async fn check_username_exists(
    storage: &Arc<dyn Storage>,
    username: &str,
) -> Result<(), HttpResponse> {
    match storage.get_user_by_username(username).await {
        Ok(Some(_)) => Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserNameAlreadyExists,
            "Username already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("Register failed: {e}"),
            )),
        ),
    }
}

async fn check_email_exists(storage: &Arc<dyn Storage>, email: &str) -> Result<(), HttpResponse> {
    match storage.get_user_by_email(email).await {
        Ok(Some(_)) => Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserEmailAlreadyExists,
            "Email already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("Register failed: {e}"),
            )),
        ),
    }
}
