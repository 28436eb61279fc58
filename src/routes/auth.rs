use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::{LoginRequest, RefreshTokenRequest, RegisterRequest};
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn register(
    req: HttpRequest,
    user_data: web::Json<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register(user_data.into_inner(), &req).await
}

pub async fn obtain_token(
    req: HttpRequest,
    credentials: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(credentials.into_inner(), &req).await
}

pub async fn refresh_token(
    req: HttpRequest,
    refresh: web::Json<RefreshTokenRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.refresh_token(refresh.into_inner(), &req).await
}

pub async fn get_user(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.get_user(&request).await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/register", web::post().to(register))
        .route("/api/token", web::post().to(obtain_token))
        .route("/api/token/refresh", web::post().to(refresh_token))
        .service(
            web::resource("/api/user")
                .wrap(middlewares::RequireJWT)
                .route(web::get().to(get_user)),
        );
}
