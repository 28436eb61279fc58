use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, guard, web};
use once_cell::sync::Lazy;

use super::is_multipart;
use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::submissions::requests::{AdjustSubmissionRequest, EditSubmissionRequest};
use crate::services::SubmissionService;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

pub async fn create_submission(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.create_submission(&req, payload).await
}

pub async fn list_submissions(req: HttpRequest) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.list_submissions(&req).await
}

pub async fn edit_submission(
    req: HttpRequest,
    path: web::Path<i64>,
    edit: web::Json<EditSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .edit_submission(&req, path.into_inner(), edit.into_inner())
        .await
}

pub async fn edit_submission_multipart(
    req: HttpRequest,
    path: web::Path<i64>,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .edit_submission_multipart(&req, path.into_inner(), payload)
        .await
}

pub async fn adjust_submission(
    req: HttpRequest,
    path: web::Path<i64>,
    adjust: web::Json<AdjustSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .adjust_submission(&req, path.into_inner(), adjust.into_inner())
        .await
}

pub async fn student_performance(req: HttpRequest) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.list_own_submissions(&req).await
}

// 配置路由
pub fn configure_submission_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/submit")
            .wrap(RequireRole::student())
            .wrap(RequireJWT)
            .route(web::post().to(create_submission)),
    )
    .service(
        web::resource("/api/submissions")
            .wrap(RequireJWT)
            .route(web::get().to(list_submissions)),
    )
    .service(
        web::resource("/api/submissions/{id:\\d+}/edit")
            .wrap(RequireRole::student())
            .wrap(RequireJWT)
            .route(
                web::put()
                    .guard(guard::fn_guard(is_multipart))
                    .to(edit_submission_multipart),
            )
            .route(web::put().to(edit_submission)),
    )
    .service(
        web::resource("/api/submissions/{id:\\d+}/adjust")
            .wrap(RequireRole::teacher())
            .wrap(RequireJWT)
            .route(web::post().to(adjust_submission)),
    )
    .service(
        web::resource("/api/student-performance")
            .wrap(RequireJWT)
            .route(web::get().to(student_performance)),
    );
}
