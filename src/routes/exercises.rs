use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, guard, web};
use once_cell::sync::Lazy;

use super::is_multipart;
use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::exercises::requests::UpdateExerciseRequest;
use crate::services::ExerciseService;

// 懒加载的全局 ExerciseService 实例
static EXERCISE_SERVICE: Lazy<ExerciseService> = Lazy::new(ExerciseService::new_lazy);

pub async fn list_exercises(req: HttpRequest) -> ActixResult<HttpResponse> {
    EXERCISE_SERVICE.list_exercises(&req).await
}

pub async fn create_exercise(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    EXERCISE_SERVICE.create_exercise(&req, payload).await
}

pub async fn get_exercise(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    EXERCISE_SERVICE.get_exercise(&req, path.into_inner()).await
}

pub async fn update_exercise(
    req: HttpRequest,
    path: web::Path<i64>,
    update: web::Json<UpdateExerciseRequest>,
) -> ActixResult<HttpResponse> {
    EXERCISE_SERVICE
        .update_exercise(&req, path.into_inner(), update.into_inner())
        .await
}

pub async fn update_exercise_multipart(
    req: HttpRequest,
    path: web::Path<i64>,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    EXERCISE_SERVICE
        .update_exercise_multipart(&req, path.into_inner(), payload)
        .await
}

pub async fn list_exercise_submissions(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    EXERCISE_SERVICE
        .list_exercise_submissions(&req, path.into_inner())
        .await
}

pub async fn list_teacher_exercises(req: HttpRequest) -> ActixResult<HttpResponse> {
    EXERCISE_SERVICE.list_teacher_exercises(&req).await
}

// 配置路由；RequireJWT 最后 wrap，位于最外层先执行
pub fn configure_exercise_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/exercises")
            .wrap(RequireJWT)
            .route(web::get().to(list_exercises)),
    )
    .service(
        web::resource("/api/exercises/add")
            .wrap(RequireRole::teacher())
            .wrap(RequireJWT)
            .route(web::post().to(create_exercise)),
    )
    .service(
        web::resource("/api/exercises/{id:\\d+}")
            .wrap(RequireRole::teacher())
            .wrap(RequireJWT)
            .route(web::get().to(get_exercise)),
    )
    .service(
        web::resource("/api/exercises/{id:\\d+}/edit")
            .wrap(RequireRole::teacher())
            .wrap(RequireJWT)
            .route(
                web::put()
                    .guard(guard::fn_guard(is_multipart))
                    .to(update_exercise_multipart),
            )
            .route(web::put().to(update_exercise)),
    )
    .service(
        web::resource("/api/exercises/{id:\\d+}/submissions")
            .wrap(RequireRole::teacher())
            .wrap(RequireJWT)
            .route(web::get().to(list_exercise_submissions)),
    )
    .service(
        web::resource("/api/teacher-exercises")
            .wrap(RequireRole::teacher())
            .wrap(RequireJWT)
            .route(web::get().to(list_teacher_exercises)),
    );
}
