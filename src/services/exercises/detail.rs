use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExerciseService;
use crate::middlewares::RequireJWT;
use crate::models::exercises::responses::ExerciseResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_exercise(
    service: &ExerciseService,
    request: &HttpRequest,
    exercise_id: i64,
) -> ActixResult<HttpResponse> {
    let user_id = RequireJWT::extract_user_id(request);
    let storage = service.get_storage(request);

    // 不属于当前教师的练习同样返回 404
    match storage.get_exercise_by_id(exercise_id).await {
        Ok(Some(exercise)) if user_id.is_some_and(|id| exercise.is_owned_by(id)) => {
            let media = service.get_media(request);
            let response = ExerciseResponse {
                id: exercise.id,
                title: exercise.title,
                file: exercise.file.map(|f| media.absolute_url(request, &f)),
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Exercise retrieved")))
        }
        Ok(_) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ExerciseNotFound,
            "Exercise not found or access denied",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to query exercise: {e}"),
            )),
        ),
    }
}
