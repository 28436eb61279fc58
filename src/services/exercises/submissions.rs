use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExerciseService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::submissions::views::build_submission_responses;

pub async fn list_exercise_submissions(
    service: &ExerciseService,
    request: &HttpRequest,
    exercise_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_exercise_by_id(exercise_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ExerciseNotFound,
                "Exercise not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to query exercise: {e}"),
                )),
            );
        }
    }

    let media = service.get_media(request);
    let result = match storage.list_submissions_by_exercise(exercise_id).await {
        Ok(submissions) => build_submission_responses(&storage, &media, request, submissions).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(items, "Submissions retrieved"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list submissions: {e}"),
            )),
        ),
    }
}
