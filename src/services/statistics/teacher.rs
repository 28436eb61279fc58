use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StatisticsService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn teacher_statistics(
    service: &StatisticsService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.exercise_statistics().await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(stats, "Statistics retrieved"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to compute statistics: {e}"),
            )),
        ),
    }
}
