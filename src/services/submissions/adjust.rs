use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use super::views::build_submission_responses;
use crate::middlewares::RequireJWT;
use crate::models::submissions::{
    entities::GradingStatus,
    requests::{AdjustSubmissionRequest, SubmissionUpdate, score_in_range},
};
use crate::models::{ApiResponse, ErrorCode};

pub async fn adjust_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    adjust: AdjustSubmissionRequest,
) -> ActixResult<HttpResponse> {
    if !score_in_range(adjust.score) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ScoreOutOfRange,
            "Score must be between 0 and 20",
        )));
    }

    let storage = service.get_storage(request);

    // 教师给出分数即视为已评分；调整后提交被锁定
    let grading_status = matches!(adjust.score, Some(Some(_))).then_some(GradingStatus::Graded);
    let update = SubmissionUpdate {
        score: adjust.score,
        feedback: adjust.feedback,
        grading_status,
        is_locked: Some(true),
        ..Default::default()
    };

    let updated = match storage.update_submission(submission_id, update).await {
        Ok(Some(updated)) => updated,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "Submission not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to update submission: {e}"),
                )),
            );
        }
    };

    tracing::info!(
        "Submission {} adjusted by teacher {:?} (score: {:?})",
        submission_id,
        RequireJWT::extract_user_id(request),
        updated.score
    );

    let media = service.get_media(request);
    match build_submission_responses(&storage, &media, request, vec![updated]).await {
        Ok(mut items) if !items.is_empty() => Ok(HttpResponse::Ok().json(ApiResponse::success(
            items.remove(0),
            "Score and feedback updated",
        ))),
        Ok(_) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Score and feedback updated",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to load submission: {e}"),
            )),
        ),
    }
}
