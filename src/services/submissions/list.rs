use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use super::views::{UNKNOWN_EXERCISE, build_submission_responses, load_related};
use crate::middlewares::RequireJWT;
use crate::models::submissions::responses::SubmissionListItem;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let storage = service.get_storage(request);
    let media = service.get_media(request);

    // 教师看全部学生提交（附学生用户名），学生只看自己的
    let submissions = if user.is_teacher {
        storage.list_student_submissions().await
    } else {
        storage.list_submissions_by_student(user.id).await
    };

    let result = match submissions {
        Ok(submissions) => load_related(&storage, &submissions)
            .await
            .map(|related| (submissions, related)),
        Err(e) => Err(e),
    };

    let (submissions, (students, titles)) = match result {
        Ok(data) => data,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list submissions: {e}"),
                )),
            );
        }
    };

    let items: Vec<SubmissionListItem> = submissions
        .into_iter()
        .map(|s| SubmissionListItem {
            id: s.id,
            exercise_title: titles
                .get(&s.exercise_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_EXERCISE.to_string()),
            student_username: if user.is_teacher {
                students.get(&s.student_id).map(|st| st.username.clone())
            } else {
                None
            },
            file: Some(media.absolute_url(request, &s.file)),
            submitted_at: s.submitted_at.to_rfc3339(),
            score: s.score,
            feedback: s.feedback,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(items, "Submissions retrieved")))
}

pub async fn list_own_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let storage = service.get_storage(request);
    let media = service.get_media(request);

    let result = match storage.list_submissions_by_student(user_id).await {
        Ok(submissions) => build_submission_responses(&storage, &media, request, submissions).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(items, "Performance retrieved"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list submissions: {e}"),
            )),
        ),
    }
}
