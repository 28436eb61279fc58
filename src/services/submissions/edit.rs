use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use super::views::build_submission_responses;
use crate::middlewares::RequireJWT;
use crate::models::submissions::requests::{
    EditSubmissionRequest, SubmissionUpdate, score_in_range,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::media::MediaKind;
use crate::utils::is_pdf;
use crate::utils::multipart::{UploadForm, UploadedFile};

/// multipart 修改：可选的 `score`、`feedback` 文本字段和新的 `file`
///
/// 空的 `score` / `feedback` 字段表示清空，缺失表示不变。
pub async fn edit_submission_multipart(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let config = service.get_config(request);
    let mut form = match UploadForm::read(payload, config.upload.max_size).await {
        Ok(form) => form,
        Err(e) => return Ok(e.to_response()),
    };

    let score = match form.field("score") {
        None => None,
        Some("") => Some(None),
        Some(raw) => match raw.parse::<i32>() {
            Ok(score) => Some(Some(score)),
            Err(_) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::ValidationFailed,
                    "Score must be an integer",
                )));
            }
        },
    };
    let feedback = form
        .field("feedback")
        .map(|v| (!v.is_empty()).then(|| v.to_string()));

    let edit = EditSubmissionRequest { score, feedback };
    let file = form.take_file("file");

    edit_submission(service, request, submission_id, edit, file).await
}

pub async fn edit_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    edit: EditSubmissionRequest,
    file: Option<UploadedFile>,
) -> ActixResult<HttpResponse> {
    let user_id = RequireJWT::extract_user_id(request);
    let storage = service.get_storage(request);

    // 只能修改自己的提交，他人的提交视为不存在
    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) if Some(submission.student_id) == user_id => submission,
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "Submission not found or access denied",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to query submission: {e}"),
                )),
            );
        }
    };

    // 锁定检查先于任何改动，包括文件替换
    if submission.is_locked {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::SubmissionLocked,
            "This submission is locked and can no longer be modified",
        )));
    }

    if !score_in_range(edit.score) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ScoreOutOfRange,
            "Score must be between 0 and 20",
        )));
    }

    if let Some(file) = &file
        && !is_pdf(&file.data)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileTypeNotAllowed,
            "The file must be a PDF",
        )));
    }

    let media = service.get_media(request);
    let new_file = match file.map(|f| media.save(MediaKind::Submission, &f.data)) {
        Some(Ok(path)) => Some(path),
        Some(Err(e)) => {
            tracing::error!("{}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::FileUploadFailed,
                    "Failed to store the submission file",
                )),
            );
        }
        None => None,
    };

    let update = SubmissionUpdate {
        score: edit.score,
        feedback: edit.feedback,
        file: new_file.clone(),
        ..Default::default()
    };

    let updated = match storage.update_submission(submission_id, update).await {
        Ok(Some(updated)) => updated,
        Ok(None) => {
            if let Some(path) = &new_file {
                media.remove(path);
            }
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "Submission not found",
            )));
        }
        Err(e) => {
            if let Some(path) = &new_file {
                media.remove(path);
            }
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to update submission: {e}"),
                )),
            );
        }
    };

    // 新文件已入库，旧文件不再被引用
    if new_file.is_some() {
        media.remove(&submission.file);
        tracing::info!("Submission {} file replaced", submission_id);
    }

    match build_submission_responses(&storage, &media, request, vec![updated]).await {
        Ok(mut items) if !items.is_empty() => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(items.remove(0), "Submission updated"))),
        Ok(_) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "Submission not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to load submission: {e}"),
            )),
        ),
    }
}
