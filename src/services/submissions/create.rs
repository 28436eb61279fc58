use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::SubmissionService;
use crate::middlewares::RequireJWT;
use crate::models::submissions::{
    entities::Submission,
    requests::{CreateSubmissionRequest, SubmissionUpdate},
    responses::SubmissionCreatedResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::grading::GradingOutcome;
use crate::services::media::{MediaKind, MediaStore};
use crate::utils::is_pdf;
use crate::utils::multipart::UploadForm;
use crate::utils::pdf_text;

pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let Some(student_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let config = service.get_config(request);
    let mut form = match UploadForm::read(payload, config.upload.max_size).await {
        Ok(form) => form,
        Err(e) => return Ok(e.to_response()),
    };

    // 1. 练习和文件都必须提供
    let (Some(exercise_id), Some(file)) =
        (form.text("exercise").map(str::to_string), form.take_file("file"))
    else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Exercise and file are required",
        )));
    };

    let Ok(exercise_id) = exercise_id.parse::<i64>() else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Exercise must be a numeric id",
        )));
    };

    // 2. 练习必须存在
    let storage = service.get_storage(request);
    let exercise = match storage.get_exercise_by_id(exercise_id).await {
        Ok(Some(exercise)) => exercise,
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
    };

    // 3. 按内容识别类型，文件名不可信
    if !is_pdf(&file.data) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileTypeNotAllowed,
            "The file must be a PDF",
        )));
    }

    // 4. 落盘并写入数据库
    let media = service.get_media(request);
    let file_path = match media.save(MediaKind::Submission, &file.data) {
        Ok(path) => path,
        Err(e) => {
            tracing::error!("{}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::FileUploadFailed,
                    "Failed to store the submission file",
                )),
            );
        }
    };

    let create_request = CreateSubmissionRequest {
        student_id,
        exercise_id,
        file: file_path.clone(),
    };

    let mut submission = match storage.create_submission(create_request).await {
        Ok(submission) => submission,
        Err(e) => {
            media.remove(&file_path);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to create submission: {e}"),
                )),
            );
        }
    };

    tracing::info!(
        "Submission {} created by student {} for exercise {}",
        submission.id,
        student_id,
        exercise_id
    );

    // 5. 有参考答案时同步评分
    if let Some(correction_file) = &exercise.correction_file {
        let update = grade_submission(service, request, &media, &submission, correction_file).await;
        match storage.update_submission(submission.id, update).await {
            Ok(Some(updated)) => submission = updated,
            Ok(None) => {}
            Err(e) => {
                tracing::error!("Failed to store grading result for {}: {}", submission.id, e);
            }
        }
    }

    let response = SubmissionCreatedResponse {
        id: submission.id,
        exercise: submission.exercise_id,
        file: Some(media.absolute_url(request, &submission.file)),
        submitted_at: submission.submitted_at.to_rfc3339(),
        score: submission.score,
        feedback: submission.feedback,
        grading_status: submission.grading_status,
        is_locked: submission.is_locked,
    };

    Ok(HttpResponse::Created().json(ApiResponse::success(response, "Submission received")))
}

/// 提取两份 PDF 的文本并评分，返回要写回提交的字段
async fn grade_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    media: &MediaStore,
    submission: &Submission,
    correction_file: &str,
) -> SubmissionUpdate {
    let submission_text = extract(media, &submission.file).await;
    let correction_text = extract(media, correction_file).await;

    let outcome = match (submission_text, correction_text) {
        (Ok(submission_text), Ok(correction_text)) => {
            service
                .get_grader(request)
                .grade(&submission_text, &correction_text)
                .await
        }
        (submission_text, correction_text) => {
            let mut causes = Vec::new();
            if let Err(e) = submission_text {
                causes.push(format!("submission: {e}"));
            }
            if let Err(e) = correction_text {
                causes.push(format!("correction: {e}"));
            }
            let reason = format!("automatic grading failed: {}", causes.join("; "));
            tracing::warn!("Submission {}: {}", submission.id, reason);
            GradingOutcome::Failed { reason }
        }
    };

    SubmissionUpdate {
        score: Some(outcome.stored_score()),
        feedback: Some(Some(outcome.feedback().to_string())),
        grading_status: Some(outcome.status()),
        ..Default::default()
    }
}

// lopdf 是同步的，放到阻塞线程池执行
async fn extract(media: &MediaStore, relative: &str) -> Result<String, String> {
    let path = media.path_of(relative);
    match web::block(move || pdf_text::extract_text(&path)).await {
        // 评语对学生可见，只保留媒体目录下的相对路径
        Ok(result) => result.map_err(|e| e.with_display_path(relative).to_string()),
        Err(e) => Err(format!("text extraction was interrupted: {e}")),
    }
}

