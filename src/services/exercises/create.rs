use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ExerciseService, validate_title};
use crate::middlewares::RequireJWT;
use crate::models::exercises::{
    requests::CreateExerciseRequest, responses::ExerciseCreatedResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::media::MediaKind;
use crate::utils::is_pdf;
use crate::utils::multipart::UploadForm;

pub async fn create_exercise(
    service: &ExerciseService,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let Some(teacher_id) = RequireJWT::extract_user_id(request) else {
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

    // 1. 标题和题目文件必填
    let (Some(title), Some(file)) = (form.text("title").map(str::to_string), form.take_file("file"))
    else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Title and file are required",
        )));
    };

    let title = match validate_title(&title) {
        Ok(title) => title.to_string(),
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }
    };

    // 2. 按内容识别，两个文件都必须是 PDF
    if !is_pdf(&file.data) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileTypeNotAllowed,
            "Only PDF files are accepted for the exercise",
        )));
    }

    let correction = form.take_file("correction_models");
    if let Some(correction) = &correction
        && !is_pdf(&correction.data)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileTypeNotAllowed,
            "Only PDF files are accepted for the correction",
        )));
    }

    // 3. 落盘
    let media = service.get_media(request);
    let file_path = match media.save(MediaKind::Exercise, &file.data) {
        Ok(path) => path,
        Err(e) => {
            tracing::error!("{}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::FileUploadFailed,
                    "Failed to store the exercise file",
                )),
            );
        }
    };

    let correction_path = match correction.map(|c| media.save(MediaKind::Correction, &c.data)) {
        Some(Ok(path)) => Some(path),
        Some(Err(e)) => {
            tracing::error!("{}", e);
            media.remove(&file_path);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::FileUploadFailed,
                    "Failed to store the correction file",
                )),
            );
        }
        None => None,
    };

    // 4. 写入数据库
    let storage = service.get_storage(request);
    let create_request = CreateExerciseRequest {
        title,
        file: file_path.clone(),
        correction_file: correction_path.clone(),
    };

    match storage.create_exercise(teacher_id, create_request).await {
        Ok(exercise) => {
            tracing::info!(
                "Exercise {} created by teacher {} (correction: {})",
                exercise.id,
                teacher_id,
                exercise.correction_file.is_some()
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                ExerciseCreatedResponse { id: exercise.id },
                "Exercise created successfully",
            )))
        }
        Err(e) => {
            media.remove(&file_path);
            if let Some(path) = &correction_path {
                media.remove(path);
            }
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to create exercise: {e}"),
                )),
            )
        }
    }
}
