use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ExerciseService, validate_title};
use crate::middlewares::RequireJWT;
use crate::models::exercises::{requests::UpdateExerciseRequest, responses::ExerciseResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::media::MediaKind;
use crate::utils::is_pdf;
use crate::utils::multipart::{UploadForm, UploadedFile};

/// multipart 修改：可选的 `title` 和新的题目 `file`
pub async fn update_exercise_multipart(
    service: &ExerciseService,
    request: &HttpRequest,
    exercise_id: i64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let config = service.get_config(request);
    let mut form = match UploadForm::read(payload, config.upload.max_size).await {
        Ok(form) => form,
        Err(e) => return Ok(e.to_response()),
    };

    let update = UpdateExerciseRequest {
        title: form.field("title").map(str::to_string),
        file: None,
    };
    let file = form.take_file("file");

    update_exercise(service, request, exercise_id, update, file).await
}

pub async fn update_exercise(
    service: &ExerciseService,
    request: &HttpRequest,
    exercise_id: i64,
    mut update: UpdateExerciseRequest,
    file: Option<UploadedFile>,
) -> ActixResult<HttpResponse> {
    let user_id = RequireJWT::extract_user_id(request);
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

    // 只有创建者可以修改
    if !user_id.is_some_and(|id| exercise.is_owned_by(id)) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Only the owner can edit this exercise",
        )));
    }

    if let Some(title) = update.title.take() {
        match validate_title(&title) {
            Ok(title) => update.title = Some(title.to_string()),
            Err(msg) => {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
            }
        }
    }

    if let Some(file) = &file
        && !is_pdf(&file.data)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileTypeNotAllowed,
            "The exercise file must be a PDF",
        )));
    }

    let media = service.get_media(request);
    if let Some(file) = file {
        match media.save(MediaKind::Exercise, &file.data) {
            Ok(path) => update.file = Some(path),
            Err(e) => {
                tracing::error!("{}", e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::FileUploadFailed,
                        "Failed to store the exercise file",
                    )),
                );
            }
        }
    }
    let new_file = update.file.clone();
    let discard_new_file = || {
        if let Some(path) = &new_file {
            media.remove(path);
        }
    };

    match storage.update_exercise(exercise_id, update).await {
        Ok(Some(updated)) => {
            // 新文件已入库，旧文件不再被引用
            if new_file.is_some()
                && let Some(old) = &exercise.file
            {
                media.remove(old);
                tracing::info!("Exercise {} file replaced", exercise_id);
            }
            let response = ExerciseResponse {
                id: updated.id,
                title: updated.title,
                file: updated.file.map(|f| media.absolute_url(request, &f)),
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Exercise updated")))
        }
        Ok(None) => {
            discard_new_file();
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ExerciseNotFound,
                "Exercise not found",
            )))
        }
        Err(e) => {
            discard_new_file();
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to update exercise: {e}"),
                )),
            )
        }
    }
}
