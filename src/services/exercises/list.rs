use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExerciseService;
use crate::middlewares::RequireJWT;
use crate::models::exercises::responses::{ExerciseListItem, TeacherExerciseItem};
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_exercises(
    service: &ExerciseService,
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

    // 教师只看自己的练习，学生看全部
    let owner = user.is_teacher.then_some(user.id);
    let exercises = match storage.list_exercises(owner).await {
        Ok(exercises) => exercises,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list exercises: {e}"),
                )),
            );
        }
    };

    let items: Vec<ExerciseListItem> = exercises
        .into_iter()
        .map(|e| ExerciseListItem {
            id: e.id,
            title: e.title,
            file: e.file.map(|f| media.absolute_url(request, &f)),
            // 参考答案只对教师可见
            correction_models: e
                .correction_file
                .filter(|_| user.is_teacher)
                .map(|f| media.absolute_url(request, &f)),
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(items, "Exercises retrieved")))
}

pub async fn list_teacher_exercises(
    service: &ExerciseService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(teacher_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let storage = service.get_storage(request);
    let media = service.get_media(request);

    match storage.list_exercises(Some(teacher_id)).await {
        Ok(exercises) => {
            let items: Vec<TeacherExerciseItem> = exercises
                .into_iter()
                .map(|e| TeacherExerciseItem {
                    id: e.id,
                    title: e.title,
                    file: e.file.map(|f| media.absolute_url(request, &f)),
                    correction_models: e
                        .correction_file
                        .map(|f| media.absolute_url(request, &f)),
                    created_at: e.created_at.to_rfc3339(),
                })
                .collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(items, "Exercises retrieved")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list exercises: {e}"),
            )),
        ),
    }
}
