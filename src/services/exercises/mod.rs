pub mod create;
pub mod detail;
pub mod list;
pub mod submissions;
pub mod update;

#[cfg(test)]
mod tests;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::exercises::requests::UpdateExerciseRequest;
use crate::services::media::MediaStore;
use crate::storage::Storage;

/// 练习标题的最大长度
pub const MAX_TITLE_LENGTH: usize = 200;

pub struct ExerciseService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExerciseService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_config(&self, request: &HttpRequest) -> web::Data<AppConfig> {
        request
            .app_data::<web::Data<AppConfig>>()
            .expect("AppConfig not found in app data")
            .clone()
    }

    pub(crate) fn get_media(&self, request: &HttpRequest) -> MediaStore {
        MediaStore::from_config(&self.get_config(request).upload)
    }

    /// 创建练习（multipart）
    pub async fn create_exercise(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        create::create_exercise(self, request, payload).await
    }

    /// 按角色列出练习
    pub async fn list_exercises(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_exercises(self, request).await
    }

    /// 当前教师的练习（含创建时间）
    pub async fn list_teacher_exercises(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_teacher_exercises(self, request).await
    }

    /// 练习详情
    pub async fn get_exercise(
        &self,
        request: &HttpRequest,
        exercise_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_exercise(self, request, exercise_id).await
    }

    /// 修改练习
    pub async fn update_exercise(
        &self,
        request: &HttpRequest,
        exercise_id: i64,
        update: UpdateExerciseRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_exercise(self, request, exercise_id, update, None).await
    }

    /// 修改练习，可同时替换题目文件
    pub async fn update_exercise_multipart(
        &self,
        request: &HttpRequest,
        exercise_id: i64,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        update::update_exercise_multipart(self, request, exercise_id, payload).await
    }

    /// 某个练习的全部提交
    pub async fn list_exercise_submissions(
        &self,
        request: &HttpRequest,
        exercise_id: i64,
    ) -> ActixResult<HttpResponse> {
        submissions::list_exercise_submissions(self, request, exercise_id).await
    }
}

/// 标题校验：去除首尾空白后非空且不超过 200 字符
pub(crate) fn validate_title(title: &str) -> Result<&str, &'static str> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Title is required");
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err("Title must be at most 200 characters");
    }
    Ok(title)
}
