pub mod adjust;
pub mod create;
pub mod edit;
pub mod list;
pub mod views;


use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::submissions::requests::{AdjustSubmissionRequest, EditSubmissionRequest};
use crate::services::grading::GradingClient;
use crate::services::media::MediaStore;
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
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

    pub(crate) fn get_grader(&self, request: &HttpRequest) -> web::Data<GradingClient> {
        request
            .app_data::<web::Data<GradingClient>>()
            .expect("GradingClient not found in app data")
            .clone()
    }

    pub(crate) fn get_media(&self, request: &HttpRequest) -> MediaStore {
        MediaStore::from_config(&self.get_config(request).upload)
    }

    /// 学生上传提交，必要时同步自动评分
    pub async fn create_submission(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        create::create_submission(self, request, payload).await
    }

    /// 按角色列出提交
    pub async fn list_submissions(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_submissions(self, request).await
    }

    /// 当前用户自己的提交，最新的在前
    pub async fn list_own_submissions(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_own_submissions(self, request).await
    }

    /// 学生修改自己的提交
    pub async fn edit_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        edit: EditSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        edit::edit_submission(self, request, submission_id, edit, None).await
    }

    /// 学生修改自己的提交，可同时替换文件
    pub async fn edit_submission_multipart(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        edit::edit_submission_multipart(self, request, submission_id, payload).await
    }

    /// 教师调整分数并锁定
    pub async fn adjust_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        adjust: AdjustSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        adjust::adjust_submission(self, request, submission_id, adjust).await
    }
}
