pub mod teacher;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::storage::Storage;

pub struct StatisticsService {
    storage: Option<Arc<dyn Storage>>,
}

impl StatisticsService {
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

    /// 每个练习的平均分与提交数
    pub async fn teacher_statistics(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        teacher::teacher_statistics(self, request).await
    }
}
