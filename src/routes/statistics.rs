use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequireRole};
use crate::services::StatisticsService;

static STATISTICS_SERVICE: Lazy<StatisticsService> = Lazy::new(StatisticsService::new_lazy);

pub async fn teacher_statistics(req: HttpRequest) -> ActixResult<HttpResponse> {
    STATISTICS_SERVICE.teacher_statistics(&req).await
}

pub fn configure_statistics_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/teacher-statistics")
            .wrap(RequireRole::teacher())
            .wrap(RequireJWT)
            .route(web::get().to(teacher_statistics)),
    );
}
