use crate::config::AppConfig;
use crate::errors::{PlatformError, Result};
use crate::services::grading::GradingClient;
use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};
use std::sync::Arc;
use tracing::{info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub grader: GradingClient,
}

/// 准备服务器启动的上下文
/// 包括 TLS 提供者、存储（含迁移）、媒体目录和评分客户端
pub async fn prepare_server_startup(config: &AppConfig) -> Result<StartupContext> {
    // 重复安装时返回 Err，忽略即可
    let _ = rustls::crypto::ring::default_provider().install_default();

    let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::new_async(&config.database).await?);
    warn!("Storage backend initialized and migrations completed");

    std::fs::create_dir_all(&config.upload.media_root).map_err(|e| {
        PlatformError::file_operation(format!(
            "Cannot create media root {}: {e}",
            config.upload.media_root
        ))
    })?;
    info!("Media files stored under {}", config.upload.media_root);

    let grader = GradingClient::from_config(&config.grading)?;
    info!(
        "Automatic grading via {} (model: {}, timeout: {}s)",
        config.grading.endpoint, config.grading.model, config.grading.timeout
    );

    Ok(StartupContext { storage, grader })
}
