use config::{Config, ConfigError, Environment, File};

use super::AppConfig;

impl AppConfig {
    /// 加载配置
    ///
    /// 优先级（从低到高）：内置默认值、`config.toml`、`config.{APP_ENV}.toml`、
    /// `PLATFORM__*` 环境变量、常用环境变量覆盖。
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // 内置默认值，保证没有配置文件时也能启动
            .set_default("app.system_name", "Grading Platform")?
            .set_default("app.environment", "development")?
            .set_default("app.log_level", "info")?
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000_i64)?
            .set_default("server.unix_socket_path", "")?
            .set_default("server.workers", 0_i64)?
            .set_default("server.max_workers", 16_i64)?
            .set_default("server.timeouts.client_request", 60_000_i64)?
            .set_default("server.timeouts.client_disconnect", 5_000_i64)?
            .set_default("server.timeouts.keep_alive", 30_i64)?
            .set_default("server.limits.max_payload_size", 32 * 1024 * 1024_i64)?
            .set_default("jwt.secret", "")?
            .set_default("jwt.access_token_expiry", 5_i64)?
            .set_default("jwt.refresh_token_expiry", 1_i64)?
            .set_default("database.url", "grading.db")?
            .set_default("database.pool_size", 8_i64)?
            .set_default("database.timeout", 10_i64)?
            .set_default("cors.max_age", 3600_i64)?
            .set_default("upload.media_root", "media")?
            .set_default("upload.media_url", "/media/")?
            .set_default("upload.max_size", 10 * 1024 * 1024_i64)?
            .set_default("grading.endpoint", "http://localhost:11434/api/generate")?
            .set_default("grading.model", "deepseek-coder")?
            .set_default("grading.timeout", 30_i64)?
            // 首先加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖
            .add_source(
                Environment::with_prefix("PLATFORM")
                    .separator("__")
                    .try_parsing(true),
            );

        // 支持从环境变量加载
        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("server.unix_socket_path", std::env::var("UNIX_SOCKET").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("upload.media_root", std::env::var("MEDIA_ROOT").ok())?
            .set_override_option("grading.endpoint", std::env::var("GRADING_ENDPOINT").ok())?
            .set_override_option("grading.model", std::env::var("GRADING_MODEL").ok())?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        // 处理工作线程数
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        if app_config.jwt.secret.is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must be set (JWT_SECRET)".to_string(),
            ));
        }

        Ok(app_config)
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 获取 Unix 套接字路径 (如果配置了)
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}
