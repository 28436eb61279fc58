use actix_cors::Cors;
use actix_web::middleware::{Compress, DefaultHeaders, NormalizePath};
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::{debug, warn};

// 从 lib.rs 导入模块
use rust_grading_platform::config::AppConfig;
use rust_grading_platform::routes;
use rust_grading_platform::runtime::lifetime;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    // 记录程序启动时间
    let start_datetime = chrono::Utc::now();

    // 启动前预处理 //

    setup_panic!();
    let config = AppConfig::load()
        .map_err(|e| std::io::Error::other(format!("Failed to load configuration: {e}")))?;

    // 初始化日志
    let stdout_log = std::io::stdout();
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(stdout_log);
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    // 打印信息
    warn!(
        "Starting pre-startup processing...
        Project: {}
        Version: {}
        System: {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.app.system_name
    );

    let startup = lifetime::startup::prepare_server_startup(&config)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let storage = startup.storage.clone();
    let grader = web::Data::new(startup.grader);
    let app_config = web::Data::new(config.clone());

    // 输出预处理时间
    debug!(
        "Pre-startup processing completed in {} ms",
        chrono::Utc::now()
            .signed_duration_since(start_datetime)
            .num_milliseconds()
    );

    // 预处理完成 //

    warn!("Using {} CPU cores for the server", config.server.workers);

    let cors_config = config.cors.clone();
    let keep_alive = config.server.timeouts.keep_alive;
    let max_payload_size = config.server.limits.max_payload_size;

    // Start the HTTP server
    let server = HttpServer::new(move || {
        // 未配置来源时允许任意来源
        let cors = if cors_config.allowed_origins.is_empty() {
            Cors::default().allow_any_origin()
        } else {
            cors_config
                .allowed_origins
                .iter()
                .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        };

        App::new()
            .wrap(
                cors.allow_any_method()
                    .allow_any_header()
                    .max_age(cors_config.max_age),
            )
            .wrap(Compress::default())
            .wrap(NormalizePath::trim())
            .wrap(
                DefaultHeaders::new()
                    .add(("Connection", "keep-alive"))
                    .add((
                        "Keep-Alive",
                        format!("timeout={keep_alive}, max=1000"),
                    ))
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .app_data(web::Data::new(storage.clone()))
            .app_data(app_config.clone())
            .app_data(grader.clone())
            .app_data(web::PayloadConfig::new(max_payload_size)) // 设置最大请求体大小
            .configure(routes::configure_api_routes)
    })
    .keep_alive(std::time::Duration::from_secs(keep_alive)) // 启用长连接
    .client_request_timeout(std::time::Duration::from_millis(
        config.server.timeouts.client_request,
    )) // 客户端超时
    .client_disconnect_timeout(std::time::Duration::from_millis(
        config.server.timeouts.client_disconnect,
    )) // 断连超时
    .workers(config.server.workers);

    let server = {
        #[cfg(unix)]
        {
            if let Some(socket_path) = config.unix_socket_path() {
                warn!("Starting server on Unix socket: {}", socket_path);
                if std::path::Path::new(socket_path).exists() {
                    std::fs::remove_file(socket_path)?;
                }
                server.bind_uds(socket_path)?
            } else {
                let bind_address = config.server_bind_address();
                warn!("Starting server at http://{}", bind_address);
                server.bind(bind_address)?
            }
        }

        #[cfg(not(unix))]
        {
            let bind_address = config.server_bind_address();
            warn!("Starting server at http://{}", bind_address);
            server.bind(bind_address)?
        }
    }
    .run();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown() => {
            warn!("Graceful shutdown: all tasks completed");
        }
    }

    Ok(())
}
