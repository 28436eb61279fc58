//! 测试辅助：临时目录、独立的 SQLite 数据库、multipart 请求体、示例 PDF
//! 以及一个可控的假评分服务

use std::path::Path;
use std::sync::{Arc, Mutex};

use actix_web::{App, HttpResponse, HttpServer, web};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use serde_json::Value;

use crate::config::*;
use crate::services::grading::GradingClient;
use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// 测试结束时自动删除的临时目录
pub struct TestDir(tempfile::TempDir);

impl TestDir {
    pub fn new() -> Self {
        Self(tempfile::tempdir().unwrap())
    }

    pub fn path(&self) -> &Path {
        self.0.path()
    }
}

/// 一个测试用例独享的配置、数据库和媒体目录
pub struct TestContext {
    pub dir: TestDir,
    pub config: AppConfig,
    pub storage: Arc<dyn Storage>,
    pub grader: GradingClient,
}

impl TestContext {
    pub async fn new(grading_endpoint: &str) -> Self {
        let dir = TestDir::new();
        let config = test_config(dir.path(), grading_endpoint);
        let storage: Arc<dyn Storage> =
            Arc::new(SeaOrmStorage::new_async(&config.database).await.unwrap());
        let grader = GradingClient::from_config(&config.grading).unwrap();
        Self {
            dir,
            config,
            storage,
            grader,
        }
    }

    pub fn media_path(&self, relative: &str) -> std::path::PathBuf {
        Path::new(&self.config.upload.media_root).join(relative)
    }
}

fn test_config(dir: &Path, grading_endpoint: &str) -> AppConfig {
    AppConfig {
        app: AppSettings {
            system_name: "Grading Platform (test)".to_string(),
            environment: "test".to_string(),
            log_level: "warn".to_string(),
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            unix_socket_path: String::new(),
            workers: 1,
            max_workers: 1,
            timeouts: TimeoutConfig {
                client_request: 5_000,
                client_disconnect: 1_000,
                keep_alive: 5,
            },
            limits: LimitConfig {
                max_payload_size: 4 * 1024 * 1024,
            },
        },
        jwt: JwtConfig {
            secret: "test-secret-for-unit-tests".to_string(),
            access_token_expiry: 5,
            refresh_token_expiry: 1,
        },
        database: DatabaseConfig {
            url: dir.join("test.db").to_string_lossy().into_owned(),
            pool_size: 1,
            timeout: 5,
        },
        cors: CorsConfig {
            allowed_origins: Vec::new(),
            max_age: 60,
        },
        upload: UploadConfig {
            media_root: dir.join("media").to_string_lossy().into_owned(),
            media_url: "/media/".to_string(),
            max_size: 1024 * 1024,
        },
        grading: GradingConfig {
            endpoint: grading_endpoint.to_string(),
            model: "test-model".to_string(),
            timeout: 5,
        },
    }
}

/// 用 [`TestContext`] 构建完整的 `/api` 服务
macro_rules! test_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($ctx.storage.clone()))
                .app_data(actix_web::web::Data::new($ctx.config.clone()))
                .app_data(actix_web::web::Data::new($ctx.grader.clone()))
                .configure($crate::routes::configure_api_routes),
        )
        .await
    };
}
pub(crate) use test_app;

/// 注册用户并返回 access token
macro_rules! register_and_login {
    ($app:expr, $username:expr, $is_teacher:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/api/register")
            .set_json(serde_json::json!({
                "username": $username,
                "email": format!("{}@example.org", $username),
                "password": $crate::test_support::TEST_PASSWORD,
                "is_teacher": $is_teacher,
            }))
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);

        let req = actix_web::test::TestRequest::post()
            .uri("/api/token")
            .set_json(serde_json::json!({
                "username": $username,
                "password": $crate::test_support::TEST_PASSWORD,
            }))
            .to_request();
        let body: serde_json::Value = actix_web::test::call_and_read_body_json(&$app, req).await;
        body["data"]["access"].as_str().unwrap().to_string()
    }};
}
pub(crate) use register_and_login;

/// 以 multipart/form-data 发送 POST 请求
macro_rules! post_multipart {
    ($app:expr, $uri:expr, $token:expr, $parts:expr) => {{
        let (content_type, body) = $crate::test_support::multipart_body($parts);
        let req = actix_web::test::TestRequest::post()
            .uri($uri)
            .insert_header($crate::test_support::bearer($token))
            .insert_header(("Content-Type", content_type))
            .set_payload(body)
            .to_request();
        actix_web::test::call_service(&$app, req).await
    }};
}
pub(crate) use post_multipart;

/// 以 multipart/form-data 发送 PUT 请求
macro_rules! put_multipart {
    ($app:expr, $uri:expr, $token:expr, $parts:expr) => {{
        let (content_type, body) = $crate::test_support::multipart_body($parts);
        let req = actix_web::test::TestRequest::put()
            .uri($uri)
            .insert_header($crate::test_support::bearer($token))
            .insert_header(("Content-Type", content_type))
            .set_payload(body)
            .to_request();
        actix_web::test::call_service(&$app, req).await
    }};
}
pub(crate) use put_multipart;

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

const BOUNDARY: &str = "----grading-platform-test-boundary";

/// 构造 multipart/form-data 请求体，返回 (Content-Type, body)
pub fn multipart_body(parts: &[Part<'_>]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, filename, data) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/pdf\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

/// 生成一页、只含一行文本的 PDF
pub fn sample_pdf(text: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// 假的生成接口：记录收到的每个请求体
pub struct FakeGenerator {
    pub endpoint: String,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl FakeGenerator {
    /// 目前为止收到的请求体
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

/// 启动一个假的生成接口，对每个请求都返回固定的状态码和 JSON
pub fn spawn_fake_generator(status: u16, reply: Value) -> FakeGenerator {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = requests.clone();
    let server = HttpServer::new(move || {
        let reply = reply.clone();
        let recorded = recorded.clone();
        App::new().route(
            "/api/generate",
            web::post().to(move |body: web::Json<Value>| {
                let reply = reply.clone();
                let recorded = recorded.clone();
                async move {
                    recorded.lock().unwrap().push(body.into_inner());
                    let status = actix_web::http::StatusCode::from_u16(status).unwrap();
                    HttpResponse::build(status).json(reply)
                }
            }),
        )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    FakeGenerator {
        endpoint: format!("http://{addr}/api/generate"),
        requests,
    }
}

/// 返回一个没有任何进程监听的地址
pub fn unreachable_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api/generate")
}
