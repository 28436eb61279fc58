use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use serde_json::{Value, json};

use crate::test_support::{TestContext, bearer, register_and_login, test_app, unreachable_endpoint};

#[actix_web::test]
async fn test_register_requires_all_fields() {
    let ctx = TestContext::new(&unreachable_endpoint()).await;
    let app = test_app!(ctx);

    let req = actix_test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({ "username": "alice", "password": "long-enough-pw" }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_register_rejects_weak_password_and_duplicates() {
    let ctx = TestContext::new(&unreachable_endpoint()).await;
    let app = test_app!(ctx);

    let req = actix_test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({ "username": "bob", "email": "bob@example.org", "password": "short" }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    register_and_login!(app, "bob", false);

    let req = actix_test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({
            "username": "bob",
            "email": "other@example.org",
            "password": "long-enough-pw",
        }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = actix_test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({
            "username": "bobby",
            "email": "bob@example.org",
            "password": "long-enough-pw",
        }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_login_with_wrong_password() {
    let ctx = TestContext::new(&unreachable_endpoint()).await;
    let app = test_app!(ctx);
    register_and_login!(app, "carol", false);

    let req = actix_test::TestRequest::post()
        .uri("/api/token")
        .set_json(json!({ "username": "carol", "password": "not-the-password" }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_current_user_and_refresh() {
    let ctx = TestContext::new(&unreachable_endpoint()).await;
    let app = test_app!(ctx);
    let access = register_and_login!(app, "dave", true);

    let req = actix_test::TestRequest::get()
        .uri("/api/user")
        .insert_header(bearer(&access))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["username"], "dave");
    assert_eq!(body["data"]["email"], "dave@example.org");
    assert_eq!(body["data"]["is_teacher"], true);

    let req = actix_test::TestRequest::post()
        .uri("/api/token")
        .set_json(json!({ "username": "dave", "password": crate::test_support::TEST_PASSWORD }))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    let refresh = body["data"]["refresh"].as_str().unwrap().to_string();

    let req = actix_test::TestRequest::post()
        .uri("/api/token/refresh")
        .set_json(json!({ "refresh": refresh }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // access token 不能当 refresh token 用
    let req = actix_test::TestRequest::post()
        .uri("/api/token/refresh")
        .set_json(json!({ "refresh": access }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_protected_route_without_token() {
    let ctx = TestContext::new(&unreachable_endpoint()).await;
    let app = test_app!(ctx);

    let req = actix_test::TestRequest::get().uri("/api/user").to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = actix_test::TestRequest::get()
        .uri("/api/user")
        .insert_header(bearer("garbage"))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
