use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use serde_json::{Value, json};

use super::validate_title;
use crate::test_support::{
    Part, TestContext, bearer, post_multipart, put_multipart, register_and_login, sample_pdf,
    test_app, unreachable_endpoint,
};

#[test]
fn test_validate_title() {
    assert_eq!(validate_title("  Limits  "), Ok("Limits"));
    assert!(validate_title("   ").is_err());
    assert!(validate_title(&"a".repeat(201)).is_err());
    assert!(validate_title(&"é".repeat(200)).is_ok());
}

#[actix_web::test]
async fn test_teacher_creates_exercise_with_correction() {
    let ctx = TestContext::new(&unreachable_endpoint()).await;
    let app = test_app!(ctx);
    let teacher = register_and_login!(app, "prof", true);
    let student = register_and_login!(app, "eve", false);

    let statement = sample_pdf("Compute the integral of 2x");
    let correction = sample_pdf("The integral of 2x is x squared");
    let resp = post_multipart!(
        app,
        "/api/exercises/add",
        &teacher,
        &[
            Part::Text("title", "Integrals"),
            Part::File("file", "statement.pdf", &statement),
            Part::File("correction_models", "correction.pdf", &correction),
        ]
    );
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(resp).await;
    let id = body["data"]["id"].as_i64().unwrap();

    let stored = ctx.storage.get_exercise_by_id(id).await.unwrap().unwrap();
    assert!(stored.file.as_deref().unwrap().starts_with("exercises/"));
    assert!(
        stored
            .correction_file
            .as_deref()
            .unwrap()
            .starts_with("corrections/")
    );
    assert!(ctx.media_path(stored.file.as_deref().unwrap()).exists());

    // 教师能看到参考答案链接
    let req = actix_test::TestRequest::get()
        .uri("/api/exercises")
        .insert_header(bearer(&teacher))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Integrals");
    assert!(items[0]["correction_models"].as_str().unwrap().contains("/media/corrections/"));

    // 学生看不到
    let req = actix_test::TestRequest::get()
        .uri("/api/exercises")
        .insert_header(bearer(&student))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert!(items[0]["file"].as_str().unwrap().contains("/media/exercises/"));
    assert!(items[0]["correction_models"].is_null());
}

#[actix_web::test]
async fn test_create_exercise_rejects_non_pdf() {
    let ctx = TestContext::new(&unreachable_endpoint()).await;
    let app = test_app!(ctx);
    let teacher = register_and_login!(app, "prof", true);

    let resp = post_multipart!(
        app,
        "/api/exercises/add",
        &teacher,
        &[
            Part::Text("title", "Fake"),
            Part::File("file", "statement.pdf", b"just some text pretending"),
        ]
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = post_multipart!(
        app,
        "/api/exercises/add",
        &teacher,
        &[Part::Text("title", "No file")]
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert!(ctx.storage.list_exercises(None).await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_student_cannot_create_exercise() {
    let ctx = TestContext::new(&unreachable_endpoint()).await;
    let app = test_app!(ctx);
    let student = register_and_login!(app, "eve", false);

    let statement = sample_pdf("Statement");
    let resp = post_multipart!(
        app,
        "/api/exercises/add",
        &student,
        &[
            Part::Text("title", "Sneaky"),
            Part::File("file", "statement.pdf", &statement),
        ]
    );
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_detail_and_edit_are_owner_only() {
    let ctx = TestContext::new(&unreachable_endpoint()).await;
    let app = test_app!(ctx);
    let owner = register_and_login!(app, "prof", true);
    let other = register_and_login!(app, "colleague", true);

    let statement = sample_pdf("Statement");
    let resp = post_multipart!(
        app,
        "/api/exercises/add",
        &owner,
        &[
            Part::Text("title", "Sequences"),
            Part::File("file", "statement.pdf", &statement),
        ]
    );
    let body: Value = actix_test::read_body_json(resp).await;
    let id = body["data"]["id"].as_i64().unwrap();

    let req = actix_test::TestRequest::get()
        .uri(&format!("/api/exercises/{id}"))
        .insert_header(bearer(&other))
        .to_request();
    assert_eq!(actix_test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = actix_test::TestRequest::put()
        .uri(&format!("/api/exercises/{id}/edit"))
        .insert_header(bearer(&other))
        .set_json(json!({ "title": "Hijacked" }))
        .to_request();
    assert_eq!(actix_test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = actix_test::TestRequest::put()
        .uri(&format!("/api/exercises/{id}/edit"))
        .insert_header(bearer(&owner))
        .set_json(json!({ "title": "  Series  " }))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["title"], "Series");

    let req = actix_test::TestRequest::get()
        .uri(&format!("/api/exercises/{id}"))
        .insert_header(bearer(&owner))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["id"], id);
    assert_eq!(body["data"]["title"], "Series");

    let req = actix_test::TestRequest::put()
        .uri("/api/exercises/9999/edit")
        .insert_header(bearer(&owner))
        .set_json(json!({ "title": "Ghost" }))
        .to_request();
    assert_eq!(actix_test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_teacher_exercises_only_lists_own() {
    let ctx = TestContext::new(&unreachable_endpoint()).await;
    let app = test_app!(ctx);
    let owner = register_and_login!(app, "prof", true);
    let other = register_and_login!(app, "colleague", true);

    let statement = sample_pdf("Statement");
    for (token, title) in [(&owner, "Mine"), (&other, "Theirs")] {
        let resp = post_multipart!(
            app,
            "/api/exercises/add",
            token,
            &[
                Part::Text("title", title),
                Part::File("file", "statement.pdf", &statement),
            ]
        );
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = actix_test::TestRequest::get()
        .uri("/api/teacher-exercises")
        .insert_header(bearer(&owner))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Mine");
    assert!(items[0]["created_at"].is_string());
}

#[actix_web::test]
async fn test_submissions_of_missing_exercise() {
    let ctx = TestContext::new(&unreachable_endpoint()).await;
    let app = test_app!(ctx);
    let teacher = register_and_login!(app, "prof", true);

    let req = actix_test::TestRequest::get()
        .uri("/api/exercises/42/submissions")
        .insert_header(bearer(&teacher))
        .to_request();
    assert_eq!(actix_test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_edit_replaces_exercise_file() {
    let ctx = TestContext::new(&unreachable_endpoint()).await;
    let app = test_app!(ctx);
    let owner = register_and_login!(app, "prof", true);
    let other = register_and_login!(app, "colleague", true);

    let statement = sample_pdf("First statement");
    let resp = post_multipart!(
        app,
        "/api/exercises/add",
        &owner,
        &[
            Part::Text("title", "Sequences"),
            Part::File("file", "statement.pdf", &statement),
        ]
    );
    let body: Value = actix_test::read_body_json(resp).await;
    let id = body["data"]["id"].as_i64().unwrap();
    let old_file = ctx.storage.get_exercise_by_id(id).await.unwrap().unwrap().file.unwrap();
    let uri = format!("/api/exercises/{id}/edit");

    // 内容不是 PDF，原文件保持不变
    let resp = put_multipart!(
        app,
        &uri,
        &owner,
        &[Part::File("file", "statement.pdf", b"just some notes")]
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let stored = ctx.storage.get_exercise_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.file.as_deref(), Some(old_file.as_str()));

    let revised = sample_pdf("Revised statement");
    let resp = put_multipart!(
        app,
        &uri,
        &other,
        &[Part::File("file", "statement.pdf", &revised)]
    );
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = put_multipart!(
        app,
        &uri,
        &owner,
        &[
            Part::Text("title", "Series"),
            Part::File("file", "statement.pdf", &revised),
        ]
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["data"]["title"], "Series");
    assert!(body["data"]["file"].as_str().unwrap().contains("/media/exercises/"));

    let new_file = ctx.storage.get_exercise_by_id(id).await.unwrap().unwrap().file.unwrap();
    assert_ne!(new_file, old_file);
    assert!(new_file.starts_with("exercises/"));
    assert_eq!(std::fs::read(ctx.media_path(&new_file)).unwrap(), revised);
    assert!(!ctx.media_path(&old_file).exists());

    // 只改标题时文件不动
    let resp = put_multipart!(app, &uri, &owner, &[Part::Text("title", "Limits")]);
    assert_eq!(resp.status(), StatusCode::OK);
    let stored = ctx.storage.get_exercise_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Limits");
    assert_eq!(stored.file.as_deref(), Some(new_file.as_str()));
    assert!(ctx.media_path(&new_file).exists());
}

#[actix_web::test]
async fn test_upload_over_configured_limit_is_rejected() {
    let ctx = TestContext::new(&unreachable_endpoint()).await;
    let app = test_app!(ctx);
    let teacher = register_and_login!(app, "prof", true);

    // 配置上限为 1 MB
    let mut oversized = b"%PDF-1.4\n".to_vec();
    oversized.resize(2 * 1024 * 1024, b'0');
    let resp = post_multipart!(
        app,
        "/api/exercises/add",
        &teacher,
        &[
            Part::Text("title", "Huge"),
            Part::File("file", "statement.pdf", &oversized),
        ]
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["code"], 1003);
    assert!(body["message"].as_str().unwrap().contains("max 1 MB"));
    assert!(ctx.storage.list_exercises(None).await.unwrap().is_empty());
}
