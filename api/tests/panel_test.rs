mod common;

use actix_web::{http::StatusCode, test};
use serde_json::Value;

use bc_api::create_app;

use common::{context, send_email_body};

#[actix_web::test]
async fn test_create_panel() {
    let ctx = context(10, false);
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/panel")
        .set_json(serde_json::json!({ "channel_id": 987654321 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let data = &body["data"];
    assert_eq!(data["channel_id"], 987654321u64);
    assert!(data["content"].as_str().unwrap().starts_with("**Welcome to Our Server! 🎉**"));
    assert_eq!(
        data["confirmation"]["message"],
        "Verification system has been created in <#987654321>"
    );
    assert_eq!(data["confirmation"]["ephemeral"], false);

    let buttons = data["buttons"].as_array().unwrap();
    assert_eq!(buttons.len(), 2);
    assert_eq!(buttons[0]["label"], "Send Email");
    assert_eq!(buttons[0]["emoji"], "📧");
    assert_eq!(buttons[1]["label"], "Verify Code");
    assert_eq!(buttons[1]["emoji"], "✅");
}

#[actix_web::test]
async fn test_create_panel_requires_channel() {
    let ctx = context(10, false);
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/panel")
        .set_json(serde_json::json!({ "channel_id": 0 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_health_reports_pending_count() {
    let ctx = context(10, false);
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/send-email")
        .set_json(send_email_body(1, "a@uni.edu"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["pending_verifications"], 1);
}

#[actix_web::test]
async fn test_commands_listing_and_not_found() {
    let ctx = context(10, false);
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/api/v1/commands").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let paths: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["path"].as_str().unwrap())
        .collect();
    assert_eq!(
        paths,
        vec![
            "/api/v1/verification/panel",
            "/api/v1/verification/send-email",
            "/api/v1/verification/verify-code",
        ]
    );

    let req = test::TestRequest::get().uri("/api/v1/unknown").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
