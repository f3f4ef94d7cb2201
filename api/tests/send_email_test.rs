mod common;

use actix_web::{http::StatusCode, test};
use serde_json::Value;

use bc_api::create_app;
use bc_core::UserId;

use common::{context, send_email_body, UNI_ROLE};

#[actix_web::test]
async fn test_send_email_success() {
    let ctx = context(10, false);
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/send-email")
        .set_json(send_email_body(1, "alice@uni.edu"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["message"], "Verification email has been sent!");
    assert_eq!(body["data"]["ephemeral"], true);
    assert!(body["data"].get("grant_role").is_none());
    assert!(body["request_id"].is_string());

    let sent = ctx.mock.last_message_to("alice@uni.edu").unwrap();
    assert_eq!(sent.subject, "Discord Verification Code");
    assert_eq!(sent.body.len(), 6);
    assert!(ctx.registry.contains(UserId(1)).await);
}

#[actix_web::test]
async fn test_send_email_rejections() {
    let ctx = context(10, false);
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let cases = [
        (send_email_body(1, "x@bad"), StatusCode::BAD_REQUEST, "INVALID_EMAIL", "Please enter a valid email address."),
        (send_email_body(1, "a@other.org"), StatusCode::BAD_REQUEST, "UNRECOGNIZED_DOMAIN", "Email domain is not recognized."),
        (
            serde_json::json!({
                "user_id": 1,
                "username": "alice",
                "email": "alice@uni.edu",
                "roles": [UNI_ROLE]
            }),
            StatusCode::CONFLICT,
            "ALREADY_VERIFIED",
            "You are already authenticated.",
        ),
    ];

    for (payload, status, code, message) in cases {
        let req = test::TestRequest::post()
            .uri("/api/v1/verification/send-email")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), status);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], code);
        assert_eq!(body["data"]["message"], message);
        assert_eq!(body["data"]["ephemeral"], true);
    }

    assert_eq!(ctx.mock.get_message_count(), 0);
}

#[actix_web::test]
async fn test_send_email_capacity_exceeded() {
    let ctx = context(1, false);
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let first = test::TestRequest::post()
        .uri("/api/v1/verification/send-email")
        .set_json(send_email_body(1, "a@uni.edu"))
        .to_request();
    assert_eq!(test::call_service(&app, first).await.status(), StatusCode::OK);

    let second = test::TestRequest::post()
        .uri("/api/v1/verification/send-email")
        .set_json(send_email_body(2, "b@uni.edu"))
        .to_request();
    let resp = test::call_service(&app, second).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["data"]["message"],
        "Max verification codes reached, please try again in a few minutes."
    );
}

#[actix_web::test]
async fn test_send_email_delivery_failure() {
    let ctx = context(10, true);
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/send-email")
        .set_json(send_email_body(1, "alice@uni.edu"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "DELIVERY_FAILED");
    assert!(!ctx.registry.contains(UserId(1)).await);
}

#[actix_web::test]
async fn test_send_email_invalid_payload() {
    let ctx = context(10, false);
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/send-email")
        .set_json(serde_json::json!({ "user_id": 1, "username": "", "email": "a@uni.edu" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/send-email")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");
}
