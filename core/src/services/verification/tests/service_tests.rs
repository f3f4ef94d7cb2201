//! Unit tests for verification service

use std::sync::Arc;

use crate::domain::value_objects::{UserId, VerificationCode};
use crate::errors::VerificationError;
use crate::services::verification::{
    CodeRegistry, MessageTemplate, SendCodeRequest, VerificationService,
};

use super::mocks::{test_config, MockEmailService, UNI_ROLE};

fn build_service(should_fail: bool) -> (VerificationService<MockEmailService>, Arc<MockEmailService>) {
    let registry = Arc::new(CodeRegistry::new(test_config()));
    let email_service = Arc::new(MockEmailService::new(should_fail));
    let template = MessageTemplate::new("Hi {username}, your code is {code}").unwrap();
    let service = VerificationService::new(registry, email_service.clone(), template);
    (service, email_service)
}

fn request(user_id: u64, email: &str) -> SendCodeRequest {
    SendCodeRequest {
        user_id: UserId(user_id),
        username: "alice".to_string(),
        email: email.to_string(),
        held_roles: Vec::new(),
    }
}

#[tokio::test(start_paused = true)]
async fn test_send_verification_email_success() {
    let (service, email_service) = build_service(false);

    let result = service
        .send_verification_email(request(1, "alice@uni.edu"))
        .await
        .unwrap();
    assert_eq!(result.message_id, "mock-msg-1");

    let entry = service.registry().snapshot(UserId(1)).await.unwrap();
    assert_eq!(entry.id, result.id);

    let sent = email_service.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "alice@uni.edu");
    assert_eq!(sent[0].subject, "Discord Verification Code");
    assert_eq!(
        sent[0].body,
        format!("Hi alice, your code is {}", entry.code)
    );
}

#[tokio::test(start_paused = true)]
async fn test_emailed_code_grants_role() {
    let (service, email_service) = build_service(false);

    service
        .send_verification_email(request(1, "alice@uni.edu"))
        .await
        .unwrap();

    let body = &email_service.sent()[0].body;
    let code: VerificationCode = body
        .rsplit(' ')
        .next()
        .unwrap()
        .parse()
        .unwrap();

    let granted = service.verify_code(UserId(1), code).await.unwrap();
    assert_eq!(granted.role, UNI_ROLE);
    assert_eq!(
        service.verify_code(UserId(1), code).await,
        Err(VerificationError::NoPendingVerification)
    );
}

#[tokio::test(start_paused = true)]
async fn test_delivery_failure_revokes_code() {
    let (service, email_service) = build_service(true);

    let result = service.send_verification_email(request(1, "alice@uni.edu")).await;
    assert_eq!(
        result.unwrap_err(),
        VerificationError::DeliveryFailed {
            reason: "Email service error".to_string()
        }
    );

    assert!(email_service.sent().is_empty());
    assert!(!service.registry().contains(UserId(1)).await);
    assert_eq!(service.registry().pending_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn test_rejected_request_sends_nothing() {
    let (service, email_service) = build_service(false);

    assert_eq!(
        service
            .send_verification_email(request(1, "alice@bad"))
            .await
            .unwrap_err(),
        VerificationError::InvalidEmail
    );
    assert!(matches!(
        service
            .send_verification_email(request(1, "alice@other.org"))
            .await
            .unwrap_err(),
        VerificationError::UnrecognizedDomain { .. }
    ));

    let mut verified = request(2, "bob@uni.edu");
    verified.held_roles = vec![UNI_ROLE];
    assert_eq!(
        service.send_verification_email(verified).await.unwrap_err(),
        VerificationError::AlreadyVerified
    );

    assert!(email_service.sent().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_resend_invalidates_emailed_code() {
    let (service, email_service) = build_service(false);

    service.send_verification_email(request(1, "alice@uni.edu")).await.unwrap();
    service.send_verification_email(request(1, "alice@uni.edu")).await.unwrap();

    let sent = email_service.sent();
    assert_eq!(sent.len(), 2);

    let current = service.registry().snapshot(UserId(1)).await.unwrap();
    assert!(sent[1].body.ends_with(&current.code.to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_username_is_escaped_in_body() {
    let (service, email_service) = build_service(false);

    let mut req = request(1, "alice@uni.edu");
    req.username = "<b>alice</b>".to_string();
    service.send_verification_email(req).await.unwrap();

    assert!(email_service.sent()[0].body.starts_with("Hi &lt;b&gt;alice&lt;/b&gt;,"));
}
