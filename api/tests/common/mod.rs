//! Shared test fixtures for route tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;

use bc_api::AppState;
use bc_core::services::verification::{
    CodeRegistry, MessageTemplate, VerificationService, VerificationServiceConfig,
};
use bc_core::RoleId;
use bc_infra::{EmailServiceAdapter, MockEmailService};

pub const UNI_ROLE: u64 = 555;

pub struct TestContext {
    pub state: web::Data<AppState<EmailServiceAdapter>>,
    pub mock: Arc<MockEmailService>,
    pub registry: Arc<CodeRegistry>,
}

/// Build application state around a mock transport
///
/// The template renders the bare code so tests can read it back.
pub fn context(bandwidth: usize, simulate_failure: bool) -> TestContext {
    let config = VerificationServiceConfig {
        code_timeout: Duration::from_secs(300),
        max_attempts: 3,
        bandwidth,
        ..Default::default()
    }
    .with_role("uni.edu", RoleId(UNI_ROLE));

    let mock = Arc::new(MockEmailService::with_options(simulate_failure, false));
    let adapter = Arc::new(EmailServiceAdapter::new(mock.clone(), None));
    let registry = Arc::new(CodeRegistry::new(config));
    let template = MessageTemplate::new("{code}").unwrap();
    let service = Arc::new(VerificationService::new(registry.clone(), adapter, template));

    TestContext {
        state: web::Data::new(AppState::new(service)),
        mock,
        registry,
    }
}

/// Code emailed most recently to `to`
pub fn last_code(mock: &MockEmailService, to: &str) -> String {
    mock.last_message_to(to).unwrap().body
}

pub fn send_email_body(user_id: u64, email: &str) -> serde_json::Value {
    serde_json::json!({
        "user_id": user_id,
        "username": "alice",
        "email": email,
        "roles": []
    })
}

pub fn verify_body(user_id: u64, code: &str) -> serde_json::Value {
    serde_json::json!({ "user_id": user_id, "code": code })
}
