//! Unit tests for mock email service

use crate::email::{EmailMessage, EmailService, MockEmailService};
use crate::InfrastructureError;

fn message(to: &str) -> EmailMessage {
    EmailMessage::html(to, "Discord Verification Code", "<b>123456</b>")
}

#[tokio::test]
async fn test_mock_email_send_success() {
    let service = MockEmailService::with_options(false, false);
    let result = service.send_email(&message("a@uni.edu")).await;

    let message_id = result.unwrap();
    assert!(message_id.starts_with("mock_"));
    assert_eq!(service.get_message_count(), 1);
    assert_eq!(service.last_message_to("a@uni.edu"), Some(message("a@uni.edu")));
}

#[tokio::test]
async fn test_mock_email_invalid_address() {
    let service = MockEmailService::new();
    let result = service.send_email(&message("not-an-address")).await;

    if let Err(InfrastructureError::Email(msg)) = result {
        assert!(msg.contains("Invalid email address"));
    } else {
        panic!("Expected Email error");
    }
    assert_eq!(service.get_message_count(), 0);
}

#[tokio::test]
async fn test_mock_email_simulate_failure() {
    let mut service = MockEmailService::new();
    service.set_simulate_failure(true);

    let result = service.send_email(&message("a@uni.edu")).await;
    assert!(result.is_err());
    assert!(!service.is_available().await);
    assert!(service.sent_messages().is_empty());
}

#[tokio::test]
async fn test_mock_email_counter() {
    let service = MockEmailService::new();

    for i in 1..=3 {
        let _ = service.send_email(&message(&format!("user{}@uni.edu", i))).await;
        assert_eq!(service.get_message_count(), i);
    }
    assert_eq!(service.sent_messages().len(), 3);

    service.reset_counter();
    assert_eq!(service.get_message_count(), 0);
}

#[test]
fn test_provider_name() {
    assert_eq!(MockEmailService::new().provider_name(), "Mock");
}
