//! Mock email service for development and tests
//!
//! Messages are logged (recipient masked) and kept in memory instead of
//! being delivered.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing::{debug, info, warn};

use bc_shared::email::{is_valid_email, mask_email};

use super::email_service::{EmailMessage, EmailService};
use crate::InfrastructureError;

/// Email service that records messages instead of sending them
#[derive(Debug, Default)]
pub struct MockEmailService {
    message_count: AtomicUsize,
    simulate_failure: bool,
    log_messages: bool,
    sent: Mutex<Vec<EmailMessage>>,
}

impl MockEmailService {
    /// Create a mock service that logs every message
    pub fn new() -> Self {
        Self::with_options(false, true)
    }

    /// Create a mock service with explicit behavior
    pub fn with_options(simulate_failure: bool, log_messages: bool) -> Self {
        Self {
            simulate_failure,
            log_messages,
            ..Default::default()
        }
    }

    /// Make subsequent sends fail
    pub fn set_simulate_failure(&mut self, simulate_failure: bool) {
        self.simulate_failure = simulate_failure;
    }

    /// Number of messages accepted so far
    pub fn get_message_count(&self) -> usize {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Reset the message counter
    pub fn reset_counter(&self) {
        self.message_count.store(0, Ordering::SeqCst);
    }

    /// Copies of every accepted message
    pub fn sent_messages(&self) -> Vec<EmailMessage> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    /// The most recent message addressed to `to`
    pub fn last_message_to(&self, to: &str) -> Option<EmailMessage> {
        self.sent
            .lock()
            .ok()
            .and_then(|sent| sent.iter().rev().find(|m| m.to == to).cloned())
    }
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        message.validate()?;

        if !is_valid_email(&message.to) {
            return Err(InfrastructureError::Email(format!(
                "Invalid email address: {}",
                mask_email(&message.to)
            )));
        }

        if self.simulate_failure {
            warn!(
                to = %mask_email(&message.to),
                "Mock email service simulating failure"
            );
            return Err(InfrastructureError::Email("Simulated delivery failure".to_string()));
        }

        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;
        let message_id = format!("mock_{}", count);

        if self.log_messages {
            info!(
                to = %mask_email(&message.to),
                subject = %message.subject,
                message_id = %message_id,
                "Mock email accepted"
            );
            // Body carries the code; keep it out of info-level output
            debug!(message_id = %message_id, body = %message.body, "Mock email body");
        }

        if let Ok(mut sent) = self.sent.lock() {
            sent.push(message.clone());
        }

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }

    async fn is_available(&self) -> bool {
        !self.simulate_failure
    }
}
