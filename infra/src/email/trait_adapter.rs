//! Email Service Trait Adapter
//!
//! Bridges any infrastructure [`EmailService`] to the core
//! `EmailServiceTrait` used by the verification service.

use async_trait::async_trait;
use std::sync::Arc;
use bc_core::services::verification::EmailServiceTrait;

use super::email_service::{EmailMessage, EmailService};

/// Adapter that implements the core EmailServiceTrait over a shared transport
pub struct EmailServiceAdapter {
    inner: Arc<dyn EmailService>,
    sender: Option<String>,
}

impl EmailServiceAdapter {
    /// Wrap a transport; `sender` becomes the `From` header when set
    pub fn new(inner: Arc<dyn EmailService>, sender: Option<String>) -> Self {
        Self { inner, sender }
    }

    /// Name of the wrapped provider
    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl EmailServiceTrait for EmailServiceAdapter {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<String, String> {
        let message = EmailMessage::html(to, subject, body).with_from(self.sender.clone());
        self.inner.send_email(&message).await.map_err(|e| e.to_string())
    }
}
