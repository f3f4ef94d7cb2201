//! Traits for email transport integration

use async_trait::async_trait;

/// Trait for email service integration
#[async_trait]
pub trait EmailServiceTrait: Send + Sync {
    /// Send an HTML email, returning the provider's message id
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<String, String>;
}
