//! Email Service Module
//!
//! This module provides email transports for sending verification codes.
//! It includes a Gmail API implementation for production and a mock
//! implementation for development.
//!
//! ## Features
//!
//! - **Email Service Trait**: Common interface for all email providers
//! - **Mock Implementation**: Log output and in-memory capture
//! - **Gmail Support**: Gmail API with OAuth refresh-token authentication
//! - **Security**: Address masking in logs, header injection checks

pub mod email_service;
pub mod gmail;
pub mod mock_email;
pub mod trait_adapter;

pub use bc_shared::email::{is_valid_email, mask_email};
pub use email_service::{EmailMessage, EmailService, HTML_CONTENT_TYPE};
pub use gmail::{GmailConfig, GmailEmailService};
pub use mock_email::MockEmailService;
pub use trait_adapter::EmailServiceAdapter;

use bc_shared::{EmailConfig, EmailProvider};

use crate::InfrastructureError;

#[cfg(test)]
mod tests;

/// Create an email service based on configuration
///
/// # Arguments
///
/// * `config` - Email configuration containing provider settings
///
/// # Returns
///
/// A boxed email service implementation, or a configuration error when the
/// selected provider cannot be initialized
pub fn create_email_service(config: &EmailConfig) -> Result<Box<dyn EmailService>, InfrastructureError> {
    match config.provider {
        EmailProvider::Mock => {
            tracing::warn!(
                provider = %config.provider,
                "Using mock email service; verification emails are only logged"
            );
            Ok(Box::new(MockEmailService::new()))
        }
        EmailProvider::Gmail => {
            let gmail_config = GmailConfig::from_email_config(config)?;
            let service = GmailEmailService::new(gmail_config)?;
            Ok(Box::new(service))
        }
    }
}
