//! # Infrastructure Layer
//!
//! Concrete implementations of the external services the Bouncer core
//! depends on. Today that is email delivery of verification codes.
//!
//! ## Architecture
//!
//! - **Email**: the [`email::EmailService`] trait with a mock transport for
//!   development and a Gmail API transport for production, plus an adapter
//!   implementing the core `EmailServiceTrait`.

/// Email service module - verification email transports
pub mod email;

pub use email::{
    create_email_service, EmailMessage, EmailService, EmailServiceAdapter, GmailConfig,
    GmailEmailService, MockEmailService,
};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email service error
    #[error("Email service error: {0}")]
    Email(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}
