//! Email service trait and message type

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::InfrastructureError;

/// Content type used for verification emails
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// A single outgoing email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Optional `From` header; providers may fill in the sending account
    pub from: Option<String>,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub content_type: String,
}

impl EmailMessage {
    /// Create an HTML message
    pub fn html(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            from: None,
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
            content_type: HTML_CONTENT_TYPE.to_string(),
        }
    }

    /// Set the `From` header
    pub fn with_from(mut self, from: Option<String>) -> Self {
        self.from = from;
        self
    }

    /// Reject header values that would split into extra headers
    pub fn validate(&self) -> Result<(), InfrastructureError> {
        let headers = [
            ("From", self.from.as_deref().unwrap_or_default()),
            ("To", self.to.as_str()),
            ("Subject", self.subject.as_str()),
            ("Content-Type", self.content_type.as_str()),
        ];
        for (name, value) in headers {
            if value.contains(['\r', '\n']) {
                return Err(InfrastructureError::Email(format!(
                    "{} header contains a line break",
                    name
                )));
            }
        }
        if self.to.trim().is_empty() {
            return Err(InfrastructureError::Email("Recipient address is empty".to_string()));
        }
        Ok(())
    }

    /// Render the message in RFC 5322 format with CRLF line endings
    pub fn to_rfc5322(&self) -> String {
        let mut out = String::with_capacity(self.body.len() + 256);
        if let Some(from) = &self.from {
            out.push_str(&format!("From: {}\r\n", from));
        }
        out.push_str(&format!("To: {}\r\n", self.to));
        out.push_str(&format!("Subject: {}\r\n", encode_header(&self.subject)));
        out.push_str("MIME-Version: 1.0\r\n");
        out.push_str(&format!("Content-Type: {}\r\n", self.content_type));
        out.push_str("\r\n");
        out.push_str(&self.body.replace("\r\n", "\n").replace('\n', "\r\n"));
        out
    }
}

/// RFC 2047 encoded-word for non-ASCII header values
fn encode_header(value: &str) -> String {
    if value.is_ascii() {
        value.to_string()
    } else {
        format!("=?utf-8?B?{}?=", STANDARD.encode(value))
    }
}

/// Email service trait for sending emails through a provider
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Send a message, returning the provider's message id
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError>;

    /// Name of the provider, for logs
    fn provider_name(&self) -> &str;

    /// Whether the provider is currently usable
    async fn is_available(&self) -> bool {
        true
    }
}
