//! Email transport configuration

use serde::{Deserialize, Serialize};
use std::env;

use super::ConfigError;

/// Supported email providers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Log messages instead of sending them
    #[default]
    Mock,
    /// Gmail API authenticated with an OAuth refresh token
    Gmail,
}

impl std::fmt::Display for EmailProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmailProvider::Mock => write!(f, "mock"),
            EmailProvider::Gmail => write!(f, "gmail"),
        }
    }
}

/// Email service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Provider used to deliver verification emails
    #[serde(default)]
    pub provider: EmailProvider,

    /// Optional `From` address (Gmail uses the authenticated account when unset)
    #[serde(default)]
    pub sender: Option<String>,

    /// OAuth client id
    #[serde(default)]
    pub client_id: Option<String>,

    /// OAuth client secret
    #[serde(default)]
    pub client_secret: Option<String>,

    /// OAuth refresh token
    #[serde(default)]
    pub refresh_token: Option<String>,

    /// Maximum delivery attempts for retryable failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial retry delay in milliseconds (doubled after each failure)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Timeout for API requests in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::default(),
            sender: None,
            client_id: None,
            client_secret: None,
            refresh_token: None,
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl EmailConfig {
    /// Fill missing credentials from `GOOGLE_CLIENT_ID`, `GOOGLE_CLIENT_SECRET`
    /// and `GOOGLE_REFRESH_TOKEN`
    pub fn apply_google_env(&mut self) {
        fill_from_env(&mut self.client_id, "GOOGLE_CLIENT_ID");
        fill_from_env(&mut self.client_secret, "GOOGLE_CLIENT_SECRET");
        fill_from_env(&mut self.refresh_token, "GOOGLE_REFRESH_TOKEN");
    }

    /// Whether all OAuth credentials are present
    pub fn has_credentials(&self) -> bool {
        [&self.client_id, &self.client_secret, &self.refresh_token]
            .iter()
            .all(|value| value.as_deref().is_some_and(|v| !v.is_empty()))
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.provider == EmailProvider::Gmail && !self.has_credentials() {
            return Err(ConfigError::Invalid(
                "gmail provider requires client_id, client_secret and refresh_token".to_string(),
            ));
        }
        if self.max_retries == 0 {
            return Err(ConfigError::Invalid("email.max_retries must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn fill_from_env(slot: &mut Option<String>, key: &str) {
    if slot.is_none() {
        *slot = env::var(key).ok().filter(|value| !value.is_empty());
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    500
}

fn default_request_timeout_secs() -> u64 {
    30
}
