//! Gmail Email Service Implementation
//!
//! Sends verification emails through the Gmail REST API. Requests are
//! authorized with an access token obtained from a long-lived OAuth refresh
//! token; the access token is cached until shortly before it expires.
//!
//! ## Features
//!
//! - OAuth refresh-token exchange with token caching
//! - Automatic retry with exponential backoff on 429 and 5xx responses
//! - Immediate failure on other client errors
//! - Security: recipient masking in logs

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use bc_shared::email::mask_email;
use bc_shared::EmailConfig;

use super::email_service::{EmailMessage, EmailService};
use crate::InfrastructureError;

/// OAuth token endpoint
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
/// Gmail API base URL
pub const GMAIL_API_BASE_URL: &str = "https://gmail.googleapis.com";

/// Access tokens are refreshed this long before they expire
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Upper bound on the lifetime reported by the token endpoint
const MAX_TOKEN_LIFETIME_SECS: u64 = 24 * 60 * 60;

/// Gmail email service configuration
#[derive(Debug, Clone)]
pub struct GmailConfig {
    /// OAuth client id
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// OAuth refresh token for the sending account
    pub refresh_token: String,
    /// Optional `From` header
    pub sender: Option<String>,
    /// Maximum attempts for retryable failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
    /// Token endpoint
    pub token_url: String,
    /// API base URL
    pub api_base_url: String,
}

impl GmailConfig {
    /// Build from the application's email configuration
    pub fn from_email_config(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let required = |value: &Option<String>, name: &str| {
            value
                .clone()
                .filter(|v| !v.is_empty())
                .ok_or_else(|| InfrastructureError::Config(format!("{} not set", name)))
        };

        Ok(Self {
            client_id: required(&config.client_id, "GOOGLE_CLIENT_ID")?,
            client_secret: required(&config.client_secret, "GOOGLE_CLIENT_SECRET")?,
            refresh_token: required(&config.refresh_token, "GOOGLE_REFRESH_TOKEN")?,
            sender: config.sender.clone(),
            max_retries: config.max_retries.max(1),
            retry_delay_ms: config.retry_delay_ms,
            request_timeout_secs: config.request_timeout_secs,
            token_url: GOOGLE_TOKEN_URL.to_string(),
            api_base_url: GMAIL_API_BASE_URL.to_string(),
        })
    }

    fn send_url(&self) -> String {
        format!(
            "{}/gmail/v1/users/me/messages/send",
            self.api_base_url.trim_end_matches('/')
        )
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self, now: Instant) -> bool {
        now + TOKEN_REFRESH_MARGIN < self.expires_at
    }
}

/// Outcome of one send attempt
enum AttemptError {
    /// Worth retrying after a delay
    Retryable(InfrastructureError),
    /// Access token rejected; refresh it and retry
    Unauthorized,
    /// Give up immediately
    Fatal(InfrastructureError),
}

/// Gmail email service implementation
pub struct GmailEmailService {
    client: reqwest::Client,
    config: GmailConfig,
    token: Mutex<Option<CachedToken>>,
}

impl GmailEmailService {
    /// Create a new Gmail email service
    pub fn new(config: GmailConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            sender = %config.sender.as_deref().map(mask_email).unwrap_or_else(|| "me".to_string()),
            "Gmail email service initialized"
        );

        Ok(Self {
            client,
            config,
            token: Mutex::new(None),
        })
    }

    /// Base64url encoding of the RFC 5322 message, as the API expects
    pub fn encode_raw(message: &EmailMessage) -> String {
        URL_SAFE.encode(message.to_rfc5322())
    }

    /// Return a cached access token or exchange the refresh token for one
    ///
    /// A client error from the token endpoint (other than 429) means the
    /// credentials themselves were rejected and is not retried.
    async fn access_token(&self) -> Result<String, AttemptError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(Instant::now())) {
            return Ok(token.access_token.clone());
        }

        debug!("Refreshing Gmail access token");
        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("refresh_token", self.config.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];
        let response = self
            .client
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| AttemptError::Retryable(e.into()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, "Gmail token refresh rejected");
            let err = InfrastructureError::Email(format!(
                "Token refresh failed with status {}: {}",
                status, body
            ));
            let rejected = status.is_client_error() && status != reqwest::StatusCode::TOO_MANY_REQUESTS;
            return Err(if rejected {
                AttemptError::Fatal(err)
            } else {
                AttemptError::Retryable(err)
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AttemptError::Fatal(e.into()))?;
        let access_token = token.access_token.clone();
        *cached = Some(CachedToken {
            access_token: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(token.expires_in.min(MAX_TOKEN_LIFETIME_SECS)),
        });
        Ok(access_token)
    }

    async fn invalidate_token(&self) {
        *self.token.lock().await = None;
    }

    async fn send_once(&self, raw: &str) -> Result<String, AttemptError> {
        let access_token = self.access_token().await?;

        let response = self
            .client
            .post(self.config.send_url())
            .bearer_auth(access_token)
            .json(&json!({ "raw": raw }))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    AttemptError::Retryable(e.into())
                } else {
                    AttemptError::Fatal(e.into())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            let sent: SendResponse = response
                .json()
                .await
                .map_err(|e| AttemptError::Fatal(e.into()))?;
            return Ok(sent.id);
        }

        let body = response.text().await.unwrap_or_default();
        let err = InfrastructureError::Email(format!("Gmail API returned {}: {}", status, body));
        if status == reqwest::StatusCode::UNAUTHORIZED {
            Err(AttemptError::Unauthorized)
        } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            Err(AttemptError::Retryable(err))
        } else {
            Err(AttemptError::Fatal(err))
        }
    }

    /// Send with retry logic
    async fn send_with_retry(&self, to: &str, raw: &str) -> Result<String, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;
            debug!(
                attempt = attempts,
                max_retries = self.config.max_retries,
                to = %mask_email(to),
                "Sending email via Gmail"
            );

            let err = match self.send_once(raw).await {
                Ok(message_id) => {
                    info!(
                        to = %mask_email(to),
                        message_id = %message_id,
                        "Email sent successfully via Gmail"
                    );
                    return Ok(message_id);
                }
                Err(AttemptError::Fatal(e)) => {
                    error!(to = %mask_email(to), error = %e, "Gmail rejected the message");
                    return Err(e);
                }
                Err(AttemptError::Unauthorized) => {
                    warn!("Gmail access token rejected, refreshing");
                    self.invalidate_token().await;
                    InfrastructureError::Email("Gmail API returned 401 Unauthorized".to_string())
                }
                Err(AttemptError::Retryable(e)) => e,
            };

            if attempts >= self.config.max_retries {
                error!(
                    to = %mask_email(to),
                    attempts,
                    error = %err,
                    "Failed to send email after retries"
                );
                return Err(InfrastructureError::Email(format!(
                    "Failed to send email after {} attempts: {}",
                    attempts, err
                )));
            }

            warn!(error = %err, delay_ms = delay.as_millis() as u64, "Retrying Gmail send");
            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }
}

#[async_trait]
impl EmailService for GmailEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        message.validate()?;

        let message = match (&message.from, &self.config.sender) {
            (None, Some(sender)) => message.clone().with_from(Some(sender.clone())),
            _ => message.clone(),
        };

        info!(
            to = %mask_email(&message.to),
            body_len = message.body.len(),
            "Sending email via Gmail"
        );

        let raw = Self::encode_raw(&message);
        self.send_with_retry(&message.to, &raw).await
    }

    fn provider_name(&self) -> &str {
        "Gmail"
    }
}
