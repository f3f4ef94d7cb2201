use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/v1/verification/panel`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePanelRequest {
    /// Channel the panel is posted into
    #[validate(range(min = 1))]
    pub channel_id: u64,
}

/// Body of `POST /api/v1/verification/send-email`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendEmailRequest {
    #[validate(range(min = 1))]
    pub user_id: u64,

    /// Display name substituted into the email
    #[validate(length(min = 1, max = 100))]
    pub username: String,

    /// Address typed into the "Email Registration" modal
    #[validate(length(min = 1, max = 254))]
    pub email: String,

    /// Role ids the member currently holds
    #[serde(default)]
    pub roles: Vec<u64>,
}

/// Body of `POST /api/v1/verification/verify-code`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    #[validate(range(min = 1))]
    pub user_id: u64,

    /// Code typed into the "Code Verification" modal
    #[validate(length(min = 1, max = 32))]
    pub code: String,
}

/// Reply the chat layer shows to the member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionResponse {
    pub message: String,
    /// Only visible to the member who interacted
    pub ephemeral: bool,
    /// Role to grant, present only after a successful verification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grant_role: Option<u64>,
}

impl InteractionResponse {
    /// Private reply without a role grant
    pub fn ephemeral(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ephemeral: true,
            grant_role: None,
        }
    }

    /// Private reply granting `role`
    pub fn granted(message: impl Into<String>, role: u64) -> Self {
        Self {
            grant_role: Some(role),
            ..Self::ephemeral(message)
        }
    }
}

/// A button on the verification panel and the modal it opens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonDescriptor {
    /// Identifier the chat layer reports back on click
    pub custom_id: String,
    pub label: String,
    pub emoji: String,
    pub modal_title: String,
    pub modal_prompt: String,
}

/// Everything the chat layer needs to post the panel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelResponse {
    pub channel_id: u64,
    /// Panel message body
    pub content: String,
    pub buttons: Vec<ButtonDescriptor>,
    /// Reply to the member who ran the command
    pub confirmation: InteractionResponse,
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub pending_verifications: usize,
    pub timestamp: DateTime<Utc>,
}

/// One row of `GET /api/v1/commands`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandDescriptor {
    pub name: String,
    pub method: String,
    pub path: String,
    pub description: String,
}
