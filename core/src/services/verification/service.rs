//! Main verification service implementation

use std::sync::Arc;
use tracing;

use bc_shared::email::mask_email;

use crate::domain::value_objects::{UserId, VerificationCode};
use crate::errors::{VerificationError, VerificationResult};

use super::registry::CodeRegistry;
use super::template::MessageTemplate;
use super::traits::EmailServiceTrait;
use super::types::{GrantedRole, SendCodeRequest, SendCodeResult};

/// Verification service tying code issuance to email delivery
pub struct VerificationService<E: EmailServiceTrait> {
    /// Registry holding pending codes
    registry: Arc<CodeRegistry>,
    /// Email service for delivering codes
    email_service: Arc<E>,
    /// Body template for verification emails
    template: MessageTemplate,
}

impl<E: EmailServiceTrait> VerificationService<E> {
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `registry` - Code registry
    /// * `email_service` - Email service implementation
    /// * `template` - Email body template
    pub fn new(registry: Arc<CodeRegistry>, email_service: Arc<E>, template: MessageTemplate) -> Self {
        Self {
            registry,
            email_service,
            template,
        }
    }

    /// The underlying code registry
    pub fn registry(&self) -> &Arc<CodeRegistry> {
        &self.registry
    }

    /// Issue a code and email it to the user
    ///
    /// This method:
    /// 1. Registers a new pending code (replacing any previous one)
    /// 2. Renders the email body from the template
    /// 3. Sends the email once the registry lock has been released
    /// 4. Revokes the pending code if delivery fails
    ///
    /// # Returns
    ///
    /// * `Ok(SendCodeResult)` - The code was registered and handed to the transport
    /// * `Err(VerificationError)` - Registration was rejected or delivery failed
    pub async fn send_verification_email(&self, request: SendCodeRequest) -> VerificationResult<SendCodeResult> {
        let issued = self
            .registry
            .begin_verification(request.user_id, &request.email, &request.held_roles)
            .await?;

        let body = self.template.render(&issued.code, &request.username);
        let subject = &self.registry.config().subject;

        match self.email_service.send_email(&issued.email, subject, &body).await {
            Ok(message_id) => {
                tracing::info!(
                    user_id = %issued.user_id,
                    email = %mask_email(&issued.email),
                    message_id = %message_id,
                    event = "verification_email_sent",
                    "Verification email has been sent"
                );
                Ok(SendCodeResult {
                    id: issued.id,
                    message_id,
                    expires_in: issued.expires_in,
                })
            }
            Err(reason) => {
                let revoked = self.registry.revoke(issued.user_id, issued.id).await;
                tracing::error!(
                    user_id = %issued.user_id,
                    email = %mask_email(&issued.email),
                    error = %reason,
                    revoked,
                    event = "verification_email_failed",
                    "Failed to deliver verification email"
                );
                Err(VerificationError::DeliveryFailed { reason })
            }
        }
    }

    /// Check a submitted code, returning the role to grant on success
    pub async fn verify_code(&self, user_id: UserId, code: VerificationCode) -> VerificationResult<GrantedRole> {
        self.registry.validate(user_id, code).await
    }
}
