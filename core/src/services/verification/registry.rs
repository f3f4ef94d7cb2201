//! In-memory code registry
//!
//! The registry is the single authority over pending verifications. All
//! mutations go through one async mutex; no I/O happens while it is held.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use bc_shared::email::{extract_domain, mask_email};

use crate::domain::entities::PendingVerification;
use crate::domain::value_objects::{RoleId, UserId, VerificationCode};
use crate::errors::{VerificationError, VerificationResult};

use super::config::VerificationServiceConfig;
use super::reaper::{ExpiryReaper, PendingEntries, ReaperHandle};
use super::types::{GrantedRole, IssuedCode};

/// Registry of pending verification codes keyed by user
pub struct CodeRegistry {
    entries: PendingEntries,
    config: VerificationServiceConfig,
    reaper: ReaperHandle,
    reaper_task: JoinHandle<()>,
}

impl CodeRegistry {
    /// Create a registry and spawn its expiry reaper
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: VerificationServiceConfig) -> Self {
        let entries: PendingEntries = Arc::new(Mutex::new(HashMap::new()));
        let (reaper, reaper_task) = ExpiryReaper::spawn(Arc::clone(&entries), config.reaper_grace);
        Self {
            entries,
            config,
            reaper,
            reaper_task,
        }
    }

    /// Service configuration
    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Issue a new code for `user_id`, replacing any pending one
    ///
    /// `held_roles` are the roles the user currently holds on the chat
    /// platform. The returned code must be delivered by the caller.
    ///
    /// # Errors
    ///
    /// * `AlreadyVerified` - the user holds a mapped role
    /// * `InvalidEmail` - the address fails the syntax check
    /// * `UnrecognizedDomain` - the domain has no mapped role
    /// * `CapacityExceeded` - `bandwidth` other codes are outstanding
    pub async fn begin_verification(
        &self,
        user_id: UserId,
        email: &str,
        held_roles: &[RoleId],
    ) -> VerificationResult<IssuedCode> {
        if held_roles.iter().any(|role| self.config.is_mapped_role(*role)) {
            debug!(user_id = %user_id, event = "already_verified", "User already holds a verified role");
            return Err(VerificationError::AlreadyVerified);
        }

        let email = email.trim();
        let domain = extract_domain(email).ok_or(VerificationError::InvalidEmail)?;
        let role = self
            .config
            .role_for_domain(&domain)
            .ok_or_else(|| VerificationError::UnrecognizedDomain {
                domain: domain.clone(),
            })?;

        let code = VerificationCode::generate();
        let pending = PendingVerification::new(
            user_id,
            code,
            domain.clone(),
            role,
            self.config.code_timeout,
            self.config.max_attempts,
        );
        let (id, expires_at) = (pending.id, pending.expires_at);

        {
            let mut entries = self.entries.lock().await;
            let now = Instant::now();

            let before = entries.len();
            entries.retain(|_, entry| !entry.is_expired_at(now));
            let purged = before - entries.len();
            if purged > 0 {
                debug!(purged, event = "lazy_purge", "Dropped expired verification codes");
            }

            let outstanding = entries.keys().filter(|holder| **holder != user_id).count();
            if outstanding >= self.config.bandwidth {
                warn!(
                    user_id = %user_id,
                    outstanding,
                    bandwidth = self.config.bandwidth,
                    event = "capacity_exceeded",
                    "Verification bandwidth exhausted"
                );
                return Err(VerificationError::CapacityExceeded {
                    bandwidth: self.config.bandwidth,
                });
            }

            if let Some(previous) = entries.insert(user_id, pending) {
                info!(
                    user_id = %user_id,
                    previous_id = %previous.id,
                    event = "invalidate_previous_code",
                    "Replaced pending verification code"
                );
            }
        }

        self.reaper.schedule(user_id, id, expires_at);

        info!(
            user_id = %user_id,
            email = %mask_email(email),
            domain = %domain,
            session_id = %id,
            event = "otp_generated",
            "Generated new verification code"
        );

        Ok(IssuedCode {
            id,
            user_id,
            code,
            email: email.to_string(),
            domain,
            role,
            expires_in: self.config.code_timeout,
        })
    }

    /// Validate a submitted code for `user_id`
    ///
    /// Every call counts as an attempt. The attempt is recorded before the
    /// expiry check, so the call that pushes `attempts` past `max_attempts`
    /// reports `Expired` and removes the entry.
    ///
    /// # Errors
    ///
    /// * `NoPendingVerification` - nothing is pending for the user
    /// * `Expired` - deadline passed or attempts exhausted; entry removed
    /// * `CodeMismatch` - wrong code; entry kept for retry
    pub async fn validate(
        &self,
        user_id: UserId,
        submitted: VerificationCode,
    ) -> VerificationResult<GrantedRole> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();

        let Some(entry) = entries.get_mut(&user_id) else {
            debug!(user_id = %user_id, event = "no_pending_verification", "No pending verification");
            return Err(VerificationError::NoPendingVerification);
        };

        let attempts = entry.record_attempt();

        if entry.is_expired_at(now) {
            entries.remove(&user_id);
            warn!(
                user_id = %user_id,
                attempts,
                event = "otp_expired",
                "Verification code expired"
            );
            return Err(VerificationError::Expired);
        }

        if !entry.code.matches(&submitted) {
            let remaining_attempts = entry.remaining_attempts();
            warn!(
                user_id = %user_id,
                attempts,
                remaining_attempts,
                event = "otp_verification_failed",
                "Verification code mismatch"
            );
            return Err(VerificationError::CodeMismatch { remaining_attempts });
        }

        let entry = entries
            .remove(&user_id)
            .ok_or(VerificationError::NoPendingVerification)?;

        info!(
            user_id = %user_id,
            role = %entry.role,
            domain = %entry.domain,
            event = "otp_verified_success",
            "Verification code successfully verified"
        );

        Ok(GrantedRole {
            user_id,
            role: entry.role,
            domain: entry.domain,
        })
    }

    /// Remove the entry for `user_id` only if it is still attempt `id`
    pub async fn revoke(&self, user_id: UserId, id: Uuid) -> bool {
        let mut entries = self.entries.lock().await;
        match entries.get(&user_id) {
            Some(entry) if entry.id == id => {
                entries.remove(&user_id);
                info!(user_id = %user_id, session_id = %id, event = "otp_revoked", "Revoked verification code");
                true
            }
            _ => false,
        }
    }

    /// Remove every expired entry, returning how many were dropped
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        before - entries.len()
    }

    /// Number of pending entries that have not expired
    pub async fn pending_count(&self) -> usize {
        let entries = self.entries.lock().await;
        let now = Instant::now();
        entries.values().filter(|entry| !entry.is_expired_at(now)).count()
    }

    /// Whether any entry (expired or not) is held for `user_id`
    pub async fn contains(&self, user_id: UserId) -> bool {
        self.entries.lock().await.contains_key(&user_id)
    }

    /// Copy of the entry held for `user_id`
    pub async fn snapshot(&self, user_id: UserId) -> Option<PendingVerification> {
        self.entries.lock().await.get(&user_id).cloned()
    }
}

impl Drop for CodeRegistry {
    fn drop(&mut self) {
        self.reaper_task.abort();
    }
}
