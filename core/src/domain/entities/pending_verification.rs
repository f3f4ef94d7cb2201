//! Pending verification entity for email-based role verification.

use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::time::Instant;
use uuid::Uuid;

use crate::domain::value_objects::{RoleId, UserId, VerificationCode};

/// Deadline used when `created_at + timeout` does not fit in an `Instant`
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// An outstanding verification attempt for one user
///
/// Timestamps use the runtime's monotonic clock so expiry is unaffected by
/// wall-clock adjustments; `issued_at` is kept for logs only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingVerification {
    /// Identity of this attempt; a replacement for the same user gets a new id
    pub id: Uuid,

    /// User the code was issued to
    pub user_id: UserId,

    /// The secret code
    pub code: VerificationCode,

    /// Lowercased domain of the submitted address
    pub domain: String,

    /// Role granted when the code is confirmed
    pub role: RoleId,

    /// Wall-clock issue time
    pub issued_at: DateTime<Utc>,

    /// Monotonic creation instant
    pub created_at: Instant,

    /// Monotonic expiry instant (`created_at + timeout`)
    pub expires_at: Instant,

    /// Validation attempts made so far
    pub attempts: u32,

    /// Attempt ceiling
    pub max_attempts: u32,
}

impl PendingVerification {
    /// Create a new pending verification starting now
    pub fn new(
        user_id: UserId,
        code: VerificationCode,
        domain: impl Into<String>,
        role: RoleId,
        timeout: Duration,
        max_attempts: u32,
    ) -> Self {
        let created_at = Instant::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            code,
            domain: domain.into(),
            role,
            issued_at: Utc::now(),
            created_at,
            expires_at: created_at
                .checked_add(timeout)
                .unwrap_or_else(|| created_at + FAR_FUTURE),
            attempts: 0,
            max_attempts,
        }
    }

    /// Whether the entry is expired at `now`
    ///
    /// Expired iff the deadline has strictly passed or more attempts than the
    /// ceiling have been recorded.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.attempts > self.max_attempts || now > self.expires_at
    }

    /// Record one validation attempt, returning the new count
    pub fn record_attempt(&mut self) -> u32 {
        self.attempts = self.attempts.saturating_add(1);
        self.attempts
    }

    /// Attempts left before the entry expires by exhaustion
    pub fn remaining_attempts(&self) -> u32 {
        self.max_attempts.saturating_sub(self.attempts)
    }

    /// Time left until the deadline, zero once passed
    pub fn time_to_live(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }
}
