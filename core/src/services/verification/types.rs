//! Types for verification service requests and results

use std::time::Duration;
use uuid::Uuid;

use crate::domain::value_objects::{RoleId, UserId, VerificationCode};

/// A freshly issued code, returned by the registry for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCode {
    /// Identity of the pending entry
    pub id: Uuid,
    /// User the code belongs to
    pub user_id: UserId,
    /// The code to deliver
    pub code: VerificationCode,
    /// Destination address as submitted
    pub email: String,
    /// Lowercased domain of the address
    pub domain: String,
    /// Role granted on success
    pub role: RoleId,
    /// Lifetime of the code
    pub expires_in: Duration,
}

/// Outcome of a successful validation: the role the chat layer should grant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantedRole {
    pub user_id: UserId,
    pub role: RoleId,
    pub domain: String,
}

/// Request to start verification for a user
#[derive(Debug, Clone)]
pub struct SendCodeRequest {
    pub user_id: UserId,
    /// Display name substituted for `{username}`
    pub username: String,
    pub email: String,
    /// Roles the user currently holds
    pub held_roles: Vec<RoleId>,
}

/// Result of sending a verification email
#[derive(Debug, Clone)]
pub struct SendCodeResult {
    /// Identity of the pending entry
    pub id: Uuid,
    /// Provider message id of the email
    pub message_id: String,
    /// Lifetime of the delivered code
    pub expires_in: Duration,
}
