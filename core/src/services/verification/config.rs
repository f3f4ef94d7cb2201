//! Configuration for the verification service

use std::collections::HashMap;
use std::time::Duration;

use bc_shared::config::authentication::{
    DEFAULT_BANDWIDTH, DEFAULT_MAX_ATTEMPTS, DEFAULT_SUBJECT, DEFAULT_TIMEOUT_SECONDS,
};
use bc_shared::AuthenticationConfig;

use crate::domain::value_objects::RoleId;

/// Extra time the reaper waits past a deadline before re-checking an entry
pub const DEFAULT_REAPER_GRACE_MILLIS: u64 = 250;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Lowercased email domain -> role granted on success
    pub role_associations: HashMap<String, RoleId>,
    /// Lifetime of an issued code
    pub code_timeout: Duration,
    /// Maximum number of validation attempts per code
    pub max_attempts: u32,
    /// Maximum number of concurrently pending codes
    pub bandwidth: usize,
    /// Delay past expiry before the reaper removes an entry
    pub reaper_grace: Duration,
    /// Subject line of verification emails
    pub subject: String,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            role_associations: HashMap::new(),
            code_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            bandwidth: DEFAULT_BANDWIDTH,
            reaper_grace: Duration::from_millis(DEFAULT_REAPER_GRACE_MILLIS),
            subject: DEFAULT_SUBJECT.to_string(),
        }
    }
}

impl VerificationServiceConfig {
    /// Build from the loaded application configuration
    pub fn from_authentication(config: &AuthenticationConfig) -> Self {
        Self {
            role_associations: config
                .normalized_roles()
                .into_iter()
                .map(|(domain, role)| (domain, RoleId(role)))
                .collect(),
            code_timeout: config.timeout_duration(),
            max_attempts: config.attempts,
            bandwidth: config.bandwidth,
            subject: config.subject.clone(),
            ..Default::default()
        }
    }

    /// Add a domain mapping
    pub fn with_role(mut self, domain: &str, role: RoleId) -> Self {
        self.role_associations.insert(domain.to_ascii_lowercase(), role);
        self
    }

    /// Role granted for a (lowercased) domain
    pub fn role_for_domain(&self, domain: &str) -> Option<RoleId> {
        self.role_associations.get(domain).copied()
    }

    /// Whether `role` is one of the grantable roles
    pub fn is_mapped_role(&self, role: RoleId) -> bool {
        self.role_associations.values().any(|mapped| *mapped == role)
    }
}
