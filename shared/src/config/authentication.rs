//! Verification lifecycle configuration
//!
//! Mirrors the `authentication` section of the bot configuration: which email
//! domains map to which chat roles, how long a code lives, how many attempts a
//! user gets, and how many codes may be outstanding at once.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use super::ConfigError;

/// Default code lifetime (5 minutes)
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 300;

/// Longest accepted code lifetime (one week)
pub const MAX_TIMEOUT_SECONDS: u64 = 7 * 24 * 60 * 60;

/// Default attempt ceiling
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default cap on outstanding codes
pub const DEFAULT_BANDWIDTH: usize = 10;

/// Default email subject
pub const DEFAULT_SUBJECT: &str = "Discord Verification Code";

/// Built-in message used when neither `template` nor `template_path` is set
pub const DEFAULT_TEMPLATE: &str = "<p>Hello {username},</p>\
<p>Your verification code is <strong>{code}</strong>.</p>\
<p>If you did not request this code you can ignore this email.</p>";

/// Authentication (verification) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthenticationConfig {
    /// Email domain -> role id granted on successful verification
    #[serde(default)]
    pub role_associations: HashMap<String, u64>,

    /// Seconds before a code expires
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Maximum validation attempts per code
    #[serde(default = "default_attempts", alias = "max_attempts")]
    pub attempts: u32,

    /// Maximum number of concurrently pending codes
    #[serde(default = "default_bandwidth")]
    pub bandwidth: usize,

    /// Inline message template with `{code}` and `{username}` placeholders
    #[serde(default)]
    pub template: Option<String>,

    /// Path to a message template file (used when `template` is unset)
    #[serde(default)]
    pub template_path: Option<PathBuf>,

    /// Subject line of the verification email
    #[serde(default = "default_subject")]
    pub subject: String,
}

impl Default for AuthenticationConfig {
    fn default() -> Self {
        Self {
            role_associations: HashMap::new(),
            timeout: default_timeout(),
            attempts: default_attempts(),
            bandwidth: default_bandwidth(),
            template: None,
            template_path: None,
            subject: default_subject(),
        }
    }
}

impl AuthenticationConfig {
    /// Code lifetime as a `Duration`
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Look up the role for an email domain, ignoring ASCII case
    pub fn role_for_domain(&self, domain: &str) -> Option<u64> {
        self.role_associations
            .iter()
            .find(|(configured, _)| configured.eq_ignore_ascii_case(domain))
            .map(|(_, role)| *role)
    }

    /// Domain mapping with lowercased keys
    pub fn normalized_roles(&self) -> HashMap<String, u64> {
        self.role_associations
            .iter()
            .map(|(domain, role)| (domain.to_ascii_lowercase(), *role))
            .collect()
    }

    /// Resolve the template text: inline text wins, then the file, then the
    /// built-in default
    pub fn load_template(&self) -> Result<String, ConfigError> {
        if let Some(template) = &self.template {
            return Ok(template.clone());
        }
        match &self.template_path {
            Some(path) => std::fs::read_to_string(path).map_err(|source| ConfigError::Template {
                path: path.clone(),
                source,
            }),
            None => Ok(DEFAULT_TEMPLATE.to_string()),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.role_associations.is_empty() {
            return Err(ConfigError::Invalid(
                "authentication.role_associations must map at least one domain".to_string(),
            ));
        }
        if self.timeout == 0 {
            return Err(ConfigError::Invalid("authentication.timeout must be non-zero".to_string()));
        }
        if self.timeout > MAX_TIMEOUT_SECONDS {
            return Err(ConfigError::Invalid(format!(
                "authentication.timeout must be at most {} seconds",
                MAX_TIMEOUT_SECONDS
            )));
        }
        if self.bandwidth == 0 {
            return Err(ConfigError::Invalid("authentication.bandwidth must be non-zero".to_string()));
        }
        if let Some(template) = &self.template {
            if !template.contains("{code}") {
                return Err(ConfigError::Invalid(
                    "authentication.template must contain a {code} placeholder".to_string(),
                ));
            }
        }
        Ok(())
    }
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_bandwidth() -> usize {
    DEFAULT_BANDWIDTH
}

fn default_subject() -> String {
    DEFAULT_SUBJECT.to_string()
}
