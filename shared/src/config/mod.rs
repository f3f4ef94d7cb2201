//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `authentication` - Domain/role mapping, code lifetime, attempts and bandwidth
//! - `email` - Email transport provider and credentials
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server binding
//!
//! The configuration is constructed once at startup and handed to whichever
//! component needs it. There is no process-wide instance.

pub mod authentication;
pub mod email;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use authentication::{AuthenticationConfig, DEFAULT_TEMPLATE};
pub use email::{EmailConfig, EmailProvider};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "config/bouncer.toml";

/// Environment variable naming an alternative configuration file
pub const CONFIG_PATH_ENV: &str = "BOUNCER_CONFIG";

/// Prefix for environment variable overrides (`BOUNCER_SERVER__PORT=9000`)
pub const ENV_PREFIX: &str = "BOUNCER";

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Failed to read template {path}: {source}")]
    Template {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Verification lifecycle configuration
    #[serde(default)]
    pub authentication: AuthenticationConfig,

    /// Email transport configuration
    #[serde(default)]
    pub email: EmailConfig,

    /// Logging configuration; derived from `environment` when absent
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}

impl AppConfig {
    /// Load configuration from the file named by `BOUNCER_CONFIG` (or the
    /// default path) layered under `BOUNCER_*` environment variables
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(path)
    }

    /// Load configuration from a specific file path
    ///
    /// A missing file is not an error; every section has defaults and the
    /// environment may supply the rest.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path.as_ref()).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: AppConfig = settings.try_deserialize()?;
        config.email.apply_google_env();
        Ok(config)
    }

    /// Effective logging configuration
    pub fn logging_config(&self) -> LoggingConfig {
        self.logging
            .clone()
            .unwrap_or_else(|| LoggingConfig::for_environment(self.environment))
    }

    /// Reject configurations the service cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.authentication.validate()?;
        self.email.validate()?;
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero".to_string()));
        }
        Ok(())
    }
}
