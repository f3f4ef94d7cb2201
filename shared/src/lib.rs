//! Shared utilities and common types for the Bouncer services
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and loading
//! - API response wrappers
//! - Utility functions (email address validation, masking)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthenticationConfig, ConfigError, EmailConfig, EmailProvider, Environment,
    LogFormat, LoggingConfig, ServerConfig,
};
pub use types::ApiResponse;
pub use utils::email;
