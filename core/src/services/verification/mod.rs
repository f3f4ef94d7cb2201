//! Verification service module for email-based role verification
//!
//! This module provides the complete verification code lifecycle:
//! - Code generation and issuance per user
//! - Code validation with attempt tracking and expiry
//! - Background removal of expired entries (the reaper)
//! - Email rendering and delivery through a pluggable transport

mod config;
mod reaper;
mod registry;
mod service;
mod template;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use reaper::{ExpiryReaper, ReaperHandle};
pub use registry::CodeRegistry;
pub use service::VerificationService;
pub use template::MessageTemplate;
pub use traits::EmailServiceTrait;
pub use types::{GrantedRole, IssuedCode, SendCodeRequest, SendCodeResult};
