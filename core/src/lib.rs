//! # Bouncer Core
//!
//! Core verification lifecycle for the Bouncer service.
//! This crate contains the pending-verification entity, value objects, the
//! error taxonomy, the in-memory code registry with its expiry reaper, and the
//! verification service that ties code issuance to email delivery.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
