//! Common utility functions

pub mod email;

pub use email::{extract_domain, is_valid_email, mask_email};
