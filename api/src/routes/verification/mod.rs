//! Verification route handlers
//!
//! One handler per button of the verification panel plus the command that
//! creates the panel.

pub mod panel;
pub mod send_email;
pub mod verify_code;
