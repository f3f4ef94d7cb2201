//! Route handlers
//!
//! - `verification`: panel creation, email submission and code checks
//! - `health`: liveness with the number of pending verifications
//! - `commands`: the command table as JSON

pub mod commands;
pub mod health;
pub mod verification;
