//! # Bouncer API
//!
//! HTTP endpoints the chat layer calls when a member interacts with the
//! verification panel. Handlers translate requests into calls on the core
//! `VerificationService` and map every outcome to a user-facing message.

pub mod app;
pub mod commands;
pub mod dto;
pub mod handlers;
pub mod routes;
pub mod telemetry;

pub use app::{create_app, AppState};
pub use commands::{Command, CommandKind, COMMANDS};
