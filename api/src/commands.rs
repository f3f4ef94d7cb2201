//! Command table
//!
//! Every chat interaction the service answers is listed here once. The
//! application registers its routes by walking this table, and
//! `GET /api/v1/commands` reports it back to the chat layer.

use actix_web::{web, Route};
use serde::Serialize;

use bc_core::services::verification::EmailServiceTrait;

use crate::routes::verification;

/// Prefix shared by all command routes
pub const API_PREFIX: &str = "/api/v1";

/// Handler behind a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    /// `/verification create`: post the panel with its two buttons
    CreatePanel,
    /// "Send Email" button: email a fresh code
    SendEmail,
    /// "Verify Code" button: check a submitted code
    VerifyCode,
}

/// One entry of the command table
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Command {
    pub name: &'static str,
    pub kind: CommandKind,
    pub method: &'static str,
    /// Path relative to [`API_PREFIX`]
    pub path: &'static str,
    pub description: &'static str,
}

pub static COMMANDS: [Command; 3] = [
    Command {
        name: "verification create",
        kind: CommandKind::CreatePanel,
        method: "POST",
        path: "/verification/panel",
        description: "Creates new verification system.",
    },
    Command {
        name: "send_email",
        kind: CommandKind::SendEmail,
        method: "POST",
        path: "/verification/send-email",
        description: "Emails a verification code to a university address.",
    },
    Command {
        name: "verify_code",
        kind: CommandKind::VerifyCode,
        method: "POST",
        path: "/verification/verify-code",
        description: "Checks a verification code and grants the domain's role.",
    },
];

impl Command {
    /// Full request path including the API prefix
    pub fn full_path(&self) -> String {
        format!("{}{}", API_PREFIX, self.path)
    }

    /// Route serving this command
    pub fn route<E: EmailServiceTrait + 'static>(&self) -> Route {
        match self.kind {
            CommandKind::CreatePanel => web::post().to(verification::panel::create_panel),
            CommandKind::SendEmail => web::post().to(verification::send_email::send_email::<E>),
            CommandKind::VerifyCode => web::post().to(verification::verify_code::verify_code::<E>),
        }
    }
}

/// Look up a command by name
pub fn find(name: &str) -> Option<&'static Command> {
    COMMANDS.iter().find(|command| command.name == name)
}
