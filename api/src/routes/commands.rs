use actix_web::HttpResponse;

use bc_shared::ApiResponse;

use crate::commands::COMMANDS;
use crate::dto::CommandDescriptor;

/// Handler for GET /api/v1/commands
pub async fn list_commands() -> HttpResponse {
    let commands: Vec<CommandDescriptor> = COMMANDS
        .iter()
        .map(|command| CommandDescriptor {
            name: command.name.to_string(),
            method: command.method.to_string(),
            path: command.full_path(),
            description: command.description.to_string(),
        })
        .collect();
    HttpResponse::Ok().json(ApiResponse::success(commands))
}
