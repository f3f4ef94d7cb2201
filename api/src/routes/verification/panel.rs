use actix_web::{web, HttpRequest, HttpResponse};
use tracing::{info, warn};
use validator::Validate;

use bc_shared::ApiResponse;

use crate::dto::{ButtonDescriptor, CreatePanelRequest, InteractionResponse, PanelResponse};
use crate::handlers::error::validation_error_response;
use crate::handlers::request_id;

/// Welcome text posted above the panel buttons
pub const VERIFICATION_MESSAGE: &str = "**Welcome to Our Server! 🎉**

To get started and ensure a safe community, please verify your email through the buttons below.
Once you've verified your email, you'll be all set to explore and engage with our awesome community.
If you have any questions or need assistance, feel free to reach out to our moderators.

Enjoy your time here! 🌟";

/// The two panel buttons and their modals
pub fn panel_buttons() -> Vec<ButtonDescriptor> {
    vec![
        ButtonDescriptor {
            custom_id: "send_email".to_string(),
            label: "Send Email".to_string(),
            emoji: "📧".to_string(),
            modal_title: "Email Registration".to_string(),
            modal_prompt: "What is your university email address?".to_string(),
        },
        ButtonDescriptor {
            custom_id: "verify_code".to_string(),
            label: "Verify Code".to_string(),
            emoji: "✅".to_string(),
            modal_title: "Code Verification".to_string(),
            modal_prompt: "What is the code provided within the email?".to_string(),
        },
    ]
}

/// Handler for POST /api/v1/verification/panel
///
/// Returns the panel for the chat layer to post into `channel_id` and the
/// confirmation shown to the member who ran the command.
pub async fn create_panel(req: HttpRequest, request: web::Json<CreatePanelRequest>) -> HttpResponse {
    let request_id = request_id(&req);
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        warn!(request_id = %request_id, "Invalid create_panel request");
        return validation_error_response(&errors, &request_id);
    }

    info!(
        request_id = %request_id,
        channel_id = request.channel_id,
        event = "panel_created",
        "Creating verification panel"
    );

    let confirmation = InteractionResponse {
        message: format!(
            "Verification system has been created in <#{}>",
            request.channel_id
        ),
        ephemeral: false,
        grant_role: None,
    };

    HttpResponse::Ok().json(
        ApiResponse::success(PanelResponse {
            channel_id: request.channel_id,
            content: VERIFICATION_MESSAGE.to_string(),
            buttons: panel_buttons(),
            confirmation,
        })
        .with_request_id(request_id),
    )
}
