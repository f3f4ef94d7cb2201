use actix_web::{web, HttpRequest, HttpResponse};
use tracing::{info, warn};
use validator::Validate;

use bc_core::services::verification::{EmailServiceTrait, SendCodeRequest};
use bc_core::{RoleId, UserId};
use bc_shared::email::mask_email;
use bc_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{InteractionResponse, SendEmailRequest};
use crate::handlers::error::{validation_error_response, verification_error_response};
use crate::handlers::request_id;

pub const EMAIL_SENT_MESSAGE: &str = "Verification email has been sent!";

/// Handler for POST /api/v1/verification/send-email
///
/// Issues a fresh code for the member and emails it to the submitted
/// address. Any earlier code for the member stops working.
///
/// # Request Body
///
/// ```json
/// {
///     "user_id": 123456789012345678,
///     "username": "alice",
///     "email": "alice@uni.edu",
///     "roles": [111, 222]
/// }
/// ```
///
/// # Response
///
/// `200` with `{"message": "Verification email has been sent!", "ephemeral": true}`;
/// rejections carry the same payload shape with the member-facing message.
pub async fn send_email<E>(
    req: HttpRequest,
    state: web::Data<AppState<E>>,
    request: web::Json<SendEmailRequest>,
) -> HttpResponse
where
    E: EmailServiceTrait + 'static,
{
    let request_id = request_id(&req);
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        warn!(request_id = %request_id, "Invalid send_email request");
        return validation_error_response(&errors, &request_id);
    }

    info!(
        request_id = %request_id,
        user_id = request.user_id,
        email = %mask_email(&request.email),
        "Processing send_email interaction"
    );

    let send = SendCodeRequest {
        user_id: UserId(request.user_id),
        username: request.username,
        email: request.email,
        held_roles: request.roles.into_iter().map(RoleId).collect(),
    };

    match state.verification_service.send_verification_email(send).await {
        Ok(result) => {
            info!(
                request_id = %request_id,
                user_id = request.user_id,
                message_id = %result.message_id,
                expires_in_secs = result.expires_in.as_secs(),
                "Verification email sent"
            );
            HttpResponse::Ok().json(
                ApiResponse::success(InteractionResponse::ephemeral(EMAIL_SENT_MESSAGE))
                    .with_request_id(request_id),
            )
        }
        Err(error) => {
            warn!(
                request_id = %request_id,
                user_id = request.user_id,
                error_code = error.error_code(),
                "send_email rejected"
            );
            verification_error_response(&error, &request_id)
        }
    }
}
