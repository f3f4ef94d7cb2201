use actix_web::{web, HttpRequest, HttpResponse};
use tracing::{info, warn};
use validator::Validate;

use bc_core::services::verification::EmailServiceTrait;
use bc_core::{UserId, VerificationCode};
use bc_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{InteractionResponse, VerifyCodeRequest};
use crate::handlers::error::{
    malformed_code_response, validation_error_response, verification_error_response,
};
use crate::handlers::request_id;

pub const AUTHENTICATED_MESSAGE: &str = "User has been authenticated!";

/// Handler for POST /api/v1/verification/verify-code
///
/// A code that is not 1-6 digits is rejected here and never reaches the
/// registry, so it does not use up an attempt. On success the response
/// carries the role the chat layer should grant.
pub async fn verify_code<E>(
    req: HttpRequest,
    state: web::Data<AppState<E>>,
    request: web::Json<VerifyCodeRequest>,
) -> HttpResponse
where
    E: EmailServiceTrait + 'static,
{
    let request_id = request_id(&req);
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        warn!(request_id = %request_id, "Invalid verify_code request");
        return validation_error_response(&errors, &request_id);
    }

    let code: VerificationCode = match request.code.parse() {
        Ok(code) => code,
        Err(_) => {
            warn!(
                request_id = %request_id,
                user_id = request.user_id,
                "Malformed verification code submitted"
            );
            return malformed_code_response(&request_id);
        }
    };

    match state
        .verification_service
        .verify_code(UserId(request.user_id), code)
        .await
    {
        Ok(granted) => {
            info!(
                request_id = %request_id,
                user_id = request.user_id,
                role = %granted.role,
                domain = %granted.domain,
                "Member verified"
            );
            HttpResponse::Ok().json(
                ApiResponse::success(InteractionResponse::granted(
                    AUTHENTICATED_MESSAGE,
                    granted.role.0,
                ))
                .with_request_id(request_id),
            )
        }
        Err(error) => {
            warn!(
                request_id = %request_id,
                user_id = request.user_id,
                error_code = error.error_code(),
                "verify_code rejected"
            );
            verification_error_response(&error, &request_id)
        }
    }
}
