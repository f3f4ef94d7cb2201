//! Mapping of verification outcomes to HTTP responses

use actix_web::{error::InternalError, error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse};
use validator::ValidationErrors;

use bc_core::VerificationError;
use bc_shared::ApiResponse;

use crate::dto::InteractionResponse;

pub const ALREADY_VERIFIED_MESSAGE: &str = "You are already authenticated.";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";
pub const UNRECOGNIZED_DOMAIN_MESSAGE: &str = "Email domain is not recognized.";
pub const CAPACITY_EXCEEDED_MESSAGE: &str =
    "Max verification codes reached, please try again in a few minutes.";
pub const NO_PENDING_MESSAGE: &str = "Please enter your email first.";
pub const CODE_MISMATCH_MESSAGE: &str = "An invalid code has been detected, please try again.";
pub const EXPIRED_MESSAGE: &str = "Your verification code has expired, please request a new one.";
pub const DELIVERY_FAILED_MESSAGE: &str =
    "We could not send the verification email, please try again later.";
pub const MALFORMED_CODE_MESSAGE: &str = "Verification codes are 6 digits.";

/// HTTP status for a verification error
pub fn status_for(error: &VerificationError) -> StatusCode {
    match error {
        VerificationError::AlreadyVerified => StatusCode::CONFLICT,
        VerificationError::InvalidEmail => StatusCode::BAD_REQUEST,
        VerificationError::UnrecognizedDomain { .. } => StatusCode::BAD_REQUEST,
        VerificationError::CapacityExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
        VerificationError::NoPendingVerification => StatusCode::NOT_FOUND,
        VerificationError::CodeMismatch { .. } => StatusCode::BAD_REQUEST,
        VerificationError::Expired => StatusCode::GONE,
        VerificationError::DeliveryFailed { .. } => StatusCode::BAD_GATEWAY,
    }
}

/// Message shown to the member for a verification error
pub fn user_message(error: &VerificationError) -> String {
    match error {
        VerificationError::AlreadyVerified => ALREADY_VERIFIED_MESSAGE.to_string(),
        VerificationError::InvalidEmail => INVALID_EMAIL_MESSAGE.to_string(),
        VerificationError::UnrecognizedDomain { .. } => UNRECOGNIZED_DOMAIN_MESSAGE.to_string(),
        VerificationError::CapacityExceeded { .. } => CAPACITY_EXCEEDED_MESSAGE.to_string(),
        VerificationError::NoPendingVerification => NO_PENDING_MESSAGE.to_string(),
        VerificationError::CodeMismatch { remaining_attempts } => {
            let noun = if *remaining_attempts == 1 { "attempt" } else { "attempts" };
            format!("{} ({} {} remaining)", CODE_MISMATCH_MESSAGE, remaining_attempts, noun)
        }
        VerificationError::Expired => EXPIRED_MESSAGE.to_string(),
        VerificationError::DeliveryFailed { .. } => DELIVERY_FAILED_MESSAGE.to_string(),
    }
}

/// Error response carrying the interaction reply for the chat layer
pub fn verification_error_response(error: &VerificationError, request_id: &str) -> HttpResponse {
    let message = user_message(error);
    let body = ApiResponse::error_with_data(
        error.error_code(),
        message.clone(),
        InteractionResponse::ephemeral(message),
    )
    .with_request_id(request_id);
    HttpResponse::build(status_for(error)).json(body)
}

/// Response for a code that is not 1-6 digits
pub fn malformed_code_response(request_id: &str) -> HttpResponse {
    let body = ApiResponse::error_with_data(
        "INVALID_CODE_FORMAT",
        MALFORMED_CODE_MESSAGE,
        InteractionResponse::ephemeral(MALFORMED_CODE_MESSAGE),
    )
    .with_request_id(request_id);
    HttpResponse::BadRequest().json(body)
}

/// Response for a request body failing field validation
pub fn validation_error_response(errors: &ValidationErrors, request_id: &str) -> HttpResponse {
    let mut fields: Vec<_> = errors.field_errors().keys().map(|field| field.to_string()).collect();
    fields.sort();
    let body = ApiResponse::<()>::error(
        "VALIDATION_ERROR",
        format!("Invalid request data: {}", fields.join(", ")),
    )
    .with_request_id(request_id);
    HttpResponse::BadRequest().json(body)
}

/// Turn JSON extraction failures into the standard error body
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = format!("Invalid request body: {}", err);
    let response = HttpResponse::BadRequest().json(ApiResponse::<()>::error("INVALID_REQUEST", message));
    InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&VerificationError::AlreadyVerified), StatusCode::CONFLICT);
        assert_eq!(
            status_for(&VerificationError::CapacityExceeded { bandwidth: 1 }),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(status_for(&VerificationError::Expired), StatusCode::GONE);
        assert_eq!(
            status_for(&VerificationError::DeliveryFailed { reason: "x".to_string() }),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_code_mismatch_message_counts_attempts() {
        assert_eq!(
            user_message(&VerificationError::CodeMismatch { remaining_attempts: 2 }),
            "An invalid code has been detected, please try again. (2 attempts remaining)"
        );
        assert_eq!(
            user_message(&VerificationError::CodeMismatch { remaining_attempts: 1 }),
            "An invalid code has been detected, please try again. (1 attempt remaining)"
        );
    }

    #[test]
    fn test_delivery_reason_is_not_exposed() {
        let error = VerificationError::DeliveryFailed {
            reason: "token refresh failed: secret".to_string(),
        };
        assert!(!user_message(&error).contains("secret"));
    }
}
