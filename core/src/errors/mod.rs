//! Domain-specific error types and error handling.

use thiserror::Error;

/// Rejections produced by the verification lifecycle
///
/// Every variant is an expected, user-facing outcome; none of them indicates a
/// fault in the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Email address is not valid")]
    InvalidEmail,

    #[error("Email domain is not recognized: {domain}")]
    UnrecognizedDomain { domain: String },

    #[error("User already holds a verified role")]
    AlreadyVerified,

    #[error("Maximum pending verifications reached ({bandwidth})")]
    CapacityExceeded { bandwidth: usize },

    #[error("No pending verification for this user")]
    NoPendingVerification,

    #[error("Verification code does not match ({remaining_attempts} attempts remaining)")]
    CodeMismatch { remaining_attempts: u32 },

    #[error("Verification code has expired")]
    Expired,

    #[error("Failed to deliver verification email: {reason}")]
    DeliveryFailed { reason: String },
}

impl VerificationError {
    /// Stable machine-readable code
    pub fn error_code(&self) -> &'static str {
        match self {
            VerificationError::InvalidEmail => "INVALID_EMAIL",
            VerificationError::UnrecognizedDomain { .. } => "UNRECOGNIZED_DOMAIN",
            VerificationError::AlreadyVerified => "ALREADY_VERIFIED",
            VerificationError::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            VerificationError::NoPendingVerification => "NO_PENDING_VERIFICATION",
            VerificationError::CodeMismatch { .. } => "CODE_MISMATCH",
            VerificationError::Expired => "EXPIRED",
            VerificationError::DeliveryFailed { .. } => "DELIVERY_FAILED",
        }
    }
}

/// A submitted code that is not one to six ASCII digits
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Verification codes are 6 digits")]
pub struct CodeFormatError;

/// Message template problems detected at startup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Message template is missing the {{code}} placeholder")]
    MissingCodePlaceholder,
}

pub type VerificationResult<T> = Result<T, VerificationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = [
            VerificationError::InvalidEmail,
            VerificationError::UnrecognizedDomain { domain: "x.org".to_string() },
            VerificationError::AlreadyVerified,
            VerificationError::CapacityExceeded { bandwidth: 1 },
            VerificationError::NoPendingVerification,
            VerificationError::CodeMismatch { remaining_attempts: 1 },
            VerificationError::Expired,
            VerificationError::DeliveryFailed { reason: "smtp".to_string() },
        ];
        let mut codes: Vec<_> = errors.iter().map(VerificationError::error_code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            VerificationError::UnrecognizedDomain { domain: "x.org".to_string() }.to_string(),
            "Email domain is not recognized: x.org"
        );
        assert_eq!(
            TemplateError::MissingCodePlaceholder.to_string(),
            "Message template is missing the {code} placeholder"
        );
    }
}
