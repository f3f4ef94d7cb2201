//! Value objects representing immutable domain concepts.

pub mod identifiers;
pub mod verification_code;

// Re-export commonly used types
pub use identifiers::{RoleId, UserId};
pub use verification_code::{VerificationCode, CODE_LENGTH, CODE_SPACE};
