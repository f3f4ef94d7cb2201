//! Domain entities representing core business objects.

pub mod pending_verification;


pub use pending_verification::PendingVerification;
