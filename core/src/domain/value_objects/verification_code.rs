//! One-time numeric verification code

use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use std::fmt;
use std::str::FromStr;

use crate::errors::CodeFormatError;

/// Number of digits in a verification code
pub const CODE_LENGTH: usize = 6;

/// Exclusive upper bound of the code space
pub const CODE_SPACE: u32 = 1_000_000;

/// A 6-digit verification code in `[0, 999999]`
///
/// Displayed zero-padded (`042317`). Parsing accepts one to six digits so a
/// submission that lost its leading zeros (`42317`) still denotes the same
/// code. `Debug` output is redacted.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct VerificationCode(u32);

impl VerificationCode {
    /// Wrap a raw value, rejecting anything outside the code space
    pub fn new(value: u32) -> Option<Self> {
        (value < CODE_SPACE).then_some(Self(value))
    }

    /// Draw a uniformly distributed code from the OS CSPRNG
    pub fn generate() -> Self {
        Self(OsRng.gen_range(0..CODE_SPACE))
    }

    /// Raw numeric value
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Compare against a submitted code in constant time
    pub fn matches(&self, submitted: &VerificationCode) -> bool {
        constant_time_eq(self.to_string().as_bytes(), submitted.to_string().as_bytes())
    }
}

impl fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06}", self.0)
    }
}

impl fmt::Debug for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VerificationCode(******)")
    }
}

impl FromStr for VerificationCode {
    type Err = CodeFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim();
        if digits.is_empty() || digits.len() > CODE_LENGTH || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CodeFormatError);
        }
        digits
            .parse::<u32>()
            .ok()
            .and_then(Self::new)
            .ok_or(CodeFormatError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_zero_padded() {
        assert_eq!(VerificationCode::new(42317).unwrap().to_string(), "042317");
        assert_eq!(VerificationCode::new(0).unwrap().to_string(), "000000");
        assert_eq!(VerificationCode::new(999_999).unwrap().to_string(), "999999");
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(VerificationCode::new(CODE_SPACE).is_none());
    }

    #[test]
    fn test_parse_accepts_missing_leading_zeros() {
        let padded: VerificationCode = "042317".parse().unwrap();
        let bare: VerificationCode = "42317".parse().unwrap();
        assert_eq!(padded, bare);
        assert_eq!(bare.value(), 42317);
        assert!(padded.matches(&bare));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["", "   ", "12345a", "1234567", "-12345", "12 345", "+12345"] {
            assert!(input.parse::<VerificationCode>().is_err(), "accepted {:?}", input);
        }
    }

    #[test]
    fn test_generated_codes_in_range() {
        for _ in 0..1000 {
            let code = VerificationCode::generate();
            assert!(code.value() < CODE_SPACE);
            assert_eq!(code.to_string().len(), CODE_LENGTH);
        }
    }

    #[test]
    fn test_debug_is_redacted() {
        let code = VerificationCode::new(123456).unwrap();
        assert!(!format!("{:?}", code).contains("123456"));
    }

    #[test]
    fn test_mismatch() {
        let a = VerificationCode::new(1).unwrap();
        let b = VerificationCode::new(2).unwrap();
        assert!(!a.matches(&b));
    }
}
