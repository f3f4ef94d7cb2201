//! Unit tests for email module

#[cfg(test)]
pub mod mock_email_tests;
