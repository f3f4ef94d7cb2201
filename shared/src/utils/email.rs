//! Email address utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Accepted address syntax: local part, `@`, dotted domain ending in a TLD of
/// two or more letters. Case-insensitive.
#[allow(clippy::expect_used)]
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email pattern is valid")
});

/// Check whether an address matches the accepted syntax
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Extract the lowercased domain of a syntactically valid address
pub fn extract_domain(email: &str) -> Option<String> {
    if !is_valid_email(email) {
        return None;
    }
    email
        .rsplit_once('@')
        .map(|(_, domain)| domain.to_ascii_lowercase())
}

/// Mask an address for logging: `alice@uni.edu` -> `a***@uni.edu`
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}
