//! Verification email template

use crate::domain::value_objects::VerificationCode;
use crate::errors::TemplateError;

const CODE_PLACEHOLDER: &str = "{code}";
const USERNAME_PLACEHOLDER: &str = "{username}";

/// Immutable email body template with `{code}` and `{username}` placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    text: String,
}

impl MessageTemplate {
    /// Create a template; the text must contain `{code}`
    pub fn new(text: impl Into<String>) -> Result<Self, TemplateError> {
        let text = text.into();
        if !text.contains(CODE_PLACEHOLDER) {
            return Err(TemplateError::MissingCodePlaceholder);
        }
        Ok(Self { text })
    }

    /// Substitute the zero-padded code and the HTML-escaped username
    pub fn render(&self, code: &VerificationCode, username: &str) -> String {
        self.text
            .replace(CODE_PLACEHOLDER, &code.to_string())
            .replace(USERNAME_PLACEHOLDER, &escape_html(username))
    }
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_code_placeholder() {
        assert_eq!(
            MessageTemplate::new("Hello {username}"),
            Err(TemplateError::MissingCodePlaceholder)
        );
    }

    #[test]
    fn test_render_substitutes_every_occurrence() {
        let template = MessageTemplate::new("{username}: {code} ({code})").unwrap();
        let code = VerificationCode::new(42317).unwrap();
        assert_eq!(template.render(&code, "alice"), "alice: 042317 (042317)");
    }

    #[test]
    fn test_render_escapes_username() {
        let template = MessageTemplate::new("<p>{username}</p><b>{code}</b>").unwrap();
        let code = VerificationCode::new(1).unwrap();
        assert_eq!(
            template.render(&code, "<script>&"),
            "<p>&lt;script&gt;&amp;</p><b>000001</b>"
        );
    }
}
