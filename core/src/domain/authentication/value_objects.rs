use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignInInput {
    #[validate(email(message = "a valid email address is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

impl SignInInput {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Lookup key: trimmed and lowercased.
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_email() {
        let input = SignInInput::new("  Koch@Example.ORG ", "geheim");
        assert_eq!(input.normalized_email(), "koch@example.org");
    }

    #[test]
    fn test_sign_in_input_rules() {
        assert!(SignInInput::new("koch@example.org", "geheim").validate().is_ok());
        assert!(SignInInput::new("koch", "geheim").validate().is_err());
        assert!(SignInInput::new("koch@example.org", "").validate().is_err());
    }
}
