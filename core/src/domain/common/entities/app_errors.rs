use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Input rejected before any backend call.
    #[error("{0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("You need to sign in first")]
    Unauthenticated,
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors
                    .iter()
                    .map(|error| match &error.message {
                        Some(message) => message.to_string(),
                        None => format!("{field} is invalid"),
                    })
                    .collect::<Vec<String>>()
            })
            .collect::<Vec<String>>();

        messages.sort();
        messages.dedup();

        if messages.is_empty() {
            return CoreError::Validation("invalid input".to_string());
        }

        CoreError::Validation(messages.join("; "))
    }
}
