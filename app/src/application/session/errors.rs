use recipebox_core::domain::common::entities::app_errors::CoreError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    #[error("Recipe {0} is not loaded")]
    UnknownRecipe(Uuid),
}
