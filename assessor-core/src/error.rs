//! Error kinds surfaced by an assessment module.
//!
//! Both kinds are recovered at the module boundary and shown inline next to
//! the form; neither is fatal.

use thiserror::Error;

/// Shown when a form is submitted with required fields unset.
pub const INCOMPLETE_FORM: &str = "Пожалуйста, заполните все поля";

/// Fallback for transport failures that carry no message of their own.
pub const REQUEST_FAILED: &str = "Ошибка при отправке запроса";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessError {
    /// Required fields are incomplete. Detected locally; never reaches the network.
    #[error("{0}")]
    Validation(String),

    /// Non-success response or transport failure.
    #[error("{message}")]
    Service { message: String },
}

impl AssessError {
    pub fn incomplete() -> Self {
        AssessError::Validation(INCOMPLETE_FORM.to_string())
    }

    pub fn service(message: impl Into<String>) -> Self {
        AssessError::Service {
            message: message.into(),
        }
    }

    /// Generic message for a non-success status without a service-provided reason.
    pub fn server_status(status: u16) -> Self {
        AssessError::service(format!("Ошибка сервера: {status}"))
    }

    /// Transport-level failure; falls back to a generic message when the
    /// transport gave none.
    pub fn transport(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            AssessError::service(REQUEST_FAILED)
        } else {
            AssessError::service(message)
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AssessError::Validation(_))
    }

    /// Display-ready message.
    pub fn message(&self) -> &str {
        match self {
            AssessError::Validation(m) => m,
            AssessError::Service { message } => message,
        }
    }
}
