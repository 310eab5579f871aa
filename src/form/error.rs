use thiserror::Error;

use super::key::FieldKey;
use super::state::FormErrors;

pub(super) const UNKNOWN_ERROR: &str = "Unknown error";

/// Structural failures. These indicate a bug in the orchestration layer, not a
/// user-facing condition, and are never folded into form state.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum FormError {
    #[error("field `{field}` is not mounted")]
    FieldNotFound { field: FieldKey },
    #[error("change event for field `{field}` carries no value")]
    EventWithoutValue { field: FieldKey },
    #[error("form submit is already in progress")]
    AlreadySubmitting,
    #[error("form state lock poisoned while {0}")]
    StatePoisoned(&'static str),
}

pub type FormResult<T> = Result<T, FormError>;

/// Structured, field-attributable submit failure.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("{message}")]
pub struct FormSubmitError {
    message: String,
    errors: FormErrors,
}

impl FormSubmitError {
    pub fn global(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            errors: FormErrors::with_global(message.clone()),
            message,
        }
    }

    pub fn fields(errors: FormErrors) -> Self {
        Self {
            message: UNKNOWN_ERROR.to_string(),
            errors,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn into_errors(self) -> FormErrors {
        self.errors
    }
}

impl From<&str> for FormSubmitError {
    fn from(message: &str) -> Self {
        Self::global(message)
    }
}

impl From<String> for FormSubmitError {
    fn from(message: String) -> Self {
        Self::global(message)
    }
}

impl From<FormErrors> for FormSubmitError {
    fn from(errors: FormErrors) -> Self {
        Self::fields(errors)
    }
}

/// Whatever a submit operation failed with, before it is parsed into
/// [`FormErrors`] by the fail-submit transition.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Form(#[from] FormSubmitError),
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error("{0}")]
    Message(String),
    #[error("submit rejected with {} error(s)", .0.len())]
    Errors(FormErrors),
    #[error("{}", UNKNOWN_ERROR)]
    Unknown,
}

impl SubmitError {
    pub fn other<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Other(Box::new(error))
    }

    pub fn is_form_submit_error(&self) -> bool {
        matches!(self, Self::Form(_))
    }

    /// Parsed mapping: a [`FormSubmitError`] keeps its mapping, a plain error
    /// or message becomes `_global`, a mapping is used as-is and anything else
    /// collapses to `{_global: "Unknown error"}`.
    pub fn into_form_errors(self) -> FormErrors {
        match self {
            Self::Form(error) => error.into_errors(),
            Self::Other(error) => FormErrors::with_global(error.to_string()),
            Self::Message(message) => FormErrors::with_global(message),
            Self::Errors(errors) => errors,
            Self::Unknown => FormErrors::with_global(UNKNOWN_ERROR),
        }
    }
}

impl From<&str> for SubmitError {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}

impl From<String> for SubmitError {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<FormErrors> for SubmitError {
    fn from(errors: FormErrors) -> Self {
        Self::Errors(errors)
    }
}

impl From<Box<dyn std::error::Error + Send + Sync + 'static>> for SubmitError {
    fn from(error: Box<dyn std::error::Error + Send + Sync + 'static>) -> Self {
        Self::Other(error)
    }
}
