use serde::Serialize;
use std::fmt;

use crate::types::IdFamily;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Validation { kind: &'static str, value: String },
    RetryExhausted { limit: usize },
    Precondition(String),
    Missing(IdFamily),
    Config(String),
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdError::Validation { kind, value } => write!(f, "invalid {kind}: '{value}'"),
            IdError::RetryExhausted { limit } => write!(
                f,
                "exceeded max retry count of {limit} for finding unique analysis id"
            ),
            IdError::Precondition(msg) => write!(f, "precondition failed: {msg}"),
            IdError::Missing(family) => write!(f, "no {family} id available"),
            IdError::Config(msg) => write!(f, "configuration error: {msg}"),
        }
    }
}

impl std::error::Error for IdError {}

impl IdError {
    pub fn code(&self) -> Option<&'static str> {
        match self {
            IdError::Validation { .. } => Some("validation_failed"),
            IdError::RetryExhausted { .. } => Some("retry_exhausted"),
            IdError::Precondition(_) => Some("precondition_failed"),
            IdError::Missing(_) => Some("missing"),
            IdError::Config(_) => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl From<&IdError> for ErrorResponse {
    fn from(err: &IdError) -> Self {
        ErrorResponse {
            error: err.to_string(),
            code: err.code().map(String::from),
        }
    }
}
