//! Failure model.

use thiserror::Error;

use crate::input::{ExtractError, QueryError};
use crate::record::ValidationError;

/// Result type used by handlers and the dispatcher.
pub type GatewayResult<T> = Result<T, Failure>;

/// A request that could not be satisfied.
///
/// Failures are never rendered as bodies; they are handed to
/// [`crate::interceptor::intercept`] which turns each one into a redirect.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Failure {
    /// No endpoint is registered for the path.
    #[error("not found")]
    NotFound,

    /// The path exists but not for this method.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Required input was missing or of the wrong type.
    #[error("validation failed: {detail}")]
    Validation { detail: String },

    /// Any other HTTP-style failure.
    #[error("request failed with status {status}")]
    Http { status: u16, detail: Option<String> },
}

impl Failure {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation {
            detail: detail.into(),
        }
    }

    pub fn http(status: u16) -> Self {
        Self::Http {
            status,
            detail: None,
        }
    }

    pub fn http_with_detail(status: u16, detail: impl Into<String>) -> Self {
        Self::Http {
            status,
            detail: Some(detail.into()),
        }
    }

    /// Numeric status code carried by the failure.
    pub fn status(&self) -> u16 {
        match self {
            Failure::NotFound => 404,
            Failure::MethodNotAllowed => 405,
            Failure::Validation { .. } => 422,
            Failure::Http { status, .. } => *status,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            Failure::Validation { detail } => Some(detail),
            Failure::Http { detail, .. } => detail.as_deref(),
            Failure::NotFound | Failure::MethodNotAllowed => None,
        }
    }
}

impl From<ExtractError> for Failure {
    fn from(err: ExtractError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<ValidationError> for Failure {
    fn from(err: ValidationError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<QueryError> for Failure {
    fn from(err: QueryError) -> Self {
        Self::http_with_detail(400, err.to_string())
    }
}
