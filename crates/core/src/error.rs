//! Domain error model.

use thiserror::Error;

use crate::rules::FieldErrors;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is terminal for the request that produced it; the HTTP
/// layer translates each into exactly one status code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// One or more field rules were violated. Carries every failing field.
    #[error("validation failed")]
    Validation(FieldErrors),

    /// An identifier could not be parsed (e.g. non-numeric path segment).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The requested record does not exist.
    #[error("not found")]
    NotFound,

    /// Missing or unverifiable credentials.
    #[error("unauthorized")]
    Unauthorized,
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}

impl From<FieldErrors> for DomainError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}
