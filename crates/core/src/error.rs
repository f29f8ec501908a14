//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures (validation, malformed values,
/// invariants). Storage concerns belong to the infra crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input failed validation (e.g. blank item name).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A textual value could not be read as the expected kind of number.
    #[error("'{value}' is not a valid {expected}")]
    InvalidNumber { value: String, expected: &'static str },

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. empty).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_number(value: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidNumber {
            value: value.into(),
            expected,
        }
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
