//! Failures surfaced by inventory operations.

use thiserror::Error;

use stockroom_core::DomainError;

pub type InventoryResult<T> = Result<T, InventoryError>;

/// Everything an inventory operation can fail with.
///
/// Messages are user-facing: the front-end shows them verbatim in an alert.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Cannot sell {requested}. Only {available} in stock.")]
    InsufficientStock { requested: u64, available: u64 },

    #[error("Invalid field '{0}'. Use 'quantity', 'purchase', or 'selling'")]
    InvalidField(String),

    #[error("Invalid value '{value}' for {field}")]
    InvalidValue { field: String, value: String },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Invariant(String),

    #[error("storage failure: {0}")]
    StorageFailure(String),
}

impl InventoryError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::ItemNotFound(name.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::StorageFailure(msg.into())
    }
}

impl From<DomainError> for InventoryError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::InvariantViolation(msg) => InventoryError::Invariant(msg),
            other => InventoryError::Validation(other.to_string()),
        }
    }
}
