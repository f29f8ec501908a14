//! Uniform success/error envelope handed to UI consumers.

use serde::{Deserialize, Serialize};

use stockroom_inventory::InventoryResult;

/// Either `{ "success": true, "data": ... }` or
/// `{ "success": false, "error": "..." }`.
///
/// Store operations return `Result`; the boundary converts with
/// `Outcome::from` so callers always get a value, never a panic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Outcome<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match (self.data, self.error) {
            (Some(data), _) if self.success => Ok(data),
            (_, Some(error)) => Err(error),
            _ => Err("operation failed".to_string()),
        }
    }
}

impl<T> From<InventoryResult<T>> for Outcome<T> {
    fn from(value: InventoryResult<T>) -> Self {
        match value {
            Ok(data) => Outcome::ok(data),
            Err(err) => Outcome::failed(err.to_string()),
        }
    }
}
