//! Record identifiers.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a stored record (inventory item, purchase or sale).
///
/// Stored as an opaque string: records written by older clients carry
/// millisecond timestamps or short literals (`"1"`, `"p1"`) rather than UUIDs,
/// and those must keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered), like the millisecond timestamp ids it
    /// replaces.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for RecordId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Uuid> for RecordId {
    fn from(value: Uuid) -> Self {
        Self(value.to_string())
    }
}

impl FromStr for RecordId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::invalid_id("RecordId: empty"));
        }
        Ok(Self(s.to_string()))
    }
}
