use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{lenient, NamedRecord, Price, Quantity, RecordId};

/// Acquisition log entry (append-only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    pub id: RecordId,
    pub item_name: String,
    #[serde(deserialize_with = "lenient::quantity")]
    pub quantity: Quantity,
    #[serde(deserialize_with = "lenient::price")]
    pub purchase_price: Price,
    pub purchased_by: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub synced: bool,
}

impl NamedRecord for PurchaseRecord {
    fn item_name(&self) -> &str {
        &self.item_name
    }
}
