use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{lenient, NamedRecord, Price, Quantity, RecordId};

use crate::error::{InventoryError, InventoryResult};
use crate::item::InventoryItem;

/// Sales log entry (append-only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub id: RecordId,
    pub item_name: String,
    #[serde(deserialize_with = "lenient::quantity")]
    pub quantity: Quantity,
    #[serde(deserialize_with = "lenient::price")]
    pub selling_price: Price,
    pub sold_to: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub synced: bool,
}

impl NamedRecord for SaleRecord {
    fn item_name(&self) -> &str {
        &self.item_name
    }
}

/// Command: SellItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellItem {
    pub item_name: String,
    pub quantity: Quantity,
    pub sold_to: String,
}

/// What a sale does to the stock line it draws from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StockChange {
    /// All stock sold; the record is removed.
    Depleted,
    /// Stock decremented in place.
    Remaining(Quantity),
}

/// Decision for a sale against one inventory record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleDecision {
    pub record: SaleRecord,
    pub change: StockChange,
}

impl SellItem {
    /// Decide the sale without touching state.
    ///
    /// Fails with `InsufficientStock` when more is requested than the record
    /// holds, so quantity can never go negative.
    pub fn decide(&self, item: &InventoryItem, now: DateTime<Utc>) -> InventoryResult<SaleDecision> {
        if self.quantity.is_zero() {
            return Err(InventoryError::Validation(
                "quantity to sell must be greater than zero".to_string(),
            ));
        }

        let remaining = item.quantity.checked_sub(self.quantity).ok_or(
            InventoryError::InsufficientStock {
                requested: self.quantity.get(),
                available: item.quantity.get(),
            },
        )?;

        let record = SaleRecord {
            id: RecordId::generate(),
            item_name: item.item_name.clone(),
            quantity: self.quantity,
            selling_price: item.selling_price,
            sold_to: self.sold_to.trim().to_string(),
            date: now,
            synced: false,
        };

        let change = if remaining.is_zero() {
            StockChange::Depleted
        } else {
            StockChange::Remaining(remaining)
        };

        Ok(SaleDecision { record, change })
    }
}

/// Result of a successful sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleReceipt {
    pub item_name: String,
    pub sold: Quantity,
    pub remaining: Quantity,
    pub removed: bool,
    pub message: String,
}

impl SaleReceipt {
    pub fn new(item_name: impl Into<String>, sold: Quantity, change: StockChange) -> Self {
        let (remaining, removed, message) = match change {
            StockChange::Depleted => (
                Quantity::ZERO,
                true,
                "Item sold completely and removed from inventory".to_string(),
            ),
            StockChange::Remaining(left) => {
                (left, false, format!("Sold {sold}. Remaining: {left}"))
            }
        };

        Self {
            item_name: item_name.into(),
            sold,
            remaining,
            removed,
            message,
        }
    }
}
