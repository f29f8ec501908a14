use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{lenient, DomainError, DomainResult, NamedRecord, Price, Quantity, RecordId};

use crate::purchase::PurchaseRecord;

/// Purchaser recorded when the form leaves "purchased by" blank.
pub const UNKNOWN_PURCHASER: &str = "Unknown";

/// An active stock line.
///
/// Several records may share a name: adding an item never merges into an
/// existing record. Lookups by name resolve to the first one stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: RecordId,
    pub item_name: String,
    #[serde(deserialize_with = "lenient::quantity")]
    pub quantity: Quantity,
    #[serde(deserialize_with = "lenient::price")]
    pub purchase_price: Price,
    #[serde(deserialize_with = "lenient::price")]
    pub selling_price: Price,
    pub date_added: DateTime<Utc>,
    #[serde(default)]
    pub synced: bool,
}

impl InventoryItem {
    pub fn status(&self) -> ItemStatus {
        if self.quantity.is_zero() {
            ItemStatus::OutOfStock
        } else {
            ItemStatus::InStock
        }
    }
}

impl NamedRecord for InventoryItem {
    fn item_name(&self) -> &str {
        &self.item_name
    }
}

/// Derived availability shown next to an item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::InStock => "In Stock",
            ItemStatus::OutOfStock => "Out of Stock",
        }
    }
}

/// Command: AddItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItem {
    pub item_name: String,
    pub quantity: Quantity,
    pub purchase_price: Price,
    #[serde(default)]
    pub purchased_by: Option<String>,
    pub selling_price: Price,
}

impl AddItem {
    /// Build the command from raw form input.
    pub fn parse(
        item_name: &str,
        quantity: &str,
        purchase_price: &str,
        purchased_by: Option<&str>,
        selling_price: &str,
    ) -> DomainResult<Self> {
        let cmd = Self {
            item_name: item_name.trim().to_string(),
            quantity: quantity.parse()?,
            purchase_price: purchase_price.parse()?,
            purchased_by: purchased_by.map(str::to_string),
            selling_price: selling_price.parse()?,
        };
        cmd.validate()?;
        Ok(cmd)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.item_name.trim().is_empty() {
            return Err(DomainError::validation("item name cannot be empty"));
        }
        Ok(())
    }

    /// Purchaser to log, falling back to [`UNKNOWN_PURCHASER`].
    pub fn purchaser(&self) -> &str {
        match self.purchased_by.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => UNKNOWN_PURCHASER,
        }
    }

    /// Decide the records this command produces: the new stock line and its
    /// purchase log entry, both unsynced and stamped `now`.
    pub fn into_records(self, now: DateTime<Utc>) -> DomainResult<(InventoryItem, PurchaseRecord)> {
        self.validate()?;
        let item_name = self.item_name.trim().to_string();

        let purchase = PurchaseRecord {
            id: RecordId::generate(),
            item_name: item_name.clone(),
            quantity: self.quantity,
            purchase_price: self.purchase_price,
            purchased_by: self.purchaser().to_string(),
            date: now,
            synced: false,
        };

        let item = InventoryItem {
            id: RecordId::generate(),
            item_name,
            quantity: self.quantity,
            purchase_price: self.purchase_price,
            selling_price: self.selling_price,
            date_added: now,
            synced: false,
        };

        Ok((item, purchase))
    }
}
