//! Editable inventory attributes and the names the forms use for them.

use serde::{Deserialize, Serialize};

use stockroom_core::{Price, Quantity};

use crate::error::{InventoryError, InventoryResult};
use crate::item::InventoryItem;

/// Attribute of an inventory record that `update_item` may overwrite.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemField {
    Quantity,
    PurchasePrice,
    SellingPrice,
}

impl ItemField {
    /// Resolve a user-supplied field name through the synonym table.
    pub fn parse(field: &str) -> InventoryResult<Self> {
        match field.trim().to_lowercase().as_str() {
            "quantity" | "qty" => Ok(ItemField::Quantity),
            "purchase" | "purchase price" | "purchaseprice" => Ok(ItemField::PurchasePrice),
            "selling" | "selling price" | "sellingprice" => Ok(ItemField::SellingPrice),
            _ => Err(InventoryError::InvalidField(field.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemField::Quantity => "quantity",
            ItemField::PurchasePrice => "purchasePrice",
            ItemField::SellingPrice => "sellingPrice",
        }
    }

    /// Parse `raw` as this field's type. Nothing is written.
    pub fn validate(self, raw: &str) -> InventoryResult<FieldValue> {
        let invalid = || InventoryError::InvalidValue {
            field: self.as_str().to_string(),
            value: raw.to_string(),
        };
        match self {
            ItemField::Quantity => raw.parse().map(FieldValue::Quantity).map_err(|_| invalid()),
            ItemField::PurchasePrice | ItemField::SellingPrice => {
                raw.parse().map(FieldValue::Price).map_err(|_| invalid())
            }
        }
    }
}

/// A validated replacement value.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Quantity(Quantity),
    Price(Price),
}

impl core::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FieldValue::Quantity(q) => core::fmt::Display::fmt(q, f),
            FieldValue::Price(p) => core::fmt::Display::fmt(p, f),
        }
    }
}

impl InventoryItem {
    /// Overwrite one attribute and clear the synced flag.
    pub fn set_field(&mut self, field: ItemField, value: FieldValue) -> InventoryResult<()> {
        match (field, value) {
            (ItemField::Quantity, FieldValue::Quantity(q)) => self.quantity = q,
            (ItemField::PurchasePrice, FieldValue::Price(p)) => self.purchase_price = p,
            (ItemField::SellingPrice, FieldValue::Price(p)) => self.selling_price = p,
            (field, value) => {
                return Err(InventoryError::InvalidValue {
                    field: field.as_str().to_string(),
                    value: value.to_string(),
                });
            }
        }
        self.synced = false;
        Ok(())
    }
}

/// Result of a successful field update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldUpdate {
    pub item_name: String,
    /// The field name as the caller spelled it.
    pub field: String,
    pub new_value: String,
    pub message: String,
}

impl FieldUpdate {
    pub fn new(item_name: impl Into<String>, requested: &str, field: ItemField, value: FieldValue) -> Self {
        let message = match field {
            ItemField::Quantity => format!("{requested} updated to {value}"),
            ItemField::PurchasePrice | ItemField::SellingPrice => {
                format!("{requested} updated to ₹{value}")
            }
        };
        Self {
            item_name: item_name.into(),
            field: requested.to_string(),
            new_value: value.to_string(),
            message,
        }
    }
}
