//! Read-only shapes returned to lookup and detail screens.

use serde::{Deserialize, Serialize};

use stockroom_core::{NamedRecord, Price, Quantity};

use crate::item::{InventoryItem, ItemStatus};
use crate::purchase::PurchaseRecord;
use crate::sale::SaleRecord;

/// An inventory record plus its derived status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub status: ItemStatus,
}

impl From<InventoryItem> for ItemView {
    fn from(item: InventoryItem) -> Self {
        let status = item.status();
        Self { item, status }
    }
}

/// An inventory record with its full purchase and sales history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemHistory {
    pub inventory: ItemView,
    pub incoming_history: Vec<PurchaseRecord>,
    pub sales_history: Vec<SaleRecord>,
    pub total_incoming: usize,
    pub total_sales: usize,
}

impl ItemHistory {
    /// Collect every log entry whose name matches `name`.
    pub fn collect(
        item: InventoryItem,
        name: &str,
        purchases: Vec<PurchaseRecord>,
        sales: Vec<SaleRecord>,
    ) -> Self {
        let incoming_history: Vec<_> = purchases.into_iter().filter(|p| p.matches_name(name)).collect();
        let sales_history: Vec<_> = sales.into_iter().filter(|s| s.matches_name(name)).collect();

        Self {
            inventory: item.into(),
            total_incoming: incoming_history.len(),
            total_sales: sales_history.len(),
            incoming_history,
            sales_history,
        }
    }
}

/// Compact projection for autocomplete and lookup lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    pub name: String,
    pub quantity: Quantity,
    pub purchase_price: Price,
    pub selling_price: Price,
}

impl From<&InventoryItem> for ItemSummary {
    fn from(item: &InventoryItem) -> Self {
        Self {
            name: item.item_name.clone(),
            quantity: item.quantity,
            purchase_price: item.purchase_price,
            selling_price: item.selling_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::AddItem;
    use chrono::Utc;
    use stockroom_core::RecordId;

    #[test]
    fn history_keeps_only_matching_entries() {
        let (pen, pen_purchase) = AddItem::parse("Pen", "10", "2", None, "3")
            .unwrap()
            .into_records(Utc::now())
            .unwrap();
        let (_, ink_purchase) = AddItem::parse("Ink", "1", "2", None, "3")
            .unwrap()
            .into_records(Utc::now())
            .unwrap();
        let sale = SaleRecord {
            id: RecordId::generate(),
            item_name: "PEN".to_string(),
            quantity: Quantity::new(1),
            selling_price: pen.selling_price,
            sold_to: "Bob".to_string(),
            date: Utc::now(),
            synced: false,
        };

        let history = ItemHistory::collect(pen, "pen", vec![pen_purchase, ink_purchase], vec![sale]);
        assert_eq!(history.total_incoming, 1);
        assert_eq!(history.total_sales, 1);
        assert_eq!(history.incoming_history[0].item_name, "Pen");
        assert_eq!(history.inventory.status, ItemStatus::InStock);
    }

    #[test]
    fn item_view_flattens_record_fields() {
        let (pen, _) = AddItem::parse("Pen", "10", "2", None, "3")
            .unwrap()
            .into_records(Utc::now())
            .unwrap();
        let json = serde_json::to_value(ItemView::from(pen)).unwrap();
        assert_eq!(json["itemName"], "Pen");
        assert_eq!(json["status"], "In Stock");
    }
}
