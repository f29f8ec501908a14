//! Dashboard summary over the current stock.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Quantity};

use crate::item::InventoryItem;
use crate::sale::SaleRecord;

/// Items holding fewer units than this count as low stock.
pub const LOW_STOCK_THRESHOLD: Quantity = Quantity::new(10);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_items: usize,
    /// Σ quantity × selling price, rounded to 2 decimal places.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_value: Decimal,
    pub low_stock_items: usize,
    /// Number of sale records, not units sold.
    pub total_sales: usize,
}

impl DashboardStats {
    pub fn compute(items: &[InventoryItem], sales: &[SaleRecord]) -> DomainResult<Self> {
        let mut total_value = Decimal::ZERO;
        let mut low_stock_items = 0;

        for item in items {
            let value = item.quantity.value_at(item.selling_price)?;
            total_value = total_value
                .checked_add(value)
                .ok_or_else(|| DomainError::invariant("stock value overflow"))?;

            if item.quantity < LOW_STOCK_THRESHOLD {
                low_stock_items += 1;
            }
        }

        Ok(Self {
            total_items: items.len(),
            total_value: total_value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            low_stock_items,
            total_sales: sales.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::AddItem;
    use chrono::Utc;

    fn item(quantity: &str, selling: &str) -> InventoryItem {
        AddItem::parse("Thing", quantity, "1", None, selling)
            .unwrap()
            .into_records(Utc::now())
            .unwrap()
            .0
    }

    #[test]
    fn empty_store_is_all_zero() {
        let stats = DashboardStats::compute(&[], &[]).unwrap();
        assert_eq!(stats, DashboardStats::default());
    }

    #[test]
    fn value_and_low_stock_are_derived_from_items() {
        let stats = DashboardStats::compute(&[item("5", "10"), item("10", "2.5")], &[]).unwrap();
        assert_eq!(stats.total_items, 2);
        assert_eq!(stats.total_value, Decimal::from(75));
        assert_eq!(stats.low_stock_items, 1);
        assert_eq!(stats.total_sales, 0);
    }

    #[test]
    fn total_value_rounds_half_away_from_zero() {
        let stats = DashboardStats::compute(&[item("1", "0.125")], &[]).unwrap();
        assert_eq!(stats.total_value, Decimal::new(13, 2));
    }

    #[test]
    fn total_value_serializes_as_number() {
        let stats = DashboardStats::compute(&[item("5", "10")], &[]).unwrap();
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["totalValue"], serde_json::json!(50.0));
        assert_eq!(json["lowStockItems"], 1);
    }
}
