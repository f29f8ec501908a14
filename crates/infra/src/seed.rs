//! Sample data for a fresh install.

use chrono::Utc;

use stockroom_core::{DomainResult, RecordId};
use stockroom_inventory::{InventoryItem, InventoryResult, PurchaseRecord, SaleRecord};

use crate::collections::{self, INVENTORY_KEY, PURCHASES_KEY, SALES_KEY, WriteBatch};
use crate::kv::KeyValueStore;
use crate::store::InventoryStore;

const SAMPLE_PURCHASER: &str = "Leonardo DiCaprio";

// (id, purchase id, name, quantity, purchase price, selling price)
const SAMPLES: [(&str, &str, &str, &str, &str, &str); 3] = [
    ("1", "p1", "Sample Laptop", "5", "25000", "30000"),
    ("2", "p2", "Sample Phone", "8", "15000", "18000"),
    ("3", "p3", "Sample Headphones", "12", "2000", "2500"),
];

fn sample_records() -> DomainResult<(Vec<InventoryItem>, Vec<PurchaseRecord>)> {
    let now = Utc::now();
    let mut items = Vec::with_capacity(SAMPLES.len());
    let mut purchases = Vec::with_capacity(SAMPLES.len());

    for (id, purchase_id, name, quantity, cost, price) in SAMPLES {
        items.push(InventoryItem {
            id: id.parse::<RecordId>()?,
            item_name: name.to_string(),
            quantity: quantity.parse()?,
            purchase_price: cost.parse()?,
            selling_price: price.parse()?,
            date_added: now,
            synced: true,
        });
        purchases.push(PurchaseRecord {
            id: purchase_id.parse::<RecordId>()?,
            item_name: name.to_string(),
            quantity: quantity.parse()?,
            purchase_price: cost.parse()?,
            purchased_by: SAMPLE_PURCHASER.to_string(),
            date: now,
            synced: true,
        });
    }

    Ok((items, purchases))
}

impl<S> InventoryStore<S>
where
    S: KeyValueStore,
{
    /// Populate an empty inventory with sample items and their purchases.
    ///
    /// Returns `false` (and writes nothing to inventory or purchases) when the
    /// inventory already holds records. An absent sales collection is
    /// initialized to an empty list either way.
    pub fn seed_sample_data(&self) -> InventoryResult<bool> {
        let _guard = self.lock()?;

        let mut batch = WriteBatch::new();
        if self.kv().get(SALES_KEY)?.is_none() {
            batch.put::<SaleRecord>(SALES_KEY, &[])?;
        }

        let existing: Vec<InventoryItem> = collections::load(self.kv(), INVENTORY_KEY)?;
        if !existing.is_empty() {
            if !batch.is_empty() {
                batch.commit(self.kv())?;
            }
            tracing::debug!(items = existing.len(), "inventory present; skipping sample data");
            return Ok(false);
        }

        let (items, samples) = sample_records()?;
        let purchases: Vec<PurchaseRecord> = collections::load(self.kv(), PURCHASES_KEY)?;
        if purchases.is_empty() {
            batch.put(PURCHASES_KEY, &samples)?;
        }
        batch.put(INVENTORY_KEY, &items)?;
        batch.commit(self.kv())?;

        tracing::info!(items = items.len(), "sample inventory initialized");
        Ok(true)
    }
}
