//! The three persisted record collections and their storage keys.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use stockroom_inventory::{InventoryError, InventoryItem, InventoryResult, PurchaseRecord, SaleRecord, Sheet};

use crate::kv::{KeyValueStore, KvError};

pub const INVENTORY_KEY: &str = "inventory_items";
pub const PURCHASES_KEY: &str = "purchase_items";
pub const SALES_KEY: &str = "sales_items";

/// Storage key holding a sheet's collection.
pub fn storage_key(sheet: Sheet) -> &'static str {
    match sheet {
        Sheet::Inventory => INVENTORY_KEY,
        Sheet::Purchase => PURCHASES_KEY,
        Sheet::Sales => SALES_KEY,
    }
}

impl From<KvError> for InventoryError {
    fn from(value: KvError) -> Self {
        InventoryError::storage(value.to_string())
    }
}

/// Load a collection; an absent key is an empty list.
pub(crate) fn load<T, S>(kv: &S, key: &str) -> InventoryResult<Vec<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match kv.get(key)? {
        Some(text) => serde_json::from_str(&text)
            .map_err(|e| InventoryError::storage(format!("corrupt collection '{key}': {e}"))),
        None => Ok(Vec::new()),
    }
}

/// Load a collection as untyped JSON values, exactly as stored.
///
/// Anything other than a JSON array reads as empty.
pub(crate) fn load_raw<S>(kv: &S, key: &str) -> InventoryResult<Vec<JsonValue>>
where
    S: KeyValueStore + ?Sized,
{
    let Some(text) = kv.get(key)? else {
        return Ok(Vec::new());
    };
    let value: JsonValue = serde_json::from_str(&text)
        .map_err(|e| InventoryError::storage(format!("corrupt collection '{key}': {e}")))?;
    match value {
        JsonValue::Array(values) => Ok(values),
        _ => Ok(Vec::new()),
    }
}

fn encode<T: Serialize>(key: &str, records: &[T]) -> InventoryResult<String> {
    serde_json::to_string(records)
        .map_err(|e| InventoryError::storage(format!("failed to serialize '{key}': {e}")))
}

pub(crate) fn save<T, S>(kv: &S, key: &str, records: &[T]) -> InventoryResult<()>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    kv.set(key, encode(key, records)?)?;
    Ok(())
}

/// Collection writes that land together or not at all.
///
/// The current text of every key is read before anything is written. If a
/// write fails, the keys already written are put back (or removed, if they
/// were absent) before the error is returned.
#[derive(Debug, Default)]
pub(crate) struct WriteBatch {
    writes: Vec<(&'static str, String)>,
}

impl WriteBatch {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn put<T: Serialize>(&mut self, key: &'static str, records: &[T]) -> InventoryResult<()> {
        self.writes.push((key, encode(key, records)?));
        Ok(())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub(crate) fn commit<S: KeyValueStore + ?Sized>(self, kv: &S) -> InventoryResult<()> {
        let mut previous = Vec::with_capacity(self.writes.len());
        for (key, _) in &self.writes {
            previous.push(kv.get(key)?);
        }

        for (done, (key, text)) in self.writes.iter().enumerate() {
            if let Err(err) = kv.set(key, text.clone()) {
                tracing::warn!(key, error = %err, "collection write failed; restoring earlier writes");
                let written = self.writes[..done].iter().map(|(k, _)| *k);
                restore(kv, written.zip(previous).rev());
                return Err(err.into());
            }
        }
        Ok(())
    }
}

fn restore<S, I>(kv: &S, entries: I)
where
    S: KeyValueStore + ?Sized,
    I: Iterator<Item = (&'static str, Option<String>)>,
{
    for (key, text) in entries {
        let restored = match text {
            Some(text) => kv.set(key, text),
            None => kv.remove(key),
        };
        if let Err(err) = restored {
            tracing::error!(key, error = %err, "failed to restore collection after aborted write");
        }
    }
}

/// Snapshot of every collection, as handed to a sheet sync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collections {
    pub items: Vec<InventoryItem>,
    pub purchases: Vec<PurchaseRecord>,
    pub sales: Vec<SaleRecord>,
}

impl Collections {
    pub(crate) fn load_all<S: KeyValueStore + ?Sized>(kv: &S) -> InventoryResult<Self> {
        Ok(Self {
            items: load(kv, INVENTORY_KEY)?,
            purchases: load(kv, PURCHASES_KEY)?,
            sales: load(kv, SALES_KEY)?,
        })
    }

    pub(crate) fn save_all<S: KeyValueStore + ?Sized>(&self, kv: &S) -> InventoryResult<()> {
        let mut batch = WriteBatch::new();
        batch.put(INVENTORY_KEY, &self.items)?;
        batch.put(SALES_KEY, &self.sales)?;
        batch.put(PURCHASES_KEY, &self.purchases)?;
        batch.commit(kv)
    }

    pub fn record_count(&self) -> usize {
        self.items.len() + self.purchases.len() + self.sales.len()
    }
}
