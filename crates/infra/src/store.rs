//! Inventory store: persistence + business rules over the three collections.
//!
//! Every operation follows the same shape:
//!
//! ```text
//! load collection(s) from the key-value store
//!   ↓
//! decide (pure domain logic from `stockroom-inventory`)
//!   ↓
//! write collection(s) back, all or nothing
//!   ↓
//! run the sheet sync (when auto-sync is on; failures are logged only)
//! ```
//!
//! Mutating operations hold an internal write lock for the whole
//! read-modify-write sequence, so two callers in one process cannot both act
//! on the same stale quantity. This is not a cross-process guarantee.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use stockroom_core::NamedRecord;
use stockroom_inventory::{
    AddItem, DashboardStats, FieldUpdate, InventoryError, InventoryItem, InventoryResult,
    ItemField, ItemHistory, ItemSummary, ItemView, PurchaseRecord, SaleReceipt, SaleRecord,
    SellItem, Sheet, SheetData, StockChange,
};

use crate::collections::{
    self, Collections, INVENTORY_KEY, PURCHASES_KEY, SALES_KEY, WriteBatch, storage_key,
};
use crate::config::StoreConfig;
use crate::kv::{FileKeyValueStore, KeyValueStore};
use crate::sync::{LocalSheetSync, SheetSync, SyncReport};

pub struct InventoryStore<S> {
    kv: S,
    sync: Box<dyn SheetSync>,
    auto_sync: bool,
    write_lock: Mutex<()>,
}

impl InventoryStore<FileKeyValueStore> {
    /// Open the file-backed store described by `config`.
    pub fn open(config: &StoreConfig) -> InventoryResult<Self> {
        let kv = match &config.data_dir {
            Some(dir) => FileKeyValueStore::open(dir.clone())?,
            None => FileKeyValueStore::open_default()?,
        };
        tracing::info!(dir = %kv.dir().display(), "opening inventory store");
        Self::with_config(kv, config)
    }

    /// Open the file-backed store configured by `STOCKROOM_*` variables.
    pub fn open_from_env() -> InventoryResult<Self> {
        let config = StoreConfig::from_env().map_err(|e| InventoryError::Validation(e.to_string()))?;
        Self::open(&config)
    }
}

impl<S> InventoryStore<S>
where
    S: KeyValueStore,
{
    /// Store with local sheet sync after every write.
    pub fn new(kv: S) -> Self {
        Self {
            kv,
            sync: Box::new(LocalSheetSync),
            auto_sync: true,
            write_lock: Mutex::new(()),
        }
    }

    /// Store configured from `config`, seeding sample data if requested.
    pub fn with_config(kv: S, config: &StoreConfig) -> InventoryResult<Self> {
        let store = Self::new(kv).with_auto_sync(config.auto_sync);
        if config.seed_sample_data {
            store.seed_sample_data()?;
        }
        Ok(store)
    }

    pub fn with_sync(mut self, sync: impl SheetSync + 'static) -> Self {
        self.sync = Box::new(sync);
        self
    }

    pub fn with_auto_sync(mut self, auto_sync: bool) -> Self {
        self.auto_sync = auto_sync;
        self
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    pub(crate) fn lock(&self) -> InventoryResult<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| InventoryError::storage("inventory store lock poisoned"))
    }

    fn items(&self) -> InventoryResult<Vec<InventoryItem>> {
        collections::load(&self.kv, INVENTORY_KEY)
    }

    fn purchases(&self) -> InventoryResult<Vec<PurchaseRecord>> {
        collections::load(&self.kv, PURCHASES_KEY)
    }

    fn sales(&self) -> InventoryResult<Vec<SaleRecord>> {
        collections::load(&self.kv, SALES_KEY)
    }

    fn find(&self, name: &str) -> InventoryResult<InventoryItem> {
        self.items()?
            .into_iter()
            .find(|item| item.matches_name(name))
            .ok_or_else(|| InventoryError::not_found(name.trim()))
    }

    /// Add a new stock line and log its purchase.
    ///
    /// Never merges with an existing record of the same name.
    pub fn add_item(&self, cmd: AddItem) -> InventoryResult<InventoryItem> {
        let _guard = self.lock()?;

        let (item, purchase) = cmd.into_records(Utc::now())?;

        let mut items = self.items()?;
        let mut purchases = self.purchases()?;
        items.push(item.clone());
        purchases.push(purchase);

        let mut batch = WriteBatch::new();
        batch.put(INVENTORY_KEY, &items)?;
        batch.put(PURCHASES_KEY, &purchases)?;
        batch.commit(&self.kv)?;

        tracing::info!(
            item = %item.item_name,
            id = %item.id,
            quantity = %item.quantity,
            "item added"
        );

        self.after_write();
        Ok(item)
    }

    /// Sell from the first record matching `cmd.item_name`.
    pub fn sell_item(&self, cmd: SellItem) -> InventoryResult<SaleReceipt> {
        let _guard = self.lock()?;

        let mut items = self.items()?;
        let idx = items
            .iter()
            .position(|item| item.matches_name(&cmd.item_name))
            .ok_or_else(|| InventoryError::not_found(cmd.item_name.trim()))?;

        let decision = match cmd.decide(&items[idx], Utc::now()) {
            Ok(decision) => decision,
            Err(err) => {
                tracing::warn!(item = %cmd.item_name, error = %err, "sale rejected");
                return Err(err);
            }
        };

        let mut sales = self.sales()?;
        sales.push(decision.record);

        let item_name = items[idx].item_name.clone();
        match decision.change {
            StockChange::Depleted => {
                items.remove(idx);
            }
            StockChange::Remaining(left) => {
                items[idx].quantity = left;
                items[idx].synced = false;
            }
        }

        let mut batch = WriteBatch::new();
        batch.put(SALES_KEY, &sales)?;
        batch.put(INVENTORY_KEY, &items)?;
        batch.commit(&self.kv)?;

        let receipt = SaleReceipt::new(item_name, cmd.quantity, decision.change);
        tracing::info!(
            item = %receipt.item_name,
            sold = %receipt.sold,
            remaining = %receipt.remaining,
            removed = receipt.removed,
            "item sold"
        );

        self.after_write();
        Ok(receipt)
    }

    /// Overwrite one attribute of the first record matching `item_name`.
    ///
    /// `value` is checked against the field's type before anything is written.
    pub fn update_item(&self, item_name: &str, field: &str, value: &str) -> InventoryResult<FieldUpdate> {
        let target = ItemField::parse(field)?;
        let new_value = target.validate(value)?;

        let _guard = self.lock()?;

        let mut items = self.items()?;
        let item = items
            .iter_mut()
            .find(|item| item.matches_name(item_name))
            .ok_or_else(|| InventoryError::not_found(item_name.trim()))?;

        item.set_field(target, new_value)?;
        let update = FieldUpdate::new(item.item_name.clone(), field, target, new_value);
        collections::save(&self.kv, INVENTORY_KEY, &items)?;

        tracing::info!(
            item = %update.item_name,
            field = target.as_str(),
            value = %update.new_value,
            "item updated"
        );

        self.after_write();
        Ok(update)
    }

    pub fn view_item(&self, item_name: &str) -> InventoryResult<ItemView> {
        self.find(item_name).map(ItemView::from)
    }

    /// Item detail plus every purchase and sale logged under its name.
    pub fn view_item_enhanced(&self, item_name: &str) -> InventoryResult<ItemHistory> {
        let item = self.find(item_name)?;
        Ok(ItemHistory::collect(item, item_name, self.purchases()?, self.sales()?))
    }

    pub fn all_items(&self) -> InventoryResult<Vec<ItemSummary>> {
        Ok(self.items()?.iter().map(ItemSummary::from).collect())
    }

    pub fn dashboard_stats(&self) -> InventoryResult<DashboardStats> {
        let stats = DashboardStats::compute(&self.items()?, &self.sales()?)?;
        tracing::debug!(
            total_items = stats.total_items,
            low_stock_items = stats.low_stock_items,
            "dashboard stats computed"
        );
        Ok(stats)
    }

    /// A collection verbatim with its column labels. Unknown names yield an
    /// empty sheet rather than an error.
    pub fn sheet_data(&self, name: &str) -> InventoryResult<SheetData> {
        match Sheet::from_name(name) {
            Some(sheet) => Ok(SheetData::new(
                sheet,
                collections::load_raw(&self.kv, storage_key(sheet))?,
            )),
            None => {
                tracing::debug!(sheet = name, "unknown sheet requested");
                Ok(SheetData::unknown(name))
            }
        }
    }

    /// Run the sheet sync over every collection and persist the flags.
    pub fn sync_to_sheets(&self) -> InventoryResult<SyncReport> {
        let _guard = self.lock()?;
        self.sync_unlocked()
    }

    pub(crate) fn sync_unlocked(&self) -> InventoryResult<SyncReport> {
        let mut all = Collections::load_all(&self.kv)?;
        let report = self.sync.push(&mut all)?;
        all.save_all(&self.kv)?;
        tracing::debug!(
            records = all.record_count(),
            newly_synced = report.newly_synced,
            "collections synced"
        );
        Ok(report)
    }

    fn after_write(&self) {
        if !self.auto_sync {
            return;
        }
        if let Err(err) = self.sync_unlocked() {
            tracing::warn!(error = %err, "sheet sync failed; local changes kept");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::Quantity;
    use stockroom_inventory::ItemStatus;

    use crate::kv::{InMemoryKeyValueStore, KvError};

    fn store() -> InventoryStore<InMemoryKeyValueStore> {
        InventoryStore::new(InMemoryKeyValueStore::new()).with_auto_sync(false)
    }

    fn add(store: &InventoryStore<InMemoryKeyValueStore>, name: &str, qty: &str, selling: &str) -> InventoryItem {
        store
            .add_item(AddItem::parse(name, qty, "2.0", Some("Alice"), selling).unwrap())
            .unwrap()
    }

    fn sell(name: &str, qty: u64) -> SellItem {
        SellItem {
            item_name: name.to_string(),
            quantity: Quantity::new(qty),
            sold_to: "Bob".to_string(),
        }
    }

    /// Backend whose writes always fail.
    struct ReadOnlyStore(InMemoryKeyValueStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>, KvError> {
            self.0.get(key)
        }

        fn set(&self, _key: &str, _value: String) -> Result<(), KvError> {
            Err(KvError::Io("disk full".to_string()))
        }

        fn remove(&self, _key: &str) -> Result<(), KvError> {
            Err(KvError::Io("disk full".to_string()))
        }
    }

    /// Backend that fails writes to one key only.
    struct FailingKey {
        inner: InMemoryKeyValueStore,
        key: &'static str,
    }

    impl KeyValueStore for FailingKey {
        fn get(&self, key: &str) -> Result<Option<String>, KvError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: String) -> Result<(), KvError> {
            if key == self.key {
                return Err(KvError::Io("boom".to_string()));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), KvError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn failed_sale_write_leaves_no_sale_logged() {
        let seeded = store();
        add(&seeded, "Pen", "10", "3.0");
        let inner = InMemoryKeyValueStore::new();
        for key in [INVENTORY_KEY, PURCHASES_KEY] {
            inner.set(key, seeded.kv().get(key).unwrap().unwrap()).unwrap();
        }

        let store = InventoryStore::new(FailingKey { inner, key: INVENTORY_KEY }).with_auto_sync(false);
        let err = store.sell_item(sell("Pen", 4)).unwrap_err();
        assert!(matches!(err, InventoryError::StorageFailure(msg) if msg.contains("boom")));

        assert_eq!(store.view_item("Pen").unwrap().item.quantity, Quantity::new(10));
        assert_eq!(store.dashboard_stats().unwrap().total_sales, 0);
        assert_eq!(store.kv().inner.get(SALES_KEY).unwrap(), None);
    }

    #[test]
    fn failed_purchase_write_leaves_no_item_behind() {
        let store = InventoryStore::new(FailingKey {
            inner: InMemoryKeyValueStore::new(),
            key: PURCHASES_KEY,
        })
        .with_auto_sync(false);

        let err = store
            .add_item(AddItem::parse("Pen", "1", "1", None, "1").unwrap())
            .unwrap_err();
        assert!(matches!(err, InventoryError::StorageFailure(_)));
        assert!(store.all_items().unwrap().is_empty());
        assert_eq!(store.kv().inner.get(INVENTORY_KEY).unwrap(), None);
    }

    #[test]
    fn failed_write_restores_existing_items() {
        let seeded = store();
        add(&seeded, "Pen", "10", "3.0");
        let before = seeded.kv().get(INVENTORY_KEY).unwrap();
        let inner = InMemoryKeyValueStore::new();
        inner.set(INVENTORY_KEY, before.clone().unwrap()).unwrap();

        let store = InventoryStore::new(FailingKey { inner, key: PURCHASES_KEY }).with_auto_sync(false);
        assert!(store.add_item(AddItem::parse("Ink", "2", "1", None, "1").unwrap()).is_err());
        assert_eq!(store.kv().inner.get(INVENTORY_KEY).unwrap(), before);
    }

    #[test]
    fn add_item_twice_keeps_two_records() {
        let store = store();
        let first = add(&store, "Pen", "10", "3.0");
        let second = add(&store, "pen", "5", "3.0");
        assert_ne!(first.id, second.id);

        assert_eq!(store.all_items().unwrap().len(), 2);
        let history = store.view_item_enhanced("PEN").unwrap();
        assert_eq!(history.total_incoming, 2);
        // Lookup resolves to the first record stored.
        assert_eq!(history.inventory.item.id, first.id);
    }

    #[test]
    fn partial_sale_decrements_and_clears_synced() {
        let store = store();
        add(&store, "Pen", "10", "3.0");
        store.sync_to_sheets().unwrap();

        let receipt = store.sell_item(sell("pen", 4)).unwrap();
        assert_eq!(receipt.remaining, Quantity::new(6));
        assert_eq!(receipt.message, "Sold 4. Remaining: 6");

        let view = store.view_item("Pen").unwrap();
        assert_eq!(view.item.quantity, Quantity::new(6));
        assert!(!view.item.synced);
    }

    #[test]
    fn oversell_leaves_state_unchanged() {
        let store = store();
        add(&store, "Pen", "3", "3.0");

        let err = store.sell_item(sell("Pen", 4)).unwrap_err();
        assert_eq!(err, InventoryError::InsufficientStock { requested: 4, available: 3 });
        assert_eq!(store.view_item("Pen").unwrap().item.quantity, Quantity::new(3));
        assert_eq!(store.dashboard_stats().unwrap().total_sales, 0);
    }

    #[test]
    fn selling_unknown_item_fails() {
        let store = store();
        assert_eq!(
            store.sell_item(sell("Ghost", 1)).unwrap_err(),
            InventoryError::ItemNotFound("Ghost".to_string())
        );
    }

    #[test]
    fn update_rejects_unknown_field_and_bad_value() {
        let store = store();
        add(&store, "Pen", "10", "3.0");

        assert_eq!(
            store.update_item("Pen", "colour", "red").unwrap_err(),
            InventoryError::InvalidField("colour".to_string())
        );
        assert!(matches!(
            store.update_item("Pen", "qty", "lots").unwrap_err(),
            InventoryError::InvalidValue { .. }
        ));
        assert_eq!(store.view_item("Pen").unwrap().item.quantity, Quantity::new(10));
    }

    #[test]
    fn update_overwrites_mapped_field() {
        let store = store();
        add(&store, "Pen", "10", "3.0");

        let update = store.update_item("pen", "Selling Price", "4.25").unwrap();
        assert_eq!(update.item_name, "Pen");
        assert_eq!(update.message, "Selling Price updated to ₹4.25");

        let update = store.update_item("pen", "qty", "0").unwrap();
        assert_eq!(update.message, "qty updated to 0");

        let view = store.view_item("PEN").unwrap();
        assert_eq!(view.item.selling_price.to_string(), "4.25");
        assert_eq!(view.status, ItemStatus::OutOfStock);
    }

    #[test]
    fn update_missing_item_fails() {
        let store = store();
        assert!(matches!(
            store.update_item("Ghost", "qty", "1"),
            Err(InventoryError::ItemNotFound(_))
        ));
    }

    #[test]
    fn write_failure_surfaces_as_storage_failure() {
        let store = InventoryStore::new(ReadOnlyStore(InMemoryKeyValueStore::new()));
        let err = store
            .add_item(AddItem::parse("Pen", "1", "1", None, "1").unwrap())
            .unwrap_err();
        assert!(matches!(err, InventoryError::StorageFailure(msg) if msg.contains("disk full")));
    }

    #[test]
    fn auto_sync_marks_records_after_writes() {
        let store = InventoryStore::new(InMemoryKeyValueStore::new());
        store
            .add_item(AddItem::parse("Pen", "10", "1", None, "2").unwrap())
            .unwrap();
        store.sell_item(sell("Pen", 1)).unwrap();

        let inventory = store.sheet_data("inventory").unwrap();
        assert_eq!(inventory.data[0]["synced"], true);
        let sales = store.sheet_data("sales").unwrap();
        assert_eq!(sales.data[0]["synced"], true);
    }

    #[test]
    fn sheet_data_returns_raw_records_and_headers() {
        let store = store();
        add(&store, "Pen", "10", "3.0");

        let purchases = store.sheet_data("purchase").unwrap();
        assert_eq!(purchases.headers.len(), 5);
        assert_eq!(purchases.data.len(), 1);
        assert_eq!(purchases.data[0]["purchasedBy"], "Alice");
        assert_eq!(purchases.data[0]["quantity"], "10");

        let unknown = store.sheet_data("Sheet1").unwrap();
        assert!(unknown.headers.is_empty() && unknown.data.is_empty());
    }
}
