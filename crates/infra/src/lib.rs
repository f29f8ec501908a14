//! Infrastructure layer: local persistence, the inventory store service,
//! configuration, and the sheet sync boundary.

pub mod collections;
pub mod config;
pub mod kv;
pub mod outcome;
pub mod seed;
pub mod store;
pub mod sync;


pub use collections::{Collections, INVENTORY_KEY, PURCHASES_KEY, SALES_KEY};
pub use config::{ConfigError, StoreConfig};
pub use kv::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore, KvError};
pub use outcome::Outcome;
pub use store::InventoryStore;
pub use sync::{LocalSheetSync, SheetSync, SyncReport};
