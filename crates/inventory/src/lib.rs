//! Inventory domain module.
//!
//! Record types and business rules for stock, purchases and sales,
//! implemented as deterministic domain logic (no IO, no storage).

pub mod error;
pub mod field;
pub mod item;
pub mod purchase;
pub mod sale;
pub mod sheet;
pub mod stats;
pub mod view;

pub use error::{InventoryError, InventoryResult};
pub use field::{FieldUpdate, FieldValue, ItemField};
pub use item::{AddItem, InventoryItem, ItemStatus, UNKNOWN_PURCHASER};
pub use purchase::PurchaseRecord;
pub use sale::{SaleDecision, SaleReceipt, SaleRecord, SellItem, StockChange};
pub use sheet::{Sheet, SheetData};
pub use stats::{DashboardStats, LOW_STOCK_THRESHOLD};
pub use view::{ItemHistory, ItemSummary, ItemView};
