//! Spreadsheet sync boundary.
//!
//! Only a local marker implementation exists: it flags every record as
//! synced without talking to any remote. A real remote sync would implement
//! [`SheetSync`] and carry its own credentials, injected at construction.

use serde::{Deserialize, Serialize};

use stockroom_inventory::InventoryResult;

use crate::collections::Collections;

/// Summary of one sync pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub items: usize,
    pub purchases: usize,
    pub sales: usize,
    /// Records whose flag flipped from unsynced to synced in this pass.
    pub newly_synced: usize,
}

/// Pushes local collections to a remote copy and marks accepted records as
/// synced. Implementations mutate `collections` in place; the store persists
/// the result.
pub trait SheetSync: Send + Sync {
    fn push(&self, collections: &mut Collections) -> InventoryResult<SyncReport>;
}

/// Local-only sync: marks everything synced.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSheetSync;

impl SheetSync for LocalSheetSync {
    fn push(&self, collections: &mut Collections) -> InventoryResult<SyncReport> {
        let mut newly_synced = 0;
        let mut mark = |synced: &mut bool| {
            if !*synced {
                *synced = true;
                newly_synced += 1;
            }
        };

        collections.items.iter_mut().for_each(|r| mark(&mut r.synced));
        collections.purchases.iter_mut().for_each(|r| mark(&mut r.synced));
        collections.sales.iter_mut().for_each(|r| mark(&mut r.synced));

        Ok(SyncReport {
            items: collections.items.len(),
            purchases: collections.purchases.len(),
            sales: collections.sales.len(),
            newly_synced,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use stockroom_inventory::AddItem;

    #[test]
    fn local_sync_marks_every_record() {
        let (item, purchase) = AddItem::parse("Pen", "3", "1", None, "2")
            .unwrap()
            .into_records(Utc::now())
            .unwrap();
        let mut collections = Collections {
            items: vec![item],
            purchases: vec![purchase],
            sales: vec![],
        };

        let report = LocalSheetSync.push(&mut collections).unwrap();
        assert_eq!(report.newly_synced, 2);
        assert_eq!((report.items, report.purchases, report.sales), (1, 1, 0));
        assert!(collections.items.iter().all(|i| i.synced));
        assert!(collections.purchases.iter().all(|p| p.synced));

        let again = LocalSheetSync.push(&mut collections).unwrap();
        assert_eq!(again.newly_synced, 0);
    }
}
