use std::sync::Arc;

use thiserror::Error;

/// Key-value storage error.
///
/// These are **infrastructure errors** (IO, locking, key naming) as opposed to
/// domain errors (validation, stock rules).
#[derive(Debug, Error)]
pub enum KvError {
    #[error("storage io failed: {0}")]
    Io(String),

    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    #[error("storage lock poisoned")]
    LockPoisoned,
}

/// Local persistent string store.
///
/// Values are opaque text (the inventory layer writes JSON). The store makes
/// no schema assumptions: an absent key is simply `None`.
///
/// Implementations must:
/// - make `set` replace the previous value wholesale (no partial writes visible to `get`)
/// - treat `remove` of an absent key as success
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, KvError>;

    fn set(&self, key: &str, value: String) -> Result<(), KvError>;

    fn remove(&self, key: &str) -> Result<(), KvError>;
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<(), KvError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), KvError> {
        (**self).remove(key)
    }
}
