use std::collections::HashMap;
use std::sync::RwLock;

use super::r#trait::{KeyValueStore, KvError};

/// In-memory key-value store.
///
/// Intended for tests/dev. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let entries = self.entries.read().map_err(|_| KvError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), KvError> {
        let mut entries = self.entries.write().map_err(|_| KvError::LockPoisoned)?;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KvError> {
        let mut entries = self.entries.write().map_err(|_| KvError::LockPoisoned)?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let kv = InMemoryKeyValueStore::new();
        assert_eq!(kv.get("a").unwrap(), None);

        kv.set("a", "1".to_string()).unwrap();
        kv.set("a", "2".to_string()).unwrap();
        assert_eq!(kv.get("a").unwrap().as_deref(), Some("2"));
        assert_eq!(kv.len(), 1);

        kv.remove("a").unwrap();
        kv.remove("a").unwrap();
        assert!(kv.is_empty());
    }
}
