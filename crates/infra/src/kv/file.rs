//! Directory-backed key-value store: one `<key>.json` file per key.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use anyhow::Context;

use super::r#trait::{KeyValueStore, KvError};

/// File-backed key-value store.
///
/// Writes go to a sibling temp file which is then renamed over the target, so
/// a reader never observes a half-written value.
#[derive(Debug)]
pub struct FileKeyValueStore {
    dir: PathBuf,
    // Serializes writers within this process; readers share.
    lock: RwLock<()>,
}

impl FileKeyValueStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, KvError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create data directory at {dir:?}"))
            .map_err(io_error)?;
        Ok(Self {
            dir,
            lock: RwLock::new(()),
        })
    }

    /// Open the store in the default location: `{app_data_dir}/stockroom`.
    pub fn open_default() -> Result<Self, KvError> {
        Self::open(default_data_dir().map_err(io_error)?)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, KvError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(KvError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let path = self.path_for(key)?;
        let _guard = self.lock.read().map_err(|_| KvError::LockPoisoned)?;

        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(
                anyhow::Error::new(err).context(format!("failed to read {path:?}")),
            )),
        }
    }

    fn set(&self, key: &str, value: String) -> Result<(), KvError> {
        let path = self.path_for(key)?;
        let _guard = self.lock.write().map_err(|_| KvError::LockPoisoned)?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .with_context(|| format!("failed to write {tmp:?}"))
            .and_then(|_| {
                fs::rename(&tmp, &path)
                    .with_context(|| format!("failed to move {tmp:?} into place"))
            })
            .map_err(io_error)
    }

    fn remove(&self, key: &str) -> Result<(), KvError> {
        let path = self.path_for(key)?;
        let _guard = self.lock.write().map_err(|_| KvError::LockPoisoned)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(
                anyhow::Error::new(err).context(format!("failed to remove {path:?}")),
            )),
        }
    }
}

fn io_error(err: anyhow::Error) -> KvError {
    KvError::Io(format!("{err:#}"))
}

/// Resolve the default data directory: `{app_data_dir}/stockroom`.
pub fn default_data_dir() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

    Ok(base.join("stockroom"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let kv = FileKeyValueStore::open(dir.path()).unwrap();
        assert_eq!(kv.get("inventory_items").unwrap(), None);
        kv.set("inventory_items", "[]".to_string()).unwrap();
        drop(kv);

        let kv = FileKeyValueStore::open(dir.path()).unwrap();
        assert_eq!(kv.get("inventory_items").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("inventory_items.json").exists());
        assert!(!dir.path().join("inventory_items.json.tmp").exists());
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let kv = FileKeyValueStore::open(dir.path()).unwrap();

        kv.set("sales_items", "[1]".to_string()).unwrap();
        kv.remove("sales_items").unwrap();
        kv.remove("sales_items").unwrap();
        assert_eq!(kv.get("sales_items").unwrap(), None);
    }

    #[test]
    fn keys_cannot_escape_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let kv = FileKeyValueStore::open(dir.path()).unwrap();

        for key in ["../x", "a/b", "", "cache_https://x"] {
            assert!(matches!(kv.get(key), Err(KvError::InvalidKey(_))), "{key}");
        }
    }

    #[test]
    fn open_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let kv = FileKeyValueStore::open(&nested).unwrap();
        assert_eq!(kv.dir(), nested.as_path());
        assert!(nested.is_dir());
    }

    #[test]
    fn default_location_is_an_app_folder() {
        if let Ok(dir) = default_data_dir() {
            assert!(dir.ends_with("stockroom"));
        }
    }
}
