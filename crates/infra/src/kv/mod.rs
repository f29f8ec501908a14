//! Local key-value persistence boundary.
//!
//! The inventory store keeps each record collection as JSON text under a
//! string key. This module defines that boundary plus the in-memory and
//! file-backed implementations.

pub mod file;
pub mod in_memory;
pub mod r#trait;

pub use file::{FileKeyValueStore, default_data_dir};
pub use in_memory::InMemoryKeyValueStore;
pub use r#trait::{KeyValueStore, KvError};
