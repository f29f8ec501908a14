//! `stockroom-core`: shared domain building blocks.
//!
//! This crate contains **pure domain** primitives (no storage concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::{NamedRecord, names_match};
pub use error::{DomainError, DomainResult};
pub use id::RecordId;
pub use value_object::{Price, Quantity, ValueObject, lenient};
