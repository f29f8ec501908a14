//! Value objects: equality by value, not identity.
//!
//! The numeric values of the store (stock quantity and unit prices) are
//! persisted as JSON strings, the way the front-end forms captured them, but
//! older data also contains raw JSON numbers. Both forms are accepted on read;
//! writes always produce strings.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DomainError, DomainResult};

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. To
/// "modify" one, build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// Units of stock. Never negative.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(u64);

impl ValueObject for Quantity {}

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);

    pub const fn new(units: u64) -> Self {
        Self(units)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Remove `other` units; `None` if that would go below zero.
    pub fn checked_sub(self, other: Quantity) -> Option<Quantity> {
        self.0.checked_sub(other.0).map(Quantity)
    }

    /// Stock value at the given unit price.
    pub fn value_at(self, price: Price) -> DomainResult<Decimal> {
        Decimal::from(self.0)
            .checked_mul(price.0)
            .ok_or_else(|| DomainError::invariant("stock value overflow"))
    }
}

impl From<u64> for Quantity {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Quantity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        s.parse::<u64>()
            .map(Quantity)
            .map_err(|_| DomainError::invalid_number(s, "quantity"))
    }
}

/// Unit price in the store currency. Never negative.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

impl ValueObject for Price {}

impl Price {
    pub fn new(amount: Decimal) -> DomainResult<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DomainError::invalid_number(amount.to_string(), "price"));
        }
        Ok(Self(amount))
    }

    pub fn amount(self) -> Decimal {
        self.0
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Price {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let amount =
            Decimal::from_str(s).map_err(|_| DomainError::invalid_number(s, "price"))?;
        Price::new(amount).map_err(|_| DomainError::invalid_number(s, "price"))
    }
}

/// Raw persisted form of a numeric field.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredNumber {
    Number(serde_json::Number),
    Text(String),
}

impl StoredNumber {
    fn into_text(self) -> String {
        match self {
            StoredNumber::Number(n) => n.to_string(),
            StoredNumber::Text(s) => s,
        }
    }
}

macro_rules! impl_string_serde {
    ($t:ty) => {
        impl Serialize for $t {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $t {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = StoredNumber::deserialize(deserializer)?.into_text();
                raw.parse().map_err(D::Error::custom)
            }
        }
    };
}

impl_string_serde!(Quantity);
impl_string_serde!(Price);

/// Forgiving readers for numeric fields of persisted records.
///
/// Older front-ends stored whatever was typed into the update form, so a
/// saved record may carry `"quantity": "lots"`. Such a value reads as zero and
/// is logged, so one bad record does not make its whole collection unreadable.
/// Use with `#[serde(deserialize_with = "...")]`.
pub mod lenient {
    use core::str::FromStr;

    use serde::{Deserialize, Deserializer};
    use serde_json::Value as JsonValue;

    use super::{Price, Quantity};

    pub fn quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Quantity, D::Error> {
        read_or_zero(deserializer, "quantity")
    }

    pub fn price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Price, D::Error> {
        read_or_zero(deserializer, "price")
    }

    fn read_or_zero<'de, D, T>(deserializer: D, expected: &'static str) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr + Default,
    {
        let raw = JsonValue::deserialize(deserializer)?;
        let parsed = match &raw {
            JsonValue::String(text) => text.parse().ok(),
            JsonValue::Number(n) => n.to_string().parse().ok(),
            _ => None,
        };
        Ok(parsed.unwrap_or_else(|| {
            tracing::warn!(expected, stored = %raw, "unreadable stored number, reading as zero");
            T::default()
        }))
    }
}
