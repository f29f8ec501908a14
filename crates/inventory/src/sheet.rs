//! Tabular views of the raw collections, labelled like the spreadsheet tabs
//! they mirror.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// One of the three record collections.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sheet {
    Inventory,
    Purchase,
    Sales,
}

impl Sheet {
    pub const ALL: [Sheet; 3] = [Sheet::Inventory, Sheet::Purchase, Sheet::Sales];

    /// Exact, case-sensitive lookup by tab name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "inventory" => Some(Sheet::Inventory),
            "purchase" => Some(Sheet::Purchase),
            "sales" => Some(Sheet::Sales),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Sheet::Inventory => "inventory",
            Sheet::Purchase => "purchase",
            Sheet::Sales => "sales",
        }
    }

    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            Sheet::Inventory => &["Item Name", "Quantity", "Purchase Price", "Selling Price"],
            Sheet::Purchase => &["Item Name", "Quantity", "Purchase Price", "Purchased By", "Date"],
            Sheet::Sales => &["Item Name", "Quantity", "Selling Price", "Sold To", "Date"],
        }
    }
}

/// A collection returned verbatim with its column labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetData {
    pub sheet: String,
    pub headers: Vec<String>,
    pub data: Vec<JsonValue>,
}

impl SheetData {
    pub fn new(sheet: Sheet, data: Vec<JsonValue>) -> Self {
        Self {
            sheet: sheet.name().to_string(),
            headers: sheet.headers().iter().map(|h| h.to_string()).collect(),
            data,
        }
    }

    /// Result for a tab name that matches no collection.
    pub fn unknown(name: &str) -> Self {
        Self {
            sheet: name.to_string(),
            headers: Vec::new(),
            data: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_and_are_exact() {
        for sheet in Sheet::ALL {
            assert_eq!(Sheet::from_name(sheet.name()), Some(sheet));
        }
        assert_eq!(Sheet::from_name("Inventory"), None);
        assert_eq!(Sheet::from_name("sheet1"), None);
    }

    #[test]
    fn purchase_and_sales_tabs_carry_a_date_column() {
        assert_eq!(Sheet::Inventory.headers().len(), 4);
        assert_eq!(Sheet::Purchase.headers()[3], "Purchased By");
        assert_eq!(Sheet::Sales.headers()[4], "Date");
    }

    #[test]
    fn unknown_sheet_is_empty() {
        let data = SheetData::unknown("returns");
        assert!(data.headers.is_empty());
        assert!(data.data.is_empty());
        assert_eq!(data.sheet, "returns");
    }
}
