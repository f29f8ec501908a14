//! Membership of a named stock item.

/// A record that refers to a stock item by name.
///
/// Item names are the lookup key for every store operation and match
/// case-insensitively, ignoring surrounding whitespace.
pub trait NamedRecord {
    fn item_name(&self) -> &str;

    fn matches_name(&self, name: &str) -> bool {
        names_match(self.item_name(), name)
    }
}

/// Case-insensitive item name comparison.
pub fn names_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_ignores_case_and_padding() {
        assert!(names_match("Pen", "pen"));
        assert!(names_match("  PEN ", "pen"));
        assert!(!names_match("Pen", "Pens"));
    }
}
