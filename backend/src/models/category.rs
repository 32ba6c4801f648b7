//! Categories and the weight table
//!
//! The weight table is an ordered list of `(category, weight)` entries. The
//! order is part of the derivation contract: the bucket walk visits entries
//! in exactly this order.

use crate::error::RevealError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A trait category label
///
/// The numeric index is what gets reported for an item; the human-readable
/// name lives in the weight table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(pub u8);

impl Category {
    pub fn index(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of the weight table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub category: Category,

    /// Display name, e.g. "Energy Drink"
    #[serde(default)]
    pub label: String,

    /// Relative weight; zero means the category is never selected
    pub weight: u64,
}

impl WeightEntry {
    pub fn new(category: u8, label: impl Into<String>, weight: u64) -> Self {
        Self {
            category: Category(category),
            label: label.into(),
            weight,
        }
    }
}

/// Validated, immutable weight table
///
/// Construction fails with `InvalidConfiguration` when the table is empty,
/// the total weight is zero or overflows `u64`, or a category appears twice.
/// Deserialization runs the same checks.
///
/// # Example
/// ```
/// use booster_traits_core_rs::{WeightEntry, WeightTable};
///
/// let table = WeightTable::new(vec![
///     WeightEntry::new(0, "Common", 7),
///     WeightEntry::new(1, "Rare", 3),
/// ]).unwrap();
/// assert_eq!(table.total_weight(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<WeightEntry>", into = "Vec<WeightEntry>")]
pub struct WeightTable {
    entries: Vec<WeightEntry>,
    total_weight: u64,
}

impl WeightTable {
    pub fn new(entries: Vec<WeightEntry>) -> Result<Self, RevealError> {
        if entries.is_empty() {
            return Err(RevealError::InvalidConfiguration(
                "weight table is empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut total: u64 = 0;
        for entry in &entries {
            if !seen.insert(entry.category) {
                return Err(RevealError::InvalidConfiguration(format!(
                    "category {} appears more than once in the weight table",
                    entry.category
                )));
            }
            total = total.checked_add(entry.weight).ok_or_else(|| {
                RevealError::InvalidConfiguration("total weight overflows u64".to_string())
            })?;
        }

        if total == 0 {
            return Err(RevealError::InvalidConfiguration(
                "total weight is zero".to_string(),
            ));
        }

        Ok(Self {
            entries,
            total_weight: total,
        })
    }

    /// Three equally weighted booster categories
    pub fn dormint_boosters() -> Self {
        Self {
            entries: vec![
                WeightEntry::new(0, "Energy Drink", 1),
                WeightEntry::new(1, "Melatonin", 1),
                WeightEntry::new(2, "Sleeping Pills", 1),
            ],
            total_weight: 3,
        }
    }

    pub fn entries(&self) -> &[WeightEntry] {
        &self.entries
    }

    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.entries.iter().map(|e| e.category)
    }

    pub fn label_of(&self, category: Category) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.label.as_str())
    }

    /// Select the bucket containing `r`
    ///
    /// Returns `None` only if `r >= total_weight`.
    pub fn bucket_for(&self, r: u64) -> Option<Category> {
        let mut acc: u64 = 0;
        for entry in &self.entries {
            // Cannot overflow: the sum was checked at construction
            acc += entry.weight;
            if r < acc {
                return Some(entry.category);
            }
        }
        None
    }
}

impl TryFrom<Vec<WeightEntry>> for WeightTable {
    type Error = RevealError;

    fn try_from(entries: Vec<WeightEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<WeightTable> for Vec<WeightEntry> {
    fn from(table: WeightTable) -> Self {
        table.entries
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::dormint_boosters()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_rejected() {
        let err = WeightTable::new(vec![]).unwrap_err();
        assert!(matches!(err, RevealError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_zero_total_rejected() {
        let err = WeightTable::new(vec![
            WeightEntry::new(0, "A", 0),
            WeightEntry::new(1, "B", 0),
        ])
        .unwrap_err();
        assert!(matches!(err, RevealError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_overflow_rejected() {
        let err = WeightTable::new(vec![
            WeightEntry::new(0, "A", u64::MAX),
            WeightEntry::new(1, "B", 1),
        ])
        .unwrap_err();
        assert!(matches!(err, RevealError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let err = WeightTable::new(vec![
            WeightEntry::new(0, "A", 1),
            WeightEntry::new(0, "A again", 1),
        ])
        .unwrap_err();
        assert!(matches!(err, RevealError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_bucket_walk_boundaries() {
        let table = WeightTable::new(vec![
            WeightEntry::new(0, "A", 1),
            WeightEntry::new(1, "B", 2),
            WeightEntry::new(2, "C", 7),
        ])
        .unwrap();

        assert_eq!(table.bucket_for(0), Some(Category(0)));
        assert_eq!(table.bucket_for(1), Some(Category(1)));
        assert_eq!(table.bucket_for(2), Some(Category(1)));
        assert_eq!(table.bucket_for(3), Some(Category(2)));
        assert_eq!(table.bucket_for(9), Some(Category(2)));
        assert_eq!(table.bucket_for(10), None);
    }

    #[test]
    fn test_zero_weight_entry_never_selected() {
        let table = WeightTable::new(vec![
            WeightEntry::new(0, "Never", 0),
            WeightEntry::new(1, "Always", 5),
            WeightEntry::new(2, "Also never", 0),
        ])
        .unwrap();

        for r in 0..5 {
            assert_eq!(table.bucket_for(r), Some(Category(1)));
        }
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: WeightTable =
            serde_json::from_str(r#"[{"category":0,"label":"A","weight":2}]"#).unwrap();
        assert_eq!(ok.total_weight(), 2);

        let bad = serde_json::from_str::<WeightTable>(r#"[{"category":0,"weight":0}]"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_default_table() {
        let table = WeightTable::default();
        assert_eq!(table.total_weight(), 3);
        assert_eq!(table.label_of(Category(1)), Some("Melatonin"));
        assert_eq!(table.label_of(Category(9)), None);
    }
}
