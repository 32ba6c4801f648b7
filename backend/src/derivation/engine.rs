//! Gate-aware derivation engine
//!
//! Owns the weight table and the item domain; borrows the seed from a
//! [`SeedSource`] on every call. Nothing is cached or stored per item.

use super::mixer::category_for;
use crate::error::RevealError;
use crate::gate::{RandomnessGate, SharedGate};
use crate::models::category::{Category, WeightTable};
use crate::models::seed::{ItemId, Seed};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Largest range `derive_category_range` materializes in one call
///
/// `tally_categories` streams and has no such limit.
pub const MAX_BATCH_ITEMS: u64 = 100_000;

/// Anything that can hand out the revealed seed
pub trait SeedSource {
    /// The revealed seed, or `NotAvailable` before the reveal
    fn current_seed(&self) -> Result<Seed, RevealError>;
}

impl SeedSource for RandomnessGate {
    fn current_seed(&self) -> Result<Seed, RevealError> {
        RandomnessGate::current_seed(self)
    }
}

impl SeedSource for SharedGate {
    fn current_seed(&self) -> Result<Seed, RevealError> {
        SharedGate::current_seed(self)
    }
}

impl SeedSource for Seed {
    fn current_seed(&self) -> Result<Seed, RevealError> {
        Ok(*self)
    }
}

/// Inclusive range of valid item ids
///
/// Always non-empty: construction and deserialization reject a first id
/// above the last id with `InvalidConfiguration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ItemDomainBounds", into = "ItemDomainBounds")]
pub struct ItemDomain {
    first_id: ItemId,
    last_id: ItemId,
}

/// Wire form of [`ItemDomain`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ItemDomainBounds {
    first_id: ItemId,
    last_id: ItemId,
}

impl ItemDomain {
    pub fn new(first_id: ItemId, last_id: ItemId) -> Result<Self, RevealError> {
        if first_id > last_id {
            return Err(RevealError::InvalidConfiguration(format!(
                "item domain first id {} is greater than last id {}",
                first_id, last_id
            )));
        }
        Ok(Self { first_id, last_id })
    }

    /// Every `u64` id is valid
    pub fn unbounded() -> Self {
        Self {
            first_id: 0,
            last_id: ItemId::MAX,
        }
    }

    pub fn first_id(&self) -> ItemId {
        self.first_id
    }

    pub fn last_id(&self) -> ItemId {
        self.last_id
    }

    pub fn contains(&self, item_id: ItemId) -> bool {
        (self.first_id..=self.last_id).contains(&item_id)
    }

    pub fn check(&self, item_id: ItemId) -> Result<(), RevealError> {
        if self.contains(item_id) {
            Ok(())
        } else {
            Err(RevealError::OutOfRange {
                item_id,
                first_id: self.first_id,
                last_id: self.last_id,
            })
        }
    }

    /// Number of ids in the domain (`u64::MAX + 1` fits in `u128`)
    pub fn size(&self) -> u128 {
        (self.last_id - self.first_id) as u128 + 1
    }
}

impl TryFrom<ItemDomainBounds> for ItemDomain {
    type Error = RevealError;

    fn try_from(bounds: ItemDomainBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.first_id, bounds.last_id)
    }
}

impl From<ItemDomain> for ItemDomainBounds {
    fn from(domain: ItemDomain) -> Self {
        Self {
            first_id: domain.first_id,
            last_id: domain.last_id,
        }
    }
}

impl Default for ItemDomain {
    fn default() -> Self {
        Self {
            first_id: 0,
            last_id: 9_999,
        }
    }
}

/// Derived trait of one item; computed, never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTrait {
    pub item_id: ItemId,
    pub category: Category,
}

/// Per-category counts over a range of items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTally {
    counts: BTreeMap<Category, u64>,
    total: u64,
}

impl CategoryTally {
    fn for_table(table: &WeightTable) -> Self {
        Self {
            counts: table.categories().map(|c| (c, 0)).collect(),
            total: 0,
        }
    }

    fn record(&mut self, category: Category) {
        *self.counts.entry(category).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn count(&self, category: Category) -> u64 {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> &BTreeMap<Category, u64> {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Observed fraction of items in `category`
    pub fn share(&self, category: Category) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(category) as f64 / self.total as f64
    }
}

/// Weight table plus item domain, bound once at configuration time
///
/// # Example
/// ```
/// use booster_traits_core_rs::{Category, DerivationEngine, ItemDomain, Seed, WeightTable};
///
/// let engine = DerivationEngine::new(WeightTable::dormint_boosters(), ItemDomain::default());
/// let seed = Seed::from_u64(1337);
/// assert_eq!(engine.derive_category(&seed, 3).unwrap(), Category(2));
/// assert!(engine.derive_category(&seed, 10_000).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationEngine {
    table: WeightTable,
    domain: ItemDomain,
}

impl DerivationEngine {
    pub fn new(table: WeightTable, domain: ItemDomain) -> Self {
        Self { table, domain }
    }

    pub fn table(&self) -> &WeightTable {
        &self.table
    }

    pub fn domain(&self) -> &ItemDomain {
        &self.domain
    }

    /// Category of one item
    ///
    /// Fails with `NotAvailable` before the reveal, then `OutOfRange` for
    /// ids outside the domain.
    pub fn derive_category(
        &self,
        source: &impl SeedSource,
        item_id: ItemId,
    ) -> Result<Category, RevealError> {
        let seed = source.current_seed()?;
        self.domain.check(item_id)?;
        category_for(&seed, item_id, &self.table)
    }

    /// Categories for `from..=to`, in id order
    ///
    /// Ranges longer than [`MAX_BATCH_ITEMS`] fail with `BatchTooLarge`;
    /// use `tally_categories` for counts over larger ranges.
    pub fn derive_category_range(
        &self,
        source: &impl SeedSource,
        from: ItemId,
        to: ItemId,
    ) -> Result<Vec<ItemTrait>, RevealError> {
        let seed = self.range_preflight(source, from, to)?;
        let requested = (to - from) as u128 + 1;
        if requested > MAX_BATCH_ITEMS as u128 {
            return Err(RevealError::BatchTooLarge {
                requested,
                max: MAX_BATCH_ITEMS,
            });
        }
        tracing::debug!(from, to, "deriving category range");

        (from..=to)
            .map(|item_id| {
                category_for(&seed, item_id, &self.table)
                    .map(|category| ItemTrait { item_id, category })
            })
            .collect()
    }

    /// Count categories over `from..=to` without materializing the items
    pub fn tally_categories(
        &self,
        source: &impl SeedSource,
        from: ItemId,
        to: ItemId,
    ) -> Result<CategoryTally, RevealError> {
        let seed = self.range_preflight(source, from, to)?;
        tracing::debug!(from, to, "tallying category range");

        let mut tally = CategoryTally::for_table(&self.table);
        for item_id in from..=to {
            tally.record(category_for(&seed, item_id, &self.table)?);
        }
        Ok(tally)
    }

    fn range_preflight(
        &self,
        source: &impl SeedSource,
        from: ItemId,
        to: ItemId,
    ) -> Result<Seed, RevealError> {
        if to < from {
            return Err(RevealError::InvalidRange { from, to });
        }
        let seed = source.current_seed()?;
        // Both ends inside the domain means the whole range is
        self.domain.check(from)?;
        self.domain.check(to)?;
        Ok(seed)
    }
}
