//! Trait derivation engine
//!
//! Maps `(seed, item_id, weight table)` to a category without storing
//! anything. The mapping is fixed and implementation independent:
//!
//! ```text
//! digest = SHA-256(seed as 32 BE bytes || item_id as 32 BE bytes)
//! r      = digest (256-bit BE integer) mod total_weight
//! category = first table entry whose running weight total exceeds r
//! ```
//!
//! Any conforming implementation yields the same category for the same
//! inputs, which is what makes "derive on demand, never store" sound.

pub mod engine;
pub mod mixer;

pub use engine::{
    CategoryTally, DerivationEngine, ItemDomain, ItemTrait, SeedSource, MAX_BATCH_ITEMS,
};
pub use mixer::{category_for, mix, reduce};
