//! Booster Traits Core - Rust Engine
//!
//! Reveal mechanism that assigns every item a weighted category from a single
//! oracle-supplied seed, deterministically and without storing per-item
//! results.
//!
//! # Architecture
//!
//! - **models**: Domain types (Seed, WeightTable, FundingAccount, events)
//! - **gate**: Request/fulfill state machine for the single seed
//! - **derivation**: SHA-256 mixing and weighted-bucket selection
//! - **oracle**: Randomness provider boundary and a simulated provider
//! - **revealer**: Caller-facing facade and checkpoints
//! - **rng**: Deterministic word generation for simulated reveals
//!
//! # Critical Invariants
//!
//! 1. The seed is set at most once and never changes after the reveal
//! 2. Same (seed, item id, table) gives the same category everywhere
//! 3. No category can be derived before the seed exists
//! 4. FFI boundary is minimal and safe

// Module declarations
pub mod derivation;
pub mod error;
pub mod gate;
pub mod models;
pub mod oracle;
pub mod revealer;
pub mod rng;

// Re-exports for convenience
pub use derivation::{
    category_for, CategoryTally, DerivationEngine, ItemDomain, ItemTrait, SeedSource,
    MAX_BATCH_ITEMS,
};
pub use error::RevealError;
pub use gate::{GateSnapshot, GateState, RandomnessGate, SharedGate};
pub use models::{
    Category, EventLog, FundingAccount, ItemId, Principal, RequestId, RevealEvent, Seed,
    WeightEntry, WeightTable,
};
pub use oracle::{RandomnessOracle, SimulatedOracle};
pub use revealer::{
    compute_config_hash, RevealCheckpoint, RevealConfig, TraitRevealer, Traits, TraitsReport,
};
pub use rng::WordGenerator;

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn booster_traits_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::revealer::PyTraitRevealer>()?;
    Ok(())
}
