//! Trait revealer - the caller-facing facade
//!
//! Binds one configuration (weight table, item domain, oracle principal) to
//! one shared gate and routes every query through the derivation engine.
//!
//! See `engine.rs` for the facade and `checkpoint.rs` for persistence of the
//! gate's state surface.

pub mod checkpoint;
pub mod engine;

pub use checkpoint::{canonical_config_json, compute_config_hash, RevealCheckpoint};
pub use engine::{RevealConfig, TraitRevealer, Traits, TraitsReport};
