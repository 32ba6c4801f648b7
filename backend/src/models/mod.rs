//! Domain models for the reveal engine

pub mod category;
pub mod event;
pub mod funding;
pub mod seed;

// Re-exports
pub use category::{Category, WeightEntry, WeightTable};
pub use event::{EventLog, RevealEvent};
pub use funding::FundingAccount;
pub use seed::{ItemId, Principal, RequestId, Seed};
