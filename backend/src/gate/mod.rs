//! Randomness gate
//!
//! Owns the lifecycle of the single seed:
//!
//! ```text
//! Empty --request_randomness--> Requested --fulfill--> Fulfilled
//! ```
//!
//! `Fulfilled` is terminal. The reveal is one-shot: requesting again after
//! fulfillment is rejected so the revealed seed can never change.
//!
//! [`RandomnessGate`] is the plain state machine; [`SharedGate`] serializes
//! transitions behind a mutex and publishes the seed for lock-free reads.

mod shared;
mod state;

pub use shared::SharedGate;
pub use state::{GateSnapshot, GateState, RandomnessGate};
