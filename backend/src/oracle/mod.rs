//! Randomness oracle boundary
//!
//! The oracle is the external provider of the seed. Requests go out through
//! [`RandomnessOracle::request_random_seed`]; the seed comes back later as an
//! authenticated `fulfill` call on the gate, made with the oracle's principal.

mod simulated;

pub use simulated::SimulatedOracle;

use crate::error::RevealError;
use crate::models::seed::{Principal, RequestId};

/// External randomness provider (a VRF wrapper or similar)
pub trait RandomnessOracle {
    /// Identity the oracle uses when calling `fulfill`
    fn principal(&self) -> &Principal;

    /// Fee charged per request, in the funding token's smallest unit
    fn request_fee(&self) -> u128;

    /// Issue a new request and return its identifier
    ///
    /// Identifiers are never `0`. The seed is delivered asynchronously.
    fn request_random_seed(&mut self) -> Result<RequestId, RevealError>;
}
