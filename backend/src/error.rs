//! Error taxonomy for the reveal engine
//!
//! Every failure is local and synchronous. The engine never retries on its
//! own; re-requesting after a stalled oracle is an operator decision.

use crate::models::seed::{ItemId, RequestId};
use thiserror::Error;

/// Errors returned by the gate, the derivation engine and the revealer facade
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RevealError {
    #[error("Randomness already requested: request {request_id} is still outstanding")]
    AlreadyRequested { request_id: RequestId },

    #[error("Unknown randomness request {request_id} (current request: {current})")]
    UnknownRequest {
        request_id: RequestId,
        current: RequestId,
    },

    #[error("Randomness for request {request_id} has already been fulfilled")]
    AlreadyFulfilled { request_id: RequestId },

    #[error("Randomness is not available yet")]
    NotAvailable,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Item {item_id} is outside the valid range {first_id}..={last_id}")]
    OutOfRange {
        item_id: ItemId,
        first_id: ItemId,
        last_id: ItemId,
    },

    #[error("Caller '{caller}' is not authorized to fulfill randomness")]
    Unauthorized { caller: String },

    #[error("Invalid item range: 'to' ({to}) can't be less than 'from' ({from})")]
    InvalidRange { from: ItemId, to: ItemId },

    #[error("Batch of {requested} items exceeds the limit of {max}")]
    BatchTooLarge { requested: u128, max: u64 },

    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: u128, available: u128 },

    #[error("Oracle error: {0}")]
    Oracle(String),

    #[error("Invalid seed: {0}")]
    InvalidSeed(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Checkpoint config hash {found} does not match configuration hash {expected}")]
    ConfigMismatch { expected: String, found: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}
