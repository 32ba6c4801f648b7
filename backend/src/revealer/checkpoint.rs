//! Checkpoint - save/load the reveal state
//!
//! The persisted surface is tiny: the request id and the seed. A checkpoint
//! also carries a hash of the configuration so a seed can never be
//! re-attached to a different weight table or domain, which would silently
//! change every item's category.

use super::engine::RevealConfig;
use crate::error::RevealError;
use crate::gate::GateSnapshot;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Persisted reveal state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealCheckpoint {
    pub gate: GateSnapshot,

    /// SHA-256 of the canonical configuration JSON
    pub config_hash: String,
}

impl RevealCheckpoint {
    pub fn to_json(&self) -> Result<String, RevealError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| RevealError::Serialization(format!("Checkpoint serialization failed: {}", e)))
    }

    pub fn from_json(json: &str) -> Result<Self, RevealError> {
        serde_json::from_str(json)
            .map_err(|e| RevealError::Serialization(format!("Checkpoint parse failed: {}", e)))
    }
}

/// Canonical JSON bytes of a configuration
///
/// Object keys are emitted in sorted order at every depth; array order is
/// kept because the weight table order is part of the derivation contract.
pub fn canonical_config_json(config: &RevealConfig) -> Result<Vec<u8>, RevealError> {
    let mut value = serde_json::to_value(config)
        .map_err(|e| RevealError::Serialization(format!("config to JSON: {}", e)))?;
    sort_keys(&mut value);
    serde_json::to_vec(&value)
        .map_err(|e| RevealError::Serialization(format!("config to JSON: {}", e)))
}

fn sort_keys(value: &mut Value) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = std::mem::take(map).into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            for (key, mut child) in entries {
                sort_keys(&mut child);
                map.insert(key, child);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(sort_keys),
        _ => {}
    }
}

/// Hex SHA-256 of [`canonical_config_json`]
pub fn compute_config_hash(config: &RevealConfig) -> Result<String, RevealError> {
    let bytes = canonical_config_json(config)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}
