//! Reveal event log
//!
//! Captures every accepted gate transition in order, so an operator can
//! audit when randomness was requested and which seed was revealed.
//!
//! # Example
//!
//! ```rust
//! use booster_traits_core_rs::models::{EventLog, RevealEvent};
//!
//! let mut log = EventLog::new();
//! log.log(RevealEvent::RandomnessRequested { request_id: 1, fee: 10 });
//! assert_eq!(log.len(), 1);
//! assert_eq!(log.events()[0].event_type(), "RandomnessRequested");
//! ```

use crate::models::seed::{RequestId, Seed};
use serde::{Deserialize, Serialize};

/// Accepted gate transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RevealEvent {
    /// A request was issued to the oracle and its fee paid
    RandomnessRequested { request_id: RequestId, fee: u128 },

    /// The oracle delivered the seed for the outstanding request
    RandomnessFulfilled { request_id: RequestId, seed: Seed },
}

impl RevealEvent {
    pub fn request_id(&self) -> RequestId {
        match self {
            RevealEvent::RandomnessRequested { request_id, .. }
            | RevealEvent::RandomnessFulfilled { request_id, .. } => *request_id,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            RevealEvent::RandomnessRequested { .. } => "RandomnessRequested",
            RevealEvent::RandomnessFulfilled { .. } => "RandomnessFulfilled",
        }
    }
}

/// Append-only list of reveal events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<RevealEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn log(&mut self, event: RevealEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[RevealEvent] {
        &self.events
    }

    pub fn events_for_request(&self, request_id: RequestId) -> Vec<&RevealEvent> {
        self.events
            .iter()
            .filter(|e| e.request_id() == request_id)
            .collect()
    }

    /// Serialize the log as a JSON array
    pub fn to_json(&self) -> Result<String, crate::error::RevealError> {
        serde_json::to_string(&self.events)
            .map_err(|e| crate::error::RevealError::Serialization(e.to_string()))
    }
}
