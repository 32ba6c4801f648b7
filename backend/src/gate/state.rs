//! Gate state machine
//!
//! Every transition validates first and mutates last, so a failed call
//! leaves the gate exactly as it was.

use crate::error::RevealError;
use crate::models::event::{EventLog, RevealEvent};
use crate::models::funding::FundingAccount;
use crate::models::seed::{Principal, RequestId, Seed};
use crate::oracle::RandomnessOracle;
use serde::{Deserialize, Serialize};

/// Lifecycle state of the seed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateState {
    /// Never requested
    Empty,

    /// Waiting for the oracle to deliver the seed
    Requested { request_id: RequestId },

    /// Seed revealed (terminal)
    Fulfilled { request_id: RequestId, seed: Seed },
}

/// Persisted surface of the gate
///
/// `request_id == 0` means never requested; `seed` is absent until the
/// request is fulfilled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateSnapshot {
    pub request_id: RequestId,
    pub seed: Option<Seed>,
}

/// Single-seed request/fulfill state machine
///
/// # Example
/// ```
/// use booster_traits_core_rs::{FundingAccount, Principal, RandomnessGate, Seed, SimulatedOracle};
///
/// let mut oracle = SimulatedOracle::new(Principal::new("0xVRF"), 100);
/// let mut funding = FundingAccount::new(100);
/// let mut gate = RandomnessGate::new(Principal::new("0xVRF"));
///
/// let id = gate.request_randomness(&mut oracle, &mut funding).unwrap();
/// gate.fulfill(&Principal::new("0xVRF"), id, Seed::from_u64(1337)).unwrap();
/// assert_eq!(gate.current_seed().unwrap(), Seed::from_u64(1337));
/// ```
#[derive(Debug, Clone)]
pub struct RandomnessGate {
    /// The only principal allowed to fulfill
    oracle: Principal,
    state: GateState,
    events: EventLog,
}

impl RandomnessGate {
    pub fn new(oracle: Principal) -> Self {
        Self {
            oracle,
            state: GateState::Empty,
            events: EventLog::new(),
        }
    }

    /// Rebuild a gate from its persisted surface
    pub fn from_snapshot(oracle: Principal, snapshot: GateSnapshot) -> Result<Self, RevealError> {
        let state = match (snapshot.request_id, snapshot.seed) {
            (0, None) => GateState::Empty,
            (0, Some(_)) => {
                return Err(RevealError::InvalidSnapshot(
                    "seed present without a request id".to_string(),
                ))
            }
            (_, Some(seed)) if seed.is_zero() => {
                return Err(RevealError::InvalidSnapshot(
                    "stored seed is zero".to_string(),
                ))
            }
            (request_id, None) => GateState::Requested { request_id },
            (request_id, Some(seed)) => GateState::Fulfilled { request_id, seed },
        };

        Ok(Self {
            oracle,
            state,
            events: EventLog::new(),
        })
    }

    pub fn snapshot(&self) -> GateSnapshot {
        GateSnapshot {
            request_id: self.request_id(),
            seed: self.seed(),
        }
    }

    pub fn oracle(&self) -> &Principal {
        &self.oracle
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Current or most recent request id, `0` if never requested
    pub fn request_id(&self) -> RequestId {
        match &self.state {
            GateState::Empty => 0,
            GateState::Requested { request_id } | GateState::Fulfilled { request_id, .. } => {
                *request_id
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self.state, GateState::Fulfilled { .. })
    }

    pub fn current_seed(&self) -> Result<Seed, RevealError> {
        self.seed().ok_or(RevealError::NotAvailable)
    }

    fn seed(&self) -> Option<Seed> {
        match &self.state {
            GateState::Fulfilled { seed, .. } => Some(*seed),
            _ => None,
        }
    }

    /// Ask the oracle for a seed, paying its fee from `funding`
    ///
    /// Atomic: on any error the gate state and the funding balance are
    /// unchanged.
    pub fn request_randomness(
        &mut self,
        oracle: &mut dyn RandomnessOracle,
        funding: &mut FundingAccount,
    ) -> Result<RequestId, RevealError> {
        match &self.state {
            GateState::Requested { request_id } => {
                return Err(RevealError::AlreadyRequested {
                    request_id: *request_id,
                })
            }
            GateState::Fulfilled { request_id, .. } => {
                return Err(RevealError::AlreadyFulfilled {
                    request_id: *request_id,
                })
            }
            GateState::Empty => {}
        }

        if oracle.principal() != &self.oracle {
            return Err(RevealError::Oracle(format!(
                "oracle '{}' is not the configured oracle '{}'",
                oracle.principal(),
                self.oracle
            )));
        }

        let fee = oracle.request_fee();
        funding.ensure_covers(fee)?;

        let request_id = oracle.request_random_seed()?;
        if request_id == 0 {
            return Err(RevealError::Oracle(
                "oracle returned the reserved request id 0".to_string(),
            ));
        }

        funding.debit(fee)?;
        self.state = GateState::Requested { request_id };
        self.events
            .log(RevealEvent::RandomnessRequested { request_id, fee });

        tracing::info!(request_id, fee = %fee, "randomness requested");
        Ok(request_id)
    }

    /// Accept the oracle's seed for the outstanding request
    ///
    /// Exactly once: a second call for the same request fails with
    /// `AlreadyFulfilled` and the stored seed is kept.
    pub fn fulfill(
        &mut self,
        caller: &Principal,
        request_id: RequestId,
        seed: Seed,
    ) -> Result<(), RevealError> {
        if caller != &self.oracle {
            tracing::warn!(%caller, request_id, "rejected fulfillment from unauthorized caller");
            return Err(RevealError::Unauthorized {
                caller: caller.to_string(),
            });
        }

        match &self.state {
            GateState::Requested { request_id: current } if *current == request_id => {}
            GateState::Fulfilled { request_id: current, .. } if *current == request_id => {
                tracing::warn!(request_id, "rejected second fulfillment");
                return Err(RevealError::AlreadyFulfilled { request_id });
            }
            _ => {
                return Err(RevealError::UnknownRequest {
                    request_id,
                    current: self.request_id(),
                })
            }
        }

        if seed.is_zero() {
            return Err(RevealError::InvalidSeed(
                "zero is reserved for 'not revealed'".to_string(),
            ));
        }

        self.state = GateState::Fulfilled { request_id, seed };
        self.events
            .log(RevealEvent::RandomnessFulfilled { request_id, seed });

        tracing::info!(request_id, "randomness fulfilled");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::SimulatedOracle;

    fn vrf() -> Principal {
        Principal::new("0xVRF")
    }

    fn requested_gate() -> (RandomnessGate, RequestId) {
        let mut oracle = SimulatedOracle::new(vrf(), 0);
        let mut funding = FundingAccount::default();
        let mut gate = RandomnessGate::new(vrf());
        let id = gate.request_randomness(&mut oracle, &mut funding).unwrap();
        (gate, id)
    }

    #[test]
    fn test_new_gate_is_empty() {
        let gate = RandomnessGate::new(vrf());
        assert_eq!(gate.state(), &GateState::Empty);
        assert_eq!(gate.request_id(), 0);
        assert!(!gate.is_available());
        assert_eq!(gate.current_seed(), Err(RevealError::NotAvailable));
    }

    #[test]
    fn test_fulfill_wrong_request_id() {
        let (mut gate, id) = requested_gate();
        let err = gate.fulfill(&vrf(), id + 1, Seed::from_u64(1)).unwrap_err();
        assert_eq!(
            err,
            RevealError::UnknownRequest {
                request_id: id + 1,
                current: id
            }
        );
        assert_eq!(gate.state(), &GateState::Requested { request_id: id });
    }

    #[test]
    fn test_fulfill_before_request_is_unknown() {
        let mut gate = RandomnessGate::new(vrf());
        let err = gate.fulfill(&vrf(), 1, Seed::from_u64(1)).unwrap_err();
        assert!(matches!(err, RevealError::UnknownRequest { .. }));
    }

    #[test]
    fn test_zero_seed_rejected() {
        let (mut gate, id) = requested_gate();
        let err = gate.fulfill(&vrf(), id, Seed::from_u64(0)).unwrap_err();
        assert!(matches!(err, RevealError::InvalidSeed(_)));
        assert!(!gate.is_available());
    }

    #[test]
    fn test_request_through_foreign_oracle_rejected() {
        let mut foreign = SimulatedOracle::new(Principal::new("0xOTHER"), 0);
        let mut funding = FundingAccount::default();
        let mut gate = RandomnessGate::new(vrf());

        let err = gate
            .request_randomness(&mut foreign, &mut funding)
            .unwrap_err();
        assert!(matches!(err, RevealError::Oracle(_)));
        assert_eq!(foreign.last_request_id(), 0);
        assert_eq!(gate.state(), &GateState::Empty);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let (mut gate, id) = requested_gate();
        let requested = RandomnessGate::from_snapshot(vrf(), gate.snapshot()).unwrap();
        assert_eq!(requested.state(), gate.state());

        gate.fulfill(&vrf(), id, Seed::from_u64(1337)).unwrap();
        let fulfilled = RandomnessGate::from_snapshot(vrf(), gate.snapshot()).unwrap();
        assert_eq!(fulfilled.current_seed().unwrap(), Seed::from_u64(1337));
    }

    #[test]
    fn test_snapshot_with_orphan_seed_rejected() {
        let snapshot = GateSnapshot {
            request_id: 0,
            seed: Some(Seed::from_u64(5)),
        };
        assert!(matches!(
            RandomnessGate::from_snapshot(vrf(), snapshot),
            Err(RevealError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn test_events_record_transitions() {
        let (mut gate, id) = requested_gate();
        gate.fulfill(&vrf(), id, Seed::from_u64(9)).unwrap();

        let types: Vec<_> = gate
            .events()
            .events()
            .iter()
            .map(|e| e.event_type())
            .collect();
        assert_eq!(types, vec!["RandomnessRequested", "RandomnessFulfilled"]);
    }
}
