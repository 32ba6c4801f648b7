//! Thread-safe gate
//!
//! Transitions run under a mutex so racing fulfillments resolve to exactly
//! one winner. The revealed seed is published into a write-once cell; reads
//! after the reveal never take the lock.

use super::state::{GateSnapshot, RandomnessGate};
use crate::error::RevealError;
use crate::models::event::EventLog;
use crate::models::funding::FundingAccount;
use crate::models::seed::{Principal, RequestId, Seed};
use crate::oracle::RandomnessOracle;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

/// Gate shared between the oracle callback and any number of readers
#[derive(Debug)]
pub struct SharedGate {
    inner: Mutex<RandomnessGate>,
    revealed: OnceLock<Seed>,
}

impl SharedGate {
    pub fn new(oracle: Principal) -> Self {
        Self::from_gate(RandomnessGate::new(oracle))
    }

    pub fn from_gate(gate: RandomnessGate) -> Self {
        let revealed = OnceLock::new();
        if let Ok(seed) = gate.current_seed() {
            let _ = revealed.set(seed);
        }
        Self {
            inner: Mutex::new(gate),
            revealed,
        }
    }

    // Transitions never leave the gate half-updated, so a poisoned lock
    // still guards a consistent state.
    fn lock(&self) -> MutexGuard<'_, RandomnessGate> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn request_randomness(
        &self,
        oracle: &mut dyn RandomnessOracle,
        funding: &mut FundingAccount,
    ) -> Result<RequestId, RevealError> {
        self.lock().request_randomness(oracle, funding)
    }

    pub fn fulfill(
        &self,
        caller: &Principal,
        request_id: RequestId,
        seed: Seed,
    ) -> Result<(), RevealError> {
        let mut gate = self.lock();
        gate.fulfill(caller, request_id, seed)?;
        // The gate accepts one seed per lifetime, so the cell is always empty here
        let _ = self.revealed.set(seed);
        Ok(())
    }

    pub fn is_available(&self) -> bool {
        self.revealed.get().is_some()
    }

    pub fn current_seed(&self) -> Result<Seed, RevealError> {
        self.revealed.get().copied().ok_or(RevealError::NotAvailable)
    }

    pub fn request_id(&self) -> RequestId {
        self.lock().request_id()
    }

    pub fn oracle(&self) -> Principal {
        self.lock().oracle().clone()
    }

    pub fn snapshot(&self) -> GateSnapshot {
        self.lock().snapshot()
    }

    pub fn events(&self) -> EventLog {
        self.lock().events().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::SimulatedOracle;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_racing_fulfillments_have_one_winner() {
        let vrf = Principal::new("0xVRF");
        let gate = SharedGate::new(vrf.clone());
        let mut oracle = SimulatedOracle::new(vrf.clone(), 0);
        let mut funding = FundingAccount::default();
        let id = gate.request_randomness(&mut oracle, &mut funding).unwrap();

        let winners = AtomicUsize::new(0);
        let already = AtomicUsize::new(0);
        std::thread::scope(|s| {
            for n in 1..=16u64 {
                let gate = &gate;
                let vrf = &vrf;
                let winners = &winners;
                let already = &already;
                s.spawn(move || match gate.fulfill(vrf, id, Seed::from_u64(n)) {
                    Ok(()) => {
                        winners.fetch_add(1, Ordering::SeqCst);
                    }
                    Err(RevealError::AlreadyFulfilled { .. }) => {
                        already.fetch_add(1, Ordering::SeqCst);
                    }
                    Err(other) => panic!("unexpected error: {other}"),
                });
            }
        });

        assert_eq!(winners.load(Ordering::SeqCst), 1);
        assert_eq!(already.load(Ordering::SeqCst), 15);

        // The published seed matches what the gate stored
        assert_eq!(gate.current_seed(), gate.snapshot().seed.ok_or(RevealError::NotAvailable));
    }

    #[test]
    fn test_from_fulfilled_gate_publishes_seed() {
        let vrf = Principal::new("0xVRF");
        let snapshot = GateSnapshot {
            request_id: 4,
            seed: Some(Seed::from_u64(77)),
        };
        let gate = SharedGate::from_gate(RandomnessGate::from_snapshot(vrf, snapshot).unwrap());
        assert!(gate.is_available());
        assert_eq!(gate.current_seed().unwrap(), Seed::from_u64(77));
        assert_eq!(gate.request_id(), 4);
    }
}
