//! In-process oracle for tests, the CLI and the Python bindings
//!
//! Behaves like a VRF wrapper mock: request ids count up from 1, and the
//! operator delivers words with [`SimulatedOracle::provide`]. Random words
//! for harness runs come from the deterministic word generator.

use super::RandomnessOracle;
use crate::error::RevealError;
use crate::gate::SharedGate;
use crate::models::seed::{Principal, RequestId, Seed};
use crate::rng::WordGenerator;

/// Oracle that answers on demand
#[derive(Debug, Clone)]
pub struct SimulatedOracle {
    principal: Principal,
    fee: u128,
    last_request_id: RequestId,
}

impl SimulatedOracle {
    pub fn new(principal: Principal, fee: u128) -> Self {
        Self {
            principal,
            fee,
            last_request_id: 0,
        }
    }

    pub fn last_request_id(&self) -> RequestId {
        self.last_request_id
    }

    /// Deliver `words` for `request_id`; the first word becomes the seed
    pub fn provide(
        &self,
        gate: &SharedGate,
        request_id: RequestId,
        words: &[Seed],
    ) -> Result<(), RevealError> {
        let seed = words
            .first()
            .copied()
            .ok_or_else(|| RevealError::Oracle("no random words provided".to_string()))?;
        gate.fulfill(&self.principal, request_id, seed)
    }

    /// Deliver a word drawn from `generator`
    pub fn provide_random(
        &self,
        gate: &SharedGate,
        request_id: RequestId,
        generator: &mut WordGenerator,
    ) -> Result<Seed, RevealError> {
        let word = generator.next_word();
        self.provide(gate, request_id, &[word])?;
        Ok(word)
    }
}

impl RandomnessOracle for SimulatedOracle {
    fn principal(&self) -> &Principal {
        &self.principal
    }

    fn request_fee(&self) -> u128 {
        self.fee
    }

    fn request_random_seed(&mut self) -> Result<RequestId, RevealError> {
        self.last_request_id = self
            .last_request_id
            .checked_add(1)
            .ok_or_else(|| RevealError::Oracle("request ids exhausted".to_string()))?;
        Ok(self.last_request_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::funding::FundingAccount;

    #[test]
    fn test_request_ids_count_from_one() {
        let mut oracle = SimulatedOracle::new(Principal::new("0xVRF"), 0);
        assert_eq!(oracle.request_random_seed().unwrap(), 1);
        assert_eq!(oracle.request_random_seed().unwrap(), 2);
        assert_eq!(oracle.last_request_id(), 2);
    }

    #[test]
    fn test_provide_without_words_fails() {
        let vrf = Principal::new("0xVRF");
        let mut oracle = SimulatedOracle::new(vrf.clone(), 0);
        let gate = SharedGate::new(vrf);
        let id = gate
            .request_randomness(&mut oracle, &mut FundingAccount::default())
            .unwrap();

        assert!(matches!(
            oracle.provide(&gate, id, &[]),
            Err(RevealError::Oracle(_))
        ));
        assert!(!gate.is_available());
    }

    #[test]
    fn test_provide_uses_first_word() {
        let vrf = Principal::new("0xVRF");
        let mut oracle = SimulatedOracle::new(vrf.clone(), 0);
        let gate = SharedGate::new(vrf);
        let id = gate
            .request_randomness(&mut oracle, &mut FundingAccount::default())
            .unwrap();

        oracle
            .provide(&gate, id, &[Seed::from_u64(1337), Seed::from_u64(1)])
            .unwrap();
        assert_eq!(gate.current_seed().unwrap(), Seed::from_u64(1337));
    }

    #[test]
    fn test_provide_random_is_reproducible() {
        let vrf = Principal::new("0xVRF");
        let mut oracle = SimulatedOracle::new(vrf.clone(), 0);
        let gate = SharedGate::new(vrf);
        let id = gate
            .request_randomness(&mut oracle, &mut FundingAccount::default())
            .unwrap();

        let delivered = oracle
            .provide_random(&gate, id, &mut WordGenerator::new(42))
            .unwrap();
        assert_eq!(delivered, WordGenerator::new(42).next_word());
        assert_eq!(gate.current_seed().unwrap(), delivered);
    }
}
