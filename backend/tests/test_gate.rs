//! Tests for the randomness gate lifecycle
//!
//! Covers the request/fulfill state machine, authorization of fulfillments
//! and atomicity of failed requests.

use booster_traits_core_rs::{
    FundingAccount, GateState, Principal, RandomnessGate, RevealError, Seed, SharedGate,
    SimulatedOracle,
};

const ONE_LINK: u128 = 1_000_000_000_000_000_000;

fn vrf() -> Principal {
    Principal::new("0xVRFWrapper")
}

fn setup() -> (RandomnessGate, SimulatedOracle, FundingAccount) {
    (
        RandomnessGate::new(vrf()),
        SimulatedOracle::new(vrf(), ONE_LINK),
        FundingAccount::new(ONE_LINK),
    )
}

#[test]
fn test_request_pays_fee_and_stores_id() {
    let (mut gate, mut oracle, mut funding) = setup();

    let request_id = gate.request_randomness(&mut oracle, &mut funding).unwrap();

    assert_eq!(request_id, 1);
    assert_eq!(oracle.last_request_id(), 1);
    assert_eq!(gate.request_id(), 1);
    assert_eq!(funding.balance(), 0);
    assert_eq!(gate.state(), &GateState::Requested { request_id: 1 });
    assert!(!gate.is_available());
}

#[test]
fn test_second_request_while_outstanding_fails() {
    let (mut gate, mut oracle, _) = setup();
    let mut funding = FundingAccount::new(2 * ONE_LINK);

    gate.request_randomness(&mut oracle, &mut funding).unwrap();
    let err = gate
        .request_randomness(&mut oracle, &mut funding)
        .unwrap_err();

    assert_eq!(err, RevealError::AlreadyRequested { request_id: 1 });
    // Second fee not charged, no second oracle request
    assert_eq!(funding.balance(), ONE_LINK);
    assert_eq!(oracle.last_request_id(), 1);
}

#[test]
fn test_request_after_reveal_fails() {
    let (mut gate, mut oracle, _) = setup();
    let mut funding = FundingAccount::new(2 * ONE_LINK);

    let id = gate.request_randomness(&mut oracle, &mut funding).unwrap();
    gate.fulfill(&vrf(), id, Seed::from_u64(1337)).unwrap();

    let err = gate
        .request_randomness(&mut oracle, &mut funding)
        .unwrap_err();
    assert_eq!(err, RevealError::AlreadyFulfilled { request_id: id });
    assert_eq!(gate.current_seed().unwrap(), Seed::from_u64(1337));
}

#[test]
fn test_insufficient_funds_is_atomic() {
    let (mut gate, mut oracle, _) = setup();
    let mut funding = FundingAccount::new(ONE_LINK - 1);

    let err = gate
        .request_randomness(&mut oracle, &mut funding)
        .unwrap_err();

    assert_eq!(
        err,
        RevealError::InsufficientFunds {
            required: ONE_LINK,
            available: ONE_LINK - 1
        }
    );
    assert_eq!(gate.request_id(), 0);
    assert_eq!(gate.state(), &GateState::Empty);
    assert_eq!(funding.balance(), ONE_LINK - 1);
    // No orphaned request at the oracle
    assert_eq!(oracle.last_request_id(), 0);
    assert!(gate.events().is_empty());
}

#[test]
fn test_one_shot_fulfillment() {
    let (mut gate, mut oracle, mut funding) = setup();
    let id = gate.request_randomness(&mut oracle, &mut funding).unwrap();

    gate.fulfill(&vrf(), id, Seed::from_u64(1337)).unwrap();
    let err = gate.fulfill(&vrf(), id, Seed::from_u64(42)).unwrap_err();

    assert_eq!(err, RevealError::AlreadyFulfilled { request_id: id });
    assert_eq!(gate.current_seed().unwrap(), Seed::from_u64(1337));

    // Same seed again is still a second fulfillment
    let err = gate.fulfill(&vrf(), id, Seed::from_u64(1337)).unwrap_err();
    assert_eq!(err, RevealError::AlreadyFulfilled { request_id: id });
}

#[test]
fn test_unauthorized_fulfillment_leaves_state() {
    let (mut gate, mut oracle, mut funding) = setup();
    let id = gate.request_randomness(&mut oracle, &mut funding).unwrap();
    let before = gate.snapshot();

    let err = gate
        .fulfill(&Principal::new("0xAttacker"), id, Seed::from_u64(1))
        .unwrap_err();

    assert_eq!(
        err,
        RevealError::Unauthorized {
            caller: "0xAttacker".to_string()
        }
    );
    assert_eq!(gate.snapshot(), before);
    assert!(!gate.is_available());
}

#[test]
fn test_unauthorized_after_reveal_is_still_unauthorized() {
    let (mut gate, mut oracle, mut funding) = setup();
    let id = gate.request_randomness(&mut oracle, &mut funding).unwrap();
    gate.fulfill(&vrf(), id, Seed::from_u64(1337)).unwrap();

    assert!(matches!(
        gate.fulfill(&Principal::new("0xAttacker"), id, Seed::from_u64(2)),
        Err(RevealError::Unauthorized { .. })
    ));
    assert_eq!(gate.current_seed().unwrap(), Seed::from_u64(1337));
}

#[test]
fn test_current_seed_before_fulfillment() {
    let (mut gate, mut oracle, mut funding) = setup();
    assert_eq!(gate.current_seed(), Err(RevealError::NotAvailable));

    gate.request_randomness(&mut oracle, &mut funding).unwrap();
    assert_eq!(gate.current_seed(), Err(RevealError::NotAvailable));
}

#[test]
fn test_shared_gate_through_simulated_oracle() {
    let gate = SharedGate::new(vrf());
    let mut oracle = SimulatedOracle::new(vrf(), ONE_LINK);
    let mut funding = FundingAccount::new(ONE_LINK);

    let id = gate.request_randomness(&mut oracle, &mut funding).unwrap();
    assert!(!gate.is_available());

    oracle.provide(&gate, id, &[Seed::from_u64(1337)]).unwrap();
    assert!(gate.is_available());
    assert_eq!(gate.current_seed().unwrap(), Seed::from_u64(1337));

    let events = gate.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events.events_for_request(id).len(), 2);
}
