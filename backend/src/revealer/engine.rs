//! Trait revealer engine
//!
//! # Example
//!
//! ```rust
//! use booster_traits_core_rs::{
//!     FundingAccount, Principal, RevealConfig, Seed, SimulatedOracle, TraitRevealer,
//! };
//!
//! let vrf = Principal::new("0xVRF");
//! let revealer = TraitRevealer::new(RevealConfig::new(vrf.clone())).unwrap();
//! let mut oracle = SimulatedOracle::new(vrf, 1_000);
//! let mut funding = FundingAccount::new(1_000);
//!
//! let request_id = revealer.request_randomness(&mut oracle, &mut funding).unwrap();
//! assert!(!revealer.is_available());
//!
//! oracle.provide(revealer.gate(), request_id, &[Seed::from_u64(1337)]).unwrap();
//! let report = revealer.get_traits(0).unwrap();
//! assert!(report.available);
//! ```

use super::checkpoint::{compute_config_hash, RevealCheckpoint};
use crate::derivation::{CategoryTally, DerivationEngine, ItemDomain, ItemTrait};
use crate::error::RevealError;
use crate::gate::{RandomnessGate, SharedGate};
use crate::models::category::{Category, WeightTable};
use crate::models::event::EventLog;
use crate::models::funding::FundingAccount;
use crate::models::seed::{ItemId, Principal, RequestId, Seed};
use crate::oracle::RandomnessOracle;
use serde::{Deserialize, Serialize};

// ============================================================================
// Configuration
// ============================================================================

/// Complete reveal configuration
///
/// Fixed at construction; the revealer never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealConfig {
    /// The only principal allowed to fulfill randomness
    pub oracle: Principal,

    /// Ordered category weights
    #[serde(default)]
    pub weight_table: WeightTable,

    /// Valid item ids
    #[serde(default)]
    pub item_domain: ItemDomain,
}

impl RevealConfig {
    /// Default booster table and domain for `oracle`
    pub fn new(oracle: Principal) -> Self {
        Self {
            oracle,
            weight_table: WeightTable::default(),
            item_domain: ItemDomain::default(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, RevealError> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            RevealError::InvalidConfiguration(format!("Config parse failed: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RevealError> {
        if self.oracle.as_str().is_empty() {
            return Err(RevealError::InvalidConfiguration(
                "oracle principal is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Fails with `InvalidConfiguration` unless `oracle` is the configured oracle
    pub fn ensure_oracle(&self, oracle: &Principal) -> Result<(), RevealError> {
        if &self.oracle != oracle {
            return Err(RevealError::InvalidConfiguration(format!(
                "configured oracle '{}' does not match '{}'",
                self.oracle, oracle
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Trait reports
// ============================================================================

/// Traits of one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Traits {
    pub category: Category,
    pub label: String,
}

/// Answer to "what are this item's traits?"
///
/// Before the reveal, `available` is false and no traits are reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitsReport {
    pub item_id: ItemId,
    pub available: bool,
    pub traits: Option<Traits>,
}

// ============================================================================
// Revealer
// ============================================================================

/// Gate plus derivation engine behind one configuration
///
/// `Send + Sync`: share it behind an `Arc` or by reference. Gate transitions
/// are serialized; derivation after the reveal takes no lock.
#[derive(Debug)]
pub struct TraitRevealer {
    config: RevealConfig,
    engine: DerivationEngine,
    gate: SharedGate,
}

impl TraitRevealer {
    pub fn new(config: RevealConfig) -> Result<Self, RevealError> {
        config.validate()?;
        let gate = SharedGate::new(config.oracle.clone());
        Ok(Self::assemble(config, gate))
    }

    /// Resume from a checkpoint taken under the same configuration
    pub fn restore(config: RevealConfig, checkpoint: RevealCheckpoint) -> Result<Self, RevealError> {
        config.validate()?;
        let expected = compute_config_hash(&config)?;
        if checkpoint.config_hash != expected {
            return Err(RevealError::ConfigMismatch {
                expected,
                found: checkpoint.config_hash,
            });
        }

        let gate = RandomnessGate::from_snapshot(config.oracle.clone(), checkpoint.gate)?;
        tracing::info!(request_id = gate.request_id(), available = gate.is_available(), "restored reveal state");
        Ok(Self::assemble(config, SharedGate::from_gate(gate)))
    }

    fn assemble(config: RevealConfig, gate: SharedGate) -> Self {
        let engine = DerivationEngine::new(config.weight_table.clone(), config.item_domain);
        Self {
            config,
            engine,
            gate,
        }
    }

    pub fn checkpoint(&self) -> Result<RevealCheckpoint, RevealError> {
        Ok(RevealCheckpoint {
            gate: self.gate.snapshot(),
            config_hash: compute_config_hash(&self.config)?,
        })
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    pub fn gate(&self) -> &SharedGate {
        &self.gate
    }

    pub fn engine(&self) -> &DerivationEngine {
        &self.engine
    }

    // ========================================================================
    // Gate operations
    // ========================================================================

    pub fn request_randomness(
        &self,
        oracle: &mut dyn RandomnessOracle,
        funding: &mut FundingAccount,
    ) -> Result<RequestId, RevealError> {
        self.gate.request_randomness(oracle, funding)
    }

    /// Inbound oracle delivery; `caller` must be the configured oracle
    pub fn fulfill(
        &self,
        caller: &Principal,
        request_id: RequestId,
        seed: Seed,
    ) -> Result<(), RevealError> {
        self.gate.fulfill(caller, request_id, seed)
    }

    pub fn is_available(&self) -> bool {
        self.gate.is_available()
    }

    pub fn current_seed(&self) -> Result<Seed, RevealError> {
        self.gate.current_seed()
    }

    pub fn request_id(&self) -> RequestId {
        self.gate.request_id()
    }

    pub fn events(&self) -> EventLog {
        self.gate.events()
    }

    // ========================================================================
    // Derivation
    // ========================================================================

    pub fn derive_category(&self, item_id: ItemId) -> Result<Category, RevealError> {
        self.engine.derive_category(&self.gate, item_id)
    }

    pub fn derive_category_range(
        &self,
        from: ItemId,
        to: ItemId,
    ) -> Result<Vec<ItemTrait>, RevealError> {
        self.engine.derive_category_range(&self.gate, from, to)
    }

    pub fn tally_categories(&self, from: ItemId, to: ItemId) -> Result<CategoryTally, RevealError> {
        self.engine.tally_categories(&self.gate, from, to)
    }

    /// Traits view that reports "not yet available" instead of failing
    ///
    /// Ids outside the domain still fail with `OutOfRange`.
    pub fn get_traits(&self, item_id: ItemId) -> Result<TraitsReport, RevealError> {
        self.config.item_domain.check(item_id)?;

        match self.engine.derive_category(&self.gate, item_id) {
            Ok(category) => Ok(TraitsReport {
                item_id,
                available: true,
                traits: Some(Traits {
                    category,
                    label: self
                        .config
                        .weight_table
                        .label_of(category)
                        .unwrap_or_default()
                        .to_string(),
                }),
            }),
            Err(RevealError::NotAvailable) => Ok(TraitsReport {
                item_id,
                available: false,
                traits: None,
            }),
            Err(other) => Err(other),
        }
    }
}
