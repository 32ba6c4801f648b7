//! PyO3 wrapper for TraitRevealer
//!
//! Bundles the revealer with a simulated oracle and a funding account so
//! Python scripts can drive a full reveal.
//!
//! # Example (from Python)
//!
//! ```python
//! from booster_traits_core_rs import TraitRevealer
//!
//! revealer = TraitRevealer("0xVRF", fee=10**18, balance=10**18)
//! request_id = revealer.request_randomness()
//! revealer.provide(request_id, "1337")
//! print(revealer.get_traits(0))
//! print(revealer.tally(0, 1999))
//! ```

use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{reveal_error_to_py, tally_to_py, traits_report_to_py};
use crate::models::funding::FundingAccount;
use crate::models::seed::{Principal, Seed};
use crate::oracle::SimulatedOracle;
use crate::revealer::{RevealConfig, TraitRevealer as RustTraitRevealer};

/// Python wrapper for the Rust TraitRevealer
#[pyclass(name = "TraitRevealer")]
pub struct PyTraitRevealer {
    inner: RustTraitRevealer,
    oracle: SimulatedOracle,
    funding: FundingAccount,
}

#[pymethods]
impl PyTraitRevealer {
    /// Create a revealer
    ///
    /// `config_json` overrides the default booster table and domain; its
    /// `oracle` field must match `oracle` (ValueError otherwise).
    #[new]
    #[pyo3(signature = (oracle, fee=0, balance=0, config_json=None))]
    fn new(oracle: &str, fee: u128, balance: u128, config_json: Option<&str>) -> PyResult<Self> {
        let principal = Principal::new(oracle);
        let config = match config_json {
            Some(json) => RevealConfig::from_json_str(json).map_err(reveal_error_to_py)?,
            None => RevealConfig::new(principal.clone()),
        };
        config
            .ensure_oracle(&principal)
            .map_err(reveal_error_to_py)?;

        let inner = RustTraitRevealer::new(config).map_err(reveal_error_to_py)?;
        Ok(Self {
            inner,
            oracle: SimulatedOracle::new(principal, fee),
            funding: FundingAccount::new(balance),
        })
    }

    fn request_randomness(&mut self) -> PyResult<u64> {
        self.inner
            .request_randomness(&mut self.oracle, &mut self.funding)
            .map_err(reveal_error_to_py)
    }

    /// Deliver `seed` (decimal or 0x-hex text) for `request_id`
    fn provide(&self, request_id: u64, seed: &str) -> PyResult<()> {
        let seed: Seed = seed.parse().map_err(reveal_error_to_py)?;
        self.oracle
            .provide(self.inner.gate(), request_id, &[seed])
            .map_err(reveal_error_to_py)
    }

    fn is_available(&self) -> bool {
        self.inner.is_available()
    }

    fn request_id(&self) -> u64 {
        self.inner.request_id()
    }

    fn balance(&self) -> u128 {
        self.funding.balance()
    }

    fn current_seed(&self) -> PyResult<String> {
        self.inner
            .current_seed()
            .map(|seed| seed.to_hex())
            .map_err(reveal_error_to_py)
    }

    fn derive_category(&self, item_id: u64) -> PyResult<u8> {
        self.inner
            .derive_category(item_id)
            .map(|category| category.index())
            .map_err(reveal_error_to_py)
    }

    fn get_traits(&self, py: Python<'_>, item_id: u64) -> PyResult<Py<PyDict>> {
        let report = self.inner.get_traits(item_id).map_err(reveal_error_to_py)?;
        traits_report_to_py(py, &report)
    }

    /// Category counts for `from_id..=to_id`
    fn tally(&self, py: Python<'_>, from_id: u64, to_id: u64) -> PyResult<Py<PyDict>> {
        let tally = self
            .inner
            .tally_categories(from_id, to_id)
            .map_err(reveal_error_to_py)?;
        tally_to_py(py, &tally)
    }

    fn checkpoint_json(&self) -> PyResult<String> {
        self.inner
            .checkpoint()
            .and_then(|checkpoint| checkpoint.to_json())
            .map_err(reveal_error_to_py)
    }
}
