//! Type conversion utilities for the FFI boundary
//!
//! Converts reveal results into Python dicts and maps `RevealError` onto
//! Python exception types.

use pyo3::exceptions::{PyPermissionError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::derivation::CategoryTally;
use crate::error::RevealError;
use crate::revealer::TraitsReport;

/// Map a reveal error onto the closest Python exception
///
/// Caller mistakes (bad ids, bad config, bad seeds) become `ValueError`,
/// authorization failures `PermissionError`, lifecycle violations
/// `RuntimeError`.
pub fn reveal_error_to_py(err: RevealError) -> PyErr {
    match err {
        RevealError::OutOfRange { .. }
        | RevealError::InvalidRange { .. }
        | RevealError::BatchTooLarge { .. }
        | RevealError::InvalidConfiguration(_)
        | RevealError::InvalidSeed(_)
        | RevealError::InvalidSnapshot(_)
        | RevealError::ConfigMismatch { .. }
        | RevealError::Serialization(_) => PyValueError::new_err(err.to_string()),
        RevealError::Unauthorized { .. } => PyPermissionError::new_err(err.to_string()),
        RevealError::AlreadyRequested { .. }
        | RevealError::UnknownRequest { .. }
        | RevealError::AlreadyFulfilled { .. }
        | RevealError::NotAvailable
        | RevealError::InsufficientFunds { .. }
        | RevealError::Oracle(_) => PyRuntimeError::new_err(err.to_string()),
    }
}

/// Convert a traits report to a Python dict
///
/// Keys: `item_id`, `available`, `category` (None before the reveal),
/// `label` (None before the reveal).
pub fn traits_report_to_py(py: Python<'_>, report: &TraitsReport) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("item_id", report.item_id)?;
    dict.set_item("available", report.available)?;
    match &report.traits {
        Some(traits) => {
            dict.set_item("category", traits.category.index())?;
            dict.set_item("label", traits.label.as_str())?;
        }
        None => {
            dict.set_item("category", py.None())?;
            dict.set_item("label", py.None())?;
        }
    }
    Ok(dict.unbind())
}

/// Convert a tally to `{category_index: count}`
pub fn tally_to_py(py: Python<'_>, tally: &CategoryTally) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);
    for (category, count) in tally.counts() {
        dict.set_item(category.index(), *count)?;
    }
    Ok(dict.unbind())
}
