//! Python bindings (enabled with the `pyo3` feature)

pub mod revealer;
pub mod types;
