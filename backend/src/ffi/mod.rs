//! Python bindings (feature `pyo3`)

pub mod settle;
pub mod types;
