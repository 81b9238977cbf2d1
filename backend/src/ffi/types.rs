//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict, PyList, etc.)

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::models::{BuyInEvent, CashoutInput, Player};
use crate::settlement::Settlement;

// ========================================================================
// PyDict Extraction Helpers
// ========================================================================

/// Extract a required field from a Python dict with clear error messages.
///
/// # Errors
/// Returns PyValueError if the field is missing or has the wrong type
fn extract_required<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<T>
where
    T: FromPyObject<'py>,
{
    dict.get_item(key)?
        .ok_or_else(|| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "Missing required field '{}'",
                key
            ))
        })?
        .extract()
}

/// Extract an optional field from a Python dict.
///
/// Returns `None` when the key is absent; errors only on type mismatch.
fn extract_optional<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<Option<T>>
where
    T: FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) => Ok(Some(value.extract()?)),
        None => Ok(None),
    }
}

// ========================================================================
// Python → Rust
// ========================================================================

/// Parse `[{"id": str, "name": str}, ...]`
pub fn parse_players(list: &Bound<'_, PyList>) -> PyResult<Vec<Player>> {
    list.iter()
        .map(|item| {
            let dict = item.downcast::<PyDict>()?;
            let id: String = extract_required(dict, "id")?;
            let name: String = extract_optional(dict, "name")?.unwrap_or_else(|| id.clone());
            Ok(Player::with_id(id, name))
        })
        .collect()
}

/// Parse `[{"player_id": str, "amount": int, "id"?: str, "created_at"?: int}, ...]`
///
/// Missing event ids get a fresh UUID; missing timestamps default to 0.
pub fn parse_events(list: &Bound<'_, PyList>) -> PyResult<Vec<BuyInEvent>> {
    list.iter()
        .map(|item| {
            let dict = item.downcast::<PyDict>()?;
            let id: String = extract_optional(dict, "id")?
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            let player_id: String = extract_required(dict, "player_id")?;
            let amount: i64 = extract_required(dict, "amount")?;
            let created_at: u64 = extract_optional(dict, "created_at")?.unwrap_or(0);

            BuyInEvent::at(id, player_id, amount, created_at).map_err(|e| {
                PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string())
            })
        })
        .collect()
}

/// Parse `[{"player_id": str, "value": int}, ...]`
pub fn parse_cashouts(list: &Bound<'_, PyList>) -> PyResult<Vec<CashoutInput>> {
    list.iter()
        .map(|item| {
            let dict = item.downcast::<PyDict>()?;
            let player_id: String = extract_required(dict, "player_id")?;
            let value: i64 = extract_required(dict, "value")?;
            Ok(CashoutInput::new(player_id, value))
        })
        .collect()
}

// ========================================================================
// Rust → Python
// ========================================================================

/// Convert a settlement to `{"net": {id: int}, "transfers": [{...}], "total_volume": int}`
///
/// `net` preserves roster order (Python dicts keep insertion order).
pub fn settlement_to_py(py: Python<'_>, settlement: &Settlement) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);

    let net = PyDict::new_bound(py);
    for position in settlement.net() {
        net.set_item(&position.player_id, position.amount)?;
    }
    dict.set_item("net", net)?;

    let transfers = PyList::empty_bound(py);
    for transfer in settlement.transfers() {
        let item = PyDict::new_bound(py);
        item.set_item("payer_id", &transfer.payer_id)?;
        item.set_item("payee_id", &transfer.payee_id)?;
        item.set_item("amount", transfer.amount)?;
        transfers.append(item)?;
    }
    dict.set_item("transfers", transfers)?;
    dict.set_item("total_volume", settlement.total_volume())?;

    Ok(dict.into())
}
