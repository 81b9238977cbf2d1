//! PyO3 wrapper for the settlement engine

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use super::types::{parse_cashouts, parse_events, parse_players, settlement_to_py};
use crate::settlement;

/// Settle a session from Python
///
/// # Example (from Python)
///
/// ```python
/// from chip_solver_core import settle
///
/// result = settle(
///     [{"id": "A", "name": "Alice"}, {"id": "B", "name": "Bob"}],
///     [{"player_id": "A", "amount": 100}, {"player_id": "B", "amount": 100}],
///     [{"player_id": "A", "value": 50}, {"player_id": "B", "value": 150}],
/// )
/// assert result["transfers"] == [{"payer_id": "A", "payee_id": "B", "amount": 50}]
/// ```
///
/// # Errors
///
/// Raises ValueError if:
/// - Required fields are missing or mistyped
/// - A buy-in amount is not positive
/// - Buy-ins and cashouts do not balance
#[pyfunction]
pub fn settle(
    py: Python<'_>,
    players: &Bound<'_, PyList>,
    events: &Bound<'_, PyList>,
    cashouts: &Bound<'_, PyList>,
) -> PyResult<Py<PyDict>> {
    let players = parse_players(players)?;
    let events = parse_events(events)?;
    let cashouts = parse_cashouts(cashouts)?;

    let result = settlement::settle(&players, &events, &cashouts)
        .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))?;

    settlement_to_py(py, &result)
}
