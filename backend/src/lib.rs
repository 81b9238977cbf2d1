//! Chip Solver Core - Rust Engine
//!
//! Settles a home poker session: who owes whom, and how much, once everyone
//! has cashed out.
//!
//! # Architecture
//!
//! - **models**: Domain types (Player, BuyInEvent, CashoutInput)
//! - **settlement**: Net positions and the greedy transfer plan
//! - **session**: Roster and buy-in history, with JSON snapshots
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (whole units)
//! 2. Settlement is pure and deterministic (same input, same transfers)
//! 3. No transfer plan is produced for a session that does not balance

// Module declarations
pub mod models;
pub mod session;
pub mod settlement;

// Re-exports for convenience
pub use models::{
    buyin::{BuyInError, BuyInEvent, EventKind},
    cashout::CashoutInput,
    player::Player,
};
pub use session::{Session, SessionError, SessionSnapshot, SnapshotError};
pub use settlement::{
    settle, settle_roster, NetPosition, PaymentMatrix, Roster, Settlement, SettlementError,
    Transfer,
};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn chip_solver_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::settle::settle, m)?)?;
    Ok(())
}
