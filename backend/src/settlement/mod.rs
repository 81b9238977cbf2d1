//! Settlement Module
//!
//! Computes who pays whom at the end of a session:
//! - Per-player net positions (cashout minus buy-ins)
//! - Balance check (chips must be conserved)
//! - Greedy largest-creditor / largest-debtor matching
//!
//! # Critical Invariants
//!
//! 1. **Balance Conservation**: No plan is produced unless nets sum to zero
//! 2. **Completeness**: Transfers zero every net position
//! 3. **Determinism**: Same inputs (same order) produce the same transfer list
//!
//! # Example
//!
//! ```rust
//! use chip_solver_core::{settle, BuyInEvent, CashoutInput, Player, Transfer};
//!
//! let players = vec![
//!     Player::with_id("A".to_string(), "Alice".to_string()),
//!     Player::with_id("B".to_string(), "Bob".to_string()),
//!     Player::with_id("C".to_string(), "Carol".to_string()),
//! ];
//! let events: Vec<BuyInEvent> = ["A", "B", "C"]
//!     .iter()
//!     .map(|id| BuyInEvent::new(id.to_string(), 100).unwrap())
//!     .collect();
//! let cashouts = vec![
//!     CashoutInput::new("A", 50),
//!     CashoutInput::new("B", 150),
//!     CashoutInput::new("C", 100),
//! ];
//!
//! let settlement = settle(&players, &events, &cashouts).unwrap();
//! assert_eq!(settlement.transfers(), &[Transfer::new("A", "B", 50)]);
//! ```

pub mod engine;
pub mod plan;

// Re-export public API
pub use engine::{settle, settle_roster, Roster, SettlementError};
pub use plan::{NetPosition, PaymentMatrix, Settlement, Transfer};
