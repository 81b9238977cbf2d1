//! Domain models for the chip solver

pub mod buyin;
pub mod cashout;
pub mod player;

// Re-exports
pub use buyin::{BuyInError, BuyInEvent, EventKind};
pub use cashout::CashoutInput;
pub use player::Player;
