//! Cashout input
//!
//! The chip value a player walks away with. Cashouts are entered fresh at
//! settlement time and never stored with the session.

use serde::{Deserialize, Serialize};

/// Final chip value for one player
///
/// # Example
/// ```
/// use chip_solver_core::CashoutInput;
///
/// let cashout = CashoutInput::new("player-1", 150);
/// assert_eq!(cashout.player_id, "player-1");
/// assert_eq!(cashout.value, 150);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashoutInput {
    pub player_id: String,
    pub value: i64,
}

impl CashoutInput {
    pub fn new(player_id: impl Into<String>, value: i64) -> Self {
        Self {
            player_id: player_id.into(),
            value,
        }
    }
}
