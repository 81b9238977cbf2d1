//! Settlement output types
//!
//! A [`Settlement`] is an ephemeral value: recomputed from the session on
//! demand and never stored. It carries the per-player net positions in
//! roster order and the transfer list in the order the engine produced it.
//!
//! # Critical Invariants
//!
//! 1. **Conservation**: Net positions sum to zero
//! 2. **Completeness**: Replaying every transfer leaves every residual at zero
//! 3. **No self-transfer**: `payer_id != payee_id` for every transfer

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Net result for one player (cashout minus total buy-ins)
///
/// Positive = winner (is owed money), negative = loser (owes money).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetPosition {
    pub player_id: String,
    pub amount: i64,
}

impl NetPosition {
    pub fn new(player_id: impl Into<String>, amount: i64) -> Self {
        Self {
            player_id: player_id.into(),
            amount,
        }
    }

    pub fn is_creditor(&self) -> bool {
        self.amount > 0
    }

    pub fn is_debtor(&self) -> bool {
        self.amount < 0
    }
}

/// A single payment from a losing player to a winning player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub payer_id: String,
    pub payee_id: String,
    pub amount: i64,
}

impl Transfer {
    pub fn new(payer_id: impl Into<String>, payee_id: impl Into<String>, amount: i64) -> Self {
        Self {
            payer_id: payer_id.into(),
            payee_id: payee_id.into(),
            amount,
        }
    }
}

/// Result of a successful settlement
///
/// # Example
///
/// ```rust
/// use chip_solver_core::{settle, BuyInEvent, CashoutInput, Player};
///
/// let players = vec![
///     Player::with_id("A".to_string(), "Alice".to_string()),
///     Player::with_id("B".to_string(), "Bob".to_string()),
/// ];
/// let events = vec![
///     BuyInEvent::new("A".to_string(), 100).unwrap(),
///     BuyInEvent::new("B".to_string(), 100).unwrap(),
/// ];
/// let cashouts = vec![CashoutInput::new("A", 40), CashoutInput::new("B", 160)];
///
/// let settlement = settle(&players, &events, &cashouts).unwrap();
/// assert_eq!(settlement.net_of("A"), Some(-60));
/// assert_eq!(settlement.transfers().len(), 1);
/// assert_eq!(settlement.total_volume(), 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Net position per player, in roster order
    net: Vec<NetPosition>,

    /// Transfers in generation order
    transfers: Vec<Transfer>,
}

impl Settlement {
    pub(crate) fn new(net: Vec<NetPosition>, transfers: Vec<Transfer>) -> Self {
        Self { net, transfers }
    }

    /// Net positions in roster order
    pub fn net(&self) -> &[NetPosition] {
        &self.net
    }

    /// Net position of a single player, `None` if the player was not settled
    pub fn net_of(&self, player_id: &str) -> Option<i64> {
        self.net
            .iter()
            .find(|position| position.player_id == player_id)
            .map(|position| position.amount)
    }

    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    /// True when nobody owes anybody anything
    pub fn is_even(&self) -> bool {
        self.transfers.is_empty()
    }

    /// Sum of all transfer amounts
    pub fn total_volume(&self) -> i64 {
        self.transfers.iter().map(|t| t.amount).sum()
    }

    /// Number of players with a positive net position
    pub fn num_creditors(&self) -> usize {
        self.net.iter().filter(|p| p.is_creditor()).count()
    }

    /// Number of players with a negative net position
    pub fn num_debtors(&self) -> usize {
        self.net.iter().filter(|p| p.is_debtor()).count()
    }

    /// Apply every transfer to the net positions and return what is left
    ///
    /// A payer's position moves up by what they paid, a payee's moves down by
    /// what they received. For a correct plan every residual is zero.
    pub fn replay(&self) -> Vec<NetPosition> {
        let mut residual: Vec<NetPosition> = self.net.clone();
        let index: HashMap<&str, usize> = self
            .net
            .iter()
            .enumerate()
            .map(|(i, p)| (p.player_id.as_str(), i))
            .collect();

        for transfer in &self.transfers {
            if let Some(&i) = index.get(transfer.payer_id.as_str()) {
                residual[i].amount += transfer.amount;
            }
            if let Some(&i) = index.get(transfer.payee_id.as_str()) {
                residual[i].amount -= transfer.amount;
            }
        }

        residual
    }

    /// Dense payer × payee view of the transfers, indexed in roster order
    pub fn matrix(&self) -> PaymentMatrix {
        PaymentMatrix::from_settlement(self)
    }
}

/// Square matrix of amounts paid, `cells[payer][payee]`, in roster order
///
/// Useful for tabular displays where each row is "what this player pays".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMatrix {
    player_ids: Vec<String>,
    cells: Vec<Vec<i64>>,
}

impl PaymentMatrix {
    fn from_settlement(settlement: &Settlement) -> Self {
        let player_ids: Vec<String> = settlement
            .net
            .iter()
            .map(|p| p.player_id.clone())
            .collect();
        let n = player_ids.len();
        let index: HashMap<&str, usize> = player_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();

        let mut cells = vec![vec![0; n]; n];
        for transfer in &settlement.transfers {
            let from = index.get(transfer.payer_id.as_str());
            let to = index.get(transfer.payee_id.as_str());
            if let (Some(&from), Some(&to)) = (from, to) {
                cells[from][to] += transfer.amount;
            }
        }

        Self { player_ids, cells }
    }

    pub fn player_ids(&self) -> &[String] {
        &self.player_ids
    }

    /// Amount `payer_id` pays `payee_id` (0 when unknown or unpaid)
    pub fn get(&self, payer_id: &str, payee_id: &str) -> i64 {
        let from = self.player_ids.iter().position(|id| id == payer_id);
        let to = self.player_ids.iter().position(|id| id == payee_id);
        match (from, to) {
            (Some(from), Some(to)) => self.cells[from][to],
            _ => 0,
        }
    }

    /// Row of amounts paid by the player at `index`, in roster order
    pub fn row(&self, index: usize) -> Option<&[i64]> {
        self.cells.get(index).map(|row| row.as_slice())
    }

    /// Non-zero entries flattened payer-major, payee-minor (roster order)
    pub fn to_transfers(&self) -> Vec<Transfer> {
        let mut transfers = Vec::new();
        for (from, row) in self.cells.iter().enumerate() {
            for (to, &amount) in row.iter().enumerate() {
                if amount > 0 {
                    transfers.push(Transfer::new(
                        self.player_ids[from].clone(),
                        self.player_ids[to].clone(),
                        amount,
                    ));
                }
            }
        }
        transfers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Settlement {
        Settlement::new(
            vec![
                NetPosition::new("A", -300),
                NetPosition::new("B", 150),
                NetPosition::new("C", 150),
            ],
            vec![Transfer::new("A", "B", 150), Transfer::new("A", "C", 150)],
        )
    }

    #[test]
    fn test_replay_zeroes_residuals() {
        let residual = sample().replay();
        assert!(residual.iter().all(|p| p.amount == 0));
    }

    #[test]
    fn test_counts_and_volume() {
        let settlement = sample();
        assert_eq!(settlement.num_creditors(), 2);
        assert_eq!(settlement.num_debtors(), 1);
        assert_eq!(settlement.total_volume(), 300);
        assert!(!settlement.is_even());
    }

    #[test]
    fn test_matrix_layout() {
        let matrix = sample().matrix();
        assert_eq!(matrix.get("A", "B"), 150);
        assert_eq!(matrix.get("B", "A"), 0);
        assert_eq!(matrix.row(0), Some(&[0, 150, 150][..]));
        assert_eq!(matrix.get("A", "missing"), 0);
        assert_eq!(matrix.to_transfers(), sample().transfers().to_vec());
    }
}
