//! Greedy settlement engine
//!
//! Turns a roster, its buy-in events and the final cashouts into a transfer
//! plan.
//!
//! # Settlement Flow
//!
//! ```text
//! buy-in events ──► total per player ─┐
//!                                     ├─► net = cashout − buy-in ─► balance check ─► greedy match
//! cashouts ───────► value per player ─┘
//! ```
//!
//! The greedy pass sorts creditors and debtors once, largest first (stable,
//! so ties keep roster order), then walks both lists with a cursor each. A
//! party stays current until its remainder hits zero. This yields at most
//! `creditors + debtors − 1` transfers; it is not a search for the global
//! minimum.

use crate::models::{BuyInEvent, CashoutInput, Player};
use crate::settlement::plan::{NetPosition, Settlement, Transfer};
use std::cmp::Reverse;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur during settlement
#[derive(Debug, Error, PartialEq)]
pub enum SettlementError {
    #[error("Buy-in total {total_buyin} does not match cashout total {total_cashout} (discrepancy {discrepancy})")]
    Imbalance {
        total_buyin: i64,
        total_cashout: i64,
        discrepancy: i64,
    },

    #[error("Amount out of range while computing {stage}")]
    AmountOverflow { stage: &'static str },
}

/// Source of settlement inputs
///
/// Implemented by whatever owns the roster and its event history. The engine
/// only ever reads through this trait.
pub trait Roster {
    /// Players in roster (insertion) order
    fn players(&self) -> &[Player];

    /// Every buy-in event recorded for the roster
    fn buyin_events(&self) -> &[BuyInEvent];
}

/// Settle a session
///
/// # Arguments
///
/// * `players` - Roster in display order; this order breaks ties
/// * `buyin_events` - Buy-ins, summed per player
/// * `cashouts` - Final chip values; missing players count as zero
///
/// # Returns
///
/// - `Ok(Settlement)` with nets in roster order and transfers in generation order
/// - `Err(SettlementError::Imbalance)` if buy-ins and cashouts do not add up
/// - `Err(SettlementError::AmountOverflow)` if a total does not fit in i64
///
/// # Example
///
/// ```rust
/// use chip_solver_core::{settle, BuyInEvent, CashoutInput, Player, SettlementError};
///
/// let players = vec![
///     Player::with_id("A".to_string(), "Alice".to_string()),
///     Player::with_id("B".to_string(), "Bob".to_string()),
/// ];
/// let events = vec![
///     BuyInEvent::new("A".to_string(), 100).unwrap(),
///     BuyInEvent::new("B".to_string(), 100).unwrap(),
/// ];
///
/// let err = settle(&players, &events, &[CashoutInput::new("A", 90), CashoutInput::new("B", 100)])
///     .unwrap_err();
/// assert_eq!(
///     err,
///     SettlementError::Imbalance { total_buyin: 200, total_cashout: 190, discrepancy: 10 }
/// );
/// ```
pub fn settle(
    players: &[Player],
    buyin_events: &[BuyInEvent],
    cashouts: &[CashoutInput],
) -> Result<Settlement, SettlementError> {
    let index: HashMap<&str, usize> = players
        .iter()
        .enumerate()
        .map(|(i, player)| (player.id(), i))
        .collect();

    let mut buyins = vec![0i64; players.len()];
    for event in buyin_events {
        match index.get(event.player_id()) {
            Some(&i) => {
                buyins[i] = buyins[i]
                    .checked_add(event.amount())
                    .ok_or(SettlementError::AmountOverflow { stage: "player buy-in" })?;
            }
            None => warn!(
                event_id = event.id(),
                player_id = event.player_id(),
                "ignoring buy-in for unknown player"
            ),
        }
    }

    // Last entry wins when a player is given twice
    let mut values = vec![0i64; players.len()];
    for cashout in cashouts {
        match index.get(cashout.player_id.as_str()) {
            Some(&i) => values[i] = cashout.value,
            None => warn!(
                player_id = %cashout.player_id,
                "ignoring cashout for unknown player"
            ),
        }
    }

    let total_buyin = checked_total(&buyins, "total buy-in")?;
    let total_cashout = checked_total(&values, "total cashout")?;
    if total_buyin != total_cashout {
        debug!(total_buyin, total_cashout, "session does not balance");
        let discrepancy = total_cashout
            .checked_sub(total_buyin)
            .and_then(i64::checked_abs)
            .ok_or(SettlementError::AmountOverflow { stage: "discrepancy" })?;
        return Err(SettlementError::Imbalance {
            total_buyin,
            total_cashout,
            discrepancy,
        });
    }

    let net = players
        .iter()
        .zip(buyins.iter().zip(values.iter()))
        .map(|(player, (buyin, value))| {
            value
                .checked_sub(*buyin)
                .map(|amount| NetPosition::new(player.id(), amount))
                .ok_or(SettlementError::AmountOverflow { stage: "net position" })
        })
        .collect::<Result<Vec<NetPosition>, _>>()?;

    // Bounds every transfer total and replay residual
    let credits: Vec<i64> = net.iter().filter(|p| p.is_creditor()).map(|p| p.amount).collect();
    checked_total(&credits, "total credit")?;

    let transfers = match_greedy(&net);
    debug!(
        players = players.len(),
        transfers = transfers.len(),
        "settlement computed"
    );

    Ok(Settlement::new(net, transfers))
}

/// Settle everything a [`Roster`] holds
pub fn settle_roster<R: Roster + ?Sized>(
    roster: &R,
    cashouts: &[CashoutInput],
) -> Result<Settlement, SettlementError> {
    settle(roster.players(), roster.buyin_events(), cashouts)
}

fn checked_total(amounts: &[i64], stage: &'static str) -> Result<i64, SettlementError> {
    amounts
        .iter()
        .try_fold(0i64, |acc, &amount| acc.checked_add(amount))
        .ok_or(SettlementError::AmountOverflow { stage })
}

/// Working copy of one side of the match, scoped to a single call
struct Party<'a> {
    player_id: &'a str,
    remaining: i64,
}

fn match_greedy(net: &[NetPosition]) -> Vec<Transfer> {
    let mut creditors: Vec<Party<'_>> = net
        .iter()
        .filter(|p| p.is_creditor())
        .map(|p| Party {
            player_id: &p.player_id,
            remaining: p.amount,
        })
        .collect();
    let mut debtors: Vec<Party<'_>> = net
        .iter()
        .filter(|p| p.is_debtor())
        .map(|p| Party {
            player_id: &p.player_id,
            remaining: -p.amount,
        })
        .collect();

    // sort_by_key is stable: equal amounts keep roster order
    creditors.sort_by_key(|p| Reverse(p.remaining));
    debtors.sort_by_key(|p| Reverse(p.remaining));

    let mut transfers = Vec::with_capacity((creditors.len() + debtors.len()).saturating_sub(1));
    let (mut c, mut d) = (0, 0);

    while c < creditors.len() && d < debtors.len() {
        let creditor = &mut creditors[c];
        let debtor = &mut debtors[d];

        let pay = creditor.remaining.min(debtor.remaining);
        creditor.remaining -= pay;
        debtor.remaining -= pay;

        debug!(
            payer = debtor.player_id,
            payee = creditor.player_id,
            amount = pay,
            "transfer"
        );
        transfers.push(Transfer::new(debtor.player_id, creditor.player_id, pay));

        if creditor.remaining == 0 {
            c += 1;
        }
        if debtor.remaining == 0 {
            d += 1;
        }
    }

    transfers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nets(amounts: &[(&str, i64)]) -> Vec<NetPosition> {
        amounts
            .iter()
            .map(|&(id, amount)| NetPosition::new(id, amount))
            .collect()
    }

    #[test]
    fn test_match_greedy_empty() {
        assert!(match_greedy(&[]).is_empty());
        assert!(match_greedy(&nets(&[("A", 0), ("B", 0)])).is_empty());
    }

    #[test]
    fn test_match_greedy_largest_first() {
        // D owes 70, E owes 30; A is owed 60, B 40
        let transfers = match_greedy(&nets(&[
            ("A", 60),
            ("B", 40),
            ("D", -70),
            ("E", -30),
        ]));

        assert_eq!(
            transfers,
            vec![
                Transfer::new("D", "A", 60),
                Transfer::new("D", "B", 10),
                Transfer::new("E", "B", 30),
            ]
        );
    }

    #[test]
    fn test_match_greedy_does_not_resort_partial_party() {
        // After F pays A 70, A has 30 left which is less than B's 90,
        // yet A stays current until fully settled.
        let transfers = match_greedy(&nets(&[
            ("A", 100),
            ("B", 90),
            ("D", -60),
            ("E", -60),
            ("F", -70),
        ]));

        assert_eq!(
            transfers,
            vec![
                Transfer::new("F", "A", 70),
                Transfer::new("D", "A", 30),
                Transfer::new("D", "B", 30),
                Transfer::new("E", "B", 60),
            ]
        );
    }

    #[test]
    fn test_match_greedy_ties_keep_roster_order() {
        let transfers = match_greedy(&nets(&[
            ("C", 50),
            ("A", -50),
            ("B", 50),
            ("D", -50),
        ]));

        assert_eq!(
            transfers,
            vec![Transfer::new("A", "C", 50), Transfer::new("D", "B", 50)]
        );
    }
}
