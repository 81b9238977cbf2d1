//! Property tests for the settlement engine
//!
//! Random sessions are balanced by a "bank" seat that absorbs the
//! difference between generated buy-ins and cashouts.

use chip_solver_core::{settle, BuyInEvent, CashoutInput, Player, SettlementError};
use proptest::prelude::*;

/// Players, events and cashouts for a balanced session
fn balanced_session() -> impl Strategy<Value = (Vec<Player>, Vec<BuyInEvent>, Vec<CashoutInput>)> {
    prop::collection::vec(
        (prop::collection::vec(1i64..500, 0..4), 0i64..1_000),
        0..8,
    )
    .prop_map(|seats| {
        let mut players = Vec::new();
        let mut events = Vec::new();
        let mut cashouts = Vec::new();

        for (i, (seat_buyins, cashout)) in seats.into_iter().enumerate() {
            let id = format!("P{}", i);
            players.push(Player::with_id(id.clone(), id.clone()));
            for amount in seat_buyins {
                events.push(BuyInEvent::new(id.clone(), amount).unwrap());
            }
            cashouts.push(CashoutInput::new(id, cashout));
        }

        let total_buyin: i64 = events.iter().map(|e| e.amount()).sum();
        let total_cashout: i64 = cashouts.iter().map(|c| c.value).sum();

        players.push(Player::with_id("BANK".to_string(), "Bank".to_string()));
        if total_buyin > total_cashout {
            cashouts.push(CashoutInput::new("BANK", total_buyin - total_cashout));
        } else if total_cashout > total_buyin {
            events.push(BuyInEvent::new("BANK".to_string(), total_cashout - total_buyin).unwrap());
        }

        (players, events, cashouts)
    })
}

proptest! {
    #[test]
    fn prop_nets_sum_to_zero((players, events, cashouts) in balanced_session()) {
        let settlement = settle(&players, &events, &cashouts).unwrap();
        let total: i64 = settlement.net().iter().map(|p| p.amount).sum();
        prop_assert_eq!(total, 0);
    }

    #[test]
    fn prop_replay_zeroes_every_position((players, events, cashouts) in balanced_session()) {
        let settlement = settle(&players, &events, &cashouts).unwrap();
        for residual in settlement.replay() {
            prop_assert_eq!(residual.amount, 0, "player {} not settled", residual.player_id);
        }
    }

    #[test]
    fn prop_transfer_count_bound((players, events, cashouts) in balanced_session()) {
        let settlement = settle(&players, &events, &cashouts).unwrap();
        let nonzero = settlement.net().iter().filter(|p| p.amount != 0).count();
        prop_assert!(settlement.transfers().len() <= nonzero.saturating_sub(1));
    }

    #[test]
    fn prop_transfers_flow_from_losers_to_winners((players, events, cashouts) in balanced_session()) {
        let settlement = settle(&players, &events, &cashouts).unwrap();
        for transfer in settlement.transfers() {
            prop_assert_ne!(&transfer.payer_id, &transfer.payee_id);
            prop_assert!(transfer.amount > 0);
            prop_assert!(settlement.net_of(&transfer.payer_id).unwrap() < 0);
            prop_assert!(settlement.net_of(&transfer.payee_id).unwrap() > 0);
        }
    }

    #[test]
    fn prop_deterministic((players, events, cashouts) in balanced_session()) {
        let first = settle(&players, &events, &cashouts).unwrap();
        let second = settle(&players, &events, &cashouts).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_imbalance_detected(
        (players, events, mut cashouts) in balanced_session(),
        delta in prop_oneof![-100i64..-1, 1i64..100],
    ) {
        // Last entry wins, so this overrides whatever BANK was given
        let total_buyin: i64 = events.iter().map(|e| e.amount()).sum();
        let others: i64 = cashouts
            .iter()
            .filter(|c| c.player_id != "BANK")
            .map(|c| c.value)
            .sum();
        cashouts.push(CashoutInput::new("BANK", total_buyin - others + delta));

        let result = settle(&players, &events, &cashouts);
        prop_assert_eq!(
            result,
            Err(SettlementError::Imbalance {
                total_buyin,
                total_cashout: total_buyin + delta,
                discrepancy: delta.abs(),
            })
        );
    }
}
