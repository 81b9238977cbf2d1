//! Tests for the session roster
//!
//! Covers roster mutations, the cascade on player removal, undo, and
//! settling straight from a session.

use chip_solver_core::{BuyInError, CashoutInput, Session, SessionError, Transfer};

fn session_with(names: &[&str]) -> (Session, Vec<String>) {
    let mut session = Session::new();
    let ids = names
        .iter()
        .map(|name| session.add_player(name).unwrap().id().to_string())
        .collect();
    (session, ids)
}

#[test]
fn test_new_session_is_empty() {
    let session = Session::new();
    assert_eq!(session.num_players(), 0);
    assert!(session.events().is_empty());
    assert_eq!(session.total_buyin(), 0);
}

#[test]
fn test_add_player_keeps_insertion_order() {
    let (session, ids) = session_with(&["Alice", "Bob", "Carol"]);

    let names: Vec<&str> = session.players().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
    assert_eq!(ids.len(), 3);
    assert_ne!(ids[0], ids[1]);
}

#[test]
fn test_add_player_rejects_duplicate_name() {
    let (mut session, ids) = session_with(&["Alice", "Bob"]);

    assert_eq!(
        session.add_player(" Alice ").unwrap_err(),
        SessionError::DuplicateName("Alice".to_string())
    );
    assert_eq!(session.num_players(), 2);
    assert_eq!(session.find_player("Alice").map(|p| p.id()), Some(ids[0].as_str()));
}

#[test]
fn test_name_reusable_after_removal() {
    let (mut session, ids) = session_with(&["Alice"]);
    session.remove_player(&ids[0]).unwrap();

    let again = session.add_player("Alice").unwrap().id().to_string();
    assert_ne!(again, ids[0]);
}

#[test]
fn test_record_buyin() {
    let (mut session, ids) = session_with(&["Alice"]);

    let event = session.record_buyin(&ids[0], 100).unwrap();
    assert_eq!(event.player_id(), ids[0]);
    assert_eq!(event.amount(), 100);
    assert!(event.created_at() > 0);
    assert_eq!(session.total_buyin(), 100);
}

#[test]
fn test_record_buyin_unknown_player() {
    let mut session = Session::new();
    assert_eq!(
        session.record_buyin("nobody", 100).unwrap_err(),
        SessionError::PlayerNotFound("nobody".to_string())
    );
}

#[test]
fn test_record_buyin_rejects_non_positive() {
    let (mut session, ids) = session_with(&["Alice"]);

    assert_eq!(
        session.record_buyin(&ids[0], 0).unwrap_err(),
        SessionError::InvalidBuyIn(BuyInError::NonPositiveAmount { amount: 0 })
    );
    assert!(session.events().is_empty());
}

#[test]
fn test_buyin_totals_in_roster_order() {
    let (mut session, ids) = session_with(&["Alice", "Bob", "Carol"]);
    session.record_buyin(&ids[1], 50).unwrap();
    session.record_buyin(&ids[0], 20).unwrap();
    session.record_buyin(&ids[1], 25).unwrap();

    assert_eq!(
        session.buyin_totals(),
        vec![
            (ids[0].clone(), 20),
            (ids[1].clone(), 75),
            (ids[2].clone(), 0),
        ]
    );
    assert_eq!(session.events_for(&ids[1]).count(), 2);
}

#[test]
fn test_remove_player_cascades_events() {
    let (mut session, ids) = session_with(&["Alice", "Bob"]);
    session.record_buyin(&ids[0], 100).unwrap();
    session.record_buyin(&ids[1], 100).unwrap();
    session.record_buyin(&ids[0], 50).unwrap();

    let removed = session.remove_player(&ids[0]).unwrap();

    assert_eq!(removed.name(), "Alice");
    assert_eq!(session.num_players(), 1);
    assert_eq!(session.events().len(), 1);
    assert!(session.events().iter().all(|e| e.player_id() == ids[1]));
}

#[test]
fn test_remove_unknown_player() {
    let mut session = Session::new();
    assert!(matches!(
        session.remove_player("ghost"),
        Err(SessionError::PlayerNotFound(_))
    ));
}

#[test]
fn test_undo_buyin() {
    let (mut session, ids) = session_with(&["Alice"]);
    session.record_buyin(&ids[0], 100).unwrap();
    let second = session.record_buyin(&ids[0], 40).unwrap().id().to_string();

    assert_eq!(session.last_event().map(|e| e.id()), Some(second.as_str()));
    let undone = session.remove_event(&second).unwrap();

    assert_eq!(undone.amount(), 40);
    assert_eq!(session.total_buyin(), 100);
    assert_eq!(
        session.remove_event(&second).unwrap_err(),
        SessionError::EventNotFound(second)
    );
}

#[test]
fn test_clear() {
    let (mut session, ids) = session_with(&["Alice"]);
    session.record_buyin(&ids[0], 100).unwrap();

    session.clear();

    assert_eq!(session, Session::new());
}

#[test]
fn test_settle_from_session() {
    let (mut session, ids) = session_with(&["Alice", "Bob", "Carol"]);
    for id in &ids {
        session.record_buyin(id, 100).unwrap();
    }

    let settlement = session
        .settle(&[
            CashoutInput::new(ids[0].as_str(), 50),
            CashoutInput::new(ids[1].as_str(), 150),
            CashoutInput::new(ids[2].as_str(), 100),
        ])
        .unwrap();

    assert_eq!(
        settlement.transfers(),
        &[Transfer::new(ids[0].as_str(), ids[1].as_str(), 50)]
    );
}

#[test]
fn test_settle_after_removal_ignores_removed_buyins() {
    let (mut session, ids) = session_with(&["Alice", "Bob", "Carol"]);
    session.record_buyin(&ids[0], 100).unwrap();
    session.record_buyin(&ids[1], 100).unwrap();
    session.record_buyin(&ids[2], 500).unwrap();
    session.remove_player(&ids[2]).unwrap();

    let settlement = session
        .settle(&[
            CashoutInput::new(ids[0].as_str(), 200),
            CashoutInput::new(ids[1].as_str(), 0),
        ])
        .unwrap();

    assert_eq!(
        settlement.transfers(),
        &[Transfer::new(ids[1].as_str(), ids[0].as_str(), 100)]
    );
}
