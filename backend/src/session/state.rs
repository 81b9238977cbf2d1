//! Session State
//!
//! The roster collaborator: owns the players and their buy-in history and
//! hands both to the settlement engine through the [`Roster`] trait.
//!
//! # Critical Invariants
//!
//! 1. **Player Uniqueness**: Each player ID appears exactly once
//! 2. **No Orphan Events**: Every event references a player in the roster
//! 3. **Cascade Delete**: Removing a player removes all of its events
//! 4. **Positive Amounts**: Every recorded buy-in is > 0
//! 5. **Unique Names**: Display names are unique, so name lookup is unambiguous

use crate::models::{BuyInError, BuyInEvent, CashoutInput, Player};
use crate::settlement::{settle_roster, Roster, Settlement, SettlementError};
use thiserror::Error;
use tracing::info;

/// Errors that can occur while mutating a session
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("Player name must not be empty")]
    EmptyName,

    #[error("A player named '{0}' is already seated")]
    DuplicateName(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Invalid buy-in: {0}")]
    InvalidBuyIn(#[from] BuyInError),
}

/// Players and buy-in events of one poker session
///
/// # Example
///
/// ```rust
/// use chip_solver_core::{CashoutInput, Session};
///
/// let mut session = Session::new();
/// let alice = session.add_player("Alice").unwrap().id().to_string();
/// let bob = session.add_player("Bob").unwrap().id().to_string();
///
/// session.record_buyin(&alice, 100).unwrap();
/// session.record_buyin(&bob, 100).unwrap();
/// assert_eq!(session.total_buyin(), 200);
///
/// let settlement = session
///     .settle(&[CashoutInput::new(alice.as_str(), 0), CashoutInput::new(bob.as_str(), 200)])
///     .unwrap();
/// assert_eq!(settlement.net_of(&bob), Some(100));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Roster in insertion order
    players: Vec<Player>,

    /// Buy-in events in creation order
    events: Vec<BuyInEvent>,
}

impl Session {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a session from parts that were already validated
    pub(crate) fn from_parts(players: Vec<Player>, events: Vec<BuyInEvent>) -> Self {
        Self { players, events }
    }

    // ========================================================================
    // Roster
    // ========================================================================

    /// Add a player to the end of the roster
    ///
    /// Surrounding whitespace is trimmed from the name.
    ///
    /// # Errors
    /// - `SessionError::EmptyName` if the trimmed name is empty
    /// - `SessionError::DuplicateName` if the trimmed name is already taken
    pub fn add_player(&mut self, name: &str) -> Result<&Player, SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        if self.players.iter().any(|p| p.name() == name) {
            return Err(SessionError::DuplicateName(name.to_string()));
        }

        let player = Player::new(name.to_string());
        info!(player_id = player.id(), name, "player added");
        self.players.push(player);

        let last = self.players.len() - 1;
        Ok(&self.players[last])
    }

    /// Remove a player together with every buy-in they made
    pub fn remove_player(&mut self, player_id: &str) -> Result<Player, SessionError> {
        let position = self
            .players
            .iter()
            .position(|p| p.id() == player_id)
            .ok_or_else(|| SessionError::PlayerNotFound(player_id.to_string()))?;

        let player = self.players.remove(position);
        let before = self.events.len();
        self.events.retain(|e| e.player_id() != player_id);

        info!(
            player_id,
            events_removed = before - self.events.len(),
            "player removed"
        );
        Ok(player)
    }

    /// Get reference to a player by ID
    pub fn get_player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == player_id)
    }

    /// Look a player up by ID first, then by exact display name
    pub fn find_player(&self, id_or_name: &str) -> Option<&Player> {
        self.get_player(id_or_name)
            .or_else(|| self.players.iter().find(|p| p.name() == id_or_name))
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    // ========================================================================
    // Event log
    // ========================================================================

    /// Record a buy-in for an existing player
    ///
    /// # Errors
    /// - `SessionError::PlayerNotFound` if the player is not on the roster
    /// - `SessionError::InvalidBuyIn` if `amount <= 0`
    pub fn record_buyin(&mut self, player_id: &str, amount: i64) -> Result<&BuyInEvent, SessionError> {
        if self.get_player(player_id).is_none() {
            return Err(SessionError::PlayerNotFound(player_id.to_string()));
        }

        let event = BuyInEvent::new(player_id.to_string(), amount)?;
        info!(event_id = event.id(), player_id, amount, "buy-in recorded");
        self.events.push(event);

        let last = self.events.len() - 1;
        Ok(&self.events[last])
    }

    /// Undo a buy-in
    pub fn remove_event(&mut self, event_id: &str) -> Result<BuyInEvent, SessionError> {
        let position = self
            .events
            .iter()
            .position(|e| e.id() == event_id)
            .ok_or_else(|| SessionError::EventNotFound(event_id.to_string()))?;

        let event = self.events.remove(position);
        info!(event_id, player_id = event.player_id(), "buy-in undone");
        Ok(event)
    }

    pub fn events(&self) -> &[BuyInEvent] {
        &self.events
    }

    /// Most recently recorded event
    pub fn last_event(&self) -> Option<&BuyInEvent> {
        self.events.last()
    }

    /// Events of one player, oldest first
    pub fn events_for<'a>(&'a self, player_id: &'a str) -> impl Iterator<Item = &'a BuyInEvent> + 'a {
        self.events.iter().filter(move |e| e.player_id() == player_id)
    }

    /// Total buy-in per player, in roster order (players without events get 0)
    pub fn buyin_totals(&self) -> Vec<(String, i64)> {
        self.players
            .iter()
            .map(|p| {
                let total: i64 = self.events_for(p.id()).map(|e| e.amount()).sum();
                (p.id().to_string(), total)
            })
            .collect()
    }

    /// Sum of every buy-in in the session
    pub fn total_buyin(&self) -> i64 {
        self.events.iter().map(|e| e.amount()).sum()
    }

    /// Drop every player and event
    pub fn clear(&mut self) {
        self.players.clear();
        self.events.clear();
        info!("session cleared");
    }

    // ========================================================================
    // Settlement
    // ========================================================================

    /// Settle the session against the given cashouts
    pub fn settle(&self, cashouts: &[CashoutInput]) -> Result<Settlement, SettlementError> {
        settle_roster(self, cashouts)
    }
}

impl Roster for Session {
    fn players(&self) -> &[Player] {
        &self.players
    }

    fn buyin_events(&self) -> &[BuyInEvent] {
        &self.events
    }
}
