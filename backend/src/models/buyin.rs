//! Buy-in event model
//!
//! Every chip purchase during a session is recorded as an immutable event.
//! Events are never edited; an undo deletes the event outright.
//!
//! CRITICAL: All money values are i64 (whole units)

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Kind of session event
///
/// Only buy-ins are tracked today. The tag is still serialized so stored
/// sessions stay readable if more kinds are introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    BuyIn,
}

/// Errors raised when constructing an event
#[derive(Debug, Error, PartialEq)]
pub enum BuyInError {
    #[error("Buy-in amount must be positive, got {amount}")]
    NonPositiveAmount { amount: i64 },
}

/// A single buy-in made by one player
///
/// # Example
/// ```
/// use chip_solver_core::BuyInEvent;
///
/// let event = BuyInEvent::new("player-1".to_string(), 100).unwrap();
/// assert_eq!(event.player_id(), "player-1");
/// assert_eq!(event.amount(), 100);
///
/// assert!(BuyInEvent::new("player-1".to_string(), 0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyInEvent {
    /// Unique event identifier (UUID v4)
    id: String,

    /// Owning player
    player_id: String,

    /// Amount bought in (i64, always positive)
    amount: i64,

    /// Event kind tag
    kind: EventKind,

    /// Creation time in milliseconds since the Unix epoch
    created_at: u64,
}

impl BuyInEvent {
    /// Record a buy-in happening now
    ///
    /// # Errors
    /// Returns `BuyInError::NonPositiveAmount` if `amount <= 0`.
    pub fn new(player_id: String, amount: i64) -> Result<Self, BuyInError> {
        Self::at(uuid::Uuid::new_v4().to_string(), player_id, amount, now_millis())
    }

    /// Build an event with every field supplied by the caller
    ///
    /// Used for snapshot restoration and by collaborators that assign
    /// their own identifiers and clocks.
    ///
    /// # Errors
    /// Returns `BuyInError::NonPositiveAmount` if `amount <= 0`.
    pub fn at(
        id: String,
        player_id: String,
        amount: i64,
        created_at: u64,
    ) -> Result<Self, BuyInError> {
        if amount <= 0 {
            return Err(BuyInError::NonPositiveAmount { amount });
        }

        Ok(Self {
            id,
            player_id,
            amount,
            kind: EventKind::BuyIn,
            created_at,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }
}

fn now_millis() -> u64 {
    // A clock before the epoch only happens on a misconfigured host; 0 keeps ordering sane.
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
