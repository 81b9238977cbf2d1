//! Snapshot - Save/Load Session State
//!
//! Serializes the roster and buy-in history to JSON so a session survives
//! restarts. Settlement results are never part of a snapshot.
//!
//! # Critical Invariants
//!
//! - **Integrity**: The stored checksum must match the restored contents
//! - **Referential Integrity**: No event references a missing player
//! - **Uniqueness**: No duplicate player or event IDs, no duplicate player names

use crate::models::{BuyInEvent, Player};
use crate::session::state::Session;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Current on-disk snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors that can occur while saving or restoring a session
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("Checksum mismatch: stored {stored}, computed {computed}")]
    ChecksumMismatch { stored: String, computed: String },

    #[error("Invalid snapshot: {0}")]
    Invalid(String),
}

// ============================================================================
// Snapshot Structure
// ============================================================================

/// Complete session snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Format version
    pub version: u32,

    /// Roster in insertion order
    pub players: Vec<Player>,

    /// Buy-in events in creation order
    pub events: Vec<BuyInEvent>,

    /// SHA256 of the canonical JSON of `players` and `events`
    pub checksum: String,
}

#[derive(Serialize)]
struct ChecksumInput<'a> {
    players: &'a [Player],
    events: &'a [BuyInEvent],
}

impl Session {
    /// Capture the current roster and event history
    pub fn snapshot(&self) -> Result<SessionSnapshot, SnapshotError> {
        let checksum = compute_checksum(self.players(), self.events())?;
        Ok(SessionSnapshot {
            version: SNAPSHOT_VERSION,
            players: self.players().to_vec(),
            events: self.events().to_vec(),
            checksum,
        })
    }

    /// Rebuild a session from a snapshot after validating it
    pub fn restore(snapshot: SessionSnapshot) -> Result<Self, SnapshotError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }

        let computed = compute_checksum(&snapshot.players, &snapshot.events)?;
        if computed != snapshot.checksum {
            return Err(SnapshotError::ChecksumMismatch {
                stored: snapshot.checksum,
                computed,
            });
        }

        validate_snapshot(&snapshot)?;
        Ok(Session::from_parts(snapshot.players, snapshot.events))
    }

    /// Write the session to `path` as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&self.snapshot()?)?;
        fs::write(path, json)?;
        info!(path = %path.display(), players = self.num_players(), "session saved");
        Ok(())
    }

    /// Read a session from `path`
    ///
    /// A missing file yields an empty session. Unreadable or corrupt content
    /// is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no session file, starting empty");
                return Ok(Session::new());
            }
            Err(e) => return Err(e.into()),
        };

        let snapshot: SessionSnapshot = serde_json::from_str(&json)?;
        Session::restore(snapshot)
    }
}

// ============================================================================
// Checksum
// ============================================================================

/// Compute deterministic SHA256 hash of roster contents
///
/// Uses canonical JSON serialization with sorted keys so the hash does not
/// depend on field order.
pub fn compute_checksum(players: &[Player], events: &[BuyInEvent]) -> Result<String, SnapshotError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    let value = serde_json::to_value(ChecksumInput { players, events })?;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let json = serde_json::to_string(&canonicalize(value))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

// ============================================================================
// Validation
// ============================================================================

/// Validate snapshot contents
///
/// Checks:
/// - Player ID uniqueness
/// - Player name uniqueness
/// - Event ID uniqueness
/// - Event referential integrity
/// - Positive buy-in amounts
pub fn validate_snapshot(snapshot: &SessionSnapshot) -> Result<(), SnapshotError> {
    let mut player_ids = HashSet::new();
    let mut names = HashSet::new();
    for player in &snapshot.players {
        if !player_ids.insert(player.id()) {
            return Err(SnapshotError::Invalid(format!(
                "Duplicate player id: {}",
                player.id()
            )));
        }
        if !names.insert(player.name()) {
            return Err(SnapshotError::Invalid(format!(
                "Duplicate player name: {}",
                player.name()
            )));
        }
    }

    let mut event_ids = HashSet::new();
    for event in &snapshot.events {
        if !event_ids.insert(event.id()) {
            return Err(SnapshotError::Invalid(format!(
                "Duplicate event id: {}",
                event.id()
            )));
        }
        if !player_ids.contains(event.player_id()) {
            return Err(SnapshotError::Invalid(format!(
                "Orphaned event {} for player {}",
                event.id(),
                event.player_id()
            )));
        }
        if event.amount() <= 0 {
            return Err(SnapshotError::Invalid(format!(
                "Event {} has non-positive amount {}",
                event.id(),
                event.amount()
            )));
        }
    }

    Ok(())
}
