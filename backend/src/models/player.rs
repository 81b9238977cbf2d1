//! Player model
//!
//! A seat at the table. Players are identified by a stable UUID string and
//! carry a display name used by the front ends.

use serde::{Deserialize, Serialize};

/// A participant in a session
///
/// # Example
/// ```
/// use chip_solver_core::Player;
///
/// let player = Player::new("Alice".to_string());
/// assert_eq!(player.name(), "Alice");
/// assert!(!player.id().is_empty()); // UUID assigned on creation
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique, stable identifier (UUID v4)
    id: String,

    /// Display name
    name: String,
}

impl Player {
    /// Create a player with a freshly generated identifier
    pub fn new(name: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
        }
    }

    /// Create a player with a caller-chosen identifier
    ///
    /// Used when restoring a snapshot and by callers that manage their own ids.
    ///
    /// # Example
    /// ```
    /// use chip_solver_core::Player;
    ///
    /// let player = Player::with_id("A".to_string(), "Alice".to_string());
    /// assert_eq!(player.id(), "A");
    /// ```
    pub fn with_id(id: String, name: String) -> Self {
        Self { id, name }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
