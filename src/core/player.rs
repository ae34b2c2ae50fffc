//! Player identification and the player record.
//!
//! ## PlayerId
//!
//! Type-safe player identifier. IDs start at 1 and are never reused within
//! a roster lineage.
//!
//! ## Player
//!
//! The only entity in the data model: name, health, shields and an optional
//! portrait. Presentation state (edit mode, flashes, camera) lives in
//! `crate::view`, never here.

use serde::{Deserialize, Serialize};

use super::photo::Photo;

/// Player identifier.
///
/// Assigned by the roster when a player is added.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The ID following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl From<u32> for PlayerId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A tracked player.
///
/// `health` has no floor: zero or below is the defeated state, which only
/// affects display. `shields` is unsigned, so it can never drop below zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique, immutable identifier.
    pub id: PlayerId,

    /// Display name.
    pub name: String,

    /// Current health. May be negative.
    pub health: i64,

    /// Current shield points.
    pub shields: u32,

    /// Portrait, if one has been set.
    pub photo: Option<Photo>,
}

impl Player {
    /// Create a player with the given stats and the default name.
    #[must_use]
    pub fn new(id: PlayerId, health: i64, shields: u32) -> Self {
        Self {
            id,
            name: Self::default_name(id),
            health,
            shields,
            photo: None,
        }
    }

    /// The name a freshly added player gets: `"Player <id>"`.
    #[must_use]
    pub fn default_name(id: PlayerId) -> String {
        format!("Player {}", id.0)
    }

    /// Check if this player is in the defeated state (`health <= 0`).
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Check if this player currently has shields up.
    #[must_use]
    pub fn is_shielded(&self) -> bool {
        self.shields > 0
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}: health {}, shields {}",
            self.id, self.name, self.health, self.shields
        )
    }
}
