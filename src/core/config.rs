//! Roster configuration.
//!
//! Defaults reproduce the classic tracker: one starting player, 10 health,
//! no shields, `"Player"` as the fallback name. Front-ends may load a
//! `RosterConfig` from JSON; every field is optional there.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for new rosters and their history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Players present when a tracker starts.
    pub initial_players: usize,

    /// Health of a newly added player.
    pub starting_health: i64,

    /// Shields of a newly added player.
    pub starting_shields: u32,

    /// Name stored when a rename is submitted with an empty name.
    pub fallback_name: String,

    /// Maximum number of undo steps kept.
    pub history_limit: usize,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            initial_players: 1,
            starting_health: 10,
            starting_shields: 0,
            fallback_name: "Player".to_string(),
            history_limit: 64,
        }
    }
}

impl RosterConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of starting players.
    #[must_use]
    pub fn with_initial_players(mut self, count: usize) -> Self {
        self.initial_players = count;
        self
    }

    /// Set the health of new players.
    #[must_use]
    pub fn with_starting_health(mut self, health: i64) -> Self {
        self.starting_health = health;
        self
    }

    /// Set the shields of new players.
    #[must_use]
    pub fn with_starting_shields(mut self, shields: u32) -> Self {
        self.starting_shields = shields;
        self
    }

    /// Set the fallback name used for empty renames.
    #[must_use]
    pub fn with_fallback_name(mut self, name: impl Into<String>) -> Self {
        self.fallback_name = name.into();
        self
    }

    /// Set the undo depth.
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}
