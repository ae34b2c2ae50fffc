//! The roster store.
//!
//! `Roster` is an ordered, immutable snapshot of player records. Every
//! operation takes `&self` and returns a new snapshot; earlier snapshots
//! stay valid, which is what makes undo free.
//!
//! Uses `im::Vector` so each new snapshot shares structure with its parent
//! and cloning is O(1).
//!
//! All operations are total. An unknown `PlayerId` leaves the roster
//! unchanged.

use std::sync::Arc;

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::action::RosterAction;
use super::config::RosterConfig;
use super::photo::Photo;
use super::player::{Player, PlayerId};
use crate::vitality::{absorb_damage, clamp_shields};

/// Ordered collection of players.
///
/// ## Example
///
/// ```
/// use realm_tracker::core::{PlayerId, Roster};
///
/// let before = Roster::default().add();
/// let after = before.adjust_health(PlayerId::new(1), -3);
///
/// // The old snapshot is untouched
/// assert_eq!(before.get(PlayerId::new(1)).unwrap().health, 10);
/// assert_eq!(after.get(PlayerId::new(1)).unwrap().health, 7);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Roster {
    players: Vector<Player>,

    /// Highest ID ever issued in this roster's lineage.
    high_water: u32,

    #[serde(skip)]
    config: Arc<RosterConfig>,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new(RosterConfig::default())
    }
}

impl PartialEq for Roster {
    fn eq(&self, other: &Self) -> bool {
        self.high_water == other.high_water && self.players == other.players
    }
}

impl Eq for Roster {}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new(config: RosterConfig) -> Self {
        Self {
            players: Vector::new(),
            high_water: 0,
            config: Arc::new(config),
        }
    }

    /// Create a roster holding `config.initial_players` default players.
    #[must_use]
    pub fn with_initial_players(config: RosterConfig) -> Self {
        let count = config.initial_players;
        (0..count).fold(Self::new(config), |roster, _| roster.add())
    }

    /// The configuration this roster was built with.
    #[must_use]
    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    // === Queries ===

    /// Number of players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Check if the roster is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Get a player by ID.
    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Check if a player exists.
    #[must_use]
    pub fn contains(&self, id: PlayerId) -> bool {
        self.get(id).is_some()
    }

    /// Iterate over players in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Iterate over player IDs in roster order.
    pub fn ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().map(|p| p.id)
    }

    /// Most recently added player still present.
    #[must_use]
    pub fn last(&self) -> Option<&Player> {
        self.players.last()
    }

    /// The ID the next `add` will assign.
    ///
    /// One past the largest ID present, and never at or below an ID
    /// that was issued before and later removed.
    #[must_use]
    pub fn next_id(&self) -> PlayerId {
        let max_present = self.players.iter().map(|p| p.id.0).max().unwrap_or(0);
        PlayerId::new(max_present.max(self.high_water)).next()
    }

    /// Highest ID issued so far in this roster's lineage.
    #[must_use]
    pub fn high_water(&self) -> PlayerId {
        PlayerId::new(self.high_water)
    }

    /// Raise the issued-ID mark to at least `mark`. Never lowers it.
    ///
    /// Used when an older snapshot becomes current again (undo), so IDs
    /// handed out after that snapshot are not issued a second time.
    #[must_use]
    pub fn with_high_water(&self, mark: PlayerId) -> Self {
        if mark.0 <= self.high_water {
            return self.clone();
        }
        let mut next = self.clone();
        next.high_water = mark.0;
        next
    }

    // === Operations ===

    /// Append a player with default stats.
    #[must_use]
    pub fn add(&self) -> Self {
        let id = self.next_id();
        let player = Player::new(id, self.config.starting_health, self.config.starting_shields);

        let mut next = self.clone();
        next.players.push_back(player);
        next.high_water = id.0;
        next
    }

    /// Remove a player. No-op if absent.
    #[must_use]
    pub fn remove(&self, id: PlayerId) -> Self {
        if !self.contains(id) {
            return self.clone();
        }
        let mut next = self.clone();
        next.players.retain(|p| p.id != id);
        next
    }

    /// Rename a player. An empty name stores the configured fallback.
    #[must_use]
    pub fn rename(&self, id: PlayerId, name: &str) -> Self {
        let name = if name.is_empty() {
            self.config.fallback_name.clone()
        } else {
            name.to_string()
        };
        self.update(id, |p| Player { name, ..p.clone() })
    }

    /// Heal (positive `amount`) or damage (negative `amount`) a player.
    ///
    /// Damage hits shields first. Health is not clamped.
    #[must_use]
    pub fn adjust_health(&self, id: PlayerId, amount: i64) -> Self {
        self.update(id, |p| {
            let adj = absorb_damage(p.health, p.shields, amount);
            Player {
                health: adj.health,
                shields: adj.shields,
                ..p.clone()
            }
        })
    }

    /// Raise or lower shields, never below zero. Health is untouched.
    #[must_use]
    pub fn adjust_shields(&self, id: PlayerId, amount: i64) -> Self {
        self.update(id, |p| Player {
            shields: clamp_shields(p.shields, amount),
            ..p.clone()
        })
    }

    /// Replace a player's portrait. `None` clears it.
    #[must_use]
    pub fn set_photo(&self, id: PlayerId, photo: Option<Photo>) -> Self {
        self.update(id, |p| Player { photo, ..p.clone() })
    }

    /// Apply a `RosterAction`.
    #[must_use]
    pub fn apply(&self, action: &RosterAction) -> Self {
        match action {
            RosterAction::Add => self.add(),
            RosterAction::Remove { id } => self.remove(*id),
            RosterAction::Rename { id, name } => self.rename(*id, name),
            RosterAction::AdjustHealth { id, amount } => self.adjust_health(*id, *amount),
            RosterAction::AdjustShields { id, amount } => self.adjust_shields(*id, *amount),
            RosterAction::SetPhoto { id, photo } => self.set_photo(*id, photo.clone()),
        }
    }

    fn update(&self, id: PlayerId, f: impl FnOnce(&Player) -> Player) -> Self {
        let Some(index) = self.players.iter().position(|p| p.id == id) else {
            return self.clone();
        };
        let updated = f(&self.players[index]);
        let mut next = self.clone();
        next.players.set(index, updated);
        next
    }

    // === Diffing ===

    /// Compare this snapshot with an earlier one.
    #[must_use]
    pub fn diff(&self, previous: &Roster) -> RosterDiff {
        let before: FxHashMap<PlayerId, &Player> =
            previous.players.iter().map(|p| (p.id, p)).collect();

        let mut diff = RosterDiff::default();
        for player in self.players.iter() {
            match before.get(&player.id) {
                Some(old) => {
                    let delta = VitalityDelta::between(old, player);
                    if !delta.is_zero() {
                        diff.changed.push(delta);
                    }
                }
                None => diff.added.push(player.id),
            }
        }
        diff.removed = previous
            .players
            .iter()
            .map(|p| p.id)
            .filter(|id| !self.contains(*id))
            .collect();
        diff
    }
}

/// Change in a single player's vitality between two snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VitalityDelta {
    /// The player.
    pub id: PlayerId,

    /// Health after minus health before.
    pub health: i64,

    /// Shields after minus shields before.
    pub shields: i64,

    /// Shields before the change.
    pub previous_shields: u32,
}

impl VitalityDelta {
    /// Compute the delta from `before` to `after`.
    #[must_use]
    pub fn between(before: &Player, after: &Player) -> Self {
        Self {
            id: after.id,
            health: after.health.saturating_sub(before.health),
            shields: i64::from(after.shields) - i64::from(before.shields),
            previous_shields: before.shields,
        }
    }

    /// Check if nothing changed.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.health == 0 && self.shields == 0
    }
}

/// Membership and vitality changes between two snapshots.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RosterDiff {
    /// Players present only in the newer snapshot.
    pub added: Vec<PlayerId>,

    /// Players present only in the older snapshot.
    pub removed: Vec<PlayerId>,

    /// Players whose health or shields changed.
    pub changed: Vec<VitalityDelta>,
}

impl RosterDiff {
    /// Check if the snapshots are equivalent in membership and vitality.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}
