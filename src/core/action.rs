//! Roster actions.
//!
//! Every roster mutation can be expressed as a `RosterAction`, which makes
//! mutations loggable, replayable and recordable in history.

use serde::{Deserialize, Serialize};

use super::photo::Photo;
use super::player::PlayerId;

/// A roster mutation.
///
/// ## Example
///
/// ```
/// use realm_tracker::core::{PlayerId, Roster, RosterAction};
///
/// let roster = Roster::default()
///     .apply(&RosterAction::Add)
///     .apply(&RosterAction::AdjustShields { id: PlayerId::new(1), amount: 3 })
///     .apply(&RosterAction::AdjustHealth { id: PlayerId::new(1), amount: -5 });
///
/// let player = roster.get(PlayerId::new(1)).unwrap();
/// assert_eq!((player.health, player.shields), (8, 0));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RosterAction {
    /// Append a player with default stats.
    Add,
    /// Remove a player.
    Remove { id: PlayerId },
    /// Change a player's name.
    Rename { id: PlayerId, name: String },
    /// Heal (positive) or damage (negative).
    AdjustHealth { id: PlayerId, amount: i64 },
    /// Raise or lower shields.
    AdjustShields { id: PlayerId, amount: i64 },
    /// Replace (or clear) the portrait.
    SetPhoto { id: PlayerId, photo: Option<Photo> },
}

impl RosterAction {
    /// The player this action targets, if any.
    #[must_use]
    pub fn target(&self) -> Option<PlayerId> {
        match self {
            RosterAction::Add => None,
            RosterAction::Remove { id }
            | RosterAction::Rename { id, .. }
            | RosterAction::AdjustHealth { id, .. }
            | RosterAction::AdjustShields { id, .. }
            | RosterAction::SetPhoto { id, .. } => Some(*id),
        }
    }

    /// Short name for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            RosterAction::Add => "add",
            RosterAction::Remove { .. } => "remove",
            RosterAction::Rename { .. } => "rename",
            RosterAction::AdjustHealth { .. } => "adjust_health",
            RosterAction::AdjustShields { .. } => "adjust_shields",
            RosterAction::SetPhoto { .. } => "set_photo",
        }
    }
}

/// A recorded action with its position in the history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The action taken.
    pub action: RosterAction,

    /// Monotonic sequence number (for ordering).
    pub sequence: u64,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(action: RosterAction, sequence: u64) -> Self {
        Self { action, sequence }
    }
}
