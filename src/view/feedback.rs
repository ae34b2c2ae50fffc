//! Damage, heal and shield-break feedback.
//!
//! When a player's vitality changes, the card flashes and shows a floating
//! number for a short time. Which flash is shown depends only on the
//! change itself:
//!
//! - health went down: `Damage`, showing the (negative) health change
//! - health went up: `Heal`, showing `+n`
//! - otherwise, shields went down from a positive value: `ShieldBreak`
//!
//! Time is passed in explicitly so expiry is deterministic.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::core::VitalityDelta;

/// How long a flash stays visible.
pub const FLASH_DURATION: Duration = Duration::from_millis(600);

/// Kind of feedback flash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackKind {
    /// Health was lost.
    Damage,
    /// Health was gained.
    Heal,
    /// Shields were lost without health loss.
    ShieldBreak,
}

/// A feedback event with the number to float over the card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Which animation to play.
    pub kind: FeedbackKind,
    /// Signed amount shown in the floating number.
    pub value: i64,
}

impl Feedback {
    /// Classify a vitality change. Returns `None` when nothing should flash.
    ///
    /// ```
    /// use realm_tracker::core::{PlayerId, VitalityDelta};
    /// use realm_tracker::view::{Feedback, FeedbackKind};
    ///
    /// let delta = VitalityDelta {
    ///     id: PlayerId::new(1),
    ///     health: 0,
    ///     shields: -3,
    ///     previous_shields: 5,
    /// };
    /// let feedback = Feedback::from_delta(&delta).unwrap();
    /// assert_eq!(feedback.kind, FeedbackKind::ShieldBreak);
    /// assert_eq!(feedback.label(), "-3");
    /// ```
    #[must_use]
    pub fn from_delta(delta: &VitalityDelta) -> Option<Self> {
        if delta.health < 0 {
            Some(Self { kind: FeedbackKind::Damage, value: delta.health })
        } else if delta.health > 0 {
            Some(Self { kind: FeedbackKind::Heal, value: delta.health })
        } else if delta.shields < 0 && delta.previous_shields > 0 {
            Some(Self { kind: FeedbackKind::ShieldBreak, value: delta.shields })
        } else {
            None
        }
    }

    /// Floating number text: heals carry an explicit `+`.
    #[must_use]
    pub fn label(&self) -> String {
        match self.kind {
            FeedbackKind::Heal => format!("+{}", self.value),
            FeedbackKind::Damage | FeedbackKind::ShieldBreak => self.value.to_string(),
        }
    }
}

/// A feedback flash in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Flash {
    /// What is being shown.
    pub feedback: Feedback,
    /// When the flash began.
    pub started: Instant,
}

impl Flash {
    /// Start a flash at `now`.
    #[must_use]
    pub fn start(feedback: Feedback, now: Instant) -> Self {
        Self { feedback, started: now }
    }

    /// When the flash disappears.
    #[must_use]
    pub fn expires_at(&self) -> Instant {
        self.started + FLASH_DURATION
    }

    /// Check if the flash is over at `now`.
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at()
    }
}
