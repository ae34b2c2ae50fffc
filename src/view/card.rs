//! Per-card presentation state.
//!
//! A `CardView` exists for each player on screen and is thrown away when the
//! player is removed. None of this is part of the `Player` record.

use std::time::Instant;

use super::feedback::{Feedback, Flash};
use crate::core::Player;
use crate::vitality::HealthTier;

/// Keys the name editor reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditKey {
    /// Submit the edit.
    Enter,
    /// Abandon the edit.
    Escape,
}

/// Inline name editing.
///
/// While editing, the editor holds the text being typed. `commit` hands the
/// text back for a rename (an empty string is fine; the roster substitutes
/// the fallback name). `cancel` throws the input away.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameEditor {
    input: Option<String>,
}

impl NameEditor {
    /// Enter edit mode, seeded with the current name.
    pub fn begin(&mut self, current_name: &str) {
        self.input = Some(current_name.to_string());
    }

    /// Replace the text being edited. Ignored outside edit mode.
    pub fn set_input(&mut self, text: impl Into<String>) {
        if let Some(input) = self.input.as_mut() {
            *input = text.into();
        }
    }

    /// Leave edit mode, returning the submitted text.
    pub fn commit(&mut self) -> Option<String> {
        self.input.take()
    }

    /// Leave edit mode without submitting.
    pub fn cancel(&mut self) {
        self.input = None;
    }

    /// Handle a key press. Returns the submitted text on `Enter`.
    pub fn on_key(&mut self, key: EditKey) -> Option<String> {
        match key {
            EditKey::Enter => self.commit(),
            EditKey::Escape => {
                self.cancel();
                None
            }
        }
    }

    /// Check if the editor is active.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.input.is_some()
    }

    /// The text being edited.
    #[must_use]
    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }
}

/// Camera state of a card.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CameraState {
    /// No capture in progress.
    #[default]
    Closed,
    /// A capture session is running.
    Live { attempt: u64 },
    /// The last capture attempt failed; the message is shown until closed.
    Failed { message: String },
}

/// Presentation state for one player card.
#[derive(Clone, Debug, Default)]
pub struct CardView {
    /// Inline name editing state.
    pub name_editor: NameEditor,
    /// Camera session state.
    pub camera: CameraState,
    flash: Option<Flash>,
}

impl CardView {
    /// Create the view for a newly displayed card.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a feedback flash, replacing any flash in progress.
    pub fn show(&mut self, feedback: Feedback, now: Instant) {
        self.flash = Some(Flash::start(feedback, now));
    }

    /// The visible flash at `now`, if any.
    #[must_use]
    pub fn flash(&self, now: Instant) -> Option<&Flash> {
        self.flash.as_ref().filter(|f| !f.is_expired(now))
    }

    /// Drop an expired flash. Returns true if one was cleared.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.flash {
            Some(flash) if flash.is_expired(now) => {
                self.flash = None;
                true
            }
            _ => false,
        }
    }

    /// Check if a capture session is running.
    #[must_use]
    pub fn is_camera_live(&self) -> bool {
        matches!(self.camera, CameraState::Live { .. })
    }

    /// The live capture attempt, if any.
    #[must_use]
    pub fn live_attempt(&self) -> Option<u64> {
        match self.camera {
            CameraState::Live { attempt } => Some(attempt),
            _ => None,
        }
    }

    /// The capture error to display, if any.
    #[must_use]
    pub fn camera_error(&self) -> Option<&str> {
        match &self.camera {
            CameraState::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// The remove control is hidden while the camera is in use.
    #[must_use]
    pub fn can_remove(&self) -> bool {
        matches!(self.camera, CameraState::Closed)
    }
}

/// Everything needed to draw a card.
#[derive(Clone, Debug)]
pub struct CardSnapshot<'a> {
    /// The player record.
    pub player: &'a Player,
    /// Colour band for the health value.
    pub tier: HealthTier,
    /// The flash visible right now.
    pub flash: Option<Feedback>,
    /// Text in the name editor, while editing.
    pub editing: Option<&'a str>,
    /// Camera state of the card.
    pub camera: &'a CameraState,
}

impl<'a> CardSnapshot<'a> {
    /// Combine a player record with its view state at `now`.
    #[must_use]
    pub fn new(player: &'a Player, view: &'a CardView, now: Instant) -> Self {
        Self {
            player,
            tier: HealthTier::of(player.health),
            flash: view.flash(now).map(|f| f.feedback),
            editing: view.name_editor.input(),
            camera: &view.camera,
        }
    }
}
