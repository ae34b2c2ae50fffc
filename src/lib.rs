//! # realm-tracker
//!
//! Vitality tracker for tabletop games: health, shields and player
//! portraits.
//!
//! ## Design Principles
//!
//! 1. **Immutable snapshots**: every roster operation returns a new
//!    `Roster`; old snapshots stay valid, so undo is a list of rosters.
//!
//! 2. **Total operations**: unknown players are ignored, never errors.
//!    Damage is absorbed by shields first; shields never go below zero;
//!    health has no floor.
//!
//! 3. **Presentation state stays out of the data model**: edit mode,
//!    flashes and camera state live in `view`, keyed by player.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) snapshot clones via `im-rs`.
//!
//! - **Cancellable capture**: each camera session is a tokio task that
//!   delivers at most one result and never delivers after cancellation.
//!
//! ## Modules
//!
//! - `core`: players, photos, the roster store, actions, history, config
//! - `vitality`: shield absorption and health tiers
//! - `view`: per-card presentation state and feedback flashes
//! - `capture`: camera sessions and image file upload
//! - `tracker`: event loop tying the above together
//! - `logging`: tracing subscriber setup for binaries

pub mod core;
pub mod vitality;
pub mod view;
pub mod capture;
pub mod tracker;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use crate::core::{
    ActionRecord, Photo, Player, PlayerId, Roster, RosterAction, RosterConfig, RosterDiff,
    RosterHistory, VitalityDelta,
};

pub use crate::vitality::{absorb_damage, clamp_shields, Adjustment, HealthTier};

pub use crate::view::{
    CameraState, CardSnapshot, CardView, EditKey, Feedback, FeedbackKind, NameEditor,
    FLASH_DURATION,
};

pub use crate::capture::{
    CameraDevice, CaptureEvent, CaptureHandle, CaptureOutcome, CaptureSession, VideoStream,
};

pub use crate::tracker::{Intent, Tracker};

pub use crate::error::{CaptureError, ConfigError, PhotoError};
