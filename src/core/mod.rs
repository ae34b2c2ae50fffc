//! Core tracker types: players, photos, the roster store, actions, history,
//! configuration.
//!
//! Nothing in this module performs I/O or holds presentation state.

pub mod player;
pub mod photo;
pub mod config;
pub mod action;
pub mod roster;
pub mod history;

pub use player::{Player, PlayerId};
pub use photo::Photo;
pub use config::RosterConfig;
pub use action::{ActionRecord, RosterAction};
pub use roster::{Roster, RosterDiff, VitalityDelta};
pub use history::RosterHistory;
