//! Presentation state owned by the front-end.
//!
//! - `feedback`: damage/heal/shield-break flashes
//! - `card`: per-card state (name editor, camera state, current flash)

pub mod card;
pub mod feedback;

pub use card::{CameraState, CardSnapshot, CardView, EditKey, NameEditor};
pub use feedback::{Feedback, FeedbackKind, Flash, FLASH_DURATION};
