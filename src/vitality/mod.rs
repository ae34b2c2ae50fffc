//! Vitality arithmetic.
//!
//! - `damage`: shield absorption and shield clamping
//! - `tier`: health bands used for display

pub mod damage;
pub mod tier;

pub use damage::{absorb_damage, clamp_shields, Adjustment};
pub use tier::HealthTier;
