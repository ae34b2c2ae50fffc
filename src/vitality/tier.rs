//! Health bands for display.

use serde::{Deserialize, Serialize};

/// How healthy a player looks.
///
/// Purely presentational: a `Defeated` player stays on the roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HealthTier {
    /// `health <= 0`.
    Defeated,
    /// `1..=3`.
    Critical,
    /// `4..=6`.
    Wounded,
    /// Above 6.
    Healthy,
}

impl HealthTier {
    /// Upper bound (inclusive) of the critical band.
    pub const CRITICAL_MAX: i64 = 3;

    /// Upper bound (inclusive) of the wounded band.
    pub const WOUNDED_MAX: i64 = 6;

    /// Classify a health value.
    #[must_use]
    pub fn of(health: i64) -> Self {
        if health <= 0 {
            HealthTier::Defeated
        } else if health <= Self::CRITICAL_MAX {
            HealthTier::Critical
        } else if health <= Self::WOUNDED_MAX {
            HealthTier::Wounded
        } else {
            HealthTier::Healthy
        }
    }

    /// Short label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            HealthTier::Defeated => "defeated",
            HealthTier::Critical => "critical",
            HealthTier::Wounded => "wounded",
            HealthTier::Healthy => "healthy",
        }
    }
}

impl std::fmt::Display for HealthTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
