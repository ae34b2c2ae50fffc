//! Shield absorption.
//!
//! Incoming damage is taken by shields first; whatever the shields cannot
//! absorb comes off health. Healing never touches shields, and lowering
//! shields never turns into damage.
//!
//! Arithmetic saturates at the integer bounds instead of overflowing.

/// Outcome of a health adjustment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Adjustment {
    /// Health after the adjustment.
    pub health: i64,

    /// Shields after the adjustment.
    pub shields: u32,

    /// Damage taken by shields.
    pub absorbed: u32,

    /// Damage that reached health.
    pub health_lost: u64,
}

/// Apply a signed health adjustment.
///
/// `amount >= 0` heals. `amount < 0` deals `|amount|` damage, absorbed by
/// shields first. Health has no floor.
///
/// ```
/// use realm_tracker::vitality::absorb_damage;
///
/// let adj = absorb_damage(10, 3, -5);
/// assert_eq!(adj.shields, 0);
/// assert_eq!(adj.health, 8);
/// assert_eq!(adj.absorbed, 3);
/// assert_eq!(adj.health_lost, 2);
/// ```
#[must_use]
pub fn absorb_damage(health: i64, shields: u32, amount: i64) -> Adjustment {
    if amount >= 0 {
        return Adjustment {
            health: health.saturating_add(amount),
            shields,
            absorbed: 0,
            health_lost: 0,
        };
    }

    let damage = amount.unsigned_abs();
    // absorbed <= shields, so it fits in u32
    let absorbed = damage.min(u64::from(shields)) as u32;
    let remaining = damage - u64::from(absorbed);

    Adjustment {
        health: health.saturating_sub_unsigned(remaining),
        shields: shields - absorbed,
        absorbed,
        health_lost: remaining,
    }
}

/// Apply a signed shield adjustment, clamping at zero.
///
/// ```
/// use realm_tracker::vitality::clamp_shields;
///
/// assert_eq!(clamp_shields(2, 3), 5);
/// assert_eq!(clamp_shields(0, -1), 0);
/// ```
#[must_use]
pub fn clamp_shields(shields: u32, amount: i64) -> u32 {
    let raw = i64::from(shields).saturating_add(amount);
    raw.clamp(0, i64::from(u32::MAX)) as u32
}
