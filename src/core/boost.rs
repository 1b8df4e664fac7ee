//! Booster snapshots passed into lifecycle operations.
//!
//! Boosters are time-limited purchases tracked by an external collaborator.
//! The core never reads booster state itself; the command layer resolves
//! whatever is active for the player at call time into an [`ActiveBoosts`]
//! snapshot and passes it in, which keeps every operation deterministic and
//! testable without a clock or a booster table.

/// Snapshot of a player's active boosters at the moment of an operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActiveBoosts {
    /// Bonus field tiles on top of the player's base allotment
    pub extra_field_slots: i32,
    /// Bonus factory queue slots on top of the base allotment
    pub extra_factory_slots: i32,
    /// Whether planted entries are protected from rot; snapshotted onto
    /// the field entry at planting time
    pub rot_protection: bool,
    /// Defensive tier against rob attempts
    pub catch_tier: CatchTier,
}

/// A target's defensive booster strength against rob attempts.
///
/// Stacked defensive boosters tighten the per-draw catch odds; the top tier
/// rejects the attempt before a single draw happens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CatchTier {
    /// No defensive booster - thieves are never caught
    #[default]
    None,
    /// 1-in-8 catch chance per draw
    Low,
    /// 1-in-4 catch chance per draw
    Mid,
    /// 1-in-2 catch chance per draw
    High,
    /// Attempt rejected outright, before any draw
    Top,
}

impl CatchTier {
    /// Per-draw catch denominator: a draw is caught with probability `1/n`.
    /// `None` means the draw can never be caught.
    #[must_use]
    pub const fn catch_denominator(self) -> Option<u32> {
        match self {
            Self::None => None,
            Self::Low => Some(8),
            Self::Mid => Some(4),
            Self::High => Some(2),
            Self::Top => Some(1),
        }
    }

    /// Whether this tier refuses rob attempts entirely.
    #[must_use]
    pub const fn is_top(self) -> bool {
        matches!(self, Self::Top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catch_denominators() {
        assert_eq!(CatchTier::None.catch_denominator(), None);
        assert_eq!(CatchTier::Low.catch_denominator(), Some(8));
        assert_eq!(CatchTier::Mid.catch_denominator(), Some(4));
        assert_eq!(CatchTier::High.catch_denominator(), Some(2));
        assert_eq!(CatchTier::Top.catch_denominator(), Some(1));
    }

    #[test]
    fn test_default_boosts_are_neutral() {
        let boosts = ActiveBoosts::default();
        assert_eq!(boosts.extra_field_slots, 0);
        assert_eq!(boosts.extra_factory_slots, 0);
        assert!(!boosts.rot_protection);
        assert_eq!(boosts.catch_tier, CatchTier::None);
        assert!(!boosts.catch_tier.is_top());
    }
}
