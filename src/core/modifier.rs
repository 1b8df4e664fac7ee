//! Modifier engine - pure formulas bending base timings and yields.
//!
//! Each per-item modification axis is an integer level 0-10 (enforced at
//! purchase time, see [`crate::core::modification`]). All arithmetic is
//! integer-truncated: 5% steps come out as `base * level / 20` and 10%
//! steps as `base * level / 10`. No I/O, no clock, no randomness - the
//! actual yield roll happens in the lifecycle engine with the caller's RNG.

/// Effective grow duration after the grow-speed axis: `base - base * level * 5%`.
/// Level 10 halves the grow time.
#[must_use]
pub const fn effective_grow_time(base_secs: i64, level: i32) -> i64 {
    base_secs - base_secs * level as i64 / 20
}

/// Effective collect window after the harvest-window axis: `base + base * level * 10%`.
/// Level 10 doubles the window.
#[must_use]
pub const fn effective_harvest_window(base_secs: i64, level: i32) -> i64 {
    base_secs + base_secs * level as i64 / 10
}

/// Effective yield ceiling after the yield-volume axis: `base + base * level * 10%`.
/// Level 10 doubles the ceiling; the actual roll is
/// `uniform(base_amount, effective_volume)` inclusive, per tile.
#[must_use]
pub const fn effective_yield_volume(base_volume: i64, level: i32) -> i64 {
    base_volume + base_volume * level as i64 / 10
}

/// Effective per-unit craft duration after the factory worker discount:
/// `base - base * worker_level * 5%`. Separate from the three modification
/// axes; the worker level lives on the player, not per item.
#[must_use]
pub const fn effective_craft_time(base_secs: i64, worker_level: i32) -> i64 {
    base_secs - base_secs * worker_level as i64 / 20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grow_time_monotonically_shrinks() {
        let base = 1_000;
        let mut previous = effective_grow_time(base, 0);
        assert_eq!(previous, base);

        for level in 1..=10 {
            let current = effective_grow_time(base, level);
            assert!(current <= previous, "level {level} must not grow the time");
            assert!(current <= base);
            previous = current;
        }

        // Level 10 halves the duration exactly
        assert_eq!(effective_grow_time(base, 10), 500);
    }

    #[test]
    fn test_harvest_window_monotonically_grows() {
        let base = 1_000;
        let mut previous = effective_harvest_window(base, 0);
        assert_eq!(previous, base);

        for level in 1..=10 {
            let current = effective_harvest_window(base, level);
            assert!(current >= previous);
            previous = current;
        }

        assert_eq!(effective_harvest_window(base, 10), 2_000);
    }

    #[test]
    fn test_yield_volume_monotonically_grows() {
        let base = 7;
        let mut previous = effective_yield_volume(base, 0);
        assert_eq!(previous, base);

        for level in 1..=10 {
            let current = effective_yield_volume(base, level);
            assert!(current >= previous);
            previous = current;
        }

        assert_eq!(effective_yield_volume(base, 10), 14);
    }

    #[test]
    fn test_truncation_rounds_down() {
        // 5% of 130 is 6.5; one level must truncate to 6
        assert_eq!(effective_grow_time(130, 1), 124);
        // 10% of 7 is 0.7; one level truncates to no change
        assert_eq!(effective_yield_volume(7, 1), 7);
        // but three levels of 10% on 7 is 2.1 -> +2
        assert_eq!(effective_yield_volume(7, 3), 9);
    }

    #[test]
    fn test_craft_time_worker_discount() {
        assert_eq!(effective_craft_time(60, 0), 60);
        assert_eq!(effective_craft_time(60, 1), 57);
        assert_eq!(effective_craft_time(60, 10), 30);
    }
}
