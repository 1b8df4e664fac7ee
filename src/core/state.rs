//! Derived lifecycle states - pure time arithmetic, no storage, no clock.
//!
//! No entry ever stores its state; it is always recomputed from the stored
//! timestamps against an injected `now`. There is no background scheduler
//! ticking entries over - every read derives the state fresh, which keeps
//! the engine correct regardless of how long a row sat untouched.

use chrono::{DateTime, Utc};

/// Lifecycle state of a planted field entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldState {
    /// Still growing, nothing to collect yet (`now < ends`)
    Growing,
    /// Ripe and collectable (`ends <= now < dies`)
    Collectable,
    /// Collect window expired (`now >= dies`)
    Rotten,
}

/// Lifecycle state of a factory queue entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueueState {
    /// Waiting for its production slot (`now < starts`)
    Queued,
    /// Currently being produced (`starts <= now < ends`)
    Producing,
    /// Finished; waits indefinitely for collection (`now >= ends`)
    Ready,
}

/// Derives a field entry's state from its timestamps.
///
/// Boundaries: the entry turns collectable exactly at `ends` and rotten
/// exactly at `dies`.
#[must_use]
pub fn field_state(now: DateTime<Utc>, ends: DateTime<Utc>, dies: DateTime<Utc>) -> FieldState {
    if now < ends {
        FieldState::Growing
    } else if now < dies {
        FieldState::Collectable
    } else {
        FieldState::Rotten
    }
}

/// Derives a queue entry's state from its timestamps.
#[must_use]
pub fn queue_state(now: DateTime<Utc>, starts: DateTime<Utc>, ends: DateTime<Utc>) -> QueueState {
    if now < starts {
        QueueState::Queued
    } else if now < ends {
        QueueState::Producing
    } else {
        QueueState::Ready
    }
}

/// Whether a field entry in `state` can be harvested.
///
/// Collectable entries always can. Rotten entries can only be rescued by a
/// rot-protection snapshot taken at planting time, or by the global grace
/// override ("field guard") - an operational safety valve passed in
/// explicitly by the caller, never read from ambient state.
#[must_use]
pub const fn field_is_harvestable(state: FieldState, has_rot_protection: bool, grace: bool) -> bool {
    match state {
        FieldState::Growing => false,
        FieldState::Collectable => true,
        FieldState::Rotten => has_rot_protection || grace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[allow(clippy::unwrap_used)]
    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_field_state_boundaries() {
        let ends = at(120);
        let dies = at(300);

        assert_eq!(field_state(at(0), ends, dies), FieldState::Growing);
        assert_eq!(field_state(at(119), ends, dies), FieldState::Growing);
        // Exactly at `ends` the entry is collectable, not growing
        assert_eq!(field_state(at(120), ends, dies), FieldState::Collectable);
        assert_eq!(field_state(at(299), ends, dies), FieldState::Collectable);
        // Exactly at `dies` the entry is rotten
        assert_eq!(field_state(at(300), ends, dies), FieldState::Rotten);
        assert_eq!(field_state(at(10_000), ends, dies), FieldState::Rotten);
    }

    #[test]
    fn test_field_state_zero_window() {
        // A zero-length collect window rots immediately at `ends`
        let ends = at(60);
        assert_eq!(field_state(at(60), ends, ends), FieldState::Rotten);
        assert_eq!(field_state(at(59), ends, ends), FieldState::Growing);
    }

    #[test]
    fn test_queue_state_boundaries() {
        let starts = at(60);
        let ends = at(120);

        assert_eq!(queue_state(at(0), starts, ends), QueueState::Queued);
        assert_eq!(queue_state(at(60), starts, ends), QueueState::Producing);
        assert_eq!(queue_state(at(119), starts, ends), QueueState::Producing);
        assert_eq!(queue_state(at(120), starts, ends), QueueState::Ready);
        // Ready entries never expire
        assert_eq!(queue_state(at(999_999), starts, ends), QueueState::Ready);
    }

    #[test]
    fn test_harvestable_predicate() {
        assert!(!field_is_harvestable(FieldState::Growing, true, true));
        assert!(field_is_harvestable(FieldState::Collectable, false, false));
        assert!(!field_is_harvestable(FieldState::Rotten, false, false));
        assert!(field_is_harvestable(FieldState::Rotten, true, false));
        assert!(field_is_harvestable(FieldState::Rotten, false, true));
    }
}
