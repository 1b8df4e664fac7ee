//! Core game logic - framework-agnostic lifecycle, modifier, and rob
//! operations. Everything here takes the database handle, the catalog, an
//! explicit `now`, and (where rolls happen) the caller's RNG, and returns
//! structured results for the command layer to render.

/// Booster snapshots passed into lifecycle operations
pub mod boost;
/// Key-value TTL cooldown store
pub mod cooldown;
/// Field lifecycle - planting and harvesting
pub mod field;
/// Factory lifecycle - manufacturing and collecting
pub mod factory;
/// Per-item modification levels and upgrade purchases
pub mod modification;
/// Pure timing/yield formulas
pub mod modifier;
/// Reward and inventory application
pub mod rewards;
/// Rob/steal resolution
pub mod rob;
/// Derived lifecycle states
pub mod state;
