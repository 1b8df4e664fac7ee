//! Shared test utilities for `Farmhand`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults. Time never comes from
//! the wall clock in tests: [`at`] builds fixed instants and every core
//! operation accepts them.

use crate::{
    entities::{field_entry, player},
    errors::Result,
};
use chrono::{DateTime, TimeZone, Utc};
use rand::{SeedableRng, rngs::StdRng};
use sea_orm::{DatabaseConnection, Set, prelude::*};
use tracing_subscriber::EnvFilter;

pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")), // Default to TRACE for tests if RUST_LOG is not set
        )
        .with_test_writer() // Crucial for `cargo test` output
        .try_init(); // Use try_init to avoid panic if already initialized
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A fixed instant `secs` seconds after the Unix epoch.
#[allow(clippy::unwrap_used)]
pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

/// A deterministic RNG for reproducible rolls.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a test player with sensible defaults.
///
/// # Defaults
/// * `gold`: 1000
/// * `gems`: 50
/// * `level`: 10 (clears every builtin unlock gate)
/// * `field_slots`: 9
/// * `factory_slots`: 5
/// * `worker_level`: 0
pub async fn create_test_player(db: &DatabaseConnection, id: &str) -> Result<player::Model> {
    let model = player::ActiveModel {
        id: Set(id.to_string()),
        gold: Set(1_000),
        gems: Set(50),
        xp: Set(0),
        level: Set(10),
        field_slots: Set(9),
        factory_slots: Set(5),
        worker_level: Set(0),
        created_at: Set(at(0)),
    };
    model.insert(db).await.map_err(Into::into)
}

/// Overwrites a player's gold balance.
pub async fn set_gold(db: &DatabaseConnection, id: &str, gold: i64) -> Result<()> {
    let player = crate::core::rewards::require_player(db, id).await?;
    let mut active: player::ActiveModel = player.into();
    active.gold = Set(gold);
    active.update(db).await?;
    Ok(())
}

/// Overwrites a player's gem balance.
pub async fn set_gems(db: &DatabaseConnection, id: &str, gems: i64) -> Result<()> {
    let player = crate::core::rewards::require_player(db, id).await?;
    let mut active: player::ActiveModel = player.into();
    active.gems = Set(gems);
    active.update(db).await?;
    Ok(())
}

/// Overwrites a player's level.
pub async fn set_level(db: &DatabaseConnection, id: &str, level: i32) -> Result<()> {
    let player = crate::core::rewards::require_player(db, id).await?;
    let mut active: player::ActiveModel = player.into();
    active.level = Set(level);
    active.update(db).await?;
    Ok(())
}

/// Overwrites a player's factory worker level.
pub async fn set_worker_level(db: &DatabaseConnection, id: &str, level: i32) -> Result<()> {
    let player = crate::core::rewards::require_player(db, id).await?;
    let mut active: player::ActiveModel = player.into();
    active.worker_level = Set(level);
    active.update(db).await?;
    Ok(())
}

/// Inserts a field entry with explicit timestamps, bypassing the plant
/// operation. Lets lifecycle tests pin `ends`/`dies` exactly instead of
/// deriving them from catalog timings.
#[allow(clippy::too_many_arguments)] // Test factory mirrors the row shape
pub async fn insert_field_entry(
    db: &DatabaseConnection,
    player_id: &str,
    item_id: &str,
    amount: i64,
    fields_used: i32,
    iterations: Option<i32>,
    ends: DateTime<Utc>,
    dies: DateTime<Utc>,
    has_rot_protection: bool,
) -> Result<field_entry::Model> {
    let model = field_entry::ActiveModel {
        player_id: Set(player_id.to_string()),
        item_id: Set(item_id.to_string()),
        amount: Set(amount),
        iterations: Set(iterations),
        fields_used: Set(fields_used),
        ends: Set(ends),
        dies: Set(dies),
        robbed_fields: Set(0),
        has_rot_protection: Set(has_rot_protection),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}
