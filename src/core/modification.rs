//! Modification purchases - permanent per-(player, item) upgrade levels.
//!
//! Three axes, each bought one level at a time with gems, capped at 10,
//! never decremented. The lifecycle engine reads the levels through
//! [`get_levels`] and feeds them into [`crate::core::modifier`].

use crate::{
    catalog::Catalog,
    core::rewards,
    entities::{Modification, modification},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, DatabaseConnection, Set, TransactionTrait, prelude::*};
use std::collections::HashMap;
use tracing::{info, instrument};

/// Highest reachable level on any axis.
pub const MAX_LEVEL: i32 = 10;

/// One upgrade axis of a modification row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModAxis {
    /// Shortens grow time
    GrowSpeed,
    /// Lengthens the collect window
    HarvestWindow,
    /// Raises the yield roll ceiling
    YieldVolume,
}

/// The three axis levels for one (player, item) pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModLevels {
    /// Grow speed axis level
    pub grow_speed: i32,
    /// Harvest window axis level
    pub harvest_window: i32,
    /// Yield volume axis level
    pub yield_volume: i32,
}

impl From<&modification::Model> for ModLevels {
    fn from(row: &modification::Model) -> Self {
        Self {
            grow_speed: row.grow_speed,
            harvest_window: row.harvest_window,
            yield_volume: row.yield_volume,
        }
    }
}

/// Gem cost of buying the next level on an axis currently at `current`.
#[must_use]
pub const fn upgrade_cost(current: i32) -> i64 {
    (current as i64 + 1) * 5
}

/// Fetches the modification levels for one (player, item) pair, defaulting
/// to all-zero when the player never bought an upgrade for the item.
pub async fn get_levels<C>(db: &C, player_id: &str, item_id: &str) -> Result<ModLevels>
where
    C: ConnectionTrait,
{
    let row = Modification::find()
        .filter(modification::Column::PlayerId.eq(player_id))
        .filter(modification::Column::ItemId.eq(item_id))
        .one(db)
        .await?;

    Ok(row.as_ref().map(Into::into).unwrap_or_default())
}

/// Fetches all modification levels for a player, keyed by item id.
/// Items without a row simply have no key (all-zero levels).
pub async fn get_all_levels<C>(db: &C, player_id: &str) -> Result<HashMap<String, ModLevels>>
where
    C: ConnectionTrait,
{
    let rows = Modification::find()
        .filter(modification::Column::PlayerId.eq(player_id))
        .all(db)
        .await?;

    Ok(rows
        .iter()
        .map(|row| (row.item_id.clone(), ModLevels::from(row)))
        .collect())
}

/// Buys the next level on one axis for a catalog item.
///
/// Runs as one transaction: the row is fetched (or created at zero) fresh,
/// the cap and gem balance are checked against current state, the gems are
/// deducted, and the axis is incremented by exactly one. A cap or balance
/// failure aborts with no writes.
#[instrument(skip(db, catalog))]
pub async fn purchase_upgrade(
    db: &DatabaseConnection,
    catalog: &Catalog,
    player_id: &str,
    item_id: &str,
    axis: ModAxis,
) -> Result<modification::Model> {
    let item = catalog.get(item_id)?;

    let txn = db.begin().await?;

    rewards::require_player(&txn, player_id).await?;

    let existing = Modification::find()
        .filter(modification::Column::PlayerId.eq(player_id))
        .filter(modification::Column::ItemId.eq(item_id))
        .one(&txn)
        .await?;

    let current = match (&existing, axis) {
        (Some(row), ModAxis::GrowSpeed) => row.grow_speed,
        (Some(row), ModAxis::HarvestWindow) => row.harvest_window,
        (Some(row), ModAxis::YieldVolume) => row.yield_volume,
        (None, _) => 0,
    };

    if current >= MAX_LEVEL {
        return Err(Error::MaxLevel {
            item_id: item.id.clone(),
        });
    }

    rewards::spend_gems(&txn, player_id, upgrade_cost(current)).await?;

    let mut active: modification::ActiveModel = existing.map_or_else(
        || modification::ActiveModel {
            player_id: Set(player_id.to_string()),
            item_id: Set(item_id.to_string()),
            grow_speed: Set(0),
            harvest_window: Set(0),
            yield_volume: Set(0),
            ..Default::default()
        },
        Into::into,
    );

    match axis {
        ModAxis::GrowSpeed => active.grow_speed = Set(current + 1),
        ModAxis::HarvestWindow => active.harvest_window = Set(current + 1),
        ModAxis::YieldVolume => active.yield_volume = Set(current + 1),
    }

    let result = match active.id {
        sea_orm::ActiveValue::Set(_) | sea_orm::ActiveValue::Unchanged(_) => {
            active.update(&txn).await?
        }
        sea_orm::ActiveValue::NotSet => active.insert(&txn).await?,
    };

    txn.commit().await?;
    info!(player_id, item_id, ?axis, level = current + 1, "purchased upgrade");

    Ok(result)
}
