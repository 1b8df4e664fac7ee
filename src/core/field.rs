//! Field lifecycle engine - planting and harvesting.
//!
//! Both operations run as a single transaction. Plant re-validates level,
//! capacity, and funds against fresh rows inside that transaction, because
//! seconds may have passed since the user confirmed the purchase and a
//! concurrent command may have spent the gold or filled the tiles in the
//! meantime. Harvest resolves every entry the player owns in one pass and
//! returns structured groupings for the caller to render.

use crate::{
    catalog::{Catalog, ItemDef},
    core::{
        boost::ActiveBoosts,
        modification::{self, ModLevels},
        modifier, rewards,
        state::{self, FieldState},
    },
    entities::{FieldEntry, field_entry},
    errors::{Error, Result},
};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sea_orm::{ConnectionTrait, DatabaseConnection, Set, TransactionTrait, prelude::*};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// Result of a successful plant operation.
#[derive(Clone, Debug)]
pub struct PlantOutcome {
    /// The persisted field entry
    pub entry: field_entry::Model,
    /// Gold deducted
    pub cost: i64,
}

/// One batch collected and removed from the field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarvestedBatch {
    /// Item collected
    pub item_id: String,
    /// Units awarded
    pub amount: i64,
}

/// One multi-cycle batch collected and renewed for its next cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenewedBatch {
    /// Item collected
    pub item_id: String,
    /// Units awarded for the finished cycle
    pub amount: i64,
    /// Cycles still remaining after the renewal
    pub iterations_left: i32,
}

/// One batch lost to rot, removed without reward.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RottedBatch {
    /// Item lost
    pub item_id: String,
    /// Units lost
    pub amount: i64,
}

/// Structured result of a harvest pass, grouped for rendering.
#[derive(Clone, Debug, Default)]
pub struct HarvestOutcome {
    /// Batches collected and cleared
    pub harvested: Vec<HarvestedBatch>,
    /// Multi-cycle batches collected and requeued for another cycle
    pub renewed: Vec<RenewedBatch>,
    /// Batches that rotted away unrewarded
    pub rotted: Vec<RottedBatch>,
    /// Total experience awarded
    pub xp: i64,
}

/// Field tiles currently occupied by a player's live entries.
/// Rotten entries still count until a harvest pass clears them.
pub async fn used_tiles<C>(db: &C, player_id: &str) -> Result<i32>
where
    C: ConnectionTrait,
{
    let entries = FieldEntry::find()
        .filter(field_entry::Column::PlayerId.eq(player_id))
        .all(db)
        .await?;

    Ok(entries.iter().map(|e| e.fields_used).sum())
}

/// Rolls the batch amount for `tiles` tiles of an item:
/// `uniform(tiles * base_amount, tiles * effective_volume)` inclusive.
fn roll_amount<R: Rng>(rng: &mut R, item: &ItemDef, tiles: i32, levels: ModLevels) -> i64 {
    let tiles = i64::from(tiles);
    let low = tiles * item.base_amount;
    let high = tiles * modifier::effective_yield_volume(item.base_volume, levels.yield_volume);
    rng.gen_range(low..=high)
}

/// Grow/rot instants for a batch started at `now` under the given levels.
fn batch_timers(
    item: &ItemDef,
    levels: ModLevels,
    now: DateTime<Utc>,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let grow = modifier::effective_grow_time(item.grow_time_secs, levels.grow_speed);
    let window = modifier::effective_harvest_window(item.harvest_window_secs, levels.harvest_window);
    let ends = now + Duration::seconds(grow);
    let dies = ends + Duration::seconds(window);
    (ends, dies)
}

/// Plants an item on `tiles` field tiles.
///
/// Preconditions, checked in order inside one transaction: the item is
/// plantable, the player's level clears the gate, the tiles fit the fresh
/// capacity (base slots plus booster bonus), and the fresh gold balance
/// covers `tiles * price`. Any failure aborts with no writes. On success
/// the batch amount is rolled, gold is deducted, and the entry is persisted
/// with `ends`/`dies` computed through the player's modification levels.
#[instrument(skip(db, catalog, boosts, rng))]
pub async fn plant<R: Rng>(
    db: &DatabaseConnection,
    catalog: &Catalog,
    player_id: &str,
    item_id: &str,
    tiles: i32,
    boosts: &ActiveBoosts,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<PlantOutcome> {
    let item = catalog.get(item_id)?;
    if !item.kind.is_plantable() {
        return Err(Error::WrongItemKind {
            id: item.id.clone(),
            expected: "plantable item",
        });
    }
    if tiles < 1 {
        return Err(Error::Config {
            message: "tile count must be at least 1".to_string(),
        });
    }

    let txn = db.begin().await?;

    let player = rewards::require_player(&txn, player_id).await?;
    if player.level < item.required_level {
        return Err(Error::InsufficientLevel {
            required: item.required_level,
            current: player.level,
        });
    }

    // Fresh capacity and funds checks; time may have passed since the
    // user-facing confirmation prompt.
    let used = used_tiles(&txn, player_id).await?;
    let capacity = player.field_slots + boosts.extra_field_slots;
    if used + tiles > capacity {
        return Err(Error::InsufficientCapacity {
            requested: tiles,
            used,
            capacity,
        });
    }

    let cost = i64::from(tiles) * item.price;
    rewards::spend_gold(&txn, player_id, cost).await?;

    let levels = modification::get_levels(&txn, player_id, item_id).await?;
    let amount = roll_amount(rng, item, tiles, levels);
    let (ends, dies) = batch_timers(item, levels, now);

    let entry = field_entry::ActiveModel {
        player_id: Set(player_id.to_string()),
        item_id: Set(item.id.clone()),
        amount: Set(amount),
        iterations: Set(item.is_multi_cycle().then_some(item.cycles)),
        fields_used: Set(tiles),
        ends: Set(ends),
        dies: Set(dies),
        robbed_fields: Set(0),
        has_rot_protection: Set(boosts.rot_protection),
        ..Default::default()
    };
    let entry = entry.insert(&txn).await?;

    txn.commit().await?;
    info!(player_id, item_id, tiles, amount, cost, "planted");

    Ok(PlantOutcome { entry, cost })
}

/// Resolves all of a player's field entries in one transaction.
///
/// Entries still growing are left alone. Harvestable entries (collectable,
/// or rotten with rot protection or the global `grace` override) either
/// renew for their next cycle (trees/animals with iterations left: new
/// amount roll, fresh timers, `robbed_fields` reset) or are collected and
/// cleared. Rotten entries without protection are cleared unrewarded.
/// Inventory credits and the xp grant land in the same transaction.
///
/// Fails with [`Error::NothingToHarvest`] when no entry changed at all.
#[instrument(skip(db, catalog, rng))]
pub async fn harvest<R: Rng>(
    db: &DatabaseConnection,
    catalog: &Catalog,
    player_id: &str,
    grace: bool,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<HarvestOutcome> {
    let txn = db.begin().await?;

    rewards::require_player(&txn, player_id).await?;

    let entries = FieldEntry::find()
        .filter(field_entry::Column::PlayerId.eq(player_id))
        .all(&txn)
        .await?;
    let levels_by_item = modification::get_all_levels(&txn, player_id).await?;

    let mut outcome = HarvestOutcome::default();
    let mut item_rewards: HashMap<String, i64> = HashMap::new();

    for entry in entries {
        let entry_state = state::field_state(now, entry.ends, entry.dies);
        if entry_state == FieldState::Growing {
            continue;
        }

        let item = catalog.get(&entry.item_id)?;

        if !state::field_is_harvestable(entry_state, entry.has_rot_protection, grace) {
            debug!(entry_id = entry.id, item_id = %item.id, "rotted away");
            outcome.rotted.push(RottedBatch {
                item_id: item.id.clone(),
                amount: entry.amount,
            });
            entry.delete(&txn).await?;
            continue;
        }

        let amount = entry.amount;
        let iterations_left = entry.iterations.unwrap_or(1);

        if iterations_left > 1 {
            // Renew: roll the next batch, restart the timers, forget robs.
            let levels = levels_by_item.get(&item.id).copied().unwrap_or_default();
            let next_amount = roll_amount(rng, item, entry.fields_used, levels);
            let (ends, dies) = batch_timers(item, levels, now);

            let mut active: field_entry::ActiveModel = entry.into();
            active.amount = Set(next_amount);
            active.iterations = Set(Some(iterations_left - 1));
            active.ends = Set(ends);
            active.dies = Set(dies);
            active.robbed_fields = Set(0);
            active.update(&txn).await?;

            outcome.renewed.push(RenewedBatch {
                item_id: item.id.clone(),
                amount,
                iterations_left: iterations_left - 1,
            });
        } else {
            entry.delete(&txn).await?;
            outcome.harvested.push(HarvestedBatch {
                item_id: item.id.clone(),
                amount,
            });
        }

        *item_rewards.entry(item.id.clone()).or_default() += amount;
        outcome.xp += item.xp * amount;
    }

    if outcome.harvested.is_empty() && outcome.renewed.is_empty() && outcome.rotted.is_empty() {
        // Nothing collectable and nothing rotted; dropping the transaction
        // rolls back nothing because nothing was written.
        return Err(Error::NothingToHarvest);
    }

    for (item_id, amount) in &item_rewards {
        rewards::apply_item_delta(&txn, player_id, item_id, *amount).await?;
    }
    if outcome.xp > 0 {
        rewards::grant_xp(&txn, player_id, outcome.xp).await?;
    }

    txn.commit().await?;
    info!(
        player_id,
        harvested = outcome.harvested.len(),
        renewed = outcome.renewed.len(),
        rotted = outcome.rotted.len(),
        xp = outcome.xp,
        "harvest resolved"
    );

    Ok(outcome)
}
