//! Factory lifecycle engine - queueing production and collecting output.
//!
//! Queue entries chain back-to-back per player: a new batch starts at the
//! later of "now" and the last queued `ends`, so consecutive entries never
//! overlap and never leave gaps. Finished units wait indefinitely; there is
//! no rot in the factory.

use crate::{
    catalog::{Catalog, ItemKind},
    core::{boost::ActiveBoosts, modifier, rewards},
    entities::{QueueEntry, queue_entry},
    errors::{Error, Result},
};
use chrono::{DateTime, Duration, Utc};
use sea_orm::{DatabaseConnection, QueryOrder, Set, TransactionTrait, prelude::*};
use std::collections::BTreeMap;
use tracing::{info, instrument};

/// One product type's units taken out of the factory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectedBatch {
    /// Product collected
    pub item_id: String,
    /// Units collected (one per finished queue entry)
    pub amount: i64,
}

/// Structured result of a collect pass.
#[derive(Clone, Debug, Default)]
pub struct CollectOutcome {
    /// Finished products, aggregated per item
    pub collected: Vec<CollectedBatch>,
    /// Total experience awarded
    pub xp: i64,
}

/// Queues `units` of a product for manufacture.
///
/// Preconditions, checked in order inside one transaction: the item is a
/// product, the player's level clears the gate, the units fit the fresh
/// queue capacity (base slots plus booster bonus), and the current inventory
/// snapshot covers the recipe's raw materials for every unit. On success the
/// materials are consumed and `units` entries are inserted, chained
/// sequentially with the per-unit duration discounted by the player's
/// worker level.
#[instrument(skip(db, catalog, boosts))]
pub async fn manufacture(
    db: &DatabaseConnection,
    catalog: &Catalog,
    player_id: &str,
    item_id: &str,
    units: i32,
    boosts: &ActiveBoosts,
    now: DateTime<Utc>,
) -> Result<Vec<queue_entry::Model>> {
    let item = catalog.get(item_id)?;
    if item.kind != ItemKind::Product {
        return Err(Error::WrongItemKind {
            id: item.id.clone(),
            expected: "product",
        });
    }
    if units < 1 {
        return Err(Error::Config {
            message: "unit count must be at least 1".to_string(),
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

    // Fresh capacity check against the live queue
    let queue = QueueEntry::find()
        .filter(queue_entry::Column::PlayerId.eq(player_id))
        .order_by_asc(queue_entry::Column::Starts)
        .all(&txn)
        .await?;
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let queued = queue.len() as i32;
    let capacity = player.factory_slots + boosts.extra_factory_slots;
    if queued + units > capacity {
        return Err(Error::InsufficientCapacity {
            requested: units,
            used: queued,
            capacity,
        });
    }

    rewards::consume_materials(&txn, player_id, &item.materials, i64::from(units)).await?;

    let per_unit = Duration::seconds(modifier::effective_craft_time(
        item.grow_time_secs,
        player.worker_level,
    ));

    // Chain after the latest queued unit, or start immediately if the
    // queue is empty or already ran dry.
    let mut cursor = queue
        .iter()
        .map(|e| e.ends)
        .max()
        .map_or(now, |last| last.max(now));

    let mut created = Vec::with_capacity(units as usize);
    for _ in 0..units {
        let starts = cursor;
        cursor += per_unit;
        let entry = queue_entry::ActiveModel {
            player_id: Set(player_id.to_string()),
            item_id: Set(item.id.clone()),
            starts: Set(starts),
            ends: Set(cursor),
            ..Default::default()
        };
        created.push(entry.insert(&txn).await?);
    }

    txn.commit().await?;
    info!(player_id, item_id, units, "queued production");

    Ok(created)
}

/// Collects every finished queue entry in one transaction.
///
/// Awards one unit of product per entry plus the item's xp, deletes the
/// entries, and returns the aggregate. Fails with
/// [`Error::NothingToCollect`] when nothing has finished yet.
#[instrument(skip(db, catalog))]
pub async fn collect(
    db: &DatabaseConnection,
    catalog: &Catalog,
    player_id: &str,
    now: DateTime<Utc>,
) -> Result<CollectOutcome> {
    let txn = db.begin().await?;

    rewards::require_player(&txn, player_id).await?;

    let ready = QueueEntry::find()
        .filter(queue_entry::Column::PlayerId.eq(player_id))
        .filter(queue_entry::Column::Ends.lte(now))
        .all(&txn)
        .await?;

    if ready.is_empty() {
        return Err(Error::NothingToCollect);
    }

    let mut totals: BTreeMap<String, i64> = BTreeMap::new();
    let mut xp = 0;
    for entry in &ready {
        let item = catalog.get(&entry.item_id)?;
        *totals.entry(item.id.clone()).or_default() += 1;
        xp += item.xp;
    }

    let ids: Vec<i64> = ready.iter().map(|e| e.id).collect();
    QueueEntry::delete_many()
        .filter(queue_entry::Column::Id.is_in(ids))
        .exec(&txn)
        .await?;

    for (item_id, amount) in &totals {
        rewards::apply_item_delta(&txn, player_id, item_id, *amount).await?;
    }
    if xp > 0 {
        rewards::grant_xp(&txn, player_id, xp).await?;
    }

    txn.commit().await?;
    info!(player_id, collected = ready.len(), xp, "collected production");

    Ok(CollectOutcome {
        collected: totals
            .into_iter()
            .map(|(item_id, amount)| CollectedBatch { item_id, amount })
            .collect(),
        xp,
    })
}
