//! Reward and inventory application - shared collaborator for all deltas.
//!
//! The lifecycle engine decides *what* a player earned or must pay; this
//! module applies it. Every function is generic over
//! [`sea_orm::ConnectionTrait`] so callers compose them inside their own
//! transaction - a harvest's inventory credits, xp grant, and entry deletes
//! all commit or roll back together.

use crate::{
    catalog::Material,
    entities::{Inventory, Player, inventory, player},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, Set, prelude::*, sea_query::Expr};
use tracing::debug;

/// Applies a signed delta to a player's stock of one item, upserting the
/// inventory row. A negative delta that would push the stock below zero
/// fails with [`Error::InsufficientMaterials`] carrying the shortfall.
///
/// Returns the resulting stock.
pub async fn apply_item_delta<C>(db: &C, player_id: &str, item_id: &str, delta: i64) -> Result<i64>
where
    C: ConnectionTrait,
{
    let existing = Inventory::find()
        .filter(inventory::Column::PlayerId.eq(player_id))
        .filter(inventory::Column::ItemId.eq(item_id))
        .one(db)
        .await?;

    match existing {
        Some(row) => {
            let new_amount = row.amount + delta;
            if new_amount < 0 {
                return Err(Error::InsufficientMaterials {
                    item_id: item_id.to_string(),
                    required: -delta,
                    available: row.amount,
                });
            }
            let mut active: inventory::ActiveModel = row.into();
            active.amount = Set(new_amount);
            active.update(db).await?;
            debug!(player_id, item_id, new_amount, "updated inventory");
            Ok(new_amount)
        }
        None => {
            if delta < 0 {
                return Err(Error::InsufficientMaterials {
                    item_id: item_id.to_string(),
                    required: -delta,
                    available: 0,
                });
            }
            let row = inventory::ActiveModel {
                player_id: Set(player_id.to_string()),
                item_id: Set(item_id.to_string()),
                amount: Set(delta),
                ..Default::default()
            };
            row.insert(db).await?;
            debug!(player_id, item_id, amount = delta, "created inventory row");
            Ok(delta)
        }
    }
}

/// Adds gold to a player's wallet with a single atomic column update
/// (`gold = gold + delta`), avoiding read-modify-write races.
pub async fn grant_gold<C>(db: &C, player_id: &str, delta: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    require_player(db, player_id).await?;

    Player::update_many()
        .col_expr(
            player::Column::Gold,
            Expr::col(player::Column::Gold).add(delta),
        )
        .filter(player::Column::Id.eq(player_id))
        .exec(db)
        .await?;
    Ok(())
}

/// Adds experience points with a single atomic column update.
pub async fn grant_xp<C>(db: &C, player_id: &str, delta: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    require_player(db, player_id).await?;

    Player::update_many()
        .col_expr(
            player::Column::Xp,
            Expr::col(player::Column::Xp).add(delta),
        )
        .filter(player::Column::Id.eq(player_id))
        .exec(db)
        .await?;
    Ok(())
}

/// Deducts gold after a freshness check inside the caller's transaction.
/// Fails with [`Error::InsufficientGold`] carrying the shortfall.
pub async fn spend_gold<C>(db: &C, player_id: &str, cost: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let current = require_player(db, player_id).await?;
    if current.gold < cost {
        return Err(Error::InsufficientGold {
            required: cost,
            available: current.gold,
        });
    }
    grant_gold(db, player_id, -cost).await
}

/// Deducts gems after a freshness check inside the caller's transaction.
/// Fails with [`Error::InsufficientGems`] carrying the shortfall.
pub async fn spend_gems<C>(db: &C, player_id: &str, cost: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let current = require_player(db, player_id).await?;
    if current.gems < cost {
        return Err(Error::InsufficientGems {
            required: cost,
            available: current.gems,
        });
    }

    Player::update_many()
        .col_expr(
            player::Column::Gems,
            Expr::col(player::Column::Gems).sub(cost),
        )
        .filter(player::Column::Id.eq(player_id))
        .exec(db)
        .await?;
    Ok(())
}

/// Consumes a recipe's raw materials for `units` manufactured units.
///
/// Every decrement runs against the current inventory snapshot; the first
/// shortfall aborts with [`Error::InsufficientMaterials`] and the caller's
/// transaction rolls the earlier decrements back.
pub async fn consume_materials<C>(
    db: &C,
    player_id: &str,
    materials: &[Material],
    units: i64,
) -> Result<()>
where
    C: ConnectionTrait,
{
    for material in materials {
        let required = material.amount * units;
        apply_item_delta(db, player_id, &material.item_id, -required).await?;
    }
    Ok(())
}

/// Fetches a player row or fails with [`Error::PlayerNotFound`].
pub async fn require_player<C>(db: &C, player_id: &str) -> Result<player::Model>
where
    C: ConnectionTrait,
{
    Player::find_by_id(player_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::PlayerNotFound {
            id: player_id.to_string(),
        })
}
