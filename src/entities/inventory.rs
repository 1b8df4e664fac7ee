//! Inventory entity - Per-(player, item) stock counts.
//!
//! One row per item a player owns; `amount` never goes negative. Rows are
//! upserted with deltas by [`crate::core::rewards`] so harvest payouts and
//! material consumption stay atomic within the caller's transaction.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Inventory database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory")]
pub struct Model {
    /// Unique identifier for the row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning player's Discord user ID
    pub player_id: String,
    /// Catalog item stored
    pub item_id: String,
    /// Units held, always >= 0
    pub amount: i64,
}

/// Defines relationships between Inventory and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each inventory row belongs to one player
    #[sea_orm(
        belongs_to = "super::player::Entity",
        from = "Column::PlayerId",
        to = "super::player::Column::Id"
    )]
    Player,
}

impl Related<super::player::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Player.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
