//! Modification entity - Permanent per-(player, item) upgrade levels.
//!
//! Three independent axes, each 0-10: `grow_speed`, `harvest_window`, and
//! `yield_volume`. A row is created on the first purchase and only ever
//! incremented; there is no downgrade or deletion path.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Modification database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "modifications")]
pub struct Model {
    /// Unique identifier for the row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning player's Discord user ID
    pub player_id: String,
    /// Catalog item these levels apply to
    pub item_id: String,
    /// Grow speed axis, each level shaves 5% off grow time
    pub grow_speed: i32,
    /// Harvest window axis, each level adds 10% to the collect window
    pub harvest_window: i32,
    /// Yield volume axis, each level adds 10% to the roll ceiling
    pub yield_volume: i32,
}

/// Defines relationships between Modification and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each modification row belongs to one player
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
