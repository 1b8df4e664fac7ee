//! Queue entry entity - One unit of factory production.
//!
//! Entries form a per-player FIFO ordered by `starts`: a newly queued batch
//! chains after the latest existing `ends` (or "now" if the queue is empty),
//! so consecutive entries never overlap and never leave gaps. There is no
//! rot concept; a finished unit waits indefinitely for collection.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Queue entry database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "queue_entries")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning player's Discord user ID
    pub player_id: String,
    /// Catalog product this entry manufactures
    pub item_id: String,
    /// When production of this unit begins
    pub starts: DateTimeUtc,
    /// When this unit is ready for collection
    pub ends: DateTimeUtc,
}

/// Defines relationships between QueueEntry and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each queue entry belongs to one player
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
