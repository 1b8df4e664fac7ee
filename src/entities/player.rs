//! Player entity - Represents one Discord user's farm account.
//!
//! Holds the wallet (gold/gems), progression (xp/level), the base capacity
//! allotments for fields and the factory queue, and the worker level that
//! discounts craft durations. Capacity in use is never stored here; it is
//! derived from the live field/queue rows at check time.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Player database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "players")]
pub struct Model {
    /// Discord user ID (the bot's sole identity source)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Gold balance
    pub gold: i64,
    /// Gem balance (premium currency, spent on modifications)
    pub gems: i64,
    /// Accumulated experience points
    pub xp: i64,
    /// Current player level, gates catalog items
    pub level: i32,
    /// Base number of field tiles (before booster bonus)
    pub field_slots: i32,
    /// Base number of factory queue slots (before booster bonus)
    pub factory_slots: i32,
    /// Worker upgrade level 0-10, each level shaves 5% off craft time
    pub worker_level: i32,
    /// When the account was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Player and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One player has many planted field entries
    #[sea_orm(has_many = "super::field_entry::Entity")]
    FieldEntries,
    /// One player has many factory queue entries
    #[sea_orm(has_many = "super::queue_entry::Entity")]
    QueueEntries,
    /// One player has many per-item modification rows
    #[sea_orm(has_many = "super::modification::Entity")]
    Modifications,
    /// One player has many inventory rows
    #[sea_orm(has_many = "super::inventory::Entity")]
    Inventory,
}

impl Related<super::field_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FieldEntries.def()
    }
}

impl Related<super::queue_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QueueEntries.def()
    }
}

impl Related<super::modification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Modifications.def()
    }
}

impl Related<super::inventory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inventory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
