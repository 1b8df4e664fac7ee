//! Field entry entity - A planted batch of crops, trees, or animals.
//!
//! The row stores only timestamps, never a state column: whether the batch
//! is growing, collectable, or rotten is always recomputed from `ends` and
//! `dies` against the caller's clock (see [`crate::core::state`]). The
//! invariant `ends <= dies` holds after creation and after every
//! multi-cycle renewal.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Field entry database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "field_entries")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning player's Discord user ID
    pub player_id: String,
    /// Catalog item this batch grows
    pub item_id: String,
    /// Units in the current batch, rolled at creation and at each renewal
    pub amount: i64,
    /// Growth cycles left for trees/animals; None for single-harvest crops
    pub iterations: Option<i32>,
    /// Field tiles this batch occupies
    pub fields_used: i32,
    /// When the batch turns collectable (growing ends)
    pub ends: DateTimeUtc,
    /// When the batch rots (collect window closes)
    pub dies: DateTimeUtc,
    /// Tiles already stolen from this cycle, reset to 0 on renewal
    pub robbed_fields: i32,
    /// Rot protection booster snapshot taken at planting time,
    /// deliberately not re-evaluated afterwards
    pub has_rot_protection: bool,
}

/// Defines relationships between FieldEntry and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each field entry belongs to one player
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
