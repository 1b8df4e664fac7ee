//! Cooldown entity - Key-value TTL store for action throttling.
//!
//! Used to rate-limit research purchases and rob attempts. Keys are
//! caller-defined (e.g. `"steal:<player_id>"`); a key whose `expires_at`
//! lies in the past counts as absent.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Cooldown database model - stores per-key expiry instants
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cooldowns")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Throttle key (e.g. `"steal:1234"`)
    pub key: String,
    /// Instant the throttle lifts
    pub expires_at: DateTimeUtc,
}

/// `Cooldown` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
