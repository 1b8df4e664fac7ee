//! Unified error types for the game core.
//!
//! Every fallible operation in the crate returns [`Result`]. The variants
//! fall into four families: validation errors (wrong item type, level gate,
//! unknown ids), resource shortfalls (always carrying the amounts so the
//! caller can render the gap), benign "nothing ready" states, and storage
//! errors propagated from SeaORM. Shortfall and nothing-ready variants never
//! leave partial writes behind; the enclosing transaction rolls back.

use thiserror::Error;

/// All errors produced by the game core.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration problem (bad catalog file, invalid item definition).
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// The requested item id does not exist in the catalog.
    #[error("Unknown item: {id}")]
    ItemNotFound {
        /// Item id that failed the lookup
        id: String,
    },

    /// The item exists but is the wrong kind for the operation
    /// (e.g. trying to plant a factory product).
    #[error("Item {id} cannot be used here, expected a {expected}")]
    WrongItemKind {
        /// Item id that was rejected
        id: String,
        /// Kind the operation required ("plantable", "product")
        expected: &'static str,
    },

    /// A player tried to rob their own fields.
    #[error("You cannot steal from your own fields")]
    SelfRob,

    /// No player row exists for the given id.
    #[error("Unknown player: {id}")]
    PlayerNotFound {
        /// Player id that failed the lookup
        id: String,
    },

    /// The player has not reached the item's unlock level yet.
    #[error("Requires level {required}, player is level {current}")]
    InsufficientLevel {
        /// Level the item unlocks at
        required: i32,
        /// Player's current level
        current: i32,
    },

    /// Not enough gold to cover the cost.
    #[error("Not enough gold: need {required}, have {available}")]
    InsufficientGold {
        /// Gold the operation costs
        required: i64,
        /// Gold the player actually has
        available: i64,
    },

    /// Not enough gems to cover the cost.
    #[error("Not enough gems: need {required}, have {available}")]
    InsufficientGems {
        /// Gems the operation costs
        required: i64,
        /// Gems the player actually has
        available: i64,
    },

    /// Not enough raw materials in the inventory.
    #[error("Not enough {item_id}: need {required}, have {available}")]
    InsufficientMaterials {
        /// Material item id that ran short
        item_id: String,
        /// Units the operation needs
        required: i64,
        /// Units currently in the inventory
        available: i64,
    },

    /// The requested tiles/slots would exceed the player's capacity.
    #[error("Not enough room: requested {requested}, {used} of {capacity} in use")]
    InsufficientCapacity {
        /// Tiles or slots requested
        requested: i32,
        /// Tiles or slots already occupied
        used: i32,
        /// Total allotment including booster bonus
        capacity: i32,
    },

    /// No field entry is collectable (everything still growing, or no fields).
    #[error("Nothing is ready to harvest")]
    NothingToHarvest,

    /// No queue entry has finished producing.
    #[error("Nothing is ready to collect")]
    NothingToCollect,

    /// The target has no stealable field tiles.
    #[error("Nothing to steal from this player")]
    NothingToSteal,

    /// The rob attempt was foiled before anything was taken.
    #[error("Caught in the act - ran away empty-handed")]
    Caught,

    /// A modification axis is already at its maximum level.
    #[error("Modification for {item_id} is already at the maximum level")]
    MaxLevel {
        /// Item whose upgrade was rejected
        item_id: String,
    },

    /// The action is throttled by an active cooldown.
    #[error("On cooldown for another {remaining_secs}s")]
    OnCooldown {
        /// Seconds until the cooldown expires
        remaining_secs: i64,
    },

    /// Unexpected storage error; the surrounding transaction rolls back.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
