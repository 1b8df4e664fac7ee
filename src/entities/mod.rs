//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod cooldown;
pub mod field_entry;
pub mod inventory;
pub mod modification;
pub mod player;
pub mod queue_entry;

// Re-export specific types to avoid conflicts
pub use cooldown::{Column as CooldownColumn, Entity as Cooldown, Model as CooldownModel};
pub use field_entry::{Column as FieldEntryColumn, Entity as FieldEntry, Model as FieldEntryModel};
pub use inventory::{Column as InventoryColumn, Entity as Inventory, Model as InventoryModel};
pub use modification::{
    Column as ModificationColumn, Entity as Modification, Model as ModificationModel,
};
pub use player::{Column as PlayerColumn, Entity as Player, Model as PlayerModel};
pub use queue_entry::{Column as QueueEntryColumn, Entity as QueueEntry, Model as QueueEntryModel};
