//! Database configuration module for `Farmhand`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary tables
//! based on the entity definitions. The module uses `SeaORM`'s `Schema::create_table_from_entity`
//! method to automatically generate SQL statements from the entity models, ensuring that the
//! database schema matches the Rust struct definitions without requiring manual SQL.

use crate::entities::{Cooldown, FieldEntry, Inventory, Modification, Player, QueueEntry};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/farmhand.sqlite".to_string())
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL` environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is set.
/// This function handles connection errors and provides a clean interface for database access
/// throughout the application.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url())
        .await
        .map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation from entity definitions.
///
/// This function uses the `DeriveEntityModel` macros to automatically generate proper SQL
/// statements for table creation, ensuring the database schema matches the Rust struct definitions.
/// It creates tables for players, field entries, queue entries, modifications, inventory,
/// and cooldowns.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    // Use SeaORM's proper table creation using Schema::create_table_from_entity
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let player_table = schema.create_table_from_entity(Player);
    let field_entry_table = schema.create_table_from_entity(FieldEntry);
    let queue_entry_table = schema.create_table_from_entity(QueueEntry);
    let modification_table = schema.create_table_from_entity(Modification);
    let inventory_table = schema.create_table_from_entity(Inventory);
    let cooldown_table = schema.create_table_from_entity(Cooldown);

    db.execute(builder.build(&player_table)).await?;
    db.execute(builder.build(&field_entry_table)).await?;
    db.execute(builder.build(&queue_entry_table)).await?;
    db.execute(builder.build(&modification_table)).await?;
    db.execute(builder.build(&inventory_table)).await?;
    db.execute(builder.build(&cooldown_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        field_entry::Model as FieldEntryModel, player::Model as PlayerModel,
        queue_entry::Model as QueueEntryModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<PlayerModel> = Player::find().limit(1).all(&db).await?;
        let _: Vec<FieldEntryModel> = FieldEntry::find().limit(1).all(&db).await?;
        let _: Vec<QueueEntryModel> = QueueEntry::find().limit(1).all(&db).await?;
        let _ = Modification::find().limit(1).all(&db).await?;
        let _ = Inventory::find().limit(1).all(&db).await?;
        let _ = Cooldown::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_connection_in_memory() -> Result<()> {
        // Use in-memory database for testing to avoid touching an on-disk file
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        let _: Vec<PlayerModel> = Player::find().limit(1).all(&db).await?;
        Ok(())
    }
}
