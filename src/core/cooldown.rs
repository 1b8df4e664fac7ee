//! Cooldown store - key-value throttling with explicit expiry instants.
//!
//! Used by the command layer to rate-limit research purchases and rob
//! attempts. Like everything else in the core, "now" is a parameter, so
//! tests can step time without sleeping. Expired rows are overwritten in
//! place rather than garbage-collected.

use crate::{
    entities::{Cooldown, cooldown},
    errors::{Error, Result},
};
use chrono::{DateTime, Duration, Utc};
use sea_orm::{DatabaseConnection, Set, TransactionTrait, prelude::*};
use tracing::debug;

/// Seconds left on a cooldown key, or `None` when the key is absent or
/// already expired.
pub async fn remaining(
    db: &DatabaseConnection,
    key: &str,
    now: DateTime<Utc>,
) -> Result<Option<i64>> {
    let row = Cooldown::find()
        .filter(cooldown::Column::Key.eq(key))
        .one(db)
        .await?;

    Ok(row
        .map(|r| (r.expires_at - now).num_seconds())
        .filter(|secs| *secs > 0))
}

/// Atomically checks a key and stamps a new expiry.
///
/// Fails with [`Error::OnCooldown`] (carrying the seconds left) when the key
/// is still active; otherwise upserts `expires_at = now + ttl_secs` in the
/// same transaction so two racing commands cannot both pass the check.
pub async fn check_and_set(
    db: &DatabaseConnection,
    key: &str,
    ttl_secs: i64,
    now: DateTime<Utc>,
) -> Result<()> {
    let txn = db.begin().await?;

    let existing = Cooldown::find()
        .filter(cooldown::Column::Key.eq(key))
        .one(&txn)
        .await?;

    let expires_at = now + Duration::seconds(ttl_secs);

    match existing {
        Some(row) => {
            let left = (row.expires_at - now).num_seconds();
            if left > 0 {
                return Err(Error::OnCooldown {
                    remaining_secs: left,
                });
            }
            let mut active: cooldown::ActiveModel = row.into();
            active.expires_at = Set(expires_at);
            active.update(&txn).await?;
        }
        None => {
            let row = cooldown::ActiveModel {
                key: Set(key.to_string()),
                expires_at: Set(expires_at),
                ..Default::default()
            };
            row.insert(&txn).await?;
        }
    }

    txn.commit().await?;
    debug!(key, ttl_secs, "cooldown armed");
    Ok(())
}
