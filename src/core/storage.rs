//! Key-value persistence of the portal blob.
//!
//! The whole [`PortalState`] is serialized to camelCase JSON and stored as the
//! value of one `app_storage` row. Writes replace the row wholesale.

use crate::{
    core::model::PortalState,
    entities::{AppStorage, app_storage},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{Set, prelude::*};
use tracing::{debug, instrument};

/// Reads the raw value stored under `key`.
pub async fn read_value<C>(db: &C, key: &str) -> Result<Option<String>>
where
    C: ConnectionTrait,
{
    let row = AppStorage::find()
        .filter(app_storage::Column::Key.eq(key))
        .one(db)
        .await?;
    Ok(row.map(|r| r.value))
}

/// Inserts or replaces the value stored under `key`.
pub async fn write_value<C>(db: &C, key: &str, value: String) -> Result<()>
where
    C: ConnectionTrait,
{
    let now = Utc::now().naive_utc();
    let existing = AppStorage::find()
        .filter(app_storage::Column::Key.eq(key))
        .one(db)
        .await?;

    if let Some(row) = existing {
        let mut active_model: app_storage::ActiveModel = row.into();
        active_model.value = Set(value);
        active_model.updated_at = Set(now);
        active_model.update(db).await?;
    } else {
        let row = app_storage::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value),
            updated_at: Set(now),
            ..Default::default()
        };
        row.insert(db).await?;
    }
    Ok(())
}

/// Loads and deserializes the portal stored under `key`, if any.
///
/// Missing collections in the stored JSON come back empty.
#[instrument(skip(db))]
pub async fn load_snapshot<C>(db: &C, key: &str) -> Result<Option<PortalState>>
where
    C: ConnectionTrait,
{
    let Some(raw) = read_value(db, key).await? else {
        debug!("No stored portal");
        return Ok(None);
    };
    let state: PortalState = serde_json::from_str(&raw)?;
    debug!(
        students = state.students.len(),
        subjects = state.subjects.len(),
        users = state.users.len(),
        "Rehydrated portal"
    );
    Ok(Some(state))
}

/// Serializes the whole portal and writes it under `key`.
pub async fn save_snapshot<C>(db: &C, key: &str, state: &PortalState) -> Result<()>
where
    C: ConnectionTrait,
{
    let json = serde_json::to_string(state)?;
    let bytes = json.len();
    write_value(db, key, json).await?;
    debug!(key, bytes, "Persisted portal");
    Ok(())
}

/// Removes the row stored under `key`. Returns whether a row existed.
pub async fn clear_snapshot<C>(db: &C, key: &str) -> Result<bool>
where
    C: ConnectionTrait,
{
    let result = AppStorage::delete_many()
        .filter(app_storage::Column::Key.eq(key))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}
