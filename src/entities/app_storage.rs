//! App storage entity - one row per storage key.
//!
//! The portal keeps its whole state as a single JSON document under one key,
//! the same way a browser app keeps a blob in local storage. The table can hold
//! more keys, but the portal only ever reads and writes its configured one.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stored key-value pair
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "app_storage")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Storage key (e.g. `"gradingSystemData"`)
    #[sea_orm(unique)]
    pub key: String,
    /// Serialized value
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// When the value was last written
    pub updated_at: DateTime,
}

/// `AppStorage` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
