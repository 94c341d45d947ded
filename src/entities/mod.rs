//! Entity module - SeaORM entity definitions for the database.
//! The portal persists through a single key-value table.

pub mod app_storage;

pub use app_storage::{Column as AppStorageColumn, Entity as AppStorage, Model as AppStorageModel};
