/// Database configuration and connection management
pub mod database;

/// Seed data configuration from the `[seed]` table
pub mod seed;

/// Application settings loading from config.toml
pub mod settings;
