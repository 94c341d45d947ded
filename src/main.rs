#![allow(clippy::result_large_err)]

use dotenvy::dotenv;
use grade_portal::{
    bot::{self, BotData},
    config::{
        database::{create_connection, create_tables},
        settings::load_default_settings,
    },
    core::portal::Portal,
    errors::{Error, Result},
};
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars may also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load portal settings (storage key, grading policy, seed data)
    let settings = load_default_settings()
        .inspect_err(|e| error!("Critical error loading settings: {}", e))?;
    info!(
        storage_key = %settings.storage.key,
        scale = ?settings.grading.scale,
        "Settings loaded."
    );

    // 4. Initialize database
    let db = create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Open the portal, seeding it on first run
    let portal = Portal::open(db, &settings)
        .await
        .inspect(|p| {
            info!(
                users = p.state().users.len(),
                students = p.state().students.len(),
                subjects = p.state().subjects.len(),
                "Portal opened."
            );
        })
        .inspect_err(|e| error!("Failed to open portal: {}", e))?;

    // 6. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, BotData::new(portal, settings.seed)).await?;

    Ok(())
}
