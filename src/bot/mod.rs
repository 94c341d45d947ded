//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the grade portal, including
//! the role-gated command groups, autocomplete handlers, sessions and the
//! shared bot context.

/// Discord command implementations (general, auth, admin, teacher, student)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;
/// Chat sessions and role guards
pub mod session;

use crate::{
    config::seed::SeedConfig,
    core::{model::Role, portal::Portal},
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use session::SessionStore;
use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};

/// Shared data available to all bot commands.
/// This structure holds the portal, the chat sessions and the seed
/// configuration used by `/admin reset`.
pub struct BotData {
    /// The persisted portal; one command at a time mutates it
    pub portal: Mutex<Portal>,
    /// Logged-in Discord users
    pub sessions: SessionStore,
    /// Seed data for resets
    pub seed: SeedConfig,
}

impl BotData {
    /// Creates a new `BotData` instance around an opened portal.
    #[must_use]
    pub fn new(portal: Portal, seed: SeedConfig) -> Self {
        Self {
            portal: Mutex::new(portal),
            sessions: SessionStore::default(),
            seed,
        }
    }
}

/// Checks the caller's session against `allowed` roles.
///
/// Returns the caller's account id. On failure the redirect message is sent
/// as an ephemeral reply and `None` is returned.
pub async fn require_role(
    ctx: poise::Context<'_, BotData, Error>,
    allowed: &[Role],
) -> Result<Option<String>> {
    let discord_id = ctx.author().id.get();
    let account_id = ctx.data().sessions.account_id(discord_id).await;
    let checked = {
        let portal = ctx.data().portal.lock().await;
        session::authorize(portal.state(), account_id.as_deref(), allowed)
    };
    match checked {
        Ok(user) => Ok(Some(user.id)),
        Err(e) => {
            warn!(discord_id, "Rejected command: {}", e);
            reply_private(ctx, format!("🔒 {e}")).await?;
            Ok(None)
        }
    }
}

/// Sends an ephemeral reply.
pub async fn reply_private(
    ctx: poise::Context<'_, BotData, Error>,
    content: impl Into<String>,
) -> Result<()> {
    ctx.send(
        poise::CreateReply::default()
            .content(content)
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

/// Sends a CSV export as an ephemeral attachment.
pub async fn reply_csv(
    ctx: poise::Context<'_, BotData, Error>,
    content: impl Into<String>,
    file_name: String,
    csv: String,
) -> Result<()> {
    ctx.send(
        poise::CreateReply::default()
            .content(content)
            .attachment(serenity::CreateAttachment::bytes(csv.into_bytes(), file_name))
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

/// Replies with the outcome of a store operation: the success message, or the
/// error inline when it was caused by the caller's input.
pub async fn reply_outcome(
    ctx: poise::Context<'_, BotData, Error>,
    outcome: Result<String>,
) -> Result<()> {
    match outcome {
        Ok(message) => {
            ctx.say(message).await?;
            Ok(())
        }
        Err(e) if e.is_user_facing() => {
            reply_private(ctx, format!("❌ {e}")).await?;
            Ok(())
        }
        Err(e) => Err(e),
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            let message = if error.is_user_facing() {
                format!("❌ {error}")
            } else {
                "❌ Something went wrong while saving. Please try again later.".to_string()
            };
            if let Err(e) = reply_private(ctx, message).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Builds the poise framework and runs the client until it stops.
#[instrument(skip(token, data))]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::help(),
                commands::login(),
                commands::signup(),
                commands::logout(),
                commands::whoami(),
                commands::password(),
                commands::profile(),
                commands::admin(),
                commands::teacher(),
                commands::student(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;
    Ok(())
}

pub use commands::*;
