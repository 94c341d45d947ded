//! Account Discord commands - login, signup, logout and self-service edits.
//!
//! Every reply here may carry credentials or personal details, so they are
//! all ephemeral.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, RoleChoice, reply_private, require_role, session::home_command},
        core::{
            accounts::{self, ProfileUpdate, SignUpForm},
            model::Role,
        },
        errors::{Error, Result},
    };
    use std::fmt::Write;
    use tracing::info;

    const ANY_ROLE: &[Role] = &[Role::Admin, Role::Teacher, Role::Student];

    /// Logs in with a username or email and password.
    #[poise::command(slash_command)]
    pub async fn login(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Username or email"] identifier: String,
        #[description = "Password"] password: String,
    ) -> Result<()> {
        let user = {
            let mut portal = ctx.data().portal.lock().await;
            portal
                .apply(|state, _| Ok(accounts::login(state, &identifier, &password)))
                .await?
        };

        let Some(user) = user else {
            reply_private(ctx, "❌ Invalid username/email or password.").await?;
            return Ok(());
        };

        ctx.data()
            .sessions
            .sign_in(ctx.author().id.get(), &user.id)
            .await;
        info!(user_id = %user.id, discord_id = ctx.author().id.get(), "Discord session opened");
        reply_private(
            ctx,
            format!(
                "✅ Welcome, **{}**! You are logged in as {}. Start with `{}`.",
                user.full_name(),
                user.role,
                home_command(user.role)
            ),
        )
        .await
    }

    /// Registers a new teacher or student account.
    #[poise::command(slash_command)]
    #[allow(clippy::too_many_arguments)]
    pub async fn signup(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Login name"] username: String,
        #[description = "Email address"] email: String,
        #[description = "Password (at least 6 characters)"] password: String,
        #[description = "Password again"] confirm_password: String,
        #[description = "Given name"] first_name: String,
        #[description = "Family name"] last_name: String,
        #[description = "Account type"] role: RoleChoice,
    ) -> Result<()> {
        let form = SignUpForm {
            username,
            email,
            password,
            confirm_password,
            first_name,
            last_name,
            role: role.into(),
        };
        let outcome = {
            let mut portal = ctx.data().portal.lock().await;
            portal
                .apply(|state, _| accounts::sign_up(state, form))
                .await
        };

        match outcome {
            Ok(user) => {
                reply_private(
                    ctx,
                    format!(
                        "✅ Account **{}** created as {}. Log in with `/login`.",
                        user.username, user.role
                    ),
                )
                .await
            }
            Err(e) if e.is_user_facing() => reply_private(ctx, format!("❌ {e}")).await,
            Err(e) => Err(e),
        }
    }

    /// Ends your session.
    #[poise::command(slash_command)]
    pub async fn logout(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some(account_id) = ctx.data().sessions.sign_out(ctx.author().id.get()).await else {
            reply_private(ctx, "You are not logged in.").await?;
            return Ok(());
        };

        let mut portal = ctx.data().portal.lock().await;
        let is_current = portal
            .state()
            .current_user
            .as_ref()
            .is_some_and(|u| u.id == account_id);
        if is_current {
            portal
                .apply(|state, _| Ok(accounts::logout(state)))
                .await?;
        }
        drop(portal);

        reply_private(ctx, "👋 Logged out.").await
    }

    /// Shows the account you are logged in as.
    #[poise::command(slash_command)]
    pub async fn whoami(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some(account_id) = require_role(ctx, ANY_ROLE).await? else {
            return Ok(());
        };

        let mut response = String::new();
        {
            let portal = ctx.data().portal.lock().await;
            let Some(user) = portal.state().user(&account_id) else {
                return Ok(());
            };
            writeln!(&mut response, "👤 **{}** ({})", user.full_name(), user.username)?;
            writeln!(&mut response, "Role: {}", user.role)?;
            if !user.email.is_empty() {
                writeln!(&mut response, "Email: {}", user.email)?;
            }
            if let Some(student_id) = &user.student_id {
                writeln!(&mut response, "Student record: {student_id}")?;
            }
            if let Some(last_login) = user.last_login {
                writeln!(
                    &mut response,
                    "Last login: {}",
                    last_login.format("%Y-%m-%d %H:%M UTC")
                )?;
            }
        }

        reply_private(ctx, response).await
    }

    /// Changes your password.
    #[poise::command(slash_command)]
    pub async fn password(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Current password"] current: String,
        #[description = "New password"] new: String,
        #[description = "New password again"] confirm: String,
    ) -> Result<()> {
        let Some(account_id) = require_role(ctx, ANY_ROLE).await? else {
            return Ok(());
        };
        if new != confirm {
            reply_private(ctx, "❌ New passwords do not match.").await?;
            return Ok(());
        }

        let outcome = {
            let mut portal = ctx.data().portal.lock().await;
            portal
                .apply(|state, _| accounts::change_password(state, &account_id, &current, &new))
                .await
        };
        match outcome {
            Ok(()) => reply_private(ctx, "✅ Password changed.").await,
            Err(e) if e.is_user_facing() => reply_private(ctx, format!("❌ {e}")).await,
            Err(e) => Err(e),
        }
    }

    /// Updates your name or email.
    #[poise::command(slash_command)]
    pub async fn profile(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Given name"] first_name: Option<String>,
        #[description = "Family name"] last_name: Option<String>,
        #[description = "Email address"] email: Option<String>,
    ) -> Result<()> {
        let Some(account_id) = require_role(ctx, ANY_ROLE).await? else {
            return Ok(());
        };
        let update = ProfileUpdate {
            first_name,
            last_name,
            email,
        };

        let outcome = {
            let mut portal = ctx.data().portal.lock().await;
            portal
                .apply(|state, _| accounts::update_profile(state, &account_id, update))
                .await
        };
        match outcome {
            Ok(user) => {
                reply_private(
                    ctx,
                    format!("✅ Profile saved: **{}** <{}>", user.full_name(), user.email),
                )
                .await
            }
            Err(e) if e.is_user_facing() => reply_private(ctx, format!("❌ {e}")).await,
            Err(e) => Err(e),
        }
    }
}

// Re-export all commands
pub use inner::*;
