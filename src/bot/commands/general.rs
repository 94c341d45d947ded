//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't touch the portal and
//! provide basic bot functionality and user assistance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**Grade Portal Help**\n\
        Log in first; each command group is only open to its role.\n\n\
        **Account**\n\
        • `/login <username or email> <password>` - Opens your session.\n\
        • `/signup ...` - Registers a teacher or student account.\n\
        • `/logout`, `/whoami`, `/password`, `/profile`\n\n\
        **Admin**\n\
        • `/admin overview` - Counts and pass rate.\n\
        • `/admin student-add|student-edit|student-status|student-delete|students`\n\
        • `/admin subject-add|subject-edit|subject-delete|subjects`\n\
        • `/admin enroll|unenroll|assign|unassign`\n\
        • `/admin users|user-role|user-delete|reset-password`\n\
        • `/admin integrity|export-students|reset`\n\n\
        **Teacher**\n\
        • `/teacher subjects` - Your subjects.\n\
        • `/teacher gradebook <subject>` - Class list with grades.\n\
        • `/teacher grade <subject> <student> [midterm] [final]` - Saves scores.\n\
        • `/teacher export <subject>` - Gradebook as CSV.\n\n\
        **Student**\n\
        • `/student grades` - Your report card.\n\
        • `/student profile` - Your student record.\n\
        • `/student export` - Report card as CSV.\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
