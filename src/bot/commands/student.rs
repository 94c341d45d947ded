//! Student Discord commands - report card, profile and CSV export.
//!
//! A student account only ever sees the record it is linked to.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData, RowLabel, grade_table, reply_csv, reply_private, require_role, summary_line,
        },
        core::{
            dashboard::{ReportCard, report_card},
            export::{export_file_name, report_card_csv},
            model::Role,
        },
        errors::{Error, Result},
    };
    use std::fmt::Write;

    const STUDENT_ONLY: &[Role] = &[Role::Student];

    const NO_RECORD: &str = "❌ Your account is not linked to a student record. Ask an admin to link it.";

    /// Looks up the report card of the caller's linked student record.
    async fn my_report_card(
        ctx: poise::Context<'_, BotData, Error>,
        account_id: &str,
    ) -> Result<Option<ReportCard>> {
        let portal = ctx.data().portal.lock().await;
        let state = portal.state();
        let Some(student_id) = state.user(account_id).and_then(|u| u.student_id.clone()) else {
            return Ok(None);
        };
        match report_card(state, &student_id, portal.policy()) {
            Ok(card) => Ok(Some(card)),
            Err(Error::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Student tools: grades, profile and export.
    #[poise::command(
        slash_command,
        subcommands("student_grades", "student_profile", "student_export")
    )]
    pub async fn student(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Student commands:\n\
            `/student grades` - Your report card\n\
            `/student profile` - Your student record\n\
            `/student export` - Report card as CSV";
        reply_private(ctx, help_text).await
    }

    /// Shows your grades and general average.
    #[poise::command(slash_command, rename = "grades")]
    pub async fn student_grades(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some(account_id) = require_role(ctx, STUDENT_ONLY).await? else {
            return Ok(());
        };
        let Some(card) = my_report_card(ctx, &account_id).await? else {
            return reply_private(ctx, NO_RECORD).await;
        };

        let mut response = format!(
            "🎓 **Report Card - {}** ({})\n{} {} - Section {}\n",
            card.student.list_name(),
            card.student.id,
            card.student.course,
            card.student.year_level,
            card.student.section
        );
        if card.rows.is_empty() {
            response.push_str("_You are not enrolled in any subject yet._");
        } else {
            writeln!(&mut response, "{}", grade_table(&card.rows, RowLabel::Subject)?)?;
            let average = card
                .summary
                .average_rating
                .map_or_else(|| "n/a".to_string(), |a| format!("{a:.2}"));
            writeln!(&mut response, "**General average:** {average}")?;
            response.push_str(&summary_line(&card.summary));
        }

        reply_private(ctx, response).await
    }

    /// Shows your student record.
    #[poise::command(slash_command, rename = "profile")]
    pub async fn student_profile(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some(account_id) = require_role(ctx, STUDENT_ONLY).await? else {
            return Ok(());
        };
        let Some(card) = my_report_card(ctx, &account_id).await? else {
            return reply_private(ctx, NO_RECORD).await;
        };
        let s = &card.student;

        let mut response = format!("🪪 **{}** ({})\n", s.full_name(), s.id);
        writeln!(&mut response, "Course: {} - Year {} - Section {}", s.course, s.year_level, s.section)?;
        writeln!(&mut response, "Status: {}", s.status)?;
        let optional = [
            ("Email", &s.email),
            ("Contact", &s.contact_number),
            ("Address", &s.address),
            ("Guardian", &s.guardian_name),
            ("Guardian contact", &s.guardian_contact),
        ];
        for (label, value) in optional {
            if let Some(value) = value {
                writeln!(&mut response, "{label}: {value}")?;
            }
        }

        reply_private(ctx, response).await
    }

    /// Exports your report card as CSV.
    #[poise::command(slash_command, rename = "export")]
    pub async fn student_export(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some(account_id) = require_role(ctx, STUDENT_ONLY).await? else {
            return Ok(());
        };
        let Some(card) = my_report_card(ctx, &account_id).await? else {
            return reply_private(ctx, NO_RECORD).await;
        };

        reply_csv(
            ctx,
            "📎 Your report card",
            export_file_name("report_card", &card.student.id),
            report_card_csv(&card),
        )
        .await
    }
}

// Re-export all commands
pub use inner::*;
