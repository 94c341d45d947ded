//! Teacher Discord commands - subjects, gradebooks and grade entry.
//!
//! Teachers only reach the subjects they own; admins may use these commands
//! on any subject.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData, RowLabel, grade_table, handlers::autocomplete, reply_csv, reply_outcome,
            reply_private, require_role, summary_line,
        },
        core::{
            assignments::{can_grade, subjects_for_teacher},
            dashboard::subject_gradebook,
            enrollment::grade_enrolled_student,
            export::{export_file_name, gradebook_csv},
            grading::format_equivalent,
            model::{Role, Subject},
        },
        errors::{Error, Result},
    };
    use std::fmt::Write;

    const TEACHING_ROLES: &[Role] = &[Role::Teacher, Role::Admin];

    const NOT_YOURS: &str = "❌ That subject is not assigned to you.";

    /// Teacher tools: your subjects, gradebooks and grade entry.
    #[poise::command(
        slash_command,
        subcommands(
            "teacher_subjects",
            "teacher_gradebook",
            "teacher_grade",
            "teacher_export"
        )
    )]
    pub async fn teacher(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Teacher commands:\n\
            `/teacher subjects` - Your subjects\n\
            `/teacher gradebook <subject>` - Class list with grades\n\
            `/teacher grade <subject> <student> [midterm] [final]` - Save scores\n\
            `/teacher export <subject>` - Gradebook as CSV";
        reply_private(ctx, help_text).await
    }

    /// Lists the subjects you teach.
    #[poise::command(slash_command, rename = "subjects")]
    pub async fn teacher_subjects(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some(account_id) = require_role(ctx, TEACHING_ROLES).await? else {
            return Ok(());
        };

        let mut response = String::from("📚 **Your Subjects**\n\n");
        {
            let portal = ctx.data().portal.lock().await;
            let state = portal.state();
            let Some(user) = state.user(&account_id) else {
                return Ok(());
            };
            let subjects: Vec<&Subject> = if user.role == Role::Admin {
                state.subjects.iter().collect()
            } else {
                subjects_for_teacher(state, user)
            };

            if subjects.is_empty() {
                response.push_str("_No subjects are assigned to you yet._");
            }
            for subject in subjects {
                let enrolled = state
                    .enrollments
                    .values()
                    .filter(|records| records.iter().any(|r| r.subject_id == subject.id))
                    .count();
                writeln!(
                    &mut response,
                    "• **{}** {} (Year {}, Section {}) - {} student{}",
                    subject.code,
                    subject.name,
                    subject.grade_level,
                    subject.section,
                    enrolled,
                    if enrolled == 1 { "" } else { "s" }
                )?;
            }
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Shows the class list and grades of a subject.
    #[poise::command(slash_command, rename = "gradebook")]
    pub async fn teacher_gradebook(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Subject"]
        #[autocomplete = "autocomplete::autocomplete_my_subject"]
        subject: String,
    ) -> Result<()> {
        let Some(account_id) = require_role(ctx, TEACHING_ROLES).await? else {
            return Ok(());
        };

        let outcome = {
            let portal = ctx.data().portal.lock().await;
            let state = portal.state();
            match state.user(&account_id) {
                Some(user) if can_grade(state, user, &subject) => {
                    subject_gradebook(state, &subject, portal.policy()).map(Some)
                }
                _ => Ok(None),
            }
        };

        let book = match outcome {
            Ok(Some(book)) => book,
            Ok(None) => return reply_private(ctx, NOT_YOURS).await,
            Err(e) => return reply_outcome(ctx, Err(e)).await,
        };

        let mut response = format!(
            "📒 **{} - {}** (Year {}, Section {})\n",
            book.subject.code, book.subject.name, book.subject.grade_level, book.subject.section
        );
        if book.rows.is_empty() {
            response.push_str("_No students are enrolled yet._");
        } else {
            writeln!(&mut response, "{}", grade_table(&book.rows, RowLabel::Student)?)?;
            response.push_str(&summary_line(&book.summary));
        }

        ctx.send(
            poise::CreateReply::default()
                .content(response)
                .ephemeral(true),
        )
        .await?;
        Ok(())
    }

    /// Saves midterm and final scores for an enrolled student.
    #[poise::command(slash_command, rename = "grade")]
    pub async fn teacher_grade(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Subject"]
        #[autocomplete = "autocomplete::autocomplete_my_subject"]
        subject: String,
        #[description = "Student"]
        #[autocomplete = "autocomplete::autocomplete_student"]
        student: String,
        #[description = "Midterm score (0-100)"] midterm: Option<f64>,
        #[description = "Final score (0-100)"]
        #[rename = "final"]
        final_score: Option<f64>,
    ) -> Result<()> {
        let Some(account_id) = require_role(ctx, TEACHING_ROLES).await? else {
            return Ok(());
        };

        let outcome = {
            let mut portal = ctx.data().portal.lock().await;
            let allowed = portal
                .state()
                .user(&account_id)
                .is_some_and(|user| can_grade(portal.state(), user, &subject));
            if allowed {
                Some(
                    portal
                        .apply(|state, policy| {
                            grade_enrolled_student(
                                state,
                                &student,
                                &subject,
                                midterm,
                                final_score,
                                policy,
                            )
                        })
                        .await,
                )
            } else {
                None
            }
        };

        let Some(outcome) = outcome else {
            return reply_private(ctx, NOT_YOURS).await;
        };

        let message = outcome.map(|record| {
            let eq = |v: Option<f64>| v.map_or_else(|| "-".to_string(), format_equivalent);
            format!(
                "✅ Saved **{}** for {student}: midterm {} (eq {}), final {} (eq {}), rating {} - **{}**",
                record.subject_name,
                record.midterm.map_or_else(|| "-".to_string(), |v| v.to_string()),
                eq(record.midterm_eq),
                record.final_score.map_or_else(|| "-".to_string(), |v| v.to_string()),
                eq(record.final_eq),
                record.rating.map_or_else(|| "-".to_string(), |v| format!("{v:.2}")),
                record.status
            )
        });
        reply_outcome(ctx, message).await
    }

    /// Exports a subject's gradebook as CSV.
    #[poise::command(slash_command, rename = "export")]
    pub async fn teacher_export(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Subject"]
        #[autocomplete = "autocomplete::autocomplete_my_subject"]
        subject: String,
    ) -> Result<()> {
        let Some(account_id) = require_role(ctx, TEACHING_ROLES).await? else {
            return Ok(());
        };

        let outcome = {
            let portal = ctx.data().portal.lock().await;
            let state = portal.state();
            match state.user(&account_id) {
                Some(user) if can_grade(state, user, &subject) => {
                    subject_gradebook(state, &subject, portal.policy()).map(Some)
                }
                _ => Ok(None),
            }
        };

        match outcome {
            Ok(Some(book)) => {
                let file_name = export_file_name("gradebook", &book.subject.code);
                reply_csv(
                    ctx,
                    format!("📎 Gradebook for **{}**", book.subject.code),
                    file_name,
                    gradebook_csv(&book),
                )
                .await
            }
            Ok(None) => reply_private(ctx, NOT_YOURS).await,
            Err(e) => reply_outcome(ctx, Err(e)).await,
        }
    }
}

// Re-export all commands
pub use inner::*;
