//! Admin Discord commands - student records, subjects, enrollment, accounts
//! and portal maintenance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData, RoleChoice, StatusChoice, handlers::autocomplete, reply_csv, reply_outcome,
            reply_private, require_role,
        },
        core::{
            accounts::{self, resolve_user, users_with_role},
            assignments::{assign_subject, unassign_subject},
            dashboard::admin_overview,
            enrollment::{dangling_references, enroll_student, unenroll_student},
            export::{export_file_name, students_csv},
            model::{AccountStatus, PortalState, Role},
            students::{
                NewStudent, StudentFilter, StudentUpdate, add_student, delete_student,
                search_students, set_student_status, update_student,
            },
            subjects::{
                NewSubject, SubjectUpdate, add_subject, delete_subject, list_subjects,
                update_subject,
            },
        },
        errors::{Error, Result},
    };
    use std::fmt::Write;
    use tracing::warn;

    const ADMIN_ONLY: &[Role] = &[Role::Admin];

    /// Longest list shown inline before pointing at the CSV export.
    const LIST_LIMIT: usize = 40;

    /// Account id for an id, username or email typed in place of a suggestion.
    fn account_id(state: &PortalState, key: &str) -> Result<String> {
        resolve_user(state, key)
            .map(|u| u.id.clone())
            .ok_or_else(|| Error::not_found("User", key.trim()))
    }

    /// Admin tools: records, subjects, enrollment, accounts and maintenance.
    #[poise::command(
        slash_command,
        subcommands(
            "admin_overview_cmd",
            "admin_students",
            "admin_student_add",
            "admin_student_edit",
            "admin_student_status",
            "admin_student_delete",
            "admin_subjects",
            "admin_subject_add",
            "admin_subject_edit",
            "admin_subject_delete",
            "admin_enroll",
            "admin_unenroll",
            "admin_assign",
            "admin_unassign",
            "admin_users",
            "admin_user_role",
            "admin_user_delete",
            "admin_reset_password",
            "admin_integrity",
            "admin_export_students",
            "admin_reset"
        )
    )]
    pub async fn admin(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Admin commands:\n\
            `/admin overview` - Portal statistics\n\
            `/admin students` `student-add` `student-edit` `student-status` `student-delete`\n\
            `/admin subjects` `subject-add` `subject-edit` `subject-delete`\n\
            `/admin enroll` `unenroll` `assign` `unassign`\n\
            `/admin users` `user-role` `user-delete` `reset-password`\n\
            `/admin integrity` - Find broken references\n\
            `/admin export-students` - Student list as CSV\n\
            `/admin reset` - Restore seed data";
        reply_private(ctx, help_text).await
    }

    /// Shows portal statistics.
    #[poise::command(slash_command, rename = "overview")]
    pub async fn admin_overview_cmd(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        if require_role(ctx, ADMIN_ONLY).await?.is_none() {
            return Ok(());
        }

        let overview = {
            let portal = ctx.data().portal.lock().await;
            admin_overview(portal.state(), portal.policy())
        };

        let mut response = String::from("📊 **Portal Overview**\n\n");
        writeln!(
            &mut response,
            "Students: **{}** ({} active)",
            overview.total_students, overview.active_students
        )?;
        writeln!(&mut response, "Subjects: **{}**", overview.total_subjects)?;
        writeln!(
            &mut response,
            "Accounts: {} admin, {} teacher, {} student",
            overview.admins, overview.teachers, overview.student_accounts
        )?;
        writeln!(
            &mut response,
            "Graded records: **{}** ({} passed, {} failed)",
            overview.graded_records, overview.passed, overview.failed
        )?;
        if let Some(rate) = overview.pass_rate {
            writeln!(&mut response, "Pass rate: **{rate:.1}%**")?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Lists students, optionally filtered.
    #[poise::command(slash_command, rename = "students")]
    pub async fn admin_students(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Search id, name or username"] query: Option<String>,
        #[description = "Course"] course: Option<String>,
        #[description = "Year level"] year_level: Option<u8>,
        #[description = "Section"] section: Option<String>,
        #[description = "Status"] status: Option<StatusChoice>,
    ) -> Result<()> {
        if require_role(ctx, ADMIN_ONLY).await?.is_none() {
            return Ok(());
        }
        let filter = StudentFilter {
            query,
            course,
            year_level,
            section,
            status: status.map(AccountStatus::from),
        };

        let mut response = String::from("🧑‍🎓 **Students**\n\n");
        {
            let portal = ctx.data().portal.lock().await;
            let found = search_students(portal.state(), &filter);
            if found.is_empty() {
                response.push_str("_No students match._");
            }
            for student in found.iter().take(LIST_LIMIT) {
                writeln!(
                    &mut response,
                    "• `{}` **{}** - {} {}-{} ({}){}",
                    student.id,
                    student.list_name(),
                    student.course,
                    student.year_level,
                    student.section,
                    student.status,
                    student
                        .username
                        .as_deref()
                        .map(|u| format!(" @{u}"))
                        .unwrap_or_default()
                )?;
            }
            if found.len() > LIST_LIMIT {
                writeln!(
                    &mut response,
                    "_...and {} more. Use `/admin export-students` for the full list._",
                    found.len() - LIST_LIMIT
                )?;
            }
        }

        reply_private(ctx, response).await
    }

    /// Adds a student record, optionally with a login account.
    #[poise::command(slash_command, rename = "student-add")]
    #[allow(clippy::too_many_arguments)]
    pub async fn admin_student_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Given name"] first_name: String,
        #[description = "Family name"] last_name: String,
        #[description = "Course, e.g. BSIT"] course: String,
        #[description = "Year level (1-6)"] year_level: u8,
        #[description = "Section"] section: String,
        #[description = "Middle name"] middle_name: Option<String>,
        #[description = "Email address"] email: Option<String>,
        #[description = "Phone number"] contact_number: Option<String>,
        #[description = "Home address"] address: Option<String>,
        #[description = "Guardian's name"] guardian_name: Option<String>,
        #[description = "Guardian's phone number"] guardian_contact: Option<String>,
        #[description = "Username for a student login"] username: Option<String>,
        #[description = "Password for the student login"] password: Option<String>,
    ) -> Result<()> {
        if require_role(ctx, ADMIN_ONLY).await?.is_none() {
            return Ok(());
        }
        let form = NewStudent {
            first_name,
            middle_name,
            last_name,
            course,
            year_level,
            section,
            contact_number,
            email,
            address,
            guardian_name,
            guardian_contact,
            username,
            password,
        };

        let outcome = {
            let mut portal = ctx.data().portal.lock().await;
            portal.apply(|state, _| add_student(state, form)).await
        };
        let message = outcome.map(|student| {
            let login = student
                .username
                .as_deref()
                .map(|u| format!(" with login `{u}`"))
                .unwrap_or_default();
            format!("✅ Added **{}** as `{}`{login}.", student.full_name(), student.id)
        });
        reply_outcome(ctx, message).await
    }

    /// Edits a student record. Empty text clears an optional field.
    #[poise::command(slash_command, rename = "student-edit")]
    #[allow(clippy::too_many_arguments)]
    pub async fn admin_student_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Student"]
        #[autocomplete = "autocomplete::autocomplete_student"]
        student: String,
        #[description = "Given name"] first_name: Option<String>,
        #[description = "Middle name"] middle_name: Option<String>,
        #[description = "Family name"] last_name: Option<String>,
        #[description = "Course"] course: Option<String>,
        #[description = "Year level (1-6)"] year_level: Option<u8>,
        #[description = "Section"] section: Option<String>,
        #[description = "Email address"] email: Option<String>,
        #[description = "Phone number"] contact_number: Option<String>,
        #[description = "Home address"] address: Option<String>,
        #[description = "Guardian's name"] guardian_name: Option<String>,
        #[description = "Guardian's phone number"] guardian_contact: Option<String>,
    ) -> Result<()> {
        if require_role(ctx, ADMIN_ONLY).await?.is_none() {
            return Ok(());
        }
        let update = StudentUpdate {
            first_name,
            middle_name,
            last_name,
            course,
            year_level,
            section,
            contact_number,
            email,
            address,
            guardian_name,
            guardian_contact,
        };

        let outcome = {
            let mut portal = ctx.data().portal.lock().await;
            portal
                .apply(|state, _| update_student(state, &student, update))
                .await
        };
        let message =
            outcome.map(|s| format!("✅ Saved **{}** (`{}`).", s.full_name(), s.id));
        reply_outcome(ctx, message).await
    }

    /// Activates or deactivates a student and their login.
    #[poise::command(slash_command, rename = "student-status")]
    pub async fn admin_student_status(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Student"]
        #[autocomplete = "autocomplete::autocomplete_student"]
        student: String,
        #[description = "New status"] status: StatusChoice,
    ) -> Result<()> {
        if require_role(ctx, ADMIN_ONLY).await?.is_none() {
            return Ok(());
        }
        let status = AccountStatus::from(status);

        let outcome = {
            let mut portal = ctx.data().portal.lock().await;
            portal
                .apply(|state, _| set_student_status(state, &student, status))
                .await
        };
        let message = outcome.map(|s| format!("✅ **{}** is now {}.", s.full_name(), s.status));
        reply_outcome(ctx, message).await
    }

    /// Deletes a student, their login and their grade records.
    #[poise::command(slash_command, rename = "student-delete")]
    pub async fn admin_student_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Student"]
        #[autocomplete = "autocomplete::autocomplete_student"]
        student: String,
    ) -> Result<()> {
        if require_role(ctx, ADMIN_ONLY).await?.is_none() {
            return Ok(());
        }

        let (outcome, linked) = {
            let mut portal = ctx.data().portal.lock().await;
            let linked: Vec<String> = portal
                .state()
                .users
                .iter()
                .filter(|u| u.student_id.as_deref() == Some(student.as_str()))
                .map(|u| u.id.clone())
                .collect();
            let outcome = portal
                .apply(|state, _| delete_student(state, &student))
                .await;
            (outcome, linked)
        };

        if outcome.is_ok() {
            for account_id in &linked {
                ctx.data().sessions.drop_account(account_id).await;
            }
        }
        let message =
            outcome.map(|s| format!("🗑️ Deleted **{}** (`{}`).", s.full_name(), s.id));
        reply_outcome(ctx, message).await
    }

    /// Lists all subjects.
    #[poise::command(slash_command, rename = "subjects")]
    pub async fn admin_subjects(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        if require_role(ctx, ADMIN_ONLY).await?.is_none() {
            return Ok(());
        }

        let mut response = String::from("📚 **Subjects**\n\n");
        {
            let portal = ctx.data().portal.lock().await;
            let state = portal.state();
            let subjects = list_subjects(state);
            if subjects.is_empty() {
                response.push_str("_No subjects yet._");
            }
            for subject in subjects {
                let assigned = subject
                    .teacher_id
                    .as_deref()
                    .and_then(|id| state.user(id))
                    .map(|u| format!(" → {}", u.username))
                    .unwrap_or_default();
                writeln!(
                    &mut response,
                    "• `{}` **{}** {} (Year {}, Section {}) - {}{assigned}",
                    subject.id,
                    subject.code,
                    subject.name,
                    subject.grade_level,
                    subject.section,
                    if subject.teacher_name.is_empty() {
                        "no teacher"
                    } else {
                        subject.teacher_name.as_str()
                    }
                )?;
            }
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Adds a subject.
    #[poise::command(slash_command, rename = "subject-add")]
    pub async fn admin_subject_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Subject code, e.g. IT101"] code: String,
        #[description = "Subject name"] name: String,
        #[description = "Year level (1-6)"] grade_level: u8,
        #[description = "Section"] section: String,
        #[description = "Teacher name"] teacher_name: Option<String>,
        #[description = "Description"] description: Option<String>,
    ) -> Result<()> {
        if require_role(ctx, ADMIN_ONLY).await?.is_none() {
            return Ok(());
        }
        let form = NewSubject {
            code,
            name,
            grade_level,
            section,
            teacher_name: teacher_name.unwrap_or_default(),
            description,
        };

        let outcome = {
            let mut portal = ctx.data().portal.lock().await;
            portal.apply(|state, _| add_subject(state, form)).await
        };
        let message = outcome.map(|s| format!("✅ Added **{} {}** as `{}`.", s.code, s.name, s.id));
        reply_outcome(ctx, message).await
    }

    /// Edits a subject.
    #[poise::command(slash_command, rename = "subject-edit")]
    #[allow(clippy::too_many_arguments)]
    pub async fn admin_subject_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Subject"]
        #[autocomplete = "autocomplete::autocomplete_subject"]
        subject: String,
        #[description = "Subject code"] code: Option<String>,
        #[description = "Subject name"] name: Option<String>,
        #[description = "Year level (1-6)"] grade_level: Option<u8>,
        #[description = "Section"] section: Option<String>,
        #[description = "Teacher name"] teacher_name: Option<String>,
        #[description = "Description (empty clears it)"] description: Option<String>,
    ) -> Result<()> {
        if require_role(ctx, ADMIN_ONLY).await?.is_none() {
            return Ok(());
        }
        let update = SubjectUpdate {
            code,
            name,
            grade_level,
            section,
            teacher_name,
            description,
        };

        let outcome = {
            let mut portal = ctx.data().portal.lock().await;
            portal
                .apply(|state, _| update_subject(state, &subject, update))
                .await
        };
        let message = outcome.map(|s| format!("✅ Saved **{} {}**.", s.code, s.name));
        reply_outcome(ctx, message).await
    }

    /// Deletes a subject. Grade records that reference it are kept.
    #[poise::command(slash_command, rename = "subject-delete")]
    pub async fn admin_subject_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Subject"]
        #[autocomplete = "autocomplete::autocomplete_subject"]
        subject: String,
    ) -> Result<()> {
        if require_role(ctx, ADMIN_ONLY).await?.is_none() {
            return Ok(());
        }

        let outcome = {
            let mut portal = ctx.data().portal.lock().await;
            portal
                .apply(|state, _| delete_subject(state, &subject))
                .await
        };
        let message = outcome.map(|s| {
            format!(
                "🗑️ Deleted **{} {}**. Run `/admin integrity` to review leftover enrollments.",
                s.code, s.name
            )
        });
        reply_outcome(ctx, message).await
    }

    /// Enrolls a student in a subject.
    #[poise::command(slash_command, rename = "enroll")]
    pub async fn admin_enroll(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Student"]
        #[autocomplete = "autocomplete::autocomplete_student"]
        student: String,
        #[description = "Subject"]
        #[autocomplete = "autocomplete::autocomplete_subject"]
        subject: String,
    ) -> Result<()> {
        if require_role(ctx, ADMIN_ONLY).await?.is_none() {
            return Ok(());
        }

        let outcome = {
            let mut portal = ctx.data().portal.lock().await;
            portal
                .apply(|state, _| enroll_student(state, &student, &subject))
                .await
        };
        let message = outcome.map(|r| format!("✅ Enrolled `{student}` in **{}**.", r.subject_name));
        reply_outcome(ctx, message).await
    }

    /// Removes a student from a subject, discarding its grades.
    #[poise::command(slash_command, rename = "unenroll")]
    pub async fn admin_unenroll(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Student"]
        #[autocomplete = "autocomplete::autocomplete_student"]
        student: String,
        #[description = "Subject"]
        #[autocomplete = "autocomplete::autocomplete_subject"]
        subject: String,
    ) -> Result<()> {
        if require_role(ctx, ADMIN_ONLY).await?.is_none() {
            return Ok(());
        }

        let outcome = {
            let mut portal = ctx.data().portal.lock().await;
            portal
                .apply(|state, _| unenroll_student(state, &student, &subject))
                .await
        };
        let message =
            outcome.map(|r| format!("✅ Removed `{student}` from **{}**.", r.subject_name));
        reply_outcome(ctx, message).await
    }

    /// Assigns a subject to a teacher.
    #[poise::command(slash_command, rename = "assign")]
    pub async fn admin_assign(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Teacher"]
        #[autocomplete = "autocomplete::autocomplete_teacher"]
        teacher: String,
        #[description = "Subject"]
        #[autocomplete = "autocomplete::autocomplete_subject"]
        subject: String,
    ) -> Result<()> {
        if require_role(ctx, ADMIN_ONLY).await?.is_none() {
            return Ok(());
        }

        let outcome = {
            let mut portal = ctx.data().portal.lock().await;
            portal
                .apply(|state, _| {
                    let teacher_id = account_id(state, &teacher)?;
                    assign_subject(state, &teacher_id, &subject)
                })
                .await
        };
        let message = outcome.map(|()| format!("✅ Assigned `{subject}` to `{teacher}`."));
        reply_outcome(ctx, message).await
    }

    /// Removes a subject from a teacher.
    #[poise::command(slash_command, rename = "unassign")]
    pub async fn admin_unassign(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Teacher"]
        #[autocomplete = "autocomplete::autocomplete_teacher"]
        teacher: String,
        #[description = "Subject"]
        #[autocomplete = "autocomplete::autocomplete_subject"]
        subject: String,
    ) -> Result<()> {
        if require_role(ctx, ADMIN_ONLY).await?.is_none() {
            return Ok(());
        }

        let outcome = {
            let mut portal = ctx.data().portal.lock().await;
            portal
                .apply(|state, _| {
                    let teacher_id = account_id(state, &teacher)?;
                    unassign_subject(state, &teacher_id, &subject)
                })
                .await
        };
        let message = outcome.map(|()| format!("✅ Unassigned `{subject}` from `{teacher}`."));
        reply_outcome(ctx, message).await
    }

    /// Lists accounts, optionally of one role.
    #[poise::command(slash_command, rename = "users")]
    pub async fn admin_users(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only this role"] role: Option<RoleChoice>,
    ) -> Result<()> {
        if require_role(ctx, ADMIN_ONLY).await?.is_none() {
            return Ok(());
        }

        let mut response = String::from("👥 **Accounts**\n\n");
        {
            let portal = ctx.data().portal.lock().await;
            let state = portal.state();
            let users: Vec<_> = match role {
                Some(role) => users_with_role(state, role.into()),
                None => state.users.iter().collect(),
            };
            if users.is_empty() {
                response.push_str("_No accounts._");
            }
            for user in users.iter().take(LIST_LIMIT) {
                writeln!(
                    &mut response,
                    "• `{}` **{}** - {} ({}, {})",
                    user.id,
                    user.username,
                    user.full_name(),
                    user.role,
                    user.status
                )?;
            }
            if users.len() > LIST_LIMIT {
                writeln!(&mut response, "_...and {} more._", users.len() - LIST_LIMIT)?;
            }
        }

        reply_private(ctx, response).await
    }

    /// Changes an account's role.
    #[poise::command(slash_command, rename = "user-role")]
    pub async fn admin_user_role(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Account"]
        #[autocomplete = "autocomplete::autocomplete_user"]
        user: String,
        #[description = "New role"] role: RoleChoice,
    ) -> Result<()> {
        if require_role(ctx, ADMIN_ONLY).await?.is_none() {
            return Ok(());
        }

        let outcome = {
            let mut portal = ctx.data().portal.lock().await;
            portal
                .apply(|state, _| {
                    let user_id = account_id(state, &user)?;
                    accounts::change_role(state, &user_id, role.into())
                })
                .await
        };
        let message = outcome.map(|u| format!("✅ **{}** is now {}.", u.username, u.role));
        reply_outcome(ctx, message).await
    }

    /// Deletes an account.
    #[poise::command(slash_command, rename = "user-delete")]
    pub async fn admin_user_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Account"]
        #[autocomplete = "autocomplete::autocomplete_user"]
        user: String,
    ) -> Result<()> {
        let Some(caller) = require_role(ctx, ADMIN_ONLY).await? else {
            return Ok(());
        };

        let outcome = {
            let mut portal = ctx.data().portal.lock().await;
            portal
                .apply(|state, _| {
                    let user_id = account_id(state, &user)?;
                    if user_id == caller {
                        return Err(Error::transition(
                            "You cannot delete the account you are using",
                        ));
                    }
                    accounts::delete_user(state, &user_id)
                })
                .await
        };
        if let Ok(removed) = &outcome {
            ctx.data().sessions.drop_account(&removed.id).await;
        }
        let message = outcome.map(|u| format!("🗑️ Deleted account **{}**.", u.username));
        reply_outcome(ctx, message).await
    }

    /// Sets a new password for an account.
    #[poise::command(slash_command, rename = "reset-password")]
    pub async fn admin_reset_password(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Account"]
        #[autocomplete = "autocomplete::autocomplete_user"]
        user: String,
        #[description = "New password"] new_password: String,
    ) -> Result<()> {
        if require_role(ctx, ADMIN_ONLY).await?.is_none() {
            return Ok(());
        }

        let outcome = {
            let mut portal = ctx.data().portal.lock().await;
            portal
                .apply(|state, _| {
                    let user_id = account_id(state, &user)?;
                    accounts::reset_password(state, &user_id, &new_password)
                })
                .await
        };
        match outcome {
            Ok(()) => reply_private(ctx, format!("✅ Password reset for `{user}`.")).await,
            Err(e) if e.is_user_facing() => reply_private(ctx, format!("❌ {e}")).await,
            Err(e) => Err(e),
        }
    }

    /// Lists references to records that no longer exist.
    #[poise::command(slash_command, rename = "integrity")]
    pub async fn admin_integrity(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        if require_role(ctx, ADMIN_ONLY).await?.is_none() {
            return Ok(());
        }

        let dangling = {
            let portal = ctx.data().portal.lock().await;
            dangling_references(portal.state())
        };
        if dangling.is_empty() {
            return reply_private(ctx, "✅ No broken references.").await;
        }

        warn!(count = dangling.len(), "Dangling references found");
        let mut response = format!("⚠️ **{} broken reference(s)**\n", dangling.len());
        for item in dangling.iter().take(LIST_LIMIT) {
            writeln!(&mut response, "• {item}")?;
        }
        reply_private(ctx, response).await
    }

    /// Exports the student list as CSV.
    #[poise::command(slash_command, rename = "export-students")]
    pub async fn admin_export_students(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        if require_role(ctx, ADMIN_ONLY).await?.is_none() {
            return Ok(());
        }

        let csv = {
            let portal = ctx.data().portal.lock().await;
            students_csv(search_students(portal.state(), &StudentFilter::default()))
        };
        reply_csv(
            ctx,
            "📎 Student list",
            export_file_name("students", "all"),
            csv,
        )
        .await
    }

    /// Wipes the portal and restores the seed data.
    #[poise::command(slash_command, rename = "reset")]
    pub async fn admin_reset(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Type true to confirm"] confirm: bool,
    ) -> Result<()> {
        let Some(caller) = require_role(ctx, ADMIN_ONLY).await? else {
            return Ok(());
        };
        if !confirm {
            return reply_private(ctx, "Nothing changed. Pass `confirm: true` to reset.").await;
        }

        {
            let mut portal = ctx.data().portal.lock().await;
            portal.reset(&ctx.data().seed).await?;
        }
        warn!(%caller, "Portal reset from Discord");
        ctx.data().sessions.clear().await;
        reply_private(
            ctx,
            "♻️ Portal reset to seed data. Everyone has been logged out.",
        )
        .await
    }
}

// Re-export all commands
pub use inner::*;
