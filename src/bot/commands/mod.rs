//! Discord command implementations organized by role.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Admin command group
pub mod admin;

/// Login, sign-up and account commands
pub mod auth;

/// General utility commands
pub mod general;

/// Student command group
pub mod student;

/// Teacher command group
pub mod teacher;

use crate::core::{
    dashboard::{GradeRow, RowSummary, display_number},
    model::{AccountStatus, Role},
};
use std::fmt::{self, Write};

/// Which name leads each line of a grade table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLabel {
    /// Student name (gradebooks)
    Student,
    /// Subject name (report cards)
    Subject,
}

/// Renders grade rows as a fixed-width table inside a code block.
pub fn grade_table(rows: &[GradeRow], label: RowLabel) -> Result<String, fmt::Error> {
    let heading = match label {
        RowLabel::Student => "Student",
        RowLabel::Subject => "Subject",
    };
    let mut out = String::from("```\n");
    writeln!(
        &mut out,
        "{heading:<28} {:>5} {:>5} {:>5} {:>5} {:>6}  Remarks",
        "Mid", "Eq", "Final", "Eq", "Rating"
    )?;
    for row in rows {
        let name = match label {
            RowLabel::Student => &row.student_name,
            RowLabel::Subject => &row.subject_name,
        };
        let name: String = name.chars().take(28).collect();
        writeln!(
            &mut out,
            "{name:<28} {:>5} {:>5} {:>5} {:>5} {:>6}  {}",
            display_number(row.midterm, 0),
            display_number(row.midterm_eq, 1),
            display_number(row.final_score, 0),
            display_number(row.final_eq, 1),
            display_number(row.rating, 2),
            row.status
        )?;
    }
    out.push_str("```");
    Ok(out)
}

/// One-line pass/fail summary.
#[must_use]
pub fn summary_line(summary: &RowSummary) -> String {
    format!(
        "✅ {} passed · ❌ {} failed · ⏳ {} incomplete · average {}",
        summary.passed,
        summary.failed,
        summary.incomplete,
        summary
            .average_rating
            .map_or_else(|| "n/a".to_string(), |a| format!("{a:.2}"))
    )
}

/// Role picker for slash command options.
#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum RoleChoice {
    /// Administrator
    Admin,
    /// Teacher
    Teacher,
    /// Student
    Student,
}

impl From<RoleChoice> for Role {
    fn from(choice: RoleChoice) -> Self {
        match choice {
            RoleChoice::Admin => Self::Admin,
            RoleChoice::Teacher => Self::Teacher,
            RoleChoice::Student => Self::Student,
        }
    }
}

/// Status picker for slash command options.
#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum StatusChoice {
    /// Active
    Active,
    /// Inactive
    Inactive,
}

impl From<StatusChoice> for AccountStatus {
    fn from(choice: StatusChoice) -> Self {
        match choice {
            StatusChoice::Active => Self::Active,
            StatusChoice::Inactive => Self::Inactive,
        }
    }
}

// Export commands
pub use admin::*;
pub use auth::*;
pub use general::*;
pub use student::*;
pub use teacher::*;
