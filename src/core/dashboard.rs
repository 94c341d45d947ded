//! Role dashboards.
//!
//! These are recomputed from the state every time they are shown. Ratings and
//! verdicts are re-evaluated under the current grading policy rather than read
//! back from the stored record.

use crate::{
    core::{
        enrollment::{enrollments_for, students_in_subject},
        grading::{GradingPolicy, general_average},
        model::{AccountStatus, GradeRecord, GradeStatus, PortalState, Role, Student, Subject},
        students::find_student,
        subjects::find_subject,
    },
    errors::{Error, Result},
};

/// Counts shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminOverview {
    /// All students
    pub total_students: usize,
    /// Students with active status
    pub active_students: usize,
    /// All subjects
    pub total_subjects: usize,
    /// Admin accounts
    pub admins: usize,
    /// Teacher accounts
    pub teachers: usize,
    /// Student accounts
    pub student_accounts: usize,
    /// Grade records with both terms graded
    pub graded_records: usize,
    /// Passing records
    pub passed: usize,
    /// Failing records
    pub failed: usize,
    /// Passing share of graded records, in percent
    pub pass_rate: Option<f64>,
}

/// One line of a gradebook or report card.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeRow {
    /// Student the row belongs to
    pub student_id: String,
    /// "Last, First M."
    pub student_name: String,
    /// Subject the row belongs to
    pub subject_id: String,
    /// Current subject name, or the stored one if the subject is gone
    pub subject_name: String,
    /// Raw midterm
    pub midterm: Option<f64>,
    /// Linear midterm equivalent
    pub midterm_eq: Option<f64>,
    /// Raw final
    pub final_score: Option<f64>,
    /// Linear final equivalent
    pub final_eq: Option<f64>,
    /// Rating under the policy
    pub rating: Option<f64>,
    /// Verdict under the policy
    pub status: GradeStatus,
}

impl GradeRow {
    fn build(
        state: &PortalState,
        student: &Student,
        record: &GradeRecord,
        policy: &GradingPolicy,
    ) -> Self {
        let evaluation = policy.evaluate(record.midterm, record.final_score);
        let subject_name = find_subject(state, &record.subject_id)
            .map_or_else(|| record.subject_name.clone(), |s| s.name.clone());
        Self {
            student_id: student.id.clone(),
            student_name: student.list_name(),
            subject_id: record.subject_id.clone(),
            subject_name,
            midterm: record.midterm,
            midterm_eq: evaluation.midterm_eq,
            final_score: record.final_score,
            final_eq: evaluation.final_eq,
            rating: evaluation.rating,
            status: evaluation.status,
        }
    }
}

/// Pass/fail tallies of a set of rows.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RowSummary {
    /// Rows with a verdict
    pub graded: usize,
    /// Passing rows
    pub passed: usize,
    /// Failing rows
    pub failed: usize,
    /// Rows still missing a term
    pub incomplete: usize,
    /// Mean of available ratings
    pub average_rating: Option<f64>,
}

impl RowSummary {
    fn from_rows(rows: &[GradeRow]) -> Self {
        let mut summary = Self::default();
        for row in rows {
            match row.status {
                GradeStatus::Passed => summary.passed += 1,
                GradeStatus::Failed => summary.failed += 1,
                GradeStatus::Incomplete => summary.incomplete += 1,
            }
        }
        summary.graded = summary.passed + summary.failed;
        summary.average_rating = general_average(rows.iter().filter_map(|r| r.rating));
        summary
    }
}

/// A subject's class list with grades.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradebook {
    /// The subject
    pub subject: Subject,
    /// One row per enrolled student
    pub rows: Vec<GradeRow>,
    /// Tallies over `rows`
    pub summary: RowSummary,
}

/// A student's grades across subjects.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportCard {
    /// The student
    pub student: Student,
    /// One row per enrolled subject
    pub rows: Vec<GradeRow>,
    /// Tallies over `rows`; `average_rating` is the general average
    pub summary: RowSummary,
}

/// Builds the admin dashboard counts.
#[must_use]
pub fn admin_overview(state: &PortalState, policy: &GradingPolicy) -> AdminOverview {
    let count_role = |role: Role| state.users.iter().filter(|u| u.role == role).count();

    let (passed, failed) = state
        .enrollments
        .values()
        .flatten()
        .map(|r| policy.evaluate(r.midterm, r.final_score).status)
        .fold((0, 0), |(p, f), status| match status {
            GradeStatus::Passed => (p + 1, f),
            GradeStatus::Failed => (p, f + 1),
            GradeStatus::Incomplete => (p, f),
        });
    let graded_records = passed + failed;

    #[allow(clippy::cast_precision_loss)]
    let pass_rate = (graded_records > 0)
        .then(|| ((passed as f64 / graded_records as f64) * 1000.0).round() / 10.0);

    AdminOverview {
        total_students: state.students.len(),
        active_students: state
            .students
            .iter()
            .filter(|s| s.status == AccountStatus::Active)
            .count(),
        total_subjects: state.subjects.len(),
        admins: count_role(Role::Admin),
        teachers: count_role(Role::Teacher),
        student_accounts: count_role(Role::Student),
        graded_records,
        passed,
        failed,
        pass_rate,
    }
}

/// Builds the gradebook for one subject.
pub fn subject_gradebook(
    state: &PortalState,
    subject_id: &str,
    policy: &GradingPolicy,
) -> Result<Gradebook> {
    let subject = find_subject(state, subject_id)
        .ok_or_else(|| Error::not_found("Subject", subject_id))?;
    let rows: Vec<GradeRow> = students_in_subject(state, subject_id)
        .into_iter()
        .map(|(student, record)| GradeRow::build(state, student, record, policy))
        .collect();
    Ok(Gradebook {
        subject: subject.clone(),
        summary: RowSummary::from_rows(&rows),
        rows,
    })
}

/// Builds a student's report card.
pub fn report_card(
    state: &PortalState,
    student_id: &str,
    policy: &GradingPolicy,
) -> Result<ReportCard> {
    let student = find_student(state, student_id)
        .ok_or_else(|| Error::not_found("Student", student_id))?;
    let rows: Vec<GradeRow> = enrollments_for(state, student_id)
        .iter()
        .map(|record| GradeRow::build(state, student, record, policy))
        .collect();
    Ok(ReportCard {
        student: student.clone(),
        summary: RowSummary::from_rows(&rows),
        rows,
    })
}

/// Formats an optional number for display, blank when missing.
#[must_use]
pub fn display_number(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(String::new, |v| format!("{v:.decimals$}"))
}
