//! CSV exports of the student list, gradebooks and report cards.
//!
//! Every export starts with a fixed header row. Fields containing commas,
//! quotes or line breaks are quoted with embedded quotes doubled.

use crate::core::{
    dashboard::{GradeRow, Gradebook, ReportCard, display_number},
    model::Student,
};

/// Header of [`students_csv`].
pub const STUDENTS_HEADER: &str =
    "Student ID,Last Name,First Name,Middle Name,Course,Year Level,Section,Email,Contact Number,Status";

/// Header of [`gradebook_csv`] and [`report_card_csv`].
pub const GRADES_HEADER: &str =
    "Student ID,Student Name,Subject,Midterm,Midterm Eq,Final,Final Eq,Rating,Remarks";

/// Quotes a field when it contains a delimiter, quote or line break.
#[must_use]
pub fn csv_quote(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
    {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn push_row<I, S>(out: &mut String, fields: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let line = fields
        .into_iter()
        .map(|f| csv_quote(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(&line);
    out.push('\n');
}

fn score(value: Option<f64>) -> String {
    value.map_or_else(String::new, |v| v.to_string())
}

fn push_grade_rows(out: &mut String, rows: &[GradeRow]) {
    for row in rows {
        push_row(
            out,
            [
                row.student_id.clone(),
                row.student_name.clone(),
                row.subject_name.clone(),
                score(row.midterm),
                display_number(row.midterm_eq, 1),
                score(row.final_score),
                display_number(row.final_eq, 1),
                display_number(row.rating, 2),
                row.status.as_str().to_string(),
            ],
        );
    }
}

/// Student list export.
#[must_use]
pub fn students_csv<'a>(students: impl IntoIterator<Item = &'a Student>) -> String {
    let mut out = format!("{STUDENTS_HEADER}\n");
    for s in students {
        push_row(
            &mut out,
            [
                s.id.clone(),
                s.last_name.clone(),
                s.first_name.clone(),
                s.middle_name.clone().unwrap_or_default(),
                s.course.clone(),
                s.year_level.to_string(),
                s.section.clone(),
                s.email.clone().unwrap_or_default(),
                s.contact_number.clone().unwrap_or_default(),
                s.status.as_str().to_string(),
            ],
        );
    }
    out
}

/// Gradebook export for one subject.
#[must_use]
pub fn gradebook_csv(book: &Gradebook) -> String {
    let mut out = format!("{GRADES_HEADER}\n");
    push_grade_rows(&mut out, &book.rows);
    out
}

/// Report card export for one student, ending with the general average.
#[must_use]
pub fn report_card_csv(card: &ReportCard) -> String {
    let mut out = format!("{GRADES_HEADER}\n");
    push_grade_rows(&mut out, &card.rows);
    push_row(
        &mut out,
        [
            String::new(),
            String::new(),
            "General Average".to_string(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            display_number(card.summary.average_rating, 2),
            String::new(),
        ],
    );
    out
}

/// File name for an export, e.g. `gradebook_MATH101.csv`.
#[must_use]
pub fn export_file_name(kind: &str, label: &str) -> String {
    let label: String = label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    if label.is_empty() {
        format!("{kind}.csv")
    } else {
        format!("{kind}_{label}.csv")
    }
}
