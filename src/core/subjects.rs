//! Subject catalog.
//!
//! Deleting a subject does not touch enrollments or teacher assignments; the
//! references it leaves behind are reported by
//! [`dangling_references`](crate::core::enrollment::dangling_references).

use crate::{
    core::{
        model::{PortalState, Subject},
        students::validate_year_level,
    },
    errors::{Error, Result},
};
use tracing::{info, warn};

/// Admin form for a new subject.
#[derive(Debug, Clone, Default)]
pub struct NewSubject {
    /// Catalog code
    pub code: String,
    /// Title
    pub name: String,
    /// Year level
    pub grade_level: u8,
    /// Section label
    pub section: String,
    /// Teacher name as typed
    pub teacher_name: String,
    /// Optional description
    pub description: Option<String>,
}

/// Edits to a subject. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct SubjectUpdate {
    /// Catalog code
    pub code: Option<String>,
    /// Title
    pub name: Option<String>,
    /// Year level
    pub grade_level: Option<u8>,
    /// Section label
    pub section: Option<String>,
    /// Teacher name as typed
    pub teacher_name: Option<String>,
    /// Description; an empty string clears it
    pub description: Option<String>,
}

fn ensure_unique_code(state: &PortalState, code: &str, except_id: Option<&str>) -> Result<()> {
    let taken = state
        .subjects
        .iter()
        .filter(|s| Some(s.id.as_str()) != except_id)
        .any(|s| s.code.eq_ignore_ascii_case(code));
    if taken {
        return Err(Error::Duplicate {
            field: "Subject code",
            value: code.to_string(),
        });
    }
    Ok(())
}

fn non_empty(value: &str, label: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(format!("{label} is required")));
    }
    Ok(trimmed.to_string())
}

/// Looks up a subject by id.
#[must_use]
pub fn find_subject<'a>(state: &'a PortalState, subject_id: &str) -> Option<&'a Subject> {
    state.subjects.iter().find(|s| s.id == subject_id)
}

/// Looks up a subject by id, or by code when no id matches.
#[must_use]
pub fn resolve_subject<'a>(state: &'a PortalState, key: &str) -> Option<&'a Subject> {
    let key = key.trim();
    find_subject(state, key).or_else(|| {
        state
            .subjects
            .iter()
            .find(|s| s.code.eq_ignore_ascii_case(key))
    })
}

/// Adds a subject with a unique code.
pub fn add_subject(state: &mut PortalState, new: NewSubject) -> Result<Subject> {
    let code = non_empty(&new.code, "Subject code")?.to_uppercase();
    let name = non_empty(&new.name, "Subject name")?;
    let section = non_empty(&new.section, "Section")?;
    let grade_level = validate_year_level(new.grade_level)?;
    ensure_unique_code(state, &code, None)?;

    let subject = Subject {
        id: state.next_id("SUB")?,
        code,
        name,
        grade_level,
        section,
        teacher_name: new.teacher_name.trim().to_string(),
        teacher_id: None,
        description: new
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
    };
    info!(subject_id = %subject.id, code = %subject.code, "Subject added");
    state.subjects.push(subject.clone());
    Ok(subject)
}

/// Applies edits to a subject.
pub fn update_subject(
    state: &mut PortalState,
    subject_id: &str,
    update: SubjectUpdate,
) -> Result<Subject> {
    let mut subject = find_subject(state, subject_id)
        .cloned()
        .ok_or_else(|| Error::not_found("Subject", subject_id))?;

    if let Some(code) = update.code {
        let code = non_empty(&code, "Subject code")?.to_uppercase();
        ensure_unique_code(state, &code, Some(subject_id))?;
        subject.code = code;
    }
    if let Some(name) = update.name {
        subject.name = non_empty(&name, "Subject name")?;
    }
    if let Some(section) = update.section {
        subject.section = non_empty(&section, "Section")?;
    }
    if let Some(level) = update.grade_level {
        subject.grade_level = validate_year_level(level)?;
    }
    if let Some(teacher_name) = update.teacher_name {
        subject.teacher_name = teacher_name.trim().to_string();
    }
    if let Some(description) = update.description {
        let description = description.trim().to_string();
        subject.description = (!description.is_empty()).then_some(description);
    }

    if let Some(slot) = state.subjects.iter_mut().find(|s| s.id == subject_id) {
        slot.clone_from(&subject);
    }
    info!(subject_id, "Subject updated");
    Ok(subject)
}

/// Removes a subject. Enrollment and assignment references are left in place.
pub fn delete_subject(state: &mut PortalState, subject_id: &str) -> Result<Subject> {
    let index = state
        .subjects
        .iter()
        .position(|s| s.id == subject_id)
        .ok_or_else(|| Error::not_found("Subject", subject_id))?;
    let removed = state.subjects.remove(index);

    let enrolled = state
        .enrollments
        .values()
        .flatten()
        .filter(|r| r.subject_id == subject_id)
        .count();
    if enrolled > 0 {
        warn!(
            subject_id,
            enrolled, "Deleted subject still has enrollment references"
        );
    }
    info!(subject_id, "Subject deleted");
    Ok(removed)
}

/// All subjects ordered by code.
#[must_use]
pub fn list_subjects(state: &PortalState) -> Vec<&Subject> {
    let mut subjects: Vec<&Subject> = state.subjects.iter().collect();
    subjects.sort_by(|a, b| a.code.cmp(&b.code));
    subjects
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{create_test_subject, default_state, new_subject};

    #[test]
    fn test_add_subject_normalizes_code() {
        let mut state = default_state();
        let mut form = new_subject("math101", "College Algebra");
        form.description = Some("  ".to_string());
        let subject = add_subject(&mut state, form).unwrap();
        assert_eq!(subject.id, "SUB-0001");
        assert_eq!(subject.code, "MATH101");
        assert!(subject.description.is_none());
        assert!(subject.teacher_id.is_none());
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let mut state = default_state();
        create_test_subject(&mut state, "ENG1", "English");
        let err = add_subject(&mut state, new_subject("eng1", "Other")).unwrap_err();
        assert!(matches!(err, Error::Duplicate { .. }));
        assert_eq!(state.subjects.len(), 1);
    }

    #[test]
    fn test_update_subject() {
        let mut state = default_state();
        let subject = create_test_subject(&mut state, "SCI1", "Science");
        create_test_subject(&mut state, "SCI2", "Physics");

        let updated = update_subject(
            &mut state,
            &subject.id,
            SubjectUpdate {
                name: Some("General Science".to_string()),
                teacher_name: Some("Ms. Reyes".to_string()),
                ..SubjectUpdate::default()
            },
        )
        .unwrap();
        assert_eq!(updated.name, "General Science");
        assert_eq!(find_subject(&state, &subject.id).unwrap().teacher_name, "Ms. Reyes");

        let err = update_subject(
            &mut state,
            &subject.id,
            SubjectUpdate {
                code: Some("sci2".to_string()),
                ..SubjectUpdate::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::Duplicate { .. }));
    }

    #[test]
    fn test_resolve_by_id_or_code() {
        let mut state = default_state();
        let subject = create_test_subject(&mut state, "HIST1", "History");
        assert_eq!(resolve_subject(&state, &subject.id).unwrap().id, subject.id);
        assert_eq!(resolve_subject(&state, "hist1").unwrap().id, subject.id);
        assert!(resolve_subject(&state, "nope").is_none());
    }

    #[test]
    fn test_delete_missing_subject() {
        let mut state = default_state();
        assert!(matches!(
            delete_subject(&mut state, "SUB-0042").unwrap_err(),
            Error::NotFound { .. }
        ));
    }
}
