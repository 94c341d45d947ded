//! Teacher-subject assignments.
//!
//! A subject belongs to a teacher when its `teacher_id` points at them, when
//! it is listed in their assignment entry, or, for subjects without a teacher
//! id, when its free-text teacher name matches their identity.

use crate::{
    core::{
        identity::TeacherIdentity,
        model::{PortalState, Role, Subject, User},
        subjects::find_subject,
    },
    errors::{Error, Result},
};
use tracing::info;

fn require_teacher<'a>(state: &'a PortalState, teacher_id: &str) -> Result<&'a User> {
    let user = state
        .user(teacher_id)
        .ok_or_else(|| Error::not_found("Teacher", teacher_id))?;
    if user.role != Role::Teacher {
        return Err(Error::transition(format!(
            "{} is not a teacher account",
            user.username
        )));
    }
    Ok(user)
}

/// Assigns a subject to a teacher and records the teacher on the subject.
///
/// A subject has one teacher; reassigning moves it off the previous
/// teacher's list. Assigning the same pair again changes nothing.
pub fn assign_subject(state: &mut PortalState, teacher_id: &str, subject_id: &str) -> Result<()> {
    require_teacher(state, teacher_id)?;
    let previous = find_subject(state, subject_id)
        .ok_or_else(|| Error::not_found("Subject", subject_id))?
        .teacher_id
        .clone();

    if let Some(previous) = previous.as_deref().filter(|p| *p != teacher_id) {
        if let Some(list) = state.teacher_assignments.get_mut(previous) {
            list.retain(|id| id != subject_id);
        }
    }

    let list = state
        .teacher_assignments
        .entry(teacher_id.to_string())
        .or_default();
    if !list.iter().any(|id| id == subject_id) {
        list.push(subject_id.to_string());
    }

    if let Some(subject) = state.subjects.iter_mut().find(|s| s.id == subject_id) {
        subject.teacher_id = Some(teacher_id.to_string());
    }
    info!(teacher_id, subject_id, "Subject assigned");
    Ok(())
}

/// Removes a subject from a teacher's assignments.
pub fn unassign_subject(
    state: &mut PortalState,
    teacher_id: &str,
    subject_id: &str,
) -> Result<()> {
    let listed = state
        .teacher_assignments
        .get(teacher_id)
        .is_some_and(|list| list.iter().any(|id| id == subject_id));
    let linked = find_subject(state, subject_id)
        .is_some_and(|s| s.teacher_id.as_deref() == Some(teacher_id));
    if !listed && !linked {
        return Err(Error::transition(format!(
            "Subject {subject_id} is not assigned to {teacher_id}"
        )));
    }

    if let Some(list) = state.teacher_assignments.get_mut(teacher_id) {
        list.retain(|id| id != subject_id);
        if list.is_empty() {
            state.teacher_assignments.remove(teacher_id);
        }
    }
    if let Some(subject) = state
        .subjects
        .iter_mut()
        .find(|s| s.id == subject_id && s.teacher_id.as_deref() == Some(teacher_id))
    {
        subject.teacher_id = None;
    }
    info!(teacher_id, subject_id, "Subject unassigned");
    Ok(())
}

/// Subjects a teacher owns, in catalog order.
#[must_use]
pub fn subjects_for_teacher<'a>(state: &'a PortalState, user: &User) -> Vec<&'a Subject> {
    let identity = TeacherIdentity::from_user(user);
    let assigned = state
        .teacher_assignments
        .get(&user.id)
        .map(Vec::as_slice)
        .unwrap_or_default();

    state
        .subjects
        .iter()
        .filter(|subject| match subject.teacher_id.as_deref() {
            Some(teacher_id) => teacher_id == user.id || assigned.contains(&subject.id),
            None => assigned.contains(&subject.id) || identity.matches(&subject.teacher_name),
        })
        .collect()
}

/// Whether `user` may grade `subject_id`. Admins may grade everything.
#[must_use]
pub fn can_grade(state: &PortalState, user: &User, subject_id: &str) -> bool {
    match user.role {
        Role::Admin => find_subject(state, subject_id).is_some(),
        Role::Teacher => subjects_for_teacher(state, user)
            .iter()
            .any(|s| s.id == subject_id),
        Role::Student => false,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::subjects::{SubjectUpdate, update_subject};
    use crate::test_utils::{create_test_subject, create_test_teacher, default_state};

    #[test]
    fn test_assign_and_unassign() {
        let mut state = default_state();
        let teacher = create_test_teacher(&mut state, "mreyes");
        let subject = create_test_subject(&mut state, "MATH1", "Algebra");

        assign_subject(&mut state, &teacher.id, &subject.id).unwrap();
        assign_subject(&mut state, &teacher.id, &subject.id).unwrap();
        assert_eq!(state.teacher_assignments[&teacher.id], vec![subject.id.clone()]);
        assert_eq!(state.subjects[0].teacher_id.as_deref(), Some(teacher.id.as_str()));

        unassign_subject(&mut state, &teacher.id, &subject.id).unwrap();
        assert!(!state.teacher_assignments.contains_key(&teacher.id));
        assert!(state.subjects[0].teacher_id.is_none());
        assert!(unassign_subject(&mut state, &teacher.id, &subject.id).is_err());
    }

    #[test]
    fn test_assign_requires_teacher_role() {
        let mut state = default_state();
        let subject = create_test_subject(&mut state, "MATH1", "Algebra");
        let admin_id = state.users[0].id.clone();
        assert!(matches!(
            assign_subject(&mut state, &admin_id, &subject.id).unwrap_err(),
            Error::InvalidTransition { .. }
        ));
    }

    #[test]
    fn test_reassignment_moves_subject() {
        let mut state = default_state();
        let first = create_test_teacher(&mut state, "first");
        let second = create_test_teacher(&mut state, "second");
        let subject = create_test_subject(&mut state, "MATH1", "Algebra");

        assign_subject(&mut state, &first.id, &subject.id).unwrap();
        assign_subject(&mut state, &second.id, &subject.id).unwrap();

        assert!(state.teacher_assignments[&first.id].is_empty());
        assert!(subjects_for_teacher(&state, &first).is_empty());
        assert_eq!(subjects_for_teacher(&state, &second).len(), 1);
    }

    #[test]
    fn test_subjects_for_teacher_uses_name_fallback() {
        let mut state = default_state();
        let teacher = state.users[1].clone();
        let named = create_test_subject(&mut state, "ENG1", "English");
        update_subject(
            &mut state,
            &named.id,
            SubjectUpdate {
                teacher_name: Some("Ms. Maria Clara".to_string()),
                ..SubjectUpdate::default()
            },
        )
        .unwrap();
        create_test_subject(&mut state, "SCI1", "Science");

        let owned = subjects_for_teacher(&state, &teacher);
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].id, named.id);
        assert!(can_grade(&state, &teacher, &named.id));
        assert!(can_grade(&state, &state.users[0], "SUB-0002"));
    }

    #[test]
    fn test_explicit_teacher_id_overrides_name_match() {
        let mut state = default_state();
        let default_teacher = state.users[1].clone();
        let other = create_test_teacher(&mut state, "other");
        let subject = create_test_subject(&mut state, "ENG1", "English");
        update_subject(
            &mut state,
            &subject.id,
            SubjectUpdate {
                teacher_name: Some("Maria Clara".to_string()),
                ..SubjectUpdate::default()
            },
        )
        .unwrap();
        assign_subject(&mut state, &other.id, &subject.id).unwrap();

        assert!(subjects_for_teacher(&state, &default_teacher).is_empty());
        assert_eq!(subjects_for_teacher(&state, &other).len(), 1);
    }
}
