//! Student records.
//!
//! Provides functions for creating, editing, searching and removing students.
//! A student created with a username and password also gets a linked student
//! account so they can log in and read their grades.

use crate::{
    core::{
        accounts::{self, NewAccount},
        model::{AccountStatus, PortalState, Role, Student},
    },
    errors::{Error, Result},
};
use chrono::Utc;
use tracing::{info, warn};

/// Highest year level accepted on a student or subject.
pub const MAX_YEAR_LEVEL: u8 = 6;

/// Admin form for a new student.
#[derive(Debug, Clone, Default)]
pub struct NewStudent {
    /// Given name
    pub first_name: String,
    /// Middle name
    pub middle_name: Option<String>,
    /// Family name
    pub last_name: String,
    /// Degree program
    pub course: String,
    /// Year level
    pub year_level: u8,
    /// Section label
    pub section: String,
    /// Phone number
    pub contact_number: Option<String>,
    /// Email address
    pub email: Option<String>,
    /// Home address
    pub address: Option<String>,
    /// Guardian's name
    pub guardian_name: Option<String>,
    /// Guardian's phone number
    pub guardian_contact: Option<String>,
    /// Username for the linked account
    pub username: Option<String>,
    /// Password for the linked account
    pub password: Option<String>,
}

/// Edits to a student. `None` leaves a field unchanged; an empty string
/// clears an optional field.
#[derive(Debug, Clone, Default)]
pub struct StudentUpdate {
    /// Given name
    pub first_name: Option<String>,
    /// Middle name
    pub middle_name: Option<String>,
    /// Family name
    pub last_name: Option<String>,
    /// Degree program
    pub course: Option<String>,
    /// Year level
    pub year_level: Option<u8>,
    /// Section label
    pub section: Option<String>,
    /// Phone number
    pub contact_number: Option<String>,
    /// Email address
    pub email: Option<String>,
    /// Home address
    pub address: Option<String>,
    /// Guardian's name
    pub guardian_name: Option<String>,
    /// Guardian's phone number
    pub guardian_contact: Option<String>,
}

/// Search criteria for the student list. Empty criteria match everyone.
#[derive(Debug, Clone, Default)]
pub struct StudentFilter {
    /// Case-insensitive text searched in id, names and username
    pub query: Option<String>,
    /// Exact course (case-insensitive)
    pub course: Option<String>,
    /// Exact year level
    pub year_level: Option<u8>,
    /// Exact section (case-insensitive)
    pub section: Option<String>,
    /// Exact status
    pub status: Option<AccountStatus>,
}

fn required(value: &str, label: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(format!("{label} is required")));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Checks a year level is within 1..=`MAX_YEAR_LEVEL`.
pub fn validate_year_level(year_level: u8) -> Result<u8> {
    if (1..=MAX_YEAR_LEVEL).contains(&year_level) {
        Ok(year_level)
    } else {
        Err(Error::validation(format!(
            "Year level must be between 1 and {MAX_YEAR_LEVEL}"
        )))
    }
}

/// Looks up a student by id.
#[must_use]
pub fn find_student<'a>(state: &'a PortalState, student_id: &str) -> Option<&'a Student> {
    state.students.iter().find(|s| s.id == student_id)
}

fn find_student_mut<'a>(state: &'a mut PortalState, student_id: &str) -> Result<&'a mut Student> {
    state
        .students
        .iter_mut()
        .find(|s| s.id == student_id)
        .ok_or_else(|| Error::not_found("Student", student_id))
}

/// Adds a student, creating the linked account when credentials are given.
pub fn add_student(state: &mut PortalState, new: NewStudent) -> Result<Student> {
    let first_name = required(&new.first_name, "First name")?;
    let last_name = required(&new.last_name, "Last name")?;
    let course = required(&new.course, "Course")?;
    let section = required(&new.section, "Section")?;
    let year_level = validate_year_level(new.year_level)?;
    let email = optional(new.email);
    let username = optional(new.username);

    let id = state.next_id("STU")?;

    if let Some(username) = username.as_deref() {
        let password = new
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| Error::validation("A password is required for the student account"))?;
        accounts::create_account(
            state,
            NewAccount {
                username: username.to_string(),
                email: email.clone().unwrap_or_default(),
                password: password.to_string(),
                role: Role::Student,
                first_name: first_name.clone(),
                last_name: last_name.clone(),
                student_id: Some(id.clone()),
            },
        )?;
    }

    let student = Student {
        id,
        first_name,
        middle_name: optional(new.middle_name),
        last_name,
        course,
        year_level,
        section,
        contact_number: optional(new.contact_number),
        email,
        address: optional(new.address),
        guardian_name: optional(new.guardian_name),
        guardian_contact: optional(new.guardian_contact),
        username,
        status: AccountStatus::Active,
        created_at: Utc::now(),
    };
    info!(student_id = %student.id, "Student added");
    state.students.push(student.clone());
    Ok(student)
}

/// Applies edits to a student and mirrors name and email onto the linked account.
pub fn update_student(
    state: &mut PortalState,
    student_id: &str,
    update: StudentUpdate,
) -> Result<Student> {
    let mut student = find_student(state, student_id)
        .cloned()
        .ok_or_else(|| Error::not_found("Student", student_id))?;

    if let Some(v) = update.first_name {
        student.first_name = required(&v, "First name")?;
    }
    if let Some(v) = update.last_name {
        student.last_name = required(&v, "Last name")?;
    }
    if let Some(v) = update.course {
        student.course = required(&v, "Course")?;
    }
    if let Some(v) = update.section {
        student.section = required(&v, "Section")?;
    }
    if let Some(v) = update.year_level {
        student.year_level = validate_year_level(v)?;
    }
    if update.middle_name.is_some() {
        student.middle_name = optional(update.middle_name);
    }
    if update.contact_number.is_some() {
        student.contact_number = optional(update.contact_number);
    }
    if update.email.is_some() {
        student.email = optional(update.email);
    }
    if update.address.is_some() {
        student.address = optional(update.address);
    }
    if update.guardian_name.is_some() {
        student.guardian_name = optional(update.guardian_name);
    }
    if update.guardian_contact.is_some() {
        student.guardian_contact = optional(update.guardian_contact);
    }

    if let Some(user) = state
        .users
        .iter()
        .find(|u| u.student_id.as_deref() == Some(student_id))
    {
        accounts::ensure_unique_login(
            state,
            &user.username,
            student.email.as_deref().unwrap_or_default(),
            Some(&user.id),
        )?;
    }

    for user in state
        .users
        .iter_mut()
        .filter(|u| u.student_id.as_deref() == Some(student_id))
    {
        user.first_name.clone_from(&student.first_name);
        user.last_name.clone_from(&student.last_name);
        user.email = student.email.clone().unwrap_or_default();
    }

    *find_student_mut(state, student_id)? = student.clone();
    accounts::refresh_current_user(state);
    info!(student_id, "Student updated");
    Ok(student)
}

/// Activates or deactivates a student and their linked account.
pub fn set_student_status(
    state: &mut PortalState,
    student_id: &str,
    status: AccountStatus,
) -> Result<Student> {
    let student = find_student_mut(state, student_id)?;
    student.status = status;
    let student = student.clone();
    for user in state
        .users
        .iter_mut()
        .filter(|u| u.student_id.as_deref() == Some(student_id))
    {
        user.status = status;
    }
    accounts::refresh_current_user(state);
    info!(student_id, %status, "Student status changed");
    Ok(student)
}

/// Removes a student, the linked account and the student's enrollment list.
pub fn delete_student(state: &mut PortalState, student_id: &str) -> Result<Student> {
    let index = state
        .students
        .iter()
        .position(|s| s.id == student_id)
        .ok_or_else(|| Error::not_found("Student", student_id))?;
    let removed = state.students.remove(index);

    state
        .users
        .retain(|u| u.student_id.as_deref() != Some(student_id));
    if let Some(records) = state.enrollments.remove(student_id) {
        if !records.is_empty() {
            warn!(
                student_id,
                count = records.len(),
                "Dropped grade records of deleted student"
            );
        }
    }
    accounts::refresh_current_user(state);
    info!(student_id, "Student deleted");
    Ok(removed)
}

/// Students matching `filter`, ordered by last then first name.
#[must_use]
pub fn search_students<'a>(state: &'a PortalState, filter: &StudentFilter) -> Vec<&'a Student> {
    let query = filter
        .query
        .as_deref()
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());

    let mut found: Vec<&Student> = state
        .students
        .iter()
        .filter(|s| {
            filter
                .course
                .as_deref()
                .is_none_or(|c| s.course.eq_ignore_ascii_case(c.trim()))
        })
        .filter(|s| filter.year_level.is_none_or(|y| s.year_level == y))
        .filter(|s| {
            filter
                .section
                .as_deref()
                .is_none_or(|c| s.section.eq_ignore_ascii_case(c.trim()))
        })
        .filter(|s| filter.status.is_none_or(|st| s.status == st))
        .filter(|s| {
            query.as_deref().is_none_or(|q| {
                s.id.to_lowercase().contains(q)
                    || s.full_name().to_lowercase().contains(q)
                    || s.list_name().to_lowercase().contains(q)
                    || s.username.as_deref().is_some_and(|u| u.to_lowercase().contains(q))
            })
        })
        .collect();

    found.sort_by(|a, b| {
        a.last_name
            .to_lowercase()
            .cmp(&b.last_name.to_lowercase())
            .then_with(|| a.first_name.to_lowercase().cmp(&b.first_name.to_lowercase()))
    });
    found
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::accounts::login;
    use crate::test_utils::{create_test_student, default_state, new_student};

    #[test]
    fn test_add_student_validation() {
        let mut state = default_state();

        let mut missing = new_student("Ana", "Reyes");
        missing.course = "  ".to_string();
        assert_eq!(
            add_student(&mut state, missing).unwrap_err().to_string(),
            "Course is required"
        );

        let mut bad_year = new_student("Ana", "Reyes");
        bad_year.year_level = 9;
        assert!(add_student(&mut state, bad_year).is_err());

        let mut no_password = new_student("Ana", "Reyes");
        no_password.username = Some("ana".to_string());
        assert!(add_student(&mut state, no_password).is_err());
        assert!(state.students.is_empty());
    }

    #[test]
    fn test_add_student_creates_linked_account() {
        let mut state = default_state();
        let mut form = new_student("Ana", "Reyes");
        form.username = Some("ana".to_string());
        form.password = Some("student1".to_string());
        form.email = Some("ana@school.edu".to_string());

        let student = add_student(&mut state, form).unwrap();
        assert_eq!(student.id, "STU-0001");

        let account = login(&mut state, "ana", "student1").unwrap();
        assert_eq!(account.role, Role::Student);
        assert_eq!(account.student_id.as_deref(), Some("STU-0001"));
    }

    #[test]
    fn test_duplicate_username_adds_nothing() {
        let mut state = default_state();
        let mut form = new_student("Ana", "Reyes");
        form.username = Some("teacher".to_string());
        form.password = Some("student1".to_string());
        assert!(matches!(
            add_student(&mut state, form).unwrap_err(),
            Error::Duplicate { .. }
        ));
        assert!(state.students.is_empty());
    }

    #[test]
    fn test_update_student_syncs_account() {
        let mut state = default_state();
        let mut form = new_student("Ana", "Reyes");
        form.username = Some("ana".to_string());
        form.password = Some("student1".to_string());
        let student = add_student(&mut state, form).unwrap();

        let updated = update_student(
            &mut state,
            &student.id,
            StudentUpdate {
                last_name: Some("Santos".to_string()),
                email: Some("ana.santos@school.edu".to_string()),
                ..StudentUpdate::default()
            },
        )
        .unwrap();
        assert_eq!(updated.last_name, "Santos");

        let account = state.users.iter().find(|u| u.username == "ana").unwrap();
        assert_eq!(account.last_name, "Santos");
        assert_eq!(account.email, "ana.santos@school.edu");
    }

    #[test]
    fn test_update_clears_optional_field_with_empty_string() {
        let mut state = default_state();
        let mut form = new_student("Ana", "Reyes");
        form.address = Some("Manila".to_string());
        let student = add_student(&mut state, form).unwrap();

        let updated = update_student(
            &mut state,
            &student.id,
            StudentUpdate {
                address: Some(String::new()),
                ..StudentUpdate::default()
            },
        )
        .unwrap();
        assert!(updated.address.is_none());
    }

    #[test]
    fn test_deactivated_student_cannot_log_in() {
        let mut state = default_state();
        let mut form = new_student("Ana", "Reyes");
        form.username = Some("ana".to_string());
        form.password = Some("student1".to_string());
        let student = add_student(&mut state, form).unwrap();

        set_student_status(&mut state, &student.id, AccountStatus::Inactive).unwrap();
        assert!(login(&mut state, "ana", "student1").is_none());
    }

    #[test]
    fn test_delete_student_removes_account_and_enrollments() {
        let mut state = default_state();
        let mut form = new_student("Ana", "Reyes");
        form.username = Some("ana".to_string());
        form.password = Some("student1".to_string());
        let student = add_student(&mut state, form).unwrap();
        state.enrollments.insert(student.id.clone(), Vec::new());

        let account_id = state
            .users
            .iter()
            .find(|u| u.student_id.as_deref() == Some(student.id.as_str()))
            .unwrap()
            .id
            .clone();

        delete_student(&mut state, &student.id).unwrap();
        assert!(find_student(&state, &student.id).is_none());
        assert!(state.user(&account_id).is_none());
        assert!(
            !state
                .users
                .iter()
                .any(|u| u.student_id.as_deref() == Some(student.id.as_str()))
        );
        assert!(login(&mut state, "ana", "student1").is_none());
        assert!(!state.enrollments.contains_key(&student.id));

        assert!(matches!(
            delete_student(&mut state, &student.id).unwrap_err(),
            Error::NotFound { .. }
        ));
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let mut state = default_state();
        let mut form = new_student("Ana", "Reyes");
        form.username = Some("ana".to_string());
        form.password = Some("student1".to_string());
        let first = add_student(&mut state, form).unwrap();
        let first_account = state.users.last().unwrap().id.clone();

        delete_student(&mut state, &first.id).unwrap();

        let mut form = new_student("Ben", "Cruz");
        form.username = Some("ben".to_string());
        form.password = Some("student1".to_string());
        let second = add_student(&mut state, form).unwrap();
        let second_account = state.users.last().unwrap().id.clone();

        assert_eq!(first.id, "STU-0001");
        assert_eq!(second.id, "STU-0002");
        assert_ne!(first_account, second_account);
    }

    #[test]
    fn test_search_students() {
        let mut state = default_state();
        create_test_student(&mut state, "Zed", "Alonzo");
        let mut form = new_student("Ben", "Cruz");
        form.section = "B".to_string();
        add_student(&mut state, form).unwrap();
        create_test_student(&mut state, "Ana", "Alonzo");

        let all = search_students(&state, &StudentFilter::default());
        let names: Vec<String> = all.iter().map(|s| s.full_name()).collect();
        assert_eq!(names, vec!["Ana Alonzo", "Zed Alonzo", "Ben Cruz"]);

        let section_b = search_students(
            &state,
            &StudentFilter {
                section: Some("b".to_string()),
                ..StudentFilter::default()
            },
        );
        assert_eq!(section_b.len(), 1);

        let query = search_students(
            &state,
            &StudentFilter {
                query: Some("alonzo, z".to_string()),
                ..StudentFilter::default()
            },
        );
        assert_eq!(query.len(), 1);
        assert_eq!(query[0].first_name, "Zed");
    }
}
