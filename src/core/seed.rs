//! First-run data.
//!
//! Builds the default admin and teacher accounts and, when enabled, the sample
//! students, subjects and grades from [`SeedConfig`].

use crate::{
    config::seed::SeedConfig,
    core::{
        accounts::{DEFAULT_ADMIN_USERNAME, NewAccount, create_account},
        enrollment::{enroll_student, save_grade_record},
        grading::GradingPolicy,
        model::{PortalState, Role},
        students::{NewStudent, add_student},
        subjects::{NewSubject, add_subject, resolve_subject},
    },
    errors::{Error, Result},
};
use tracing::{debug, info};

/// Username of the built-in teacher account.
pub const DEFAULT_TEACHER_USERNAME: &str = "teacher";

/// Adds the default admin and teacher accounts that are not already present.
pub fn default_accounts(state: &mut PortalState, seed: &SeedConfig) -> Result<()> {
    let defaults = [
        NewAccount {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            email: "admin@school.edu".to_string(),
            password: seed.admin_password.clone(),
            role: Role::Admin,
            first_name: "System".to_string(),
            last_name: "Administrator".to_string(),
            student_id: None,
        },
        NewAccount {
            username: DEFAULT_TEACHER_USERNAME.to_string(),
            email: "teacher@school.edu".to_string(),
            password: seed.teacher_password.clone(),
            role: Role::Teacher,
            first_name: "Maria".to_string(),
            last_name: "Clara".to_string(),
            student_id: None,
        },
    ];

    for account in defaults {
        if state
            .users
            .iter()
            .any(|u| u.username.eq_ignore_ascii_case(&account.username))
        {
            continue;
        }
        create_account(state, account)?;
    }
    Ok(())
}

/// Adds the sample students, subjects and grades.
pub fn sample_data(state: &mut PortalState, seed: &SeedConfig, policy: &GradingPolicy) -> Result<()> {
    for student in &seed.students {
        add_student(
            state,
            NewStudent {
                first_name: student.first_name.clone(),
                middle_name: student.middle_name.clone(),
                last_name: student.last_name.clone(),
                course: student.course.clone(),
                year_level: student.year_level,
                section: student.section.clone(),
                username: Some(student.username.clone()),
                password: Some(student.password.clone()),
                ..NewStudent::default()
            },
        )?;
    }

    for subject in &seed.subjects {
        add_subject(
            state,
            NewSubject {
                code: subject.code.clone(),
                name: subject.name.clone(),
                grade_level: subject.grade_level,
                section: subject.section.clone(),
                teacher_name: subject.teacher_name.clone(),
                description: None,
            },
        )?;
    }

    for grade in &seed.grades {
        let student_id = state
            .students
            .iter()
            .find(|s| s.username.as_deref() == Some(grade.username.as_str()))
            .map(|s| s.id.clone())
            .ok_or_else(|| Error::Config {
                message: format!("Seed grade references unknown student '{}'", grade.username),
            })?;
        let subject_id = resolve_subject(state, &grade.subject_code)
            .map(|s| s.id.clone())
            .ok_or_else(|| Error::Config {
                message: format!(
                    "Seed grade references unknown subject '{}'",
                    grade.subject_code
                ),
            })?;

        if grade.midterm.is_none() && grade.final_score.is_none() {
            enroll_student(state, &student_id, &subject_id)?;
        } else {
            save_grade_record(
                state,
                &student_id,
                &subject_id,
                grade.midterm,
                grade.final_score,
                policy,
            )?;
        }
        debug!(student_id, subject_id, "Seeded enrollment");
    }
    Ok(())
}

/// A fresh portal: default accounts plus sample data when enabled.
pub fn seeded_state(seed: &SeedConfig, policy: &GradingPolicy) -> Result<PortalState> {
    let mut state = PortalState::default();
    default_accounts(&mut state, seed)?;
    if seed.sample_data {
        sample_data(&mut state, seed, policy)?;
    }
    info!(
        users = state.users.len(),
        students = state.students.len(),
        subjects = state.subjects.len(),
        "Seeded portal"
    );
    Ok(state)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{assignments::subjects_for_teacher, enrollment::enrollments_for};

    #[test]
    fn test_default_accounts() {
        let mut state = PortalState::default();
        default_accounts(&mut state, &SeedConfig::default()).unwrap();
        assert_eq!(state.users.len(), 2);
        assert_eq!(state.users[0].id, "USR-0001");
        assert_eq!(state.users[0].role, Role::Admin);
        assert_eq!(state.users[1].username, DEFAULT_TEACHER_USERNAME);

        // Running again adds nothing.
        default_accounts(&mut state, &SeedConfig::default()).unwrap();
        assert_eq!(state.users.len(), 2);
    }

    #[test]
    fn test_seeded_state_with_samples() {
        let state = seeded_state(&SeedConfig::default(), &GradingPolicy::default()).unwrap();
        assert_eq!(state.students.len(), 3);
        assert_eq!(state.subjects.len(), 3);
        // Two defaults plus one linked account per sample student.
        assert_eq!(state.users.len(), 5);

        let pedro = state
            .students
            .iter()
            .find(|s| s.username.as_deref() == Some("pedro"))
            .unwrap();
        assert_eq!(enrollments_for(&state, &pedro.id).len(), 2);

        let teacher = state.users[1].clone();
        let owned: Vec<&str> = subjects_for_teacher(&state, &teacher)
            .iter()
            .map(|s| s.code.as_str())
            .collect();
        assert_eq!(owned, vec!["IT101", "MATH101"]);
    }

    #[test]
    fn test_seeded_state_without_samples() {
        let seed = SeedConfig {
            sample_data: false,
            ..SeedConfig::default()
        };
        let state = seeded_state(&seed, &GradingPolicy::default()).unwrap();
        assert_eq!(state.users.len(), 2);
        assert!(state.students.is_empty());
        assert!(state.enrollments.is_empty());
    }
}
