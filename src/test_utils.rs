//! Shared test utilities for the grade portal.
//!
//! This module provides helpers for setting up test databases and building
//! portal state with sensible defaults.

#![allow(clippy::expect_used)]

use crate::{
    config::seed::SeedConfig,
    core::{
        accounts::{NewAccount, create_account},
        model::{PortalState, Role, Student, Subject, User},
        seed,
        students::{NewStudent, add_student},
        subjects::{NewSubject, add_subject},
    },
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all persistence tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Installs a tracing subscriber that writes through the test harness.
/// Safe to call from several tests.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

/// A portal holding only the default accounts.
///
/// # Defaults
/// * `users[0]`: admin `admin` / `admin123`
/// * `users[1]`: teacher `teacher` / `teacher123`, named Maria Clara
pub fn default_state() -> PortalState {
    let mut state = PortalState::default();
    seed::default_accounts(&mut state, &SeedConfig::default())
        .expect("default accounts are valid");
    state
}

/// Adds a teacher account named after `username`.
///
/// # Defaults
/// * `email`: `{username}@school.edu`
/// * `password`: `password1`
/// * `first_name`: `username`, `last_name`: `Teacher`
pub fn create_test_teacher(state: &mut PortalState, username: &str) -> User {
    create_account(
        state,
        NewAccount {
            username: username.to_string(),
            email: format!("{username}@school.edu"),
            password: "password1".to_string(),
            role: Role::Teacher,
            first_name: username.to_string(),
            last_name: "Teacher".to_string(),
            student_id: None,
        },
    )
    .expect("test teacher is valid")
}

/// Student form with sensible defaults and no linked account.
///
/// # Defaults
/// * `course`: `BSIT`
/// * `year_level`: 1
/// * `section`: `A`
pub fn new_student(first_name: &str, last_name: &str) -> NewStudent {
    NewStudent {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        course: "BSIT".to_string(),
        year_level: 1,
        section: "A".to_string(),
        ..NewStudent::default()
    }
}

/// Adds a student built by [`new_student`].
pub fn create_test_student(state: &mut PortalState, first_name: &str, last_name: &str) -> Student {
    add_student(state, new_student(first_name, last_name)).expect("test student is valid")
}

/// Subject form with sensible defaults.
///
/// # Defaults
/// * `grade_level`: 1
/// * `section`: `A`
/// * `teacher_name`: empty
pub fn new_subject(code: &str, name: &str) -> NewSubject {
    NewSubject {
        code: code.to_string(),
        name: name.to_string(),
        grade_level: 1,
        section: "A".to_string(),
        ..NewSubject::default()
    }
}

/// Adds a subject built by [`new_subject`].
pub fn create_test_subject(state: &mut PortalState, code: &str, name: &str) -> Subject {
    add_subject(state, new_subject(code, name)).expect("test subject is valid")
}
