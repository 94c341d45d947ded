//! Account operations: sign-up, login, passwords, roles and profiles.
//!
//! Passwords are stored and compared exactly as typed.

use crate::{
    core::model::{AccountStatus, PortalState, Role, User},
    errors::{Error, Result},
};
use chrono::Utc;
use tracing::{debug, info, warn};

/// Username of the built-in admin account. Its role can never change.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Shortest password accepted by sign-up and password changes.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Fields for a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Login name
    pub username: String,
    /// Email address (may be empty for student accounts)
    pub email: String,
    /// Password as typed
    pub password: String,
    /// Account role
    pub role: Role,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Linked student record
    pub student_id: Option<String>,
}

/// Self-service sign-up form.
#[derive(Debug, Clone)]
pub struct SignUpForm {
    /// Login name
    pub username: String,
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
    /// Password typed again
    pub confirm_password: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Requested role; admins cannot be self-registered
    pub role: Role,
}

impl SignUpForm {
    /// Form-level checks done before touching the store.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(Error::validation("Username is required"));
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(Error::validation("A valid email address is required"));
        }
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(Error::validation("First and last name are required"));
        }
        validate_password(&self.password)?;
        if self.password != self.confirm_password {
            return Err(Error::validation("Passwords do not match"));
        }
        if self.role == Role::Admin {
            return Err(Error::PermissionDenied {
                message: "Admin accounts can only be created by an admin".to_string(),
            });
        }
        Ok(())
    }
}

/// Profile fields a user may edit. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// New given name
    pub first_name: Option<String>,
    /// New family name
    pub last_name: Option<String>,
    /// New email address
    pub email: Option<String>,
}

fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

fn find_user_mut<'a>(state: &'a mut PortalState, user_id: &str) -> Result<&'a mut User> {
    state
        .users
        .iter_mut()
        .find(|u| u.id == user_id)
        .ok_or_else(|| Error::not_found("User", user_id))
}

/// Fails when `username` or a non-empty `email` belongs to another account.
pub(crate) fn ensure_unique_login(
    state: &PortalState,
    username: &str,
    email: &str,
    except_id: Option<&str>,
) -> Result<()> {
    let others = move || {
        state
            .users
            .iter()
            .filter(move |u| Some(u.id.as_str()) != except_id)
    };
    if others().any(|u| u.username.eq_ignore_ascii_case(username.trim())) {
        return Err(Error::Duplicate {
            field: "Username",
            value: username.trim().to_string(),
        });
    }
    let email = email.trim();
    if !email.is_empty() && others().any(|u| u.email.eq_ignore_ascii_case(email)) {
        return Err(Error::Duplicate {
            field: "Email",
            value: email.to_string(),
        });
    }
    Ok(())
}

/// Keeps `current_user` in step with the users collection.
pub(crate) fn refresh_current_user(state: &mut PortalState) {
    let Some(current_id) = state.current_user.as_ref().map(|u| u.id.clone()) else {
        return;
    };
    state.current_user = state.user(&current_id).cloned();
}

/// Creates an account after checking the login is unique.
pub fn create_account(state: &mut PortalState, account: NewAccount) -> Result<User> {
    let username = account.username.trim().to_string();
    if username.is_empty() {
        return Err(Error::validation("Username is required"));
    }
    if account.password.is_empty() {
        return Err(Error::validation("Password is required"));
    }
    ensure_unique_login(state, &username, &account.email, None)?;

    let user = User {
        id: state.next_id("USR")?,
        username,
        email: account.email.trim().to_string(),
        password: account.password,
        role: account.role,
        first_name: account.first_name.trim().to_string(),
        last_name: account.last_name.trim().to_string(),
        student_id: account.student_id,
        status: AccountStatus::Active,
        created_at: Utc::now(),
        last_login: None,
    };
    info!(user_id = %user.id, role = %user.role, "Account created");
    state.users.push(user.clone());
    Ok(user)
}

/// Registers a teacher or student account from the public sign-up form.
pub fn sign_up(state: &mut PortalState, form: SignUpForm) -> Result<User> {
    form.validate()?;
    create_account(
        state,
        NewAccount {
            username: form.username,
            email: form.email,
            password: form.password,
            role: form.role,
            first_name: form.first_name,
            last_name: form.last_name,
            student_id: None,
        },
    )
}

/// Finds an active account whose username or email equals `identifier` and
/// whose password matches exactly.
///
/// On success the account's `last_login` is stamped, it becomes the current
/// user, and the updated account is returned.
pub fn login(state: &mut PortalState, identifier: &str, password: &str) -> Option<User> {
    let identifier = identifier.trim();
    let Some(user) = state.users.iter_mut().find(|u| {
        let email_matches = !u.email.is_empty() && u.email.eq_ignore_ascii_case(identifier);
        (u.username == identifier || email_matches) && u.password == password
    }) else {
        debug!("Login rejected for '{}'", identifier);
        return None;
    };
    if user.status == AccountStatus::Inactive {
        warn!(user_id = %user.id, "Login attempt on inactive account");
        return None;
    }

    user.last_login = Some(Utc::now());
    let user = user.clone();
    info!(user_id = %user.id, "User logged in");
    state.current_user = Some(user.clone());
    Some(user)
}

/// Clears the current user.
pub fn logout(state: &mut PortalState) -> Option<User> {
    state.current_user.take()
}

/// Changes a password after checking the current one.
pub fn change_password(
    state: &mut PortalState,
    user_id: &str,
    current_password: &str,
    new_password: &str,
) -> Result<()> {
    validate_password(new_password)?;
    let user = find_user_mut(state, user_id)?;
    if user.password != current_password {
        return Err(Error::IncorrectPassword);
    }
    user.password = new_password.to_string();
    info!(user_id, "Password changed");
    refresh_current_user(state);
    Ok(())
}

/// Sets a new password without the current one (admin action).
pub fn reset_password(state: &mut PortalState, user_id: &str, new_password: &str) -> Result<()> {
    validate_password(new_password)?;
    find_user_mut(state, user_id)?.password = new_password.to_string();
    info!(user_id, "Password reset");
    refresh_current_user(state);
    Ok(())
}

/// Checks that `user` may stop being an admin.
fn guard_admin_removal(state: &PortalState, user: &User, action: &str) -> Result<()> {
    if user.username == DEFAULT_ADMIN_USERNAME {
        return Err(Error::transition(format!(
            "Cannot {action} the default admin account"
        )));
    }
    if user.role == Role::Admin && state.admin_count() <= 1 {
        return Err(Error::transition(format!(
            "Cannot {action} the last admin user"
        )));
    }
    Ok(())
}

/// Drops every subject a teacher holds, by assignment list or `teacher_id`.
fn release_subjects(state: &mut PortalState, user_id: &str) {
    state.teacher_assignments.remove(user_id);
    for subject in state
        .subjects
        .iter_mut()
        .filter(|s| s.teacher_id.as_deref() == Some(user_id))
    {
        subject.teacher_id = None;
        info!(user_id, subject_id = %subject.id, "Subject released");
    }
}

/// Changes an account's role.
///
/// The default admin's role is fixed, and the last admin cannot be demoted.
pub fn change_role(state: &mut PortalState, user_id: &str, role: Role) -> Result<User> {
    let user = state
        .user(user_id)
        .ok_or_else(|| Error::not_found("User", user_id))?;
    if user.role == role {
        return Ok(user.clone());
    }
    guard_admin_removal(state, user, "change role of")?;

    let user = find_user_mut(state, user_id)?;
    let previous = user.role;
    user.role = role;
    let user = user.clone();
    info!(user_id, from = %previous, to = %role, "Role changed");

    if previous == Role::Teacher {
        release_subjects(state, user_id);
    }
    refresh_current_user(state);
    Ok(user)
}

/// Updates name and email fields.
pub fn update_profile(state: &mut PortalState, user_id: &str, update: ProfileUpdate) -> Result<User> {
    if let Some(email) = update.email.as_deref() {
        if !email.trim().is_empty() && !email.contains('@') {
            return Err(Error::validation("A valid email address is required"));
        }
        let username = state
            .user(user_id)
            .ok_or_else(|| Error::not_found("User", user_id))?
            .username
            .clone();
        ensure_unique_login(state, &username, email, Some(user_id))?;
    }

    let user = find_user_mut(state, user_id)?;
    if let Some(first) = update.first_name {
        user.first_name = first.trim().to_string();
    }
    if let Some(last) = update.last_name {
        user.last_name = last.trim().to_string();
    }
    if let Some(email) = update.email {
        user.email = email.trim().to_string();
    }
    let user = user.clone();
    refresh_current_user(state);
    Ok(user)
}

/// Deletes an account. The default admin and the last admin are protected.
pub fn delete_user(state: &mut PortalState, user_id: &str) -> Result<User> {
    let user = state
        .user(user_id)
        .ok_or_else(|| Error::not_found("User", user_id))?;
    guard_admin_removal(state, user, "delete")?;

    let index = state
        .users
        .iter()
        .position(|u| u.id == user_id)
        .ok_or_else(|| Error::not_found("User", user_id))?;
    let removed = state.users.remove(index);

    release_subjects(state, user_id);
    if let Some(student_id) = removed.student_id.as_deref() {
        if let Some(student) = state.students.iter_mut().find(|s| s.id == student_id) {
            student.username = None;
        }
    }
    refresh_current_user(state);
    info!(user_id, "Account deleted");
    Ok(removed)
}

/// Accounts with the given role, in creation order.
#[must_use]
pub fn users_with_role(state: &PortalState, role: Role) -> Vec<&User> {
    state.users.iter().filter(|u| u.role == role).collect()
}

/// Looks up an account by id, username or email.
#[must_use]
pub fn resolve_user<'a>(state: &'a PortalState, key: &str) -> Option<&'a User> {
    let key = key.trim();
    state.user(key).or_else(|| {
        state.users.iter().find(|u| {
            u.username.eq_ignore_ascii_case(key)
                || (!u.email.is_empty() && u.email.eq_ignore_ascii_case(key))
        })
    })
}
