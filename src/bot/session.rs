//! Chat sessions and role guards.
//!
//! A session ties a Discord user to a portal account after `/login`. Role
//! groups check the session before running and send the caller back to
//! `/login` when it is missing or carries the wrong role.

use crate::{
    core::model::{AccountStatus, PortalState, Role, User},
    errors::{Error, Result},
};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Discord user id to portal account id.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<u64, String>>,
}

impl SessionStore {
    /// Records that `discord_id` is logged in as `account_id`.
    pub async fn sign_in(&self, discord_id: u64, account_id: &str) {
        self.sessions
            .write()
            .await
            .insert(discord_id, account_id.to_string());
        debug!(discord_id, account_id, "Session opened");
    }

    /// Ends the session of `discord_id`, returning the account it held.
    pub async fn sign_out(&self, discord_id: u64) -> Option<String> {
        self.sessions.write().await.remove(&discord_id)
    }

    /// Account id `discord_id` is logged in as.
    pub async fn account_id(&self, discord_id: u64) -> Option<String> {
        self.sessions.read().await.get(&discord_id).cloned()
    }

    /// Ends every session that points at `account_id`.
    pub async fn drop_account(&self, account_id: &str) {
        self.sessions
            .write()
            .await
            .retain(|_, held| held != account_id);
    }

    /// Ends every session.
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }
}

/// Where each role lands after logging in.
#[must_use]
pub const fn home_command(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin overview",
        Role::Teacher => "/teacher subjects",
        Role::Student => "/student grades",
    }
}

fn redirect(message: &str) -> Error {
    Error::PermissionDenied {
        message: format!("{message} Redirecting you to `/login`."),
    }
}

/// Resolves the session's account and checks it has one of `allowed` roles.
///
/// Missing sessions, deleted or inactive accounts and wrong roles all fail
/// with [`Error::PermissionDenied`].
pub fn authorize(state: &PortalState, account_id: Option<&str>, allowed: &[Role]) -> Result<User> {
    let Some(account_id) = account_id else {
        return Err(redirect("You are not logged in."));
    };
    let Some(user) = state.user(account_id) else {
        return Err(redirect("Your account no longer exists."));
    };
    if user.status == AccountStatus::Inactive {
        return Err(redirect("Your account is inactive."));
    }
    if !allowed.contains(&user.role) {
        let names: Vec<&str> = allowed.iter().map(|r| r.as_str()).collect();
        return Err(redirect(&format!(
            "This area is only for {} accounts.",
            names.join(" or ")
        )));
    }
    Ok(user.clone())
}
