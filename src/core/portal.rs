//! The persisted portal.
//!
//! [`Portal`] owns the in-memory [`PortalState`] and writes it back to the
//! database after every successful mutation. Mutations run against a draft
//! copy, so a failed operation or a failed write leaves the live state as it
//! was.

use crate::{
    config::{seed::SeedConfig, settings::AppSettings},
    core::{grading::GradingPolicy, model::PortalState, seed, storage},
    errors::Result,
};
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{debug, info, instrument, warn};

/// In-memory portal backed by one storage row.
#[derive(Debug)]
pub struct Portal {
    db: DatabaseConnection,
    storage_key: String,
    policy: GradingPolicy,
    state: PortalState,
}

impl Portal {
    /// Rehydrates the portal stored under the configured key, seeding a fresh
    /// one when nothing is stored yet.
    ///
    /// A stored portal without any users gets the default accounts back.
    #[instrument(skip(db, settings), fields(key = %settings.storage.key))]
    pub async fn open(db: DatabaseConnection, settings: &AppSettings) -> Result<Self> {
        let storage_key = settings.storage.key.clone();
        let state = match storage::load_snapshot(&db, &storage_key).await? {
            Some(mut state) => {
                if state.users.is_empty() {
                    warn!("Stored portal has no accounts, restoring defaults");
                    seed::default_accounts(&mut state, &settings.seed)?;
                    storage::save_snapshot(&db, &storage_key, &state).await?;
                }
                state
            }
            None => {
                let state = seed::seeded_state(&settings.seed, &settings.grading)?;
                storage::save_snapshot(&db, &storage_key, &state).await?;
                state
            }
        };
        info!(
            students = state.students.len(),
            subjects = state.subjects.len(),
            users = state.users.len(),
            "Portal ready"
        );

        Ok(Self {
            db,
            storage_key,
            policy: settings.grading.clone(),
            state,
        })
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &PortalState {
        &self.state
    }

    /// Grading policy in effect.
    #[must_use]
    pub const fn policy(&self) -> &GradingPolicy {
        &self.policy
    }

    /// Storage key the portal is written under.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Runs `op` on a draft of the state, persists the draft, then makes it
    /// current.
    ///
    /// # Errors
    /// Returns the operation's error, or the storage error if the write
    /// fails. The live state is unchanged in both cases.
    pub async fn apply<T, F>(&mut self, op: F) -> Result<T>
    where
        F: FnOnce(&mut PortalState, &GradingPolicy) -> Result<T>,
    {
        let mut draft = self.state.clone();
        let value = op(&mut draft, &self.policy)?;
        storage::save_snapshot(&self.db, &self.storage_key, &draft).await?;
        self.state = draft;
        Ok(value)
    }

    /// Discards everything and seeds a fresh portal.
    ///
    /// The old row is removed and the seeded one written in one transaction.
    #[instrument(skip(self, seed_config))]
    pub async fn reset(&mut self, seed_config: &SeedConfig) -> Result<()> {
        let fresh = seed::seeded_state(seed_config, &self.policy)?;
        let txn = self.db.begin().await?;
        let existed = storage::clear_snapshot(&txn, &self.storage_key).await?;
        storage::save_snapshot(&txn, &self.storage_key, &fresh).await?;
        txn.commit().await?;
        debug!(existed, "Replaced stored portal");
        self.state = fresh;
        warn!("Portal reset to seed data");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{
        accounts::login,
        model::Role,
        storage::{load_snapshot, save_snapshot},
        students::add_student,
    };
    use crate::errors::Error;
    use crate::test_utils::{init_test_tracing, new_student, setup_test_db};

    fn settings_without_samples() -> AppSettings {
        let mut settings = AppSettings::default();
        settings.seed.sample_data = false;
        settings
    }

    #[tokio::test]
    async fn test_open_seeds_once() {
        init_test_tracing();
        let db = setup_test_db().await.unwrap();
        let settings = AppSettings::default();

        let first = Portal::open(db.clone(), &settings).await.unwrap();
        assert_eq!(first.state().users.len(), 5);
        assert_eq!(first.state().students.len(), 3);

        let second = Portal::open(db.clone(), &settings).await.unwrap();
        assert_eq!(second.state(), first.state());
    }

    #[tokio::test]
    async fn test_mutation_persists_and_reopens_equal() {
        let db = setup_test_db().await.unwrap();
        let settings = settings_without_samples();
        let mut portal = Portal::open(db.clone(), &settings).await.unwrap();

        let student = portal
            .apply(|state, _| add_student(state, new_student("Ana", "Reyes")))
            .await
            .unwrap();
        assert_eq!(student.id, "STU-0001");

        let reopened = Portal::open(db, &settings).await.unwrap();
        assert_eq!(reopened.state(), portal.state());
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_state_untouched() {
        let db = setup_test_db().await.unwrap();
        let settings = settings_without_samples();
        let mut portal = Portal::open(db.clone(), &settings).await.unwrap();
        let before = portal.state().clone();

        let err = portal
            .apply(|state, _| {
                add_student(state, new_student("Ana", "Reyes"))?;
                add_student(state, new_student("", "Cruz"))
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert_eq!(portal.state(), &before);

        let stored = load_snapshot(&db, portal.storage_key()).await.unwrap().unwrap();
        assert_eq!(stored, before);
    }

    #[tokio::test]
    async fn test_login_is_persisted() {
        let db = setup_test_db().await.unwrap();
        let settings = settings_without_samples();
        let mut portal = Portal::open(db.clone(), &settings).await.unwrap();

        let user = portal
            .apply(|state, _| Ok(login(state, "admin", "admin123")))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.role, Role::Admin);

        let reopened = Portal::open(db, &settings).await.unwrap();
        let current = reopened.state().current_user.clone().unwrap();
        assert_eq!(current.id, user.id);
        assert!(current.last_login.is_some());
    }

    #[tokio::test]
    async fn test_empty_users_restores_defaults() {
        let db = setup_test_db().await.unwrap();
        let settings = settings_without_samples();
        save_snapshot(&db, &settings.storage.key, &PortalState::default())
            .await
            .unwrap();

        let portal = Portal::open(db, &settings).await.unwrap();
        assert_eq!(portal.state().users.len(), 2);
        assert!(portal.state().students.is_empty());
    }

    #[tokio::test]
    async fn test_reset_reseeds() {
        let db = setup_test_db().await.unwrap();
        let settings = settings_without_samples();
        let mut portal = Portal::open(db.clone(), &settings).await.unwrap();
        portal
            .apply(|state, _| add_student(state, new_student("Ana", "Reyes")))
            .await
            .unwrap();

        portal.reset(&settings.seed).await.unwrap();
        assert!(portal.state().students.is_empty());
        assert_eq!(portal.state().users.len(), 2);

        let stored = load_snapshot(&db, portal.storage_key()).await.unwrap().unwrap();
        assert_eq!(&stored, portal.state());
    }
}
