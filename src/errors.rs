//! Unified error type for the grade portal.
//!
//! Store operations return the validation variants with a message that is safe
//! to show to the person who issued the command. Infrastructure failures wrap
//! their source error.

use thiserror::Error;

/// All errors produced by the portal, its storage and its command surface.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Input failed a form-level check (missing field, out-of-range score, ...)
    #[error("{message}")]
    Validation {
        /// Message shown to the caller
        message: String,
    },

    /// A referenced record does not exist
    #[error("{entity} '{id}' not found")]
    NotFound {
        /// Kind of record, e.g. "Student"
        entity: &'static str,
        /// Identifier that was looked up
        id: String,
    },

    /// A unique field is already taken
    #[error("{field} '{value}' is already in use")]
    Duplicate {
        /// Name of the unique field
        field: &'static str,
        /// Conflicting value
        value: String,
    },

    /// A state transition is not allowed (role guards, enrollment rules)
    #[error("{message}")]
    InvalidTransition {
        /// Message shown to the caller
        message: String,
    },

    /// Wrong current password on a password change
    #[error("Current password is incorrect")]
    IncorrectPassword,

    /// Caller is not logged in or lacks the required role
    #[error("{message}")]
    PermissionDenied {
        /// Message shown to the caller
        message: String,
    },

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Persisted snapshot could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Formatting a reply failed
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl Error {
    /// Shorthand for [`Error::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for [`Error::InvalidTransition`].
    pub fn transition(message: impl Into<String>) -> Self {
        Self::InvalidTransition {
            message: message.into(),
        }
    }

    /// Shorthand for [`Error::NotFound`].
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// True for errors caused by the caller's input rather than the system.
    ///
    /// The command layer shows these inline and logs everything else.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::NotFound { .. }
                | Self::Duplicate { .. }
                | Self::InvalidTransition { .. }
                | Self::IncorrectPassword
                | Self::PermissionDenied { .. }
        )
    }
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_shown_verbatim() {
        let err = Error::validation("First name is required");
        assert_eq!(err.to_string(), "First name is required");
        assert!(err.is_user_facing());
    }

    #[test]
    fn test_not_found_display() {
        let err = Error::not_found("Subject", "SUB-0009");
        assert_eq!(err.to_string(), "Subject 'SUB-0009' not found");
    }

    #[test]
    fn test_infrastructure_errors_are_not_user_facing() {
        let err: Error = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert!(!err.is_user_facing());
    }
}
