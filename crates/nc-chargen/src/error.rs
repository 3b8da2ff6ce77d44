//! Error types for character generation.

use nc_core::CoreError;
use nc_economy::EconomyError;

/// Errors that abort a generation.
#[derive(Debug, thiserror::Error)]
pub enum ChargenError {
    /// Caller input or divider constraints are infeasible.
    #[error("invalid {field}: {message}")]
    Validation {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// The catalog lacks a document generation depends on.
    #[error("catalog is missing {kind} '{name}'")]
    MissingReference {
        /// Document kind.
        kind: &'static str,
        /// Name or id that could not be resolved.
        name: String,
    },

    /// No unused name was found within the attempt budget.
    #[error("no unique name found after {attempts} attempts")]
    NamesExhausted {
        /// Attempts made.
        attempts: u32,
    },

    /// A trait write failed.
    #[error(transparent)]
    Economy(#[from] EconomyError),

    /// The store rejected a read or write.
    #[error(transparent)]
    Store(#[from] CoreError),
}

impl ChargenError {
    /// Shorthand for a [`ChargenError::Validation`].
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Shorthand for a [`ChargenError::MissingReference`].
    pub fn missing(kind: &'static str, name: impl ToString) -> Self {
        Self::MissingReference {
            kind,
            name: name.to_string(),
        }
    }
}

/// Convenience result type for generation.
pub type ChargenResult<T> = Result<T, ChargenError>;
