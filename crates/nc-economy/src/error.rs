//! Error types for the trait economy.

use nc_core::CoreError;

/// Errors raised by cost calculation and trait-value mutations.
#[derive(Debug, thiserror::Error)]
pub enum EconomyError {
    /// A value or request field is out of bounds or malformed.
    #[error("invalid {field}: {message}")]
    Validation {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// The request collides with existing state (e.g. a duplicate custom trait name).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The wallet cannot cover the purchase.
    #[error("not enough XP: have {current}, need {required}")]
    NotEnoughXp {
        /// Spendable experience.
        current: u32,
        /// Experience the purchase needs.
        required: u32,
    },

    /// The catalog or store is missing a document the operation depends on.
    #[error("missing {kind}: {name}")]
    MissingReference {
        /// Document kind.
        kind: &'static str,
        /// Name or id that could not be resolved.
        name: String,
    },

    /// The store rejected a read or write.
    #[error(transparent)]
    Store(#[from] CoreError),
}

impl EconomyError {
    /// Shorthand for a [`EconomyError::Validation`].
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Shorthand for a [`EconomyError::MissingReference`].
    pub fn missing(kind: &'static str, name: impl ToString) -> Self {
        Self::MissingReference {
            kind,
            name: name.to_string(),
        }
    }
}

/// Convenience result type for economy operations.
pub type EconomyResult<T> = Result<T, EconomyError>;
