/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by the data model and the repository ports.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested document does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Document kind, e.g. `"trait"` or `"character"`.
        kind: &'static str,
        /// Identifier that was looked up.
        id: String,
    },

    /// The document changed since it was read; the write was rejected.
    #[error("stale write on {kind} {id}: expected version {expected}, found {found}")]
    StaleWrite {
        /// Document kind.
        kind: &'static str,
        /// Identifier of the document.
        id: String,
        /// Version the writer read.
        expected: u64,
        /// Version currently stored.
        found: u64,
    },

    /// A document with the same identity already exists.
    #[error("{kind} already exists: {id}")]
    Duplicate {
        /// Document kind.
        kind: &'static str,
        /// Identity that collided.
        id: String,
    },

    /// A definition violates its own invariants (e.g. `min_value > max_value`).
    #[error("invalid definition: {0}")]
    InvalidDefinition(String),

    /// A serialized catalog could not be parsed.
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`].
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}
