use async_graphql::ErrorExtensions;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum AtriumError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unique constraint violated on {model}.{field}")]
    UniqueViolation {
        model: &'static str,
        field: &'static str,
    },

    #[error("unknown database profile: {0}")]
    UnknownProfile(String),

    #[error("duplicate model `{0}` in catalog")]
    DuplicateModel(&'static str),

    #[error("model `{model}` has no table `{table}`; was the schema synced?")]
    MissingTable {
        model: &'static str,
        table: &'static str,
    },

    #[error("association target `{target}` not present in registry (declared by `{model}`)")]
    UnknownAssociationTarget {
        model: &'static str,
        target: &'static str,
    },
}

impl AtriumError {
    /// Transient failures worth another attempt during schema sync.
    /// Constraint and wiring errors are deterministic and never retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AtriumError::Database(_) | AtriumError::Io(_))
    }
}

/// Maps domain errors onto GraphQL error extensions so clients get a stable
/// `code` (and the offending `field` for constraint violations) instead of
/// having to parse the message text.
impl ErrorExtensions for AtriumError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| match self {
            AtriumError::UniqueViolation { field, .. } => {
                e.set("code", "UNIQUE_VIOLATION");
                e.set("field", *field);
            }
            AtriumError::Database(_) | AtriumError::Io(_) => {
                e.set("code", "INTERNAL_ERROR");
            }
            _ => {
                e.set("code", "INVALID_REQUEST");
            }
        })
    }
}
