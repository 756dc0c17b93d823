/// Service error taxonomy
///
/// Service operations return `ServiceResult<T>`; lower-level failures are
/// wrapped with a contextual action message and kept as the error source,
/// so the full "Error <action>: <cause>" chain survives to the log while
/// the API layer decides how much of it to expose.

use crate::cache::CacheError;

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Unified service error
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The requested entity does not exist, or is not visible to the
    /// caller. Invisible and absent are deliberately indistinguishable.
    #[error("{0}")]
    NotFound(String),

    /// The caller is known but not allowed to perform the operation
    #[error("{0}")]
    Forbidden(String),

    /// A uniqueness rule was violated (e.g. duplicate tag label)
    #[error("{0}")]
    Conflict(String),

    /// Input rejected before reaching the store
    #[error("{0}")]
    Validation(String),

    /// The backing store failed
    #[error("{context}: {source}")]
    Database {
        context: String,
        #[source]
        source: sqlx::Error,
    },

    /// The cache failed in a path where it cannot be treated as
    /// best-effort (currently only surfaced by health tooling; request
    /// paths degrade to the store instead)
    #[error("{context}: {source}")]
    Cache {
        context: String,
        #[source]
        source: CacheError,
    },
}

impl ServiceError {
    /// Wraps a database error with an action context
    ///
    /// Unique-constraint violations become `Conflict` so callers can
    /// surface them as such instead of as opaque store failures.
    pub fn db(context: impl Into<String>, source: sqlx::Error) -> Self {
        let context = context.into();

        if let sqlx::Error::Database(ref db_err) = source {
            if db_err.is_unique_violation() {
                return ServiceError::Conflict(format!("{}: duplicate value", context));
            }
        }

        ServiceError::Database { context, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = ServiceError::NotFound("no task for user 2 with id 9".to_string());
        assert_eq!(err.to_string(), "no task for user 2 with id 9");
    }

    #[test]
    fn test_database_display_chains_context() {
        let err = ServiceError::db("Error creating task", sqlx::Error::RowNotFound);
        let rendered = err.to_string();
        assert!(rendered.starts_with("Error creating task: "));
    }
}
