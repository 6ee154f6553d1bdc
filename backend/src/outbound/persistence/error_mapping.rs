//! Shared mapping from Diesel and pool failures to gateway errors.

use tracing::debug;

use super::pool::PoolError;

/// Failures surfaced by the persistence gateway.
///
/// Not-found is distinguishable from other failures so handlers can map
/// it to a client error; foreign-key violations are distinguishable so
/// writes against dangling references and deletes with dependents get
/// their own responses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// The requested row does not exist.
    #[error("record not found")]
    NotFound,

    /// A foreign-key constraint rejected the write.
    #[error("foreign key constraint violated: {message}")]
    ForeignKey { message: String },

    /// The pool could not supply a connection.
    #[error("database connection error: {message}")]
    Connection { message: String },

    /// The query itself failed.
    #[error("database query error: {message}")]
    Query { message: String },
}

/// Map pool errors to gateway errors.
pub fn map_pool_error(error: PoolError) -> RepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RepositoryError::Connection { message }
        }
    }
}

/// Map Diesel errors to gateway errors.
pub fn map_diesel_error(error: diesel::result::Error) -> RepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => RepositoryError::NotFound,
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            RepositoryError::ForeignKey {
                message: info.message().to_owned(),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RepositoryError::Connection {
                message: "database connection closed".to_owned(),
            }
        }
        _ => RepositoryError::Query {
            message: "database error".to_owned(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_map_to_connection() {
        let err = map_pool_error(PoolError::checkout("timed out"));

        assert!(matches!(err, RepositoryError::Connection { .. }));
        assert!(err.to_string().contains("timed out"));
    }

    #[rstest]
    fn missing_rows_map_to_not_found() {
        let err = map_diesel_error(diesel::result::Error::NotFound);

        assert_eq!(err, RepositoryError::NotFound);
    }

    #[rstest]
    fn other_diesel_errors_map_to_query() {
        let err = map_diesel_error(diesel::result::Error::RollbackTransaction);

        assert!(matches!(err, RepositoryError::Query { .. }));
    }
}
