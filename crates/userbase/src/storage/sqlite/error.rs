//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `RepositoryError` from
//! `userbase_core::storage`. Constraint violations on the primary key become
//! `AlreadyExists`.

use userbase_core::storage::RepositoryError;

const ENTITY: &str = "User";

/// Maps a rusqlite error with a known user id to a RepositoryError.
///
/// # Error Mapping
///
/// - `SQLITE_CONSTRAINT_PRIMARYKEY` / `SQLITE_CONSTRAINT_UNIQUE` → `AlreadyExists`
/// - `SQLITE_CONSTRAINT_NOTNULL` → `InvalidData`
/// - Cannot open the database → `ConnectionFailed`
/// - All other errors → `QueryFailed`
pub fn map_rusqlite_error(err: &rusqlite::Error, id: &str) -> RepositoryError {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                || sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepositoryError::AlreadyExists {
                entity_type: ENTITY,
                id: id.to_string(),
            }
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_NOTNULL =>
        {
            RepositoryError::InvalidData(format!("Missing required column for {ENTITY} {id}"))
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            RepositoryError::ConnectionFailed(format!("Cannot open database: {err}"))
        }

        rusqlite::Error::FromSqlConversionFailure(..) => {
            RepositoryError::Serialization(err.to_string())
        }

        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps an error raised while calling into the connection thread.
///
/// Use this for failures outside a repository call, e.g. a closed connection.
pub fn map_tokio_rusqlite_error(err: tokio_rusqlite::Error) -> RepositoryError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => map_rusqlite_error(rusqlite_err, "unknown"),
        tokio_rusqlite::Error::Close(_) => {
            RepositoryError::ConnectionFailed("Connection closed unexpectedly".to_string())
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a failure to begin, commit or roll back a transaction.
pub fn map_transaction_error(err: tokio_rusqlite::Error) -> RepositoryError {
    match &err {
        tokio_rusqlite::Error::Close(_) => {
            RepositoryError::ConnectionFailed("Connection closed unexpectedly".to_string())
        }
        _ => RepositoryError::Transaction(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::ffi;

    fn sqlite_failure(code: rusqlite::ErrorCode, extended_code: i32) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(
            ffi::Error {
                code,
                extended_code,
            },
            None,
        )
    }

    #[test]
    fn test_primary_key_maps_to_already_exists() {
        let err = sqlite_failure(
            rusqlite::ErrorCode::ConstraintViolation,
            ffi::SQLITE_CONSTRAINT_PRIMARYKEY,
        );

        let result = map_rusqlite_error(&err, "u1");

        assert_eq!(
            result,
            RepositoryError::AlreadyExists {
                entity_type: "User",
                id: "u1".to_string(),
            }
        );
    }

    #[test]
    fn test_not_null_maps_to_invalid_data() {
        let err = sqlite_failure(
            rusqlite::ErrorCode::ConstraintViolation,
            ffi::SQLITE_CONSTRAINT_NOTNULL,
        );

        assert!(matches!(
            map_rusqlite_error(&err, "u1"),
            RepositoryError::InvalidData(_)
        ));
    }

    #[test]
    fn test_other_errors_map_to_query_failed() {
        let err = rusqlite::Error::InvalidQuery;

        assert!(matches!(
            map_rusqlite_error(&err, "u1"),
            RepositoryError::QueryFailed(_)
        ));
    }

    #[test]
    fn test_tokio_rusqlite_wraps_inner_error() {
        let err = tokio_rusqlite::Error::Rusqlite(sqlite_failure(
            rusqlite::ErrorCode::ConstraintViolation,
            ffi::SQLITE_CONSTRAINT_UNIQUE,
        ));

        assert!(matches!(
            map_tokio_rusqlite_error(err),
            RepositoryError::AlreadyExists { .. }
        ));
    }

    #[test]
    fn test_transaction_errors_map_to_transaction() {
        let err = tokio_rusqlite::Error::Other(Box::new(std::io::Error::other("busy")));

        assert!(matches!(
            map_transaction_error(err),
            RepositoryError::Transaction(_)
        ));
    }
}
