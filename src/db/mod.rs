pub mod employees;
pub mod hours;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod projects;
pub mod stats;

use crate::errors::AppError;

/// Map a SQLite unique/check failure to the domain constraint error.
/// Anything else stays a plain database error.
pub(crate) fn map_constraint(err: rusqlite::Error, what: &str) -> AppError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            AppError::ConstraintViolation(what.to_string())
        }
        _ => AppError::Db(err),
    }
}
