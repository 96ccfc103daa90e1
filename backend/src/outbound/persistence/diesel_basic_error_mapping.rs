//! Translation of pool and Diesel failures into lesson store errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::LessonRepositoryError;

use super::pool::PoolError;

/// Every pool failure means the database is unreachable.
pub(crate) fn map_pool_error(error: PoolError) -> LessonRepositoryError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    LessonRepositoryError::connection(message)
}

/// Closed connections are connection errors; everything else is a query
/// error. Driver messages are logged at debug level and kept out of the
/// returned error.
pub(crate) fn map_diesel_error(error: DieselError) -> LessonRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            LessonRepositoryError::connection("database connection closed")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            LessonRepositoryError::query("referenced row does not exist")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            LessonRepositoryError::query("lesson violates a table constraint")
        }
        DieselError::NotFound => LessonRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => LessonRepositoryError::query("database query error"),
        _ => LessonRepositoryError::query("database error"),
    }
}
