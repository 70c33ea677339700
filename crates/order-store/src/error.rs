use domain::ValidationError;
use sqlx::error::{DatabaseError, ErrorKind as DbErrorKind};
use thiserror::Error;

/// Errors that can occur when reading or writing the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Caller-supplied data was rejected before touching storage.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A uniqueness, referential, check or trigger rule was rejected by the
    /// database.
    #[error("Constraint violation during {operation} ({target}): {message}")]
    Constraint {
        operation: &'static str,
        target: String,
        message: String,
    },

    /// An order update targeted an id with no stored row.
    #[error("Not found during {operation}: {target}")]
    NotFound {
        operation: &'static str,
        target: String,
    },

    /// Any other database fault.
    #[error("Storage error during {operation} ({target}): {source}")]
    Storage {
        operation: &'static str,
        target: String,
        #[source]
        source: sqlx::Error,
    },

    /// A schema migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Coarse classification a caller can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Constraint,
    NotFound,
    Storage,
}

impl StoreError {
    /// Wraps a database error, sorting constraint violations from other faults.
    pub(crate) fn from_sqlx(
        operation: &'static str,
        target: impl Into<String>,
        err: sqlx::Error,
    ) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && is_constraint(db_err.as_ref())
        {
            return StoreError::Constraint {
                operation,
                target: target.into(),
                message: db_err.message().to_string(),
            };
        }
        StoreError::Storage {
            operation,
            target: target.into(),
            source: err,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Validation(_) => ErrorKind::Validation,
            StoreError::Constraint { .. } => ErrorKind::Constraint,
            StoreError::NotFound { .. } => ErrorKind::NotFound,
            StoreError::Storage { .. } | StoreError::Migration(_) => ErrorKind::Storage,
        }
    }
}

/// Primary result code shared by every `SQLITE_CONSTRAINT_*` extended code.
const SQLITE_CONSTRAINT: i32 = 19;

/// True for any member of the SQLite constraint family, including rules that
/// sqlx does not name (`SQLITE_CONSTRAINT_TRIGGER` from `RAISE(ABORT, ...)`).
fn is_constraint(db_err: &dyn DatabaseError) -> bool {
    if matches!(
        db_err.kind(),
        DbErrorKind::UniqueViolation
            | DbErrorKind::ForeignKeyViolation
            | DbErrorKind::NotNullViolation
            | DbErrorKind::CheckViolation
    ) {
        return true;
    }
    db_err
        .code()
        .and_then(|code| code.parse::<i32>().ok())
        .is_some_and(|code| code & 0xff == SQLITE_CONSTRAINT)
}

/// True when the error means the queried table does not exist yet.
pub(crate) fn is_missing_table(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.message().contains("no such table"))
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
