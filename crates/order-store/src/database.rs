use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use tokio::sync::{Mutex, MutexGuard};

use crate::{Result, StoreError};

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Handle to the single SQLite connection shared by every store.
///
/// Cloning the handle shares the connection. Operations serialize on it, so
/// there is exactly one writer at a time. Tests build one handle per case.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<SqliteConnection>>,
}

impl Database {
    /// Opens (creating if missing) the database file at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);
        Self::connect(options, &path.display().to_string()).await
    }

    /// Opens a private in-memory database.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| StoreError::from_sqlx("open database", ":memory:", e))?
            .foreign_keys(true);
        Self::connect(options, ":memory:").await
    }

    async fn connect(options: SqliteConnectOptions, target: &str) -> Result<Self> {
        let conn = options
            .connect()
            .await
            .map_err(|e| StoreError::from_sqlx("open database", target, e))?;
        tracing::info!(database = %target, "database connection opened");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Applies pending schema migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), MigrateError> {
        let mut conn = self.conn.lock().await;
        MIGRATOR.run(&mut *conn).await
    }

    /// Locks the connection for the duration of one store operation.
    pub(crate) async fn acquire(&self) -> MutexGuard<'_, SqliteConnection> {
        self.conn.lock().await
    }

    /// Closes the connection.
    ///
    /// If other clones of the handle are still alive the connection stays
    /// open and is closed when the last clone is dropped.
    pub async fn close(self) -> Result<()> {
        match Arc::try_unwrap(self.conn) {
            Ok(conn) => {
                conn.into_inner()
                    .close()
                    .await
                    .map_err(|e| StoreError::from_sqlx("close database", "connection", e))?;
                tracing::info!("database connection closed");
            }
            Err(_) => {
                tracing::debug!("database handle still shared, deferring close");
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}
