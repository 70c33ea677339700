//! Application configuration loaded from environment variables.

use std::path::PathBuf;

/// Default storage file, relative to the working directory.
pub const DEFAULT_DATABASE_PATH: &str = "oddb.sqlite";

/// Runtime configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `POS_DATABASE_PATH` — SQLite file, created if missing (default: `"oddb.sqlite"`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            database_path: std::env::var("POS_DATABASE_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH)),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// Returns the `sqlite://` URL of the storage file.
    pub fn database_url(&self) -> String {
        format!("sqlite://{}", self.database_path.display())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            log_level: "info".to_string(),
        }
    }
}
