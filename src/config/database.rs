use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::core::{AppError, Result};

/// Where the billing database lives.
///
/// A config value, not a global: every repository and allocator receives a
/// pool built from one of these, so tests can run against independent
/// in-memory stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite file, or `None` for an in-memory store.
    pub path: Option<PathBuf>,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        let path = std::env::var("GSTBILL_DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("billing.db"));
        let max_connections = std::env::var("GSTBILL_DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|_| {
                AppError::Configuration("Invalid GSTBILL_DATABASE_MAX_CONNECTIONS".to_string())
            })?;

        Ok(DatabaseConfig {
            path: Some(path),
            max_connections,
        })
    }

    /// A database at an explicit file path.
    pub fn at_path(path: impl AsRef<Path>) -> Self {
        DatabaseConfig {
            path: Some(path.as_ref().to_path_buf()),
            max_connections: 5,
        }
    }

    /// An in-memory database, one per call. Used by tests.
    pub fn in_memory() -> Self {
        DatabaseConfig {
            path: None,
            max_connections: 1,
        }
    }

    /// Create a SQLite connection pool and run pending migrations.
    ///
    /// Foreign keys are enforced on every connection. An in-memory config is
    /// pinned to a single never-expiring connection, otherwise the store
    /// would vanish between acquires.
    pub async fn create_pool(&self) -> Result<SqlitePool> {
        let pool = match &self.path {
            Some(path) => {
                if let Some(dir) = path.parent() {
                    if !dir.as_os_str().is_empty() && !dir.exists() {
                        std::fs::create_dir_all(dir).map_err(|e| {
                            AppError::Configuration(format!(
                                "Cannot create database directory {}: {}",
                                dir.display(),
                                e
                            ))
                        })?;
                    }
                }

                let options = SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true)
                    .foreign_keys(true);

                SqlitePoolOptions::new()
                    .max_connections(self.max_connections)
                    .acquire_timeout(Duration::from_secs(30))
                    .connect_with(options)
                    .await?
            }
            None => {
                let options = SqliteConnectOptions::from_str("sqlite::memory:")
                    .map_err(AppError::Database)?
                    .foreign_keys(true);

                SqlitePoolOptions::new()
                    .max_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect_with(options)
                    .await?
            }
        };

        crate::db::run_migrations(&pool).await?;

        Ok(pool)
    }
}
