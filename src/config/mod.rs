use std::path::Path;

use serde::{Deserialize, Serialize};

pub mod database;

pub use database::DatabaseConfig;

use crate::core::{AppError, Result};

/// Invoice numbers are PREFIX/FY/MM/NNNN; the prefix identifies the firm.
pub const DEFAULT_INVOICE_PREFIX: &str = "A4CA";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub log_level: String,
    pub invoice_prefix: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Ok(Config {
            app: AppConfig {
                log_level: std::env::var("GSTBILL_LOG_LEVEL")
                    .unwrap_or_else(|_| "info".to_string()),
                invoice_prefix: std::env::var("GSTBILL_INVOICE_PREFIX")
                    .unwrap_or_else(|_| DEFAULT_INVOICE_PREFIX.to_string()),
            },
            database: DatabaseConfig::from_env()?,
        })
    }

    /// Load from the shell's settings file (JSON). Falls back to `from_env`
    /// when the file is absent, so a fresh install works without one.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Self::from_env();
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Configuration(format!("Cannot read {}: {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&contents).map_err(|e| {
            AppError::Configuration(format!("Invalid settings in {}: {}", path.display(), e))
        })?;
        config.validate()?;

        Ok(config)
    }

    /// Persist to the settings file so the chosen database path survives
    /// restarts.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    AppError::Configuration(format!(
                        "Cannot create settings directory {}: {}",
                        dir.display(),
                        e
                    ))
                })?;
            }
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Configuration(format!("Cannot serialize settings: {}", e)))?;

        std::fs::write(path, contents).map_err(|e| {
            AppError::Configuration(format!("Cannot write {}: {}", path.display(), e))
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.app.invoice_prefix.trim().is_empty() {
            return Err(AppError::Configuration(
                "Invoice prefix must not be empty".to_string(),
            ));
        }
        if self.app.invoice_prefix.contains('/') {
            return Err(AppError::Configuration(
                "Invoice prefix must not contain '/'".to_string(),
            ));
        }

        Ok(())
    }
}
