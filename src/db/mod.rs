use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::core::{AppError, Result};

/// Apply pending embedded migrations.
///
/// Called by `DatabaseConfig::create_pool`; safe to call again on an
/// already-migrated store.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Migration failed: {}", e)))?;

    Ok(())
}

/// Decode a monetary TEXT column into a `Decimal`.
///
/// Monetary values are stored as decimal strings (SQLite REAL would drift);
/// a non-decimal value in one of these columns is corruption, not input.
pub(crate) fn decode_decimal(value: &str, column: &str) -> Result<Decimal> {
    Decimal::from_str(value).map_err(|e| {
        AppError::Internal(format!(
            "Invalid decimal '{}' in column {}: {}",
            value, column, e
        ))
    })
}
