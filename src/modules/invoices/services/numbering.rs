// Invoice number allocation.
//
// Numbers are PREFIX/FY/MM/NNNN. The serial is scoped to the
// (financial_year, month) bucket, resets monthly, and always continues past
// the historical maximum — gaps from cancelled or skipped invoices are
// never backfilled. The typed serial_number column is the sequence source;
// string parsing only feeds it when manual numbers are recorded.

use chrono::{Datelike, NaiveDate};
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::core::Result;

/// Serial recorded for a manual number whose trailing segment does not
/// parse. Out-of-band: real serials start at 1, so 0 never contributes to
/// the bucket maximum and repeated malformed entries cannot collide with
/// the sequence. The number string itself stays unique via the storage
/// constraint.
pub const FALLBACK_SERIAL: i64 = 0;

/// Serial width inside the formatted number.
const SERIAL_DIGITS: usize = 4;

/// Financial-year code for a date, e.g. "2526" for April 2025 – March 2026.
/// The FY runs April to March: dates in Jan–Mar belong to the year that
/// started the previous April.
pub fn financial_year(date: NaiveDate) -> String {
    let (start_year, end_year) = if date.month() >= 4 {
        (date.year(), date.year() + 1)
    } else {
        (date.year() - 1, date.year())
    };

    format!("{:02}{:02}", start_year.rem_euclid(100), end_year.rem_euclid(100))
}

/// Zero-padded calendar month token, e.g. "04".
pub fn month_token(date: NaiveDate) -> String {
    format!("{:02}", date.month())
}

/// Extract the serial from a formatted invoice number.
///
/// Requires exactly four `/`-separated segments with an all-digit tail;
/// anything else — foreign formats, manual typos — returns `None` and is
/// tolerated by callers, never fatal.
pub fn parse_serial(number: &str) -> Option<i64> {
    let parts: Vec<&str> = number.split('/').collect();
    if parts.len() != 4 {
        return None;
    }

    let tail = parts[3];
    if tail.is_empty() || !tail.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    tail.parse().ok()
}

/// Mints the next invoice number for a date.
///
/// Constructed with the firm's prefix; holds a pool for previews, and
/// exposes a transaction-scoped variant so allocation and insertion commit
/// together.
#[derive(Clone)]
pub struct NumberAllocator {
    pool: SqlitePool,
    prefix: String,
}

impl NumberAllocator {
    pub fn new(pool: SqlitePool, prefix: impl Into<String>) -> Self {
        Self {
            pool,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Format a full invoice number from its parts.
    pub fn format_number(&self, fy: &str, month: &str, serial: i64) -> String {
        format!(
            "{}/{}/{}/{:0width$}",
            self.prefix,
            fy,
            month,
            serial,
            width = SERIAL_DIGITS
        )
    }

    /// The next number for `date`, without consuming it. Idempotent until
    /// an invoice is actually created in the bucket.
    pub async fn preview(&self, date: NaiveDate) -> Result<(String, i64)> {
        let fy = financial_year(date);
        let month = month_token(date);

        let max = max_serial(&self.pool, &fy, &month).await?;
        let serial = max + 1;

        Ok((self.format_number(&fy, &month, serial), serial))
    }

    /// The next serial for a bucket, inside the caller's transaction.
    ///
    /// An empty bucket yields 1; otherwise one past the maximum ever
    /// recorded, counting cancelled and placeholder invoices.
    pub async fn next_serial(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        fy: &str,
        month: &str,
    ) -> Result<i64> {
        let max = max_serial(&mut **tx, fy, month).await?;
        Ok(max + 1)
    }
}

async fn max_serial<'e, E>(executor: E, fy: &str, month: &str) -> Result<i64>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let max: i64 = sqlx::query_scalar(
        r#"
        SELECT COALESCE(MAX(serial_number), 0)
        FROM invoices
        WHERE financial_year = ? AND month_str = ?
        "#,
    )
    .bind(fy)
    .bind(month)
    .fetch_one(executor)
    .await?;

    Ok(max)
}
