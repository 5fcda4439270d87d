// Reporting queries. Read-only by construction: nothing here takes a
// transaction or touches invoice status.
//
// Monetary aggregation happens in Rust over `Decimal`s decoded from the
// TEXT columns; SQL SUM would coerce them to floats.

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::core::{AppError, Result};
use crate::db::decode_decimal;
use crate::modules::invoices::models::InvoiceStatus;
use crate::modules::reports::models::{GstSummary, PendingFilter, PendingPayment, ReceivedPayment};

/// Repository for financial report aggregation queries
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// GST summary for a financial year, optionally narrowed to one month.
    async fn gst_summary(&self, financial_year: &str, month: Option<&str>) -> Result<GstSummary>;

    /// Invoices with an outstanding balance, filtered.
    async fn pending_payments(&self, filter: &PendingFilter) -> Result<Vec<PendingPayment>>;

    /// Payments received for invoices of a bucket, newest first.
    async fn received_payments(
        &self,
        month: Option<&str>,
        financial_year: Option<&str>,
    ) -> Result<Vec<ReceivedPayment>>;
}

pub struct SqliteReportRepository {
    pool: SqlitePool,
}

impl SqliteReportRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for SqliteReportRepository {
    async fn gst_summary(&self, financial_year: &str, month: Option<&str>) -> Result<GstSummary> {
        let mut sql = String::from(
            r#"
            SELECT taxable_value, cgst_amount, sgst_amount, igst_amount, grand_total
            FROM invoices
            WHERE financial_year = ? AND status != 'Cancelled'
            "#,
        );
        if month.is_some() {
            sql.push_str(" AND month_str = ?");
        }

        let mut query = sqlx::query_as::<_, GstRow>(&sql).bind(financial_year);
        if let Some(month) = month {
            query = query.bind(month.to_string());
        }

        let rows = query.fetch_all(&self.pool).await?;

        let mut summary = GstSummary::zero();
        for row in rows {
            summary.total_taxable += decode_decimal(&row.taxable_value, "taxable_value")?;
            summary.total_cgst += decode_decimal(&row.cgst_amount, "cgst_amount")?;
            summary.total_sgst += decode_decimal(&row.sgst_amount, "sgst_amount")?;
            summary.total_igst += decode_decimal(&row.igst_amount, "igst_amount")?;
            summary.total_revenue += decode_decimal(&row.grand_total, "grand_total")?;
        }

        Ok(summary)
    }

    async fn pending_payments(&self, filter: &PendingFilter) -> Result<Vec<PendingPayment>> {
        let mut sql = String::from(
            r#"
            SELECT i.id, i.invoice_number, i.invoice_date, c.client_name, i.client_gstin,
                   i.grand_total, i.status, i.allotted_bank, i.allotted_branch,
                   p.amount_received
            FROM invoices i
            JOIN clients c ON i.client_gstin = c.gstin
            LEFT JOIN payments p ON p.invoice_id = i.id
            WHERE i.status IN ('Generated', 'Partially Paid')
            "#,
        );

        if filter.month.is_some() {
            sql.push_str(" AND i.month_str = ?");
        }
        if filter.financial_year.is_some() {
            sql.push_str(" AND i.financial_year = ?");
        }
        if filter.bank.is_some() {
            sql.push_str(" AND i.allotted_bank LIKE ?");
        }
        if filter.branch.is_some() {
            sql.push_str(" AND i.allotted_branch LIKE ?");
        }
        if filter.client_gstin.is_some() {
            sql.push_str(" AND i.client_gstin = ?");
        }

        sql.push_str(" ORDER BY i.invoice_date ASC, i.id ASC");

        let mut query = sqlx::query_as::<_, PendingRow>(&sql);
        if let Some(month) = &filter.month {
            query = query.bind(month.clone());
        }
        if let Some(fy) = &filter.financial_year {
            query = query.bind(fy.clone());
        }
        if let Some(bank) = &filter.bank {
            query = query.bind(format!("%{}%", bank));
        }
        if let Some(branch) = &filter.branch {
            query = query.bind(format!("%{}%", branch));
        }
        if let Some(gstin) = &filter.client_gstin {
            query = query.bind(gstin.clone());
        }

        let rows = query.fetch_all(&self.pool).await?;

        // The LEFT JOIN yields one row per payment (or one with NULL for
        // none); fold them back into one entry per invoice, keeping order.
        let mut order: Vec<i64> = Vec::new();
        let mut by_invoice: HashMap<i64, PendingPayment> = HashMap::new();

        for row in rows {
            let received = match &row.amount_received {
                Some(amount) => decode_decimal(amount, "amount_received")?,
                None => Decimal::ZERO,
            };

            match by_invoice.get_mut(&row.id) {
                Some(entry) => {
                    entry.total_received += received;
                }
                None => {
                    let status = InvoiceStatus::from_str(&row.status).map_err(|e| {
                        AppError::Internal(format!("Invalid status in database: {}", e))
                    })?;

                    order.push(row.id);
                    by_invoice.insert(
                        row.id,
                        PendingPayment {
                            invoice_id: row.id,
                            invoice_number: row.invoice_number,
                            invoice_date: row.invoice_date,
                            client_name: row.client_name,
                            client_gstin: row.client_gstin,
                            grand_total: decode_decimal(&row.grand_total, "grand_total")?,
                            total_received: received,
                            balance_due: Decimal::ZERO,
                            status,
                            allotted_bank: row.allotted_bank,
                            allotted_branch: row.allotted_branch,
                        },
                    );
                }
            }
        }

        let mut results = Vec::with_capacity(order.len());
        for id in order {
            if let Some(mut entry) = by_invoice.remove(&id) {
                entry.balance_due = entry.grand_total - entry.total_received;
                results.push(entry);
            }
        }

        Ok(results)
    }

    async fn received_payments(
        &self,
        month: Option<&str>,
        financial_year: Option<&str>,
    ) -> Result<Vec<ReceivedPayment>> {
        let mut sql = String::from(
            r#"
            SELECT p.payment_date, c.client_name, i.invoice_number, p.amount_received,
                   p.payment_mode, p.reference_number, p.notes
            FROM payments p
            JOIN invoices i ON p.invoice_id = i.id
            JOIN clients c ON i.client_gstin = c.gstin
            WHERE 1=1
            "#,
        );

        if month.is_some() {
            sql.push_str(" AND i.month_str = ?");
        }
        if financial_year.is_some() {
            sql.push_str(" AND i.financial_year = ?");
        }

        sql.push_str(" ORDER BY p.payment_date DESC, p.id DESC");

        let mut query = sqlx::query_as::<_, ReceivedRow>(&sql);
        if let Some(month) = month {
            query = query.bind(month.to_string());
        }
        if let Some(fy) = financial_year {
            query = query.bind(fy.to_string());
        }

        let rows = query.fetch_all(&self.pool).await?;

        rows.into_iter()
            .map(|row| {
                Ok(ReceivedPayment {
                    payment_date: row.payment_date,
                    client_name: row.client_name,
                    invoice_number: row.invoice_number,
                    amount_received: decode_decimal(&row.amount_received, "amount_received")?,
                    payment_mode: row.payment_mode,
                    reference_number: row.reference_number,
                    notes: row.notes,
                })
            })
            .collect()
    }
}

#[derive(Debug, sqlx::FromRow)]
struct GstRow {
    taxable_value: String,
    cgst_amount: String,
    sgst_amount: String,
    igst_amount: String,
    grand_total: String,
}

#[derive(Debug, sqlx::FromRow)]
struct PendingRow {
    id: i64,
    invoice_number: String,
    invoice_date: NaiveDate,
    client_name: String,
    client_gstin: String,
    grand_total: String,
    status: String,
    allotted_bank: Option<String>,
    allotted_branch: Option<String>,
    amount_received: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct ReceivedRow {
    payment_date: NaiveDate,
    client_name: String,
    invoice_number: String,
    amount_received: String,
    payment_mode: Option<String>,
    reference_number: Option<String>,
    notes: Option<String>,
}
