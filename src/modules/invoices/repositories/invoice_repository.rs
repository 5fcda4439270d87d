// Invoice persistence: invoices and their line items move as one unit.
//
// Writes that span several statements take a caller-owned transaction so
// number allocation, the invoice row and its items commit or roll back
// together.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::core::{AppError, Result};
use crate::db::decode_decimal;
use crate::modules::invoices::models::{
    Invoice, InvoiceItem, InvoiceListFilter, InvoiceListRow, InvoiceRecord, InvoiceStatus,
    InvoiceUpdate, NewInvoiceItem,
};
use crate::modules::taxes::models::{GstRate, TaxTotals, TaxType};

/// Sentinel client that owns placeholder invoices. Inserted at the storage
/// layer on demand; intentionally not a valid GSTIN.
pub const PLACEHOLDER_CLIENT_GSTIN: &str = "SKIP00000000000";
const PLACEHOLDER_CLIENT_NAME: &str = "SKIPPED INVOICE";

/// Repository for invoice database operations
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert an invoice and its items within an existing transaction.
    ///
    /// A unique-constraint hit on the invoice number surfaces as a
    /// validation error; the caller's rollback leaves no rows behind.
    pub async fn insert_with_items(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        record: &InvoiceRecord,
        items: &[NewInvoiceItem],
    ) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO invoices (
                invoice_number, invoice_date, financial_year, month_str, serial_number,
                client_gstin, office_id, tax_type,
                taxable_value, cgst_amount, sgst_amount, igst_amount, grand_total, status,
                allotted_bank, allotted_branch, allotted_city, place_of_supply
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.invoice_number)
        .bind(record.invoice_date)
        .bind(&record.financial_year)
        .bind(&record.month_str)
        .bind(record.serial_number)
        .bind(&record.client_gstin)
        .bind(record.office_id)
        .bind(record.tax_type.to_string())
        .bind(record.totals.taxable_value.to_string())
        .bind(record.totals.cgst_amount.to_string())
        .bind(record.totals.sgst_amount.to_string())
        .bind(record.totals.igst_amount.to_string())
        .bind(record.totals.grand_total.to_string())
        .bind(record.status.to_string())
        .bind(&record.allotted.bank)
        .bind(&record.allotted.branch)
        .bind(&record.allotted.city)
        .bind(&record.allotted.place_of_supply)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            AppError::from_sqlx(
                e,
                format!("Invoice number '{}' already exists", record.invoice_number),
            )
        })?;

        let invoice_id = result.last_insert_rowid();

        self.insert_items(tx, invoice_id, items).await?;

        Ok(invoice_id)
    }

    /// Rewrite an invoice's mutable fields and totals within a transaction.
    ///
    /// The invoice number and its (FY, month, serial) bucket stay frozen at
    /// creation. A Cancelled invoice being edited is revived to Generated in
    /// the same statement.
    pub async fn update_with_totals(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        id: i64,
        update: &InvoiceUpdate,
        totals: &TaxTotals,
    ) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE invoices SET
                client_gstin = ?, office_id = ?, invoice_date = ?, tax_type = ?,
                taxable_value = ?, cgst_amount = ?, sgst_amount = ?, igst_amount = ?,
                grand_total = ?,
                allotted_bank = ?, allotted_branch = ?, allotted_city = ?, place_of_supply = ?,
                status = CASE WHEN status = 'Cancelled' THEN 'Generated' ELSE status END
            WHERE id = ?
            "#,
        )
        .bind(&update.client_gstin)
        .bind(update.office_id)
        .bind(update.invoice_date)
        .bind(update.tax_type.to_string())
        .bind(totals.taxable_value.to_string())
        .bind(totals.cgst_amount.to_string())
        .bind(totals.sgst_amount.to_string())
        .bind(totals.igst_amount.to_string())
        .bind(totals.grand_total.to_string())
        .bind(&update.allotted.bank)
        .bind(&update.allotted.branch)
        .bind(&update.allotted.city)
        .bind(&update.allotted.place_of_supply)
        .bind(id)
        .execute(&mut **tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Invoice with id {} not found",
                id
            )));
        }

        Ok(())
    }

    /// Replace the full item set, delete-then-reinsert, within the caller's
    /// transaction.
    pub async fn replace_items(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        invoice_id: i64,
        items: &[NewInvoiceItem],
    ) -> Result<()> {
        sqlx::query("DELETE FROM invoice_items WHERE invoice_id = ?")
            .bind(invoice_id)
            .execute(&mut **tx)
            .await?;

        self.insert_items(tx, invoice_id, items).await
    }

    async fn insert_items(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        invoice_id: i64,
        items: &[NewInvoiceItem],
    ) -> Result<()> {
        for item in items {
            sqlx::query(
                r#"
                INSERT INTO invoice_items (invoice_id, description, hsn_code, amount, gst_rate)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(invoice_id)
            .bind(&item.description)
            .bind(&item.hsn_code)
            .bind(item.amount.to_string())
            .bind(item.gst_rate.as_percent())
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }

    /// Make sure the sentinel client for placeholder invoices exists.
    pub async fn ensure_placeholder_client(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO clients (gstin, client_name, address)
            VALUES (?, ?, 'N/A')
            "#,
        )
        .bind(PLACEHOLDER_CLIENT_GSTIN)
        .bind(PLACEHOLDER_CLIENT_NAME)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Invoice>> {
        let row = sqlx::query_as::<_, InvoiceRow>(
            r#"
            SELECT id, invoice_number, invoice_date, financial_year, month_str, serial_number,
                   client_gstin, office_id, tax_type,
                   taxable_value, cgst_amount, sgst_amount, igst_amount, grand_total,
                   status, document_path,
                   allotted_bank, allotted_branch, allotted_city, place_of_supply, created_at
            FROM invoices
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(InvoiceRow::into_invoice).transpose()
    }

    pub async fn items_for_invoice(&self, invoice_id: i64) -> Result<Vec<InvoiceItem>> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, invoice_id, description, hsn_code, amount, gst_rate
            FROM invoice_items
            WHERE invoice_id = ?
            ORDER BY id
            "#,
        )
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ItemRow::into_item).collect()
    }

    /// Grand total and current status, read inside the ledger's
    /// transaction so the status derivation sees the payment it is part of.
    pub async fn financials(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        id: i64,
    ) -> Result<Option<(Decimal, InvoiceStatus)>> {
        let row: Option<(String, String)> =
            sqlx::query_as("SELECT grand_total, status FROM invoices WHERE id = ?")
                .bind(id)
                .fetch_optional(&mut **tx)
                .await?;

        let Some((grand_total, status)) = row else {
            return Ok(None);
        };

        let status = InvoiceStatus::from_str(&status)
            .map_err(|e| AppError::Internal(format!("Invalid status in database: {}", e)))?;

        Ok(Some((decode_decimal(&grand_total, "grand_total")?, status)))
    }

    /// Status write within the ledger's transaction.
    pub async fn set_status(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        id: i64,
        new_status: InvoiceStatus,
    ) -> Result<()> {
        sqlx::query("UPDATE invoices SET status = ? WHERE id = ?")
            .bind(new_status.to_string())
            .bind(id)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Direct status override. Bypasses payment-derived transitions; the
    /// only path to Cancelled outside the placeholder flow.
    pub async fn update_status(&self, id: i64, new_status: InvoiceStatus) -> Result<()> {
        let result = sqlx::query("UPDATE invoices SET status = ? WHERE id = ?")
            .bind(new_status.to_string())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Invoice with id {} not found",
                id
            )));
        }

        Ok(())
    }

    /// Record where the rendered document landed. Deliberately a separate
    /// small write: rendering happens after the invoice transaction has
    /// committed, and a rendering failure must not disturb the invoice.
    pub async fn set_document_path(&self, id: i64, path: &str) -> Result<()> {
        let result = sqlx::query("UPDATE invoices SET document_path = ? WHERE id = ?")
            .bind(path)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Invoice with id {} not found",
                id
            )));
        }

        Ok(())
    }

    /// The invoice register: invoices joined to client names, newest first.
    pub async fn list(&self, filter: &InvoiceListFilter) -> Result<Vec<InvoiceListRow>> {
        let mut sql = String::from(
            r#"
            SELECT i.id, i.invoice_number, i.invoice_date, c.client_name, i.client_gstin,
                   i.grand_total, i.status
            FROM invoices i
            JOIN clients c ON i.client_gstin = c.gstin
            WHERE 1=1
            "#,
        );

        if filter.month.is_some() {
            sql.push_str(" AND i.month_str = ?");
        }
        if filter.financial_year.is_some() {
            sql.push_str(" AND i.financial_year = ?");
        }
        if filter.calendar_year.is_some() {
            sql.push_str(" AND strftime('%Y', i.invoice_date) = ?");
        }

        sql.push_str(" ORDER BY i.invoice_date DESC, i.id DESC");

        let mut query = sqlx::query_as::<_, ListRow>(&sql);
        if let Some(month) = &filter.month {
            query = query.bind(month.clone());
        }
        if let Some(fy) = &filter.financial_year {
            query = query.bind(fy.clone());
        }
        if let Some(year) = filter.calendar_year {
            query = query.bind(format!("{:04}", year));
        }

        let rows = query.fetch_all(&self.pool).await?;

        rows.into_iter().map(ListRow::into_list_row).collect()
    }
}

// Helper structs for database mapping

#[derive(Debug, sqlx::FromRow)]
struct InvoiceRow {
    id: i64,
    invoice_number: String,
    invoice_date: NaiveDate,
    financial_year: String,
    month_str: String,
    serial_number: i64,
    client_gstin: String,
    office_id: i64,
    tax_type: String,
    taxable_value: String,
    cgst_amount: String,
    sgst_amount: String,
    igst_amount: String,
    grand_total: String,
    status: String,
    document_path: Option<String>,
    allotted_bank: Option<String>,
    allotted_branch: Option<String>,
    allotted_city: Option<String>,
    place_of_supply: Option<String>,
    created_at: Option<NaiveDateTime>,
}

impl InvoiceRow {
    fn into_invoice(self) -> Result<Invoice> {
        let tax_type = TaxType::from_str(&self.tax_type)
            .map_err(|e| AppError::Internal(format!("Invalid tax type in database: {}", e)))?;
        let status = InvoiceStatus::from_str(&self.status)
            .map_err(|e| AppError::Internal(format!("Invalid status in database: {}", e)))?;

        Ok(Invoice {
            id: self.id,
            invoice_number: self.invoice_number,
            invoice_date: self.invoice_date,
            financial_year: self.financial_year,
            month_str: self.month_str,
            serial_number: self.serial_number,
            client_gstin: self.client_gstin,
            office_id: self.office_id,
            tax_type,
            taxable_value: decode_decimal(&self.taxable_value, "taxable_value")?,
            cgst_amount: decode_decimal(&self.cgst_amount, "cgst_amount")?,
            sgst_amount: decode_decimal(&self.sgst_amount, "sgst_amount")?,
            igst_amount: decode_decimal(&self.igst_amount, "igst_amount")?,
            grand_total: decode_decimal(&self.grand_total, "grand_total")?,
            status,
            document_path: self.document_path,
            allotted_bank: self.allotted_bank,
            allotted_branch: self.allotted_branch,
            allotted_city: self.allotted_city,
            place_of_supply: self.place_of_supply,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    id: i64,
    invoice_id: i64,
    description: String,
    hsn_code: Option<String>,
    amount: String,
    gst_rate: i64,
}

impl ItemRow {
    fn into_item(self) -> Result<InvoiceItem> {
        Ok(InvoiceItem {
            id: self.id,
            invoice_id: self.invoice_id,
            description: self.description,
            hsn_code: self.hsn_code,
            amount: decode_decimal(&self.amount, "amount")?,
            gst_rate: GstRate::from_percent(self.gst_rate)?,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ListRow {
    id: i64,
    invoice_number: String,
    invoice_date: NaiveDate,
    client_name: String,
    client_gstin: String,
    grand_total: String,
    status: String,
}

impl ListRow {
    fn into_list_row(self) -> Result<InvoiceListRow> {
        let status = InvoiceStatus::from_str(&self.status)
            .map_err(|e| AppError::Internal(format!("Invalid status in database: {}", e)))?;

        Ok(InvoiceListRow {
            id: self.id,
            invoice_number: self.invoice_number,
            invoice_date: self.invoice_date,
            client_name: self.client_name,
            client_gstin: self.client_gstin,
            grand_total: decode_decimal(&self.grand_total, "grand_total")?,
            status,
        })
    }
}
