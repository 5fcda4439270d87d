use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::core::{AppError, Result};
use crate::modules::invoices::models::{
    AllottedDetails, InvoiceDetails, InvoiceListFilter, InvoiceListRow, InvoiceRecord,
    InvoiceStatus, InvoiceUpdate, NewInvoice, NewInvoiceItem,
};
use crate::modules::invoices::repositories::InvoiceRepository;
use crate::modules::invoices::services::numbering::{
    financial_year, month_token, parse_serial, NumberAllocator, FALLBACK_SERIAL,
};
use crate::modules::masters::repositories::{ClientRepository, OfficeRepository};
use crate::modules::taxes::models::{GstRate, TaxTotals, TaxType, TaxableLine};
use crate::modules::taxes::services::TaxCalculator;

/// Service for the invoice lifecycle: numbering, totals, persistence.
pub struct InvoiceService {
    pool: SqlitePool,
    repository: InvoiceRepository,
    clients: ClientRepository,
    offices: OfficeRepository,
    allocator: NumberAllocator,
    calculator: TaxCalculator,
}

impl InvoiceService {
    pub fn new(pool: SqlitePool, invoice_prefix: impl Into<String>) -> Self {
        let allocator = NumberAllocator::new(pool.clone(), invoice_prefix);
        Self {
            repository: InvoiceRepository::new(pool.clone()),
            clients: ClientRepository::new(pool.clone()),
            offices: OfficeRepository::new(pool.clone()),
            allocator,
            calculator: TaxCalculator::new(),
            pool,
        }
    }

    /// What the next invoice number for `date` would be. Read-only and
    /// idempotent — calling it repeatedly without creating an invoice
    /// returns the same answer.
    pub async fn preview_number(&self, date: NaiveDate) -> Result<(String, i64)> {
        self.allocator.preview(date).await
    }

    /// Create an invoice: compute totals, mint or accept a number, persist
    /// invoice and items in one transaction. Returns (id, number).
    pub async fn create_invoice(&self, new: NewInvoice) -> Result<(i64, String)> {
        let lines: Vec<TaxableLine> = new.items.iter().map(|i| i.taxable_line()).collect();
        let totals = self.calculator.compute(&lines, new.tax_type)?;

        let fy = financial_year(new.invoice_date);
        let month = month_token(new.invoice_date);

        let mut tx = self.pool.begin().await?;

        let (invoice_number, serial_number) = match &new.manual_number {
            Some(manual) => {
                let manual = manual.trim();
                if manual.is_empty() {
                    return Err(AppError::validation("Manual invoice number cannot be empty"));
                }
                // Record the embedded serial so later allocations skip past
                // it; an unparseable number gets the out-of-band sentinel.
                let serial = parse_serial(manual).unwrap_or_else(|| {
                    tracing::debug!(
                        invoice_number = manual,
                        "manual invoice number has no parseable serial, recording sentinel"
                    );
                    FALLBACK_SERIAL
                });
                (manual.to_string(), serial)
            }
            None => {
                let serial = self.allocator.next_serial(&mut tx, &fy, &month).await?;
                (self.allocator.format_number(&fy, &month, serial), serial)
            }
        };

        let record = InvoiceRecord {
            invoice_number: invoice_number.clone(),
            invoice_date: new.invoice_date,
            financial_year: fy,
            month_str: month,
            serial_number,
            client_gstin: new.client_gstin,
            office_id: new.office_id,
            tax_type: new.tax_type,
            totals,
            status: InvoiceStatus::Generated,
            allotted: new.allotted,
        };

        let invoice_id = self
            .repository
            .insert_with_items(&mut tx, &record, &new.items)
            .await?;

        tx.commit().await?;

        tracing::info!(invoice_id, invoice_number = %invoice_number, "invoice created");

        Ok((invoice_id, invoice_number))
    }

    /// Re-edit an invoice: recompute totals, replace the item set, revive a
    /// Cancelled invoice to Generated. The invoice number is not reissued.
    pub async fn update_invoice(&self, id: i64, update: InvoiceUpdate) -> Result<()> {
        let lines: Vec<TaxableLine> = update.items.iter().map(|i| i.taxable_line()).collect();
        let totals = self.calculator.compute(&lines, update.tax_type)?;

        let mut tx = self.pool.begin().await?;

        self.repository
            .update_with_totals(&mut tx, id, &update, &totals)
            .await?;
        self.repository
            .replace_items(&mut tx, id, &update.items)
            .await?;

        tx.commit().await?;

        tracing::info!(invoice_id = id, "invoice updated");

        Ok(())
    }

    /// The invoice joined with its items and the client and office
    /// snapshots the document layer renders. `None` if the id is unknown.
    pub async fn get_invoice_details(&self, id: i64) -> Result<Option<InvoiceDetails>> {
        let Some(invoice) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };

        let items = self.repository.items_for_invoice(id).await?;
        let client = self.clients.find_by_gstin(&invoice.client_gstin).await?;
        let office = self.offices.find_by_id(invoice.office_id).await?;

        Ok(Some(InvoiceDetails {
            invoice,
            items,
            client,
            office,
        }))
    }

    /// Manual status override. The only way to set Cancelled outside the
    /// placeholder flow, and the only way to un-cancel without an edit.
    pub async fn change_status(&self, id: i64, new_status: InvoiceStatus) -> Result<()> {
        self.repository.update_status(id, new_status).await?;
        tracing::info!(invoice_id = id, status = %new_status, "invoice status overridden");
        Ok(())
    }

    /// Reserve the next invoice number without issuing a real invoice.
    ///
    /// Creates a placeholder: sentinel client, Cancelled status, a single
    /// zero-amount item. The serial is consumed permanently — cancelled
    /// invoices still count toward the bucket maximum.
    pub async fn reserve_number(&self, date: NaiveDate, office_id: i64) -> Result<(i64, String)> {
        let fy = financial_year(date);
        let month = month_token(date);

        let mut tx = self.pool.begin().await?;

        self.repository.ensure_placeholder_client(&mut tx).await?;

        let serial = self.allocator.next_serial(&mut tx, &fy, &month).await?;
        let invoice_number = self.allocator.format_number(&fy, &month, serial);

        let record = InvoiceRecord {
            invoice_number: invoice_number.clone(),
            invoice_date: date,
            financial_year: fy,
            month_str: month,
            serial_number: serial,
            client_gstin: crate::modules::invoices::repositories::PLACEHOLDER_CLIENT_GSTIN
                .to_string(),
            office_id,
            tax_type: TaxType::None,
            totals: TaxTotals::zero(),
            status: InvoiceStatus::Cancelled,
            allotted: AllottedDetails {
                place_of_supply: Some("N/A".to_string()),
                ..AllottedDetails::default()
            },
        };

        let placeholder_item = NewInvoiceItem {
            description: "PLACEHOLDER - Invoice number reserved for future use".to_string(),
            hsn_code: None,
            amount: Decimal::ZERO,
            gst_rate: GstRate::Zero,
        };

        let invoice_id = self
            .repository
            .insert_with_items(&mut tx, &record, std::slice::from_ref(&placeholder_item))
            .await?;

        tx.commit().await?;

        tracing::info!(invoice_id, invoice_number = %invoice_number, "invoice number reserved");

        Ok((invoice_id, invoice_number))
    }

    /// Persist the rendered document's path. Runs after (and independent
    /// of) the invoice transaction.
    pub async fn set_document_path(&self, id: i64, path: &str) -> Result<()> {
        self.repository.set_document_path(id, path).await
    }

    /// The invoice register listing for the UI and the export layer.
    pub async fn list_invoices(&self, filter: &InvoiceListFilter) -> Result<Vec<InvoiceListRow>> {
        self.repository.list(filter).await
    }
}
