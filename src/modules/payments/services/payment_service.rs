use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::core::{AppError, Result};
use crate::modules::invoices::models::InvoiceStatus;
use crate::modules::invoices::repositories::InvoiceRepository;
use crate::modules::payments::models::{NewPayment, Payment};
use crate::modules::payments::repositories::PaymentRepository;

/// The payment-driven status transition.
///
/// Cancelled is absorbing: the ledger never overwrites it. Otherwise the
/// status follows the accumulated payment sum. Pure so it can be tested
/// without storage.
pub fn derive_status(
    current: InvoiceStatus,
    total_paid: Decimal,
    grand_total: Decimal,
) -> InvoiceStatus {
    if current == InvoiceStatus::Cancelled {
        return InvoiceStatus::Cancelled;
    }

    if total_paid >= grand_total {
        InvoiceStatus::Paid
    } else if total_paid > Decimal::ZERO {
        InvoiceStatus::PartiallyPaid
    } else {
        InvoiceStatus::Generated
    }
}

/// Service for recording payments and keeping invoice status consistent
/// with the ledger.
pub struct PaymentService {
    pool: SqlitePool,
    payments: PaymentRepository,
    invoices: InvoiceRepository,
}

impl PaymentService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            payments: PaymentRepository::new(pool.clone()),
            invoices: InvoiceRepository::new(pool.clone()),
            pool,
        }
    }

    /// Record a payment and re-derive the invoice status, all in one
    /// transaction. A non-positive amount is rejected before anything is
    /// written.
    pub async fn add_payment(&self, payment: NewPayment) -> Result<()> {
        if payment.amount <= Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Payment amount must be positive (got {})",
                payment.amount
            )));
        }

        let mut tx = self.pool.begin().await?;

        let (grand_total, current_status) = self
            .invoices
            .financials(&mut tx, payment.invoice_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Invoice with id {} not found", payment.invoice_id))
            })?;

        self.payments.insert(&mut tx, &payment).await?;

        let total_paid = self
            .payments
            .total_received_tx(&mut tx, payment.invoice_id)
            .await?;

        let new_status = derive_status(current_status, total_paid, grand_total);
        if new_status != current_status {
            self.invoices
                .set_status(&mut tx, payment.invoice_id, new_status)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(
            invoice_id = payment.invoice_id,
            amount = %payment.amount,
            status = %new_status,
            "payment recorded"
        );

        Ok(())
    }

    pub async fn payments_for_invoice(&self, invoice_id: i64) -> Result<Vec<Payment>> {
        self.payments.list_for_invoice(invoice_id).await
    }

    /// Decimal-accurate sum of everything received against an invoice.
    pub async fn total_received(&self, invoice_id: i64) -> Result<Decimal> {
        self.payments.total_received(invoice_id).await
    }
}
