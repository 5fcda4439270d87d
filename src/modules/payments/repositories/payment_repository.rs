use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::core::Result;
use crate::db::decode_decimal;
use crate::modules::payments::models::{NewPayment, Payment};

/// Repository for the payment ledger.
pub struct PaymentRepository {
    pool: SqlitePool,
}

impl PaymentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a payment row within the ledger's transaction.
    pub async fn insert(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        payment: &NewPayment,
    ) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO payments (
                invoice_id, amount_received, payment_date, payment_mode, reference_number, notes
            ) VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(payment.invoice_id)
        .bind(payment.amount.to_string())
        .bind(payment.payment_date)
        .bind(&payment.payment_mode)
        .bind(&payment.reference_number)
        .bind(&payment.notes)
        .execute(&mut **tx)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Sum of an invoice's payments, inside the ledger's transaction so it
    /// includes the row just inserted. Folded over `Decimal` in Rust —
    /// SQL SUM over the TEXT column would degrade to floats.
    pub async fn total_received_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        invoice_id: i64,
    ) -> Result<Decimal> {
        let amounts: Vec<String> =
            sqlx::query_scalar("SELECT amount_received FROM payments WHERE invoice_id = ?")
                .bind(invoice_id)
                .fetch_all(&mut **tx)
                .await?;

        sum_amounts(&amounts)
    }

    /// Pool-side variant of the payment sum, for reporting callers.
    pub async fn total_received(&self, invoice_id: i64) -> Result<Decimal> {
        let amounts: Vec<String> =
            sqlx::query_scalar("SELECT amount_received FROM payments WHERE invoice_id = ?")
                .bind(invoice_id)
                .fetch_all(&self.pool)
                .await?;

        sum_amounts(&amounts)
    }

    pub async fn list_for_invoice(&self, invoice_id: i64) -> Result<Vec<Payment>> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT id, invoice_id, amount_received, payment_date, payment_mode,
                   reference_number, notes, created_at
            FROM payments
            WHERE invoice_id = ?
            ORDER BY payment_date, id
            "#,
        )
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(PaymentRow::into_payment).collect()
    }
}

fn sum_amounts(amounts: &[String]) -> Result<Decimal> {
    let mut total = Decimal::ZERO;
    for amount in amounts {
        total += decode_decimal(amount, "amount_received")?;
    }
    Ok(total)
}

#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: i64,
    invoice_id: i64,
    amount_received: String,
    payment_date: NaiveDate,
    payment_mode: Option<String>,
    reference_number: Option<String>,
    notes: Option<String>,
    created_at: Option<NaiveDateTime>,
}

impl PaymentRow {
    fn into_payment(self) -> Result<Payment> {
        Ok(Payment {
            id: self.id,
            invoice_id: self.invoice_id,
            amount_received: decode_decimal(&self.amount_received, "amount_received")?,
            payment_date: self.payment_date,
            payment_mode: self.payment_mode,
            reference_number: self.reference_number,
            notes: self.notes,
            created_at: self.created_at,
        })
    }
}
