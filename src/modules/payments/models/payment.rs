use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A recorded payment against an invoice. Append-only: the ledger never
/// updates or deletes a payment row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub invoice_id: i64,
    pub amount_received: Decimal,
    pub payment_date: NaiveDate,
    pub payment_mode: Option<String>,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

/// Caller input for recording a payment.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub invoice_id: i64,
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    /// NEFT, IMPS, CHEQUE, CASH — free text, the UI constrains it.
    pub payment_mode: Option<String>,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
}
