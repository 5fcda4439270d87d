use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::invoices::models::InvoiceStatus;

/// Aggregated GST figures for a financial year (optionally one month).
/// Cancelled invoices are excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GstSummary {
    pub total_taxable: Decimal,
    pub total_cgst: Decimal,
    pub total_sgst: Decimal,
    pub total_igst: Decimal,
    pub total_revenue: Decimal,
}

impl GstSummary {
    pub fn zero() -> Self {
        GstSummary {
            total_taxable: Decimal::ZERO,
            total_cgst: Decimal::ZERO,
            total_sgst: Decimal::ZERO,
            total_igst: Decimal::ZERO,
            total_revenue: Decimal::ZERO,
        }
    }
}

/// Filters for the outstanding-receivables listing. All optional and
/// combinable; bank and branch match as substrings, the GSTIN exactly.
#[derive(Debug, Clone, Default)]
pub struct PendingFilter {
    pub month: Option<String>,
    pub financial_year: Option<String>,
    pub bank: Option<String>,
    pub branch: Option<String>,
    pub client_gstin: Option<String>,
}

/// An invoice that is not fully paid, with its outstanding balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingPayment {
    pub invoice_id: i64,
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    pub client_name: String,
    pub client_gstin: String,
    pub grand_total: Decimal,
    pub total_received: Decimal,
    pub balance_due: Decimal,
    pub status: InvoiceStatus,
    pub allotted_bank: Option<String>,
    pub allotted_branch: Option<String>,
}

/// One row of the received-payments ledger: a payment joined to its
/// invoice's bucket and client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceivedPayment {
    pub payment_date: NaiveDate,
    pub client_name: String,
    pub invoice_number: String,
    pub amount_received: Decimal,
    pub payment_mode: Option<String>,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
}
