use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::line_item::{InvoiceItem, NewInvoiceItem};
use crate::modules::masters::models::{Client, Office};
use crate::modules::taxes::models::{TaxTotals, TaxType};

/// Invoice lifecycle status.
///
/// The string encodings are a persisted wire contract shared with the
/// reporting and UI layers; exact spelling matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    /// Issued, no payment recorded yet
    #[serde(rename = "Generated")]
    Generated,

    /// Payments recorded, but less than the grand total
    #[serde(rename = "Partially Paid")]
    PartiallyPaid,

    /// Payments cover the grand total
    #[serde(rename = "Paid")]
    Paid,

    /// Terminal override; also used by placeholder invoices that only
    /// reserve a serial
    #[serde(rename = "Cancelled")]
    Cancelled,
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Generated
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvoiceStatus::Generated => write!(f, "Generated"),
            InvoiceStatus::PartiallyPaid => write!(f, "Partially Paid"),
            InvoiceStatus::Paid => write!(f, "Paid"),
            InvoiceStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Generated" => Ok(InvoiceStatus::Generated),
            "Partially Paid" => Ok(InvoiceStatus::PartiallyPaid),
            "Paid" => Ok(InvoiceStatus::Paid),
            "Cancelled" => Ok(InvoiceStatus::Cancelled),
            _ => Err(format!("Invalid invoice status: {}", s)),
        }
    }
}

/// A persisted invoice row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    pub financial_year: String,
    pub month_str: String,
    pub serial_number: i64,
    pub client_gstin: String,
    pub office_id: i64,
    pub tax_type: TaxType,
    pub taxable_value: Decimal,
    pub cgst_amount: Decimal,
    pub sgst_amount: Decimal,
    pub igst_amount: Decimal,
    pub grand_total: Decimal,
    pub status: InvoiceStatus,
    pub document_path: Option<String>,
    pub allotted_bank: Option<String>,
    pub allotted_branch: Option<String>,
    pub allotted_city: Option<String>,
    pub place_of_supply: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

/// Footer metadata carried on the invoice for the document layer.
#[derive(Debug, Clone, Default)]
pub struct AllottedDetails {
    pub bank: Option<String>,
    pub branch: Option<String>,
    pub city: Option<String>,
    pub place_of_supply: Option<String>,
}

/// Caller input for creating an invoice.
#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub client_gstin: String,
    pub office_id: i64,
    pub invoice_date: NaiveDate,
    pub items: Vec<NewInvoiceItem>,
    pub tax_type: TaxType,
    pub allotted: AllottedDetails,
    /// A literal number supplied instead of allocation. Must stay globally
    /// unique; the storage constraint rejects collisions.
    pub manual_number: Option<String>,
}

/// Caller input for re-editing an invoice. The invoice number and its
/// (FY, month, serial) bucket are never reissued on update.
#[derive(Debug, Clone)]
pub struct InvoiceUpdate {
    pub client_gstin: String,
    pub office_id: i64,
    pub invoice_date: NaiveDate,
    pub items: Vec<NewInvoiceItem>,
    pub tax_type: TaxType,
    pub allotted: AllottedDetails,
}

/// Fully resolved insert payload: number allocated, totals computed.
#[derive(Debug, Clone)]
pub struct InvoiceRecord {
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    pub financial_year: String,
    pub month_str: String,
    pub serial_number: i64,
    pub client_gstin: String,
    pub office_id: i64,
    pub tax_type: TaxType,
    pub totals: TaxTotals,
    pub status: InvoiceStatus,
    pub allotted: AllottedDetails,
}

/// An invoice joined with everything the document layer renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceDetails {
    pub invoice: Invoice,
    pub items: Vec<InvoiceItem>,
    pub client: Option<Client>,
    pub office: Option<Office>,
}

/// Filters for the invoice register listing.
#[derive(Debug, Clone, Default)]
pub struct InvoiceListFilter {
    pub financial_year: Option<String>,
    pub month: Option<String>,
    /// Calendar year of the invoice date, as the export screen filters it.
    pub calendar_year: Option<i32>,
}

/// One row of the invoice register (invoice joined to client name).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceListRow {
    pub id: i64,
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    pub client_name: String,
    pub client_gstin: String,
    pub grand_total: Decimal,
    pub status: InvoiceStatus,
}
