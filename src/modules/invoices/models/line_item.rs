use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::taxes::models::{GstRate, TaxableLine};

/// A persisted invoice line item. Items are owned exclusively by their
/// invoice; edits replace the whole set atomically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub id: i64,
    pub invoice_id: i64,
    pub description: String,
    pub hsn_code: Option<String>,
    pub amount: Decimal,
    pub gst_rate: GstRate,
}

/// A line item as supplied by the caller, before persistence.
#[derive(Debug, Clone)]
pub struct NewInvoiceItem {
    pub description: String,
    pub hsn_code: Option<String>,
    pub amount: Decimal,
    pub gst_rate: GstRate,
}

impl NewInvoiceItem {
    pub fn taxable_line(&self) -> TaxableLine {
        TaxableLine {
            amount: self.amount,
            gst_rate: self.gst_rate,
        }
    }
}
