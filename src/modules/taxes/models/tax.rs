// GST vocabulary: the tax-type selector and the closed rate set.
//
// Both are persisted string/integer contracts shared with reporting and the
// invoice document, so the encodings here are wire-level and must not drift.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// How GST splits for an invoice.
///
/// Inter-state supplies attract IGST; intra-state supplies split the same
/// rate evenly into CGST + SGST; exempt invoices carry no tax at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxType {
    #[serde(rename = "IGST")]
    Igst,
    #[serde(rename = "CGST_SGST")]
    CgstSgst,
    #[serde(rename = "NONE")]
    None,
}

impl std::fmt::Display for TaxType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaxType::Igst => write!(f, "IGST"),
            TaxType::CgstSgst => write!(f, "CGST_SGST"),
            TaxType::None => write!(f, "NONE"),
        }
    }
}

impl std::str::FromStr for TaxType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "IGST" => Ok(TaxType::Igst),
            "CGST_SGST" => Ok(TaxType::CgstSgst),
            "NONE" => Ok(TaxType::None),
            _ => Err(format!("Invalid tax type: {}", s)),
        }
    }
}

/// The permitted GST rate slabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GstRate {
    Zero,
    Five,
    Twelve,
    Eighteen,
}

impl GstRate {
    /// Build from the stored integer percentage.
    pub fn from_percent(value: i64) -> Result<Self> {
        match value {
            0 => Ok(GstRate::Zero),
            5 => Ok(GstRate::Five),
            12 => Ok(GstRate::Twelve),
            18 => Ok(GstRate::Eighteen),
            other => Err(AppError::validation(format!(
                "GST rate must be one of 0, 5, 12, 18 (got {})",
                other
            ))),
        }
    }

    pub fn as_percent(&self) -> i64 {
        match self {
            GstRate::Zero => 0,
            GstRate::Five => 5,
            GstRate::Twelve => 12,
            GstRate::Eighteen => 18,
        }
    }

    /// The rate as a decimal percentage, e.g. 18 for 18%.
    pub fn percent_decimal(&self) -> Decimal {
        Decimal::from(self.as_percent())
    }
}

/// One taxable line: base amount plus its rate slab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxableLine {
    pub amount: Decimal,
    pub gst_rate: GstRate,
}

/// Computed invoice totals.
///
/// Invariant: `grand_total = taxable_value + cgst + sgst + igst`, and the
/// components that don't apply to the tax type are exactly zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxTotals {
    pub taxable_value: Decimal,
    pub cgst_amount: Decimal,
    pub sgst_amount: Decimal,
    pub igst_amount: Decimal,
    pub grand_total: Decimal,
}

impl TaxTotals {
    pub fn zero() -> Self {
        TaxTotals {
            taxable_value: Decimal::ZERO,
            cgst_amount: Decimal::ZERO,
            sgst_amount: Decimal::ZERO,
            igst_amount: Decimal::ZERO,
            grand_total: Decimal::ZERO,
        }
    }

    pub fn total_tax(&self) -> Decimal {
        self.cgst_amount + self.sgst_amount + self.igst_amount
    }
}
