use rust_decimal::Decimal;

use crate::core::{AppError, Result};
use crate::modules::taxes::models::{TaxTotals, TaxType, TaxableLine};

/// Invoices carry at most this many line items.
pub const MAX_LINE_ITEMS: usize = 5;

/// Turns a validated item set and a tax-type selector into invoice totals.
///
/// Pure arithmetic over `Decimal`; the whole item set is accepted or
/// rejected, never partially computed.
pub struct TaxCalculator;

impl TaxCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Compute taxable value, tax splits and grand total for an item set.
    ///
    /// - IGST: the full rate on each line accrues to `igst_amount`
    /// - CGST_SGST: half the rate each to `cgst_amount` and `sgst_amount`
    /// - NONE: all components zero
    ///
    /// CGST is computed once and mirrored to SGST, so the two halves are
    /// equal exactly, not merely within rounding tolerance. All results are
    /// rounded to 2 decimal places.
    pub fn compute(&self, lines: &[TaxableLine], tax_type: TaxType) -> Result<TaxTotals> {
        self.validate_lines(lines)?;

        let taxable_value: Decimal = lines.iter().map(|line| line.amount).sum();

        let mut cgst = Decimal::ZERO;
        let mut sgst = Decimal::ZERO;
        let mut igst = Decimal::ZERO;

        match tax_type {
            TaxType::Igst => {
                igst = lines
                    .iter()
                    .map(|line| line.amount * line.gst_rate.percent_decimal() / Decimal::from(100))
                    .sum();
            }
            TaxType::CgstSgst => {
                cgst = lines
                    .iter()
                    .map(|line| line.amount * line.gst_rate.percent_decimal() / Decimal::from(200))
                    .sum();
                sgst = cgst;
            }
            TaxType::None => {}
        }

        let taxable_value = taxable_value.round_dp(2);
        let cgst = cgst.round_dp(2);
        let sgst = sgst.round_dp(2);
        let igst = igst.round_dp(2);

        Ok(TaxTotals {
            taxable_value,
            cgst_amount: cgst,
            sgst_amount: sgst,
            igst_amount: igst,
            grand_total: taxable_value + cgst + sgst + igst,
        })
    }

    fn validate_lines(&self, lines: &[TaxableLine]) -> Result<()> {
        if lines.is_empty() {
            return Err(AppError::validation(
                "Invoice must have at least one line item",
            ));
        }

        if lines.len() > MAX_LINE_ITEMS {
            return Err(AppError::validation(format!(
                "Invoice cannot have more than {} line items",
                MAX_LINE_ITEMS
            )));
        }

        for (idx, line) in lines.iter().enumerate() {
            if line.amount <= Decimal::ZERO {
                return Err(AppError::validation(format!(
                    "Line item {} amount must be positive (got {})",
                    idx + 1,
                    line.amount
                )));
            }
        }

        Ok(())
    }
}

impl Default for TaxCalculator {
    fn default() -> Self {
        Self::new()
    }
}
