// Taxes module

pub mod models;
pub mod services;

pub use models::{GstRate, TaxType, TaxTotals, TaxableLine};
pub use services::{TaxCalculator, MAX_LINE_ITEMS};
