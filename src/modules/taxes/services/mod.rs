pub mod tax_calculator;

pub use tax_calculator::{TaxCalculator, MAX_LINE_ITEMS};
