mod tax;

pub use tax::{GstRate, TaxType, TaxTotals, TaxableLine};
