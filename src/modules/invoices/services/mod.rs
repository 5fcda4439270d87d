pub mod invoice_service;
pub mod numbering;

pub use invoice_service::InvoiceService;
pub use numbering::{financial_year, month_token, parse_serial, NumberAllocator};
