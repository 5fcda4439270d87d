pub mod invoice_repository;

pub use invoice_repository::{InvoiceRepository, PLACEHOLDER_CLIENT_GSTIN};
