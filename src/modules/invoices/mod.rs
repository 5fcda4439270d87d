// Invoices module

pub mod models;
pub mod repositories;
pub mod services;

pub use models::{
    AllottedDetails, Invoice, InvoiceDetails, InvoiceItem, InvoiceListFilter, InvoiceListRow,
    InvoiceStatus, InvoiceUpdate, NewInvoice, NewInvoiceItem,
};
pub use repositories::InvoiceRepository;
pub use services::{InvoiceService, NumberAllocator};
