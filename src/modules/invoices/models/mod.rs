mod invoice;
mod line_item;

pub use invoice::{
    AllottedDetails, Invoice, InvoiceDetails, InvoiceListFilter, InvoiceListRow, InvoiceRecord,
    InvoiceStatus, InvoiceUpdate, NewInvoice,
};
pub use line_item::{InvoiceItem, NewInvoiceItem};
