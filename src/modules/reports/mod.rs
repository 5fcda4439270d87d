// Reports module

pub mod models;
pub mod repositories;
pub mod services;

pub use models::{GstSummary, PendingFilter, PendingPayment, ReceivedPayment};
pub use repositories::{ReportRepository, SqliteReportRepository};
pub use services::ReportService;
