// Payments module

pub mod models;
pub mod repositories;
pub mod services;

pub use models::{NewPayment, Payment};
pub use repositories::PaymentRepository;
pub use services::{derive_status, PaymentService};
