mod payment;

pub use payment::{NewPayment, Payment};
