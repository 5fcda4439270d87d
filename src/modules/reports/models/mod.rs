mod summaries;

pub use summaries::{GstSummary, PendingFilter, PendingPayment, ReceivedPayment};
