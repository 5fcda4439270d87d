use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A client of the firm. Identity is the GSTIN itself — no surrogate key —
/// so the registration number must never be silently reused for a
/// different client once invoices reference it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub gstin: String,
    pub client_name: String,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

/// Mutable client attributes; the GSTIN key is fixed at creation.
#[derive(Debug, Clone)]
pub struct ClientUpdate {
    pub client_name: String,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}
