use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A bank branch record. Identity is (bank_name, branch_name); city and
/// account fields are descriptive only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub id: i64,
    pub branch_name: String,
    pub city: String,
    pub bank_name: String,
    pub ifsc_code: String,
    pub account_number: String,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct NewBranch {
    pub branch_name: String,
    pub city: String,
    pub bank_name: String,
    pub ifsc_code: String,
    pub account_number: String,
}
