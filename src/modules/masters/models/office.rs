use serde::{Deserialize, Serialize};

/// Office lifecycle. Offices referenced by invoices are never hard-deleted;
/// archiving just removes them from selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfficeStatus {
    Active,
    Archived,
}

impl OfficeStatus {
    pub fn from_flag(is_active: i64) -> Self {
        if is_active != 0 {
            OfficeStatus::Active
        } else {
            OfficeStatus::Archived
        }
    }

    pub fn as_flag(&self) -> i64 {
        match self {
            OfficeStatus::Active => 1,
            OfficeStatus::Archived => 0,
        }
    }
}

/// A billing office of the firm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Office {
    pub id: i64,
    pub firm_name: String,
    pub address: String,
    pub gstin: String,
    pub pan: String,
    pub email: Option<String>,
    pub status: OfficeStatus,
}

/// Fields for creating or updating an office.
#[derive(Debug, Clone)]
pub struct NewOffice {
    pub firm_name: String,
    pub address: String,
    pub gstin: String,
    pub pan: String,
    pub email: Option<String>,
}
