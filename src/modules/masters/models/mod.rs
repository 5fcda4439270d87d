mod branch;
mod client;
mod gstin;
mod office;

pub use branch::{Branch, NewBranch};
pub use client::{Client, ClientUpdate};
pub use gstin::Gstin;
pub use office::{NewOffice, Office, OfficeStatus};
