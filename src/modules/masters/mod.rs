// Masters module: offices, clients and bank branches.
//
// Offices soft-delete (Active/Archived); clients and branches have plain
// existence. The asymmetry is deliberate and mirrors how invoices reference
// them.

pub mod models;
pub mod repositories;

pub use models::{Branch, Client, ClientUpdate, Gstin, NewBranch, NewOffice, Office, OfficeStatus};
pub use repositories::{BranchRepository, ClientRepository, OfficeRepository};
