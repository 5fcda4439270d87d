pub mod branch_repository;
pub mod client_repository;
pub mod office_repository;

pub use branch_repository::BranchRepository;
pub use client_repository::ClientRepository;
pub use office_repository::OfficeRepository;
