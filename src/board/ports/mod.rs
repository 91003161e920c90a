//! Port contracts for board management.

pub mod ownership;
pub mod repository;

pub use ownership::{BoardAccessError, BoardOwnershipGate};
pub use repository::{BoardRepository, BoardRepositoryError, BoardRepositoryResult};
