//! Port contracts for item storage.

pub mod repository;

pub use repository::{ItemRepository, ItemRepositoryError, ItemRepositoryResult};
