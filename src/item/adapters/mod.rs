//! Adapter implementations for the item store port.
//!
//! - [`memory::InMemoryItemRepository`]: thread-safe in-memory storage
//! - [`postgres::PostgresItemRepository`]: Diesel-backed `PostgreSQL` storage

pub mod memory;
pub mod postgres;
