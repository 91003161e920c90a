//! Adapter implementations for board persistence.
//!
//! - [`memory::InMemoryBoardRepository`]: thread-safe in-memory storage
//! - [`postgres::PostgresBoardRepository`]: Diesel-backed `PostgreSQL` storage

pub mod memory;
pub mod postgres;
