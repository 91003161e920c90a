//! `PostgreSQL` adapters for item persistence.

mod models;
mod repository;
mod schema;

pub use repository::{ItemPgPool, PostgresItemRepository};
