//! In-memory item adapters.

mod item;

pub use item::InMemoryItemRepository;
