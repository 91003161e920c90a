//! In-memory board adapters.

mod board;

pub use board::InMemoryBoardRepository;
