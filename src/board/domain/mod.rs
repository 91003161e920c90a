//! Domain model for boards.
//!
//! A board is owned by exactly one user and acts as the partition key for
//! every item placed on it. Boards are never physically removed; deletion
//! leaves a tombstone that hides the board from every lookup.

mod board;
mod error;
mod ids;

pub use board::{Board, BoardName, MAX_BOARD_NAME_LENGTH, PersistedBoardData};
pub use error::BoardDomainError;
pub use ids::{BoardId, UserId};
