//! Error types for board domain validation.

use super::BoardId;
use thiserror::Error;

/// Errors returned while constructing or mutating boards.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The board name is empty after trimming.
    #[error("board name must not be empty")]
    EmptyBoardName,

    /// The board name is longer than the stored column allows.
    #[error("board name must be at most {max} characters")]
    BoardNameTooLong {
        /// Longest accepted name, in characters.
        max: usize,
    },

    /// The board has already been soft-deleted.
    #[error("board {0} has been deleted")]
    BoardDeleted(BoardId),
}
