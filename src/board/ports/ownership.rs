//! Ownership gate consumed by item operations.

use super::BoardRepositoryError;
use crate::board::domain::{Board, BoardId, UserId};
use async_trait::async_trait;
use thiserror::Error;

/// Confirms that a board exists, is active, and belongs to a user.
///
/// Every item operation passes through the gate before touching the item
/// store, so the position engine only ever sees pre-authorised boards.
#[async_trait]
pub trait BoardOwnershipGate: Send + Sync {
    /// Returns the board when `user` owns it and it is not deleted.
    ///
    /// # Errors
    ///
    /// Returns [`BoardAccessError::NotFound`] when the board is missing,
    /// deleted, or owned by someone else.
    async fn verify_ownership(
        &self,
        user: UserId,
        board: BoardId,
    ) -> Result<Board, BoardAccessError>;
}

/// Errors returned by [`BoardOwnershipGate`] implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardAccessError {
    /// The board is missing, deleted, or owned by another user.
    #[error("board not found: {0}")]
    NotFound(BoardId),

    /// The board lookup failed.
    #[error(transparent)]
    Repository(#[from] BoardRepositoryError),
}
