//! Repository port for board persistence.

use crate::board::domain::{Board, BoardId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for board repository operations.
pub type BoardRepositoryResult<T> = Result<T, BoardRepositoryError>;

/// Board persistence contract.
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Stores a new board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::DuplicateBoard`] when the identifier
    /// already exists.
    async fn store(&self, board: &Board) -> BoardRepositoryResult<()>;

    /// Persists changes to an existing board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::NotFound`] when the board does not
    /// exist.
    async fn update(&self, board: &Board) -> BoardRepositoryResult<()>;

    /// Finds a board by identifier, tombstones included.
    async fn find_by_id(&self, id: BoardId) -> BoardRepositoryResult<Option<Board>>;

    /// Returns the active boards owned by `owner`, oldest first.
    async fn find_active_by_owner(&self, owner: UserId) -> BoardRepositoryResult<Vec<Board>>;
}

/// Errors returned by board repository implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardRepositoryError {
    /// A board with the same identifier already exists.
    #[error("duplicate board identifier: {0}")]
    DuplicateBoard(BoardId),

    /// The board was not found.
    #[error("board not found: {0}")]
    NotFound(BoardId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
