//! Service layer for board creation, lookup, renaming, and soft deletion.

use crate::board::{
    domain::{Board, BoardDomainError, BoardId, BoardName, UserId},
    ports::{BoardAccessError, BoardOwnershipGate, BoardRepository, BoardRepositoryError},
};
use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// The board is missing, deleted, or owned by another user.
    #[error("board not found: {0}")]
    NotFound(BoardId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] BoardRepositoryError),
}

impl BoardServiceError {
    /// Returns the HTTP-style status category for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Domain(_) => 400,
            Self::NotFound(_) => 404,
            Self::Repository(_) => 500,
        }
    }
}

impl From<BoardAccessError> for BoardServiceError {
    fn from(err: BoardAccessError) -> Self {
        match err {
            BoardAccessError::NotFound(id) => Self::NotFound(id),
            BoardAccessError::Repository(inner) => Self::Repository(inner),
        }
    }
}

/// Result type for board service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;

/// Board orchestration service.
#[derive(Clone)]
pub struct BoardService<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> BoardService<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new board service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a board owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] for a blank or over-long name or
    /// [`BoardServiceError::Repository`] when persistence fails.
    #[instrument(skip(self, name), fields(owner = %owner))]
    pub async fn create_board(
        &self,
        owner: UserId,
        name: impl Into<String> + Send,
    ) -> BoardServiceResult<Board> {
        let board = Board::new(owner, BoardName::new(name)?, &*self.clock);
        self.repository.store(&board).await?;
        info!(board = %board.id(), "board created");
        Ok(board)
    }

    /// Lists the active boards owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Repository`] when the lookup fails.
    pub async fn list_boards(&self, owner: UserId) -> BoardServiceResult<Vec<Board>> {
        Ok(self.repository.find_active_by_owner(owner).await?)
    }

    /// Returns one active board owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::NotFound`] when the board is missing,
    /// deleted, or foreign.
    pub async fn get_board(&self, owner: UserId, id: BoardId) -> BoardServiceResult<Board> {
        Ok(self.verify_ownership(owner, id).await?)
    }

    /// Renames an active board owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::NotFound`] for inaccessible boards and
    /// [`BoardServiceError::Domain`] for a blank or over-long name.
    #[instrument(skip(self, name), fields(owner = %owner, board = %id))]
    pub async fn rename_board(
        &self,
        owner: UserId,
        id: BoardId,
        name: impl Into<String> + Send,
    ) -> BoardServiceResult<Board> {
        let name = BoardName::new(name)?;
        let mut board = self.verify_ownership(owner, id).await?;
        board.rename(name, &*self.clock)?;
        self.repository.update(&board).await?;
        Ok(board)
    }

    /// Soft-deletes an active board owned by `owner`.
    ///
    /// Items on the board are left untouched; they become unreachable
    /// because every item operation passes through the ownership gate.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::NotFound`] for inaccessible boards.
    #[instrument(skip(self), fields(owner = %owner, board = %id))]
    pub async fn delete_board(&self, owner: UserId, id: BoardId) -> BoardServiceResult<Board> {
        let mut board = self.verify_ownership(owner, id).await?;
        board.mark_deleted(&*self.clock)?;
        self.repository.update(&board).await?;
        info!("board deleted");
        Ok(board)
    }
}

#[async_trait]
impl<R, C> BoardOwnershipGate for BoardService<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    async fn verify_ownership(
        &self,
        user: UserId,
        board: BoardId,
    ) -> Result<Board, BoardAccessError> {
        self.repository
            .find_by_id(board)
            .await?
            .filter(|found| found.is_visible_to(user))
            .ok_or(BoardAccessError::NotFound(board))
    }
}
