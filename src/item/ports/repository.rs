//! Repository port for item persistence (the item store).
//!
//! The contract offers per-record atomic writes and range queries over one
//! `(board, column)` partition. It deliberately offers nothing spanning
//! several records: callers that shift a range write each item on its own.

use crate::board::domain::BoardId;
use crate::item::domain::{Column, Item, ItemId, OrderRange};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for item repository operations.
pub type ItemRepositoryResult<T> = Result<T, ItemRepositoryError>;

/// Item persistence contract.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Stores a new item.
    ///
    /// # Errors
    ///
    /// Returns [`ItemRepositoryError::DuplicateItem`] when the identifier
    /// already exists.
    async fn insert(&self, item: &Item) -> ItemRepositoryResult<()>;

    /// Atomically replaces one stored item while it is still live.
    ///
    /// A stored tombstone is never overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`ItemRepositoryError::NotFound`] when the item does not exist
    /// or has been deleted.
    async fn update(&self, item: &Item) -> ItemRepositoryResult<()>;

    /// Writes the order and modification time of `item` to the stored
    /// record, provided that record is live and still at `expected_order`.
    ///
    /// Other fields of the stored record are left untouched. Returns `false`
    /// when the record is missing, deleted, or was moved in the meantime.
    async fn shift_order(&self, item: &Item, expected_order: u32) -> ItemRepositoryResult<bool>;

    /// Finds an item by identifier, tombstones included.
    async fn find_by_id(&self, id: ItemId) -> ItemRepositoryResult<Option<Item>>;

    /// Returns the active item with the highest order in a partition.
    async fn find_last_in_column(
        &self,
        board: BoardId,
        column: Column,
    ) -> ItemRepositoryResult<Option<Item>>;

    /// Returns the active items of a partition whose order matches `range`,
    /// sorted by ascending order.
    async fn find_in_range(
        &self,
        board: BoardId,
        column: Column,
        range: OrderRange,
    ) -> ItemRepositoryResult<Vec<Item>>;

    /// Returns every active item on a board, sorted by ascending order.
    async fn find_active_on_board(&self, board: BoardId) -> ItemRepositoryResult<Vec<Item>>;
}

/// Errors returned by item repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ItemRepositoryError {
    /// An item with the same identifier already exists.
    #[error("duplicate item identifier: {0}")]
    DuplicateItem(ItemId),

    /// The item was not found.
    #[error("item not found: {0}")]
    NotFound(ItemId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ItemRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
