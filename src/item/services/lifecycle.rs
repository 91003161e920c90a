//! Service layer for item creation, lookup, update, and soft deletion.

use super::config::PositionConfig;
use super::positions::{InvalidTransition, PositionEngine, PositionError};
use crate::board::{
    domain::{BoardId, UserId},
    ports::{BoardAccessError, BoardOwnershipGate},
};
use crate::item::{
    domain::{Column, Item, ItemDomainError, ItemId, ItemTitle, Placement},
    ports::{ItemRepository, ItemRepositoryError},
};
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

/// Request payload for creating an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateItemRequest {
    board: BoardId,
    title: String,
    description: Option<String>,
    column: Option<String>,
}

impl CreateItemRequest {
    /// Creates a request for an item appended to the backlog.
    #[must_use]
    pub fn new(board: BoardId, title: impl Into<String>) -> Self {
        Self {
            board,
            title: title.into(),
            description: None,
            column: None,
        }
    }

    /// Sets the item description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the column the item is appended to.
    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }
}

/// Request payload for updating an item.
///
/// Unset fields are left unchanged. A column different from the current one
/// moves the item across columns, appended when no order is given; an order
/// alone moves it within its column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateItemRequest {
    title: Option<String>,
    description: Option<String>,
    column: Option<String>,
    order: Option<u32>,
}

impl UpdateItemRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a new description; blank text clears it.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the destination column.
    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Sets the destination order.
    #[must_use]
    pub const fn with_order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }
}

/// Classification of item service failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The item or board is missing, deleted, or not visible to the user.
    NotFound,
    /// The requested column or order is not valid.
    InvalidTransition,
    /// A payload field failed validation.
    InvalidInput,
    /// The underlying store failed.
    StoreUnavailable,
}

impl ErrorKind {
    /// Returns the HTTP-style status category.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::InvalidTransition | Self::InvalidInput => 400,
            Self::StoreUnavailable => 500,
        }
    }
}

/// Service-level errors for item operations.
#[derive(Debug, Error)]
pub enum ItemServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ItemDomainError),
    /// The ownership gate refused the board.
    #[error(transparent)]
    Board(#[from] BoardAccessError),
    /// The item is missing, deleted, or on a board the user cannot see.
    #[error("item not found: {0}")]
    NotFound(ItemId),
    /// The position engine failed.
    #[error(transparent)]
    Position(#[from] PositionError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ItemRepositoryError),
}

impl ItemServiceError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(ItemDomainError::ItemDeleted(_))
            | Self::Board(BoardAccessError::NotFound(_))
            | Self::NotFound(_)
            | Self::Position(PositionError::NotFound(_)) => ErrorKind::NotFound,
            Self::Domain(_) => ErrorKind::InvalidInput,
            Self::Position(PositionError::InvalidTransition(_)) => ErrorKind::InvalidTransition,
            Self::Board(BoardAccessError::Repository(_))
            | Self::Position(PositionError::StoreUnavailable(_))
            | Self::Repository(_) => ErrorKind::StoreUnavailable,
        }
    }

    /// Returns the HTTP-style status category.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.kind().status_code()
    }
}

/// Result type for item service operations.
pub type ItemServiceResult<T> = Result<T, ItemServiceError>;

/// Item orchestration service.
///
/// Sequences the ownership gate, the position engine, and the item store.
#[derive(Clone)]
pub struct ItemService<R, G, C>
where
    R: ItemRepository,
    G: BoardOwnershipGate,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    gate: Arc<G>,
    clock: Arc<C>,
    engine: PositionEngine<R, C>,
}

impl<R, G, C> ItemService<R, G, C>
where
    R: ItemRepository,
    G: BoardOwnershipGate,
    C: Clock + Send + Sync,
{
    /// Creates a new item service.
    #[must_use]
    pub fn new(repository: Arc<R>, gate: Arc<G>, clock: Arc<C>, config: PositionConfig) -> Self {
        let engine = PositionEngine::new(Arc::clone(&repository), Arc::clone(&clock), config);
        Self {
            repository,
            gate,
            clock,
            engine,
        }
    }

    /// Returns the position engine used by this service.
    #[must_use]
    pub const fn engine(&self) -> &PositionEngine<R, C> {
        &self.engine
    }

    /// Creates an item appended to the end of its column.
    ///
    /// # Errors
    ///
    /// Returns [`ItemServiceError`] when the board is not accessible, the
    /// column or title is invalid, or the store fails.
    #[instrument(skip_all, fields(user = %user, board = %request.board))]
    pub async fn create_item(
        &self,
        user: UserId,
        request: CreateItemRequest,
    ) -> ItemServiceResult<Item> {
        let CreateItemRequest {
            board,
            title,
            description,
            column,
        } = request;
        self.gate.verify_ownership(user, board).await?;

        let column = column.as_deref().map(parse_column).transpose()?.unwrap_or_default();
        let title = ItemTitle::new(title)?;
        let order = self.engine.next_order(board, column).await?;
        let item = Item::new(
            board,
            Placement::new(column, order),
            title,
            description,
            &*self.clock,
        )?;
        self.repository.insert(&item).await?;

        info!(item = %item.id(), %column, order, "item created");
        Ok(item)
    }

    /// Returns an active item on a board owned by `user`.
    ///
    /// # Errors
    ///
    /// Returns [`ItemServiceError::NotFound`] when the item is missing,
    /// deleted, or on a board the user cannot see.
    pub async fn get_item(&self, user: UserId, id: ItemId) -> ItemServiceResult<Item> {
        self.load_owned(user, id).await
    }

    /// Returns the active items of a board grouped by column.
    ///
    /// Every column is present in the result, each sorted by order.
    ///
    /// # Errors
    ///
    /// Returns [`ItemServiceError`] when the board is not accessible or the
    /// store fails.
    pub async fn list_items(
        &self,
        user: UserId,
        board: BoardId,
    ) -> ItemServiceResult<BTreeMap<Column, Vec<Item>>> {
        self.gate.verify_ownership(user, board).await?;

        let mut columns: BTreeMap<Column, Vec<Item>> =
            Column::ALL.into_iter().map(|column| (column, Vec::new())).collect();
        for item in self.repository.find_active_on_board(board).await? {
            columns.entry(item.column()).or_default().push(item);
        }
        for items in columns.values_mut() {
            items.sort_by_key(Item::order);
        }
        Ok(columns)
    }

    /// Applies payload changes and an optional move to an item.
    ///
    /// # Errors
    ///
    /// Returns [`ItemServiceError`] when the item is not accessible, a field
    /// is invalid, the move is not valid, or the store fails.
    #[instrument(skip_all, fields(user = %user, item = %id))]
    pub async fn update_item(
        &self,
        user: UserId,
        id: ItemId,
        request: UpdateItemRequest,
    ) -> ItemServiceResult<Item> {
        let UpdateItemRequest {
            title,
            description,
            column,
            order,
        } = request;
        let title = title.map(ItemTitle::new).transpose()?;
        let column = column.as_deref().map(parse_column).transpose()?;

        let mut item = self.load_owned(user, id).await?;
        if let Some(title) = title {
            item.retitle(title, &*self.clock)?;
        }
        if let Some(description) = description {
            item.describe(Some(description), &*self.clock)?;
        }

        match column {
            Some(destination) if destination != item.column() => {
                self.engine.transfer(&mut item, destination, order).await?;
                info!(to = %destination, order = item.order(), "item moved across columns");
            }
            _ => self.engine.reposition(&mut item, order).await?,
        }
        Ok(item)
    }

    /// Soft-deletes an item and compacts its column.
    ///
    /// Returns the tombstone.
    ///
    /// # Errors
    ///
    /// Returns [`ItemServiceError`] when the item is not accessible or the
    /// store fails.
    #[instrument(skip_all, fields(user = %user, item = %id))]
    pub async fn delete_item(&self, user: UserId, id: ItemId) -> ItemServiceResult<Item> {
        let mut item = self.load_owned(user, id).await?;
        let vacated = self.engine.retire(&mut item).await?;
        info!(column = %vacated.column, order = vacated.order, "item deleted");
        Ok(item)
    }

    async fn load_owned(&self, user: UserId, id: ItemId) -> ItemServiceResult<Item> {
        let item = self
            .repository
            .find_by_id(id)
            .await?
            .filter(|found| !found.is_deleted())
            .ok_or(ItemServiceError::NotFound(id))?;

        match self.gate.verify_ownership(user, item.board()).await {
            Ok(_) => Ok(item),
            Err(BoardAccessError::NotFound(_)) => Err(ItemServiceError::NotFound(id)),
            Err(err) => Err(err.into()),
        }
    }
}

fn parse_column(raw: &str) -> Result<Column, ItemServiceError> {
    Column::try_from(raw)
        .map_err(InvalidTransition::from)
        .map_err(|err| ItemServiceError::Position(err.into()))
}
