//! Column position engine.
//!
//! Keeps the active items of every `(board, column)` partition densely
//! ordered as `1..=N` while items are appended, moved within a column, moved
//! across columns, and deleted. Every adjustment is built from one primitive,
//! [`PositionEngine::shift_range`], which moves a contiguous run of orders by
//! exactly one slot.
//!
//! The item store only guarantees single-record atomicity. A shift is a
//! series of independent writes, so a store failure part-way through leaves
//! the partition partially shifted, and concurrent moves within one partition
//! can interleave. Neither case is compensated here. Every write is
//! conditional on the record still being live, so a delete that lands
//! between a read and its write is never undone.

use super::config::{OutOfRangePolicy, PositionConfig};
use crate::board::domain::BoardId;
use crate::item::{
    domain::{
        Column, Item, ItemDomainError, ItemId, OrderRange, ParseColumnError, Placement,
        ShiftDirection,
    },
    ports::{ItemRepository, ItemRepositoryError},
};
use mockable::Clock;
use std::cmp::Ordering;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Reasons a requested move cannot be applied.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidTransition {
    /// The destination column is not one of the fixed columns.
    #[error(transparent)]
    UnknownColumn(#[from] ParseColumnError),

    /// The destination order lies outside the valid range.
    #[error("order {requested} is outside 1..={max} in column {column}")]
    OrderOutOfRange {
        /// Destination column.
        column: Column,
        /// Requested order.
        requested: u32,
        /// Highest valid order.
        max: u32,
    },

    /// A cross-column transfer named the item's current column.
    #[error("item is already in column {0}")]
    SameColumn(Column),

    /// The item rejected the new placement.
    #[error(transparent)]
    Rejected(ItemDomainError),
}

/// Errors returned by the position engine.
#[derive(Debug, Clone, Error)]
pub enum PositionError {
    /// The item is missing or has been deleted.
    #[error("item not found: {0}")]
    NotFound(ItemId),

    /// The requested move is not valid.
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),

    /// The item store failed; shifts already written are not rolled back.
    #[error("item store unavailable: {0}")]
    StoreUnavailable(#[source] ItemRepositoryError),
}

impl From<ItemDomainError> for PositionError {
    fn from(err: ItemDomainError) -> Self {
        match err {
            ItemDomainError::ItemDeleted(id) => Self::NotFound(id),
            other => Self::InvalidTransition(InvalidTransition::Rejected(other)),
        }
    }
}

impl From<ItemRepositoryError> for PositionError {
    fn from(err: ItemRepositoryError) -> Self {
        match err {
            ItemRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::StoreUnavailable(other),
        }
    }
}

/// Result type for position engine operations.
pub type PositionResult<T> = Result<T, PositionError>;

/// Maintains dense per-column ordering over an [`ItemRepository`].
///
/// The engine holds no cache or lock between calls; the repository is the
/// only shared state. Callers are expected to have authorised the board
/// before handing an item over.
#[derive(Clone)]
pub struct PositionEngine<R, C>
where
    R: ItemRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    config: PositionConfig,
}

impl<R, C> PositionEngine<R, C>
where
    R: ItemRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new position engine.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>, config: PositionConfig) -> Self {
        Self {
            repository,
            clock,
            config,
        }
    }

    /// Returns the engine configuration.
    #[must_use]
    pub const fn config(&self) -> &PositionConfig {
        &self.config
    }

    /// Returns the order for an item appended to a partition: `1` when the
    /// partition is empty, otherwise the highest active order plus one.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError::StoreUnavailable`] when the lookup fails.
    #[instrument(skip_all, fields(board = %board, column = %column))]
    pub async fn next_order(&self, board: BoardId, column: Column) -> PositionResult<u32> {
        let last = self.last_order(board, column).await?;
        Ok(last.saturating_add(1))
    }

    /// Moves every active item of a partition whose order matches `range`
    /// one slot in `direction`, writing each item individually.
    ///
    /// Only the order of each stored record changes, and only while that
    /// record is still live at the order read. Items deleted or moved
    /// between the read and their write are skipped.
    ///
    /// Returns the number of items shifted.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError::StoreUnavailable`] when the lookup or any
    /// write fails. Writes that completed before the failure stay applied.
    #[instrument(skip_all, fields(board = %board, column = %column, range = ?range))]
    pub async fn shift_range(
        &self,
        board: BoardId,
        column: Column,
        range: OrderRange,
        direction: ShiftDirection,
    ) -> PositionResult<usize> {
        let affected = self
            .repository
            .find_in_range(board, column, range)
            .await
            .map_err(PositionError::StoreUnavailable)?;
        let total = affected.len();
        let mut shifted = 0_usize;

        for mut item in affected {
            let expected = item.order();
            item.shift(direction, &*self.clock)?;
            match self.repository.shift_order(&item, expected).await {
                Ok(true) => shifted += 1,
                Ok(false) => debug!(item = %item.id(), expected, "item left the range, skipped"),
                Err(err) => {
                    warn!(
                        shifted,
                        total,
                        error = %err,
                        "range shift aborted part-way, partition needs reconciliation"
                    );
                    return Err(PositionError::StoreUnavailable(err));
                }
            }
        }

        debug!(shifted, total, delta = direction.delta(), "range shifted");
        Ok(shifted)
    }

    /// Moves an item to `destination` within its current column.
    ///
    /// Items between the old and new position absorb the one-slot shift;
    /// nothing outside that span is touched. With no destination the
    /// position is left alone. The item is persisted in every case, so
    /// pending content changes on it are written too.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError::NotFound`] for deleted items, including items
    /// deleted concurrently before the final write,
    /// [`PositionError::InvalidTransition`] for a destination outside
    /// `[1, N]` under [`OutOfRangePolicy::Reject`], and
    /// [`PositionError::StoreUnavailable`] when the store fails.
    #[instrument(
        skip_all,
        fields(item = %item.id(), board = %item.board(), destination = ?destination)
    )]
    pub async fn reposition(
        &self,
        item: &mut Item,
        destination: Option<u32>,
    ) -> PositionResult<()> {
        let source = active_placement(item)?;
        let Some(requested) = destination else {
            return self.persist(item).await;
        };

        let board = item.board();
        let size = self.last_order(board, source.column).await?;
        let target = self.resolve(source.column, requested, size)?;

        match target.cmp(&source.order) {
            Ordering::Less => {
                self.shift_range(
                    board,
                    source.column,
                    OrderRange::closed_open(target, source.order),
                    ShiftDirection::Increment,
                )
                .await?;
            }
            Ordering::Greater => {
                self.shift_range(
                    board,
                    source.column,
                    OrderRange::open_closed(source.order, target),
                    ShiftDirection::Decrement,
                )
                .await?;
            }
            Ordering::Equal => return self.persist(item).await,
        }

        item.place(Placement::new(source.column, target), &*self.clock)?;
        self.persist(item).await
    }

    /// Moves an item into another column, at `destination` or appended.
    ///
    /// The destination order is validated against `[1, N + 1]` of the
    /// destination column before anything is written. The source column is
    /// then compacted, the destination column opened (or its next order
    /// read), and the item itself written last.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError::NotFound`] for deleted items,
    /// [`PositionError::InvalidTransition`] when `destination_column` is the
    /// current column or the order is out of range under
    /// [`OutOfRangePolicy::Reject`], and [`PositionError::StoreUnavailable`]
    /// when the store fails.
    #[instrument(
        skip_all,
        fields(item = %item.id(), board = %item.board(), to = %destination_column)
    )]
    pub async fn transfer(
        &self,
        item: &mut Item,
        destination_column: Column,
        destination: Option<u32>,
    ) -> PositionResult<()> {
        let source = active_placement(item)?;
        if destination_column == source.column {
            return Err(InvalidTransition::SameColumn(destination_column).into());
        }
        let board = item.board();

        let target = match destination {
            Some(requested) => {
                let size = self.last_order(board, destination_column).await?;
                Some(self.resolve(destination_column, requested, size.saturating_add(1))?)
            }
            None => None,
        };

        self.shift_range(
            board,
            source.column,
            OrderRange::above(source.order),
            ShiftDirection::Decrement,
        )
        .await?;

        let order = match target {
            Some(order) => {
                self.shift_range(
                    board,
                    destination_column,
                    OrderRange::at_or_above(order),
                    ShiftDirection::Increment,
                )
                .await?;
                order
            }
            None => self.next_order(board, destination_column).await?,
        };

        item.place(Placement::new(destination_column, order), &*self.clock)?;
        self.persist(item).await
    }

    /// Closes the gap left at `vacated_order` in a partition.
    ///
    /// Returns the number of items shifted.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError::StoreUnavailable`] when the store fails.
    pub async fn compact_after_delete(
        &self,
        board: BoardId,
        column: Column,
        vacated_order: u32,
    ) -> PositionResult<usize> {
        self.shift_range(
            board,
            column,
            OrderRange::above(vacated_order),
            ShiftDirection::Decrement,
        )
        .await
    }

    /// Soft-deletes an item and compacts the column it vacated.
    ///
    /// The tombstone is written before the compaction runs, so the vacated
    /// order is never held by two active items.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError::NotFound`] for items already deleted and
    /// [`PositionError::StoreUnavailable`] when the store fails.
    #[instrument(skip_all, fields(item = %item.id(), board = %item.board()))]
    pub async fn retire(&self, item: &mut Item) -> PositionResult<Placement> {
        let vacated = item.mark_deleted(&*self.clock)?;
        self.persist(item).await?;
        self.compact_after_delete(item.board(), vacated.column, vacated.order)
            .await?;
        Ok(vacated)
    }

    async fn last_order(&self, board: BoardId, column: Column) -> PositionResult<u32> {
        let last = self
            .repository
            .find_last_in_column(board, column)
            .await
            .map_err(PositionError::StoreUnavailable)?;
        Ok(last.map_or(0, |item| item.order()))
    }

    fn resolve(&self, column: Column, requested: u32, max: u32) -> PositionResult<u32> {
        if (1..=max).contains(&requested) {
            return Ok(requested);
        }
        match self.config.out_of_range {
            OutOfRangePolicy::Reject => Err(InvalidTransition::OrderOutOfRange {
                column,
                requested,
                max,
            }
            .into()),
            OutOfRangePolicy::Clamp => Ok(requested.clamp(1, max.max(1))),
        }
    }

    async fn persist(&self, item: &Item) -> PositionResult<()> {
        self.repository.update(item).await.map_err(PositionError::from)
    }
}

fn active_placement(item: &Item) -> PositionResult<Placement> {
    item.placement().ok_or(PositionError::NotFound(item.id()))
}
