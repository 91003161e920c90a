//! In-memory item store for tests and single-process use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::domain::BoardId;
use crate::item::{
    domain::{Column, Item, ItemId, OrderRange},
    ports::{ItemRepository, ItemRepositoryError, ItemRepositoryResult},
};

/// Thread-safe in-memory item repository.
///
/// Each call takes the lock once, so single-record writes are atomic while
/// a sequence of calls is not.
#[derive(Debug, Clone, Default)]
pub struct InMemoryItemRepository {
    state: Arc<RwLock<HashMap<ItemId, Item>>>,
}

impl InMemoryItemRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> ItemRepositoryError {
    ItemRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn in_partition(item: &Item, board: BoardId, column: Column) -> bool {
    !item.is_deleted() && item.board() == board && item.column() == column
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn insert(&self, item: &Item) -> ItemRepositoryResult<()> {
        let mut items = self.state.write().map_err(poisoned)?;
        if items.contains_key(&item.id()) {
            return Err(ItemRepositoryError::DuplicateItem(item.id()));
        }
        items.insert(item.id(), item.clone());
        Ok(())
    }

    async fn update(&self, item: &Item) -> ItemRepositoryResult<()> {
        let mut items = self.state.write().map_err(poisoned)?;
        let slot = items
            .get_mut(&item.id())
            .filter(|stored| !stored.is_deleted())
            .ok_or(ItemRepositoryError::NotFound(item.id()))?;
        *slot = item.clone();
        Ok(())
    }

    async fn shift_order(&self, item: &Item, expected_order: u32) -> ItemRepositoryResult<bool> {
        let mut items = self.state.write().map_err(poisoned)?;
        let Some(stored) = items
            .get_mut(&item.id())
            .filter(|stored| !stored.is_deleted() && stored.order() == expected_order)
        else {
            return Ok(false);
        };
        stored.adopt_order(item);
        Ok(true)
    }

    async fn find_by_id(&self, id: ItemId) -> ItemRepositoryResult<Option<Item>> {
        let items = self.state.read().map_err(poisoned)?;
        Ok(items.get(&id).cloned())
    }

    async fn find_last_in_column(
        &self,
        board: BoardId,
        column: Column,
    ) -> ItemRepositoryResult<Option<Item>> {
        let items = self.state.read().map_err(poisoned)?;
        Ok(items
            .values()
            .filter(|item| in_partition(item, board, column))
            .max_by_key(|item| item.order())
            .cloned())
    }

    async fn find_in_range(
        &self,
        board: BoardId,
        column: Column,
        range: OrderRange,
    ) -> ItemRepositoryResult<Vec<Item>> {
        let items = self.state.read().map_err(poisoned)?;
        let mut matched: Vec<Item> = items
            .values()
            .filter(|item| in_partition(item, board, column) && range.matches(item.order()))
            .cloned()
            .collect();
        matched.sort_by_key(Item::order);
        Ok(matched)
    }

    async fn find_active_on_board(&self, board: BoardId) -> ItemRepositoryResult<Vec<Item>> {
        let items = self.state.read().map_err(poisoned)?;
        let mut active: Vec<Item> = items
            .values()
            .filter(|item| !item.is_deleted() && item.board() == board)
            .cloned()
            .collect();
        active.sort_by_key(|item| (item.column(), item.order()));
        Ok(active)
    }
}
