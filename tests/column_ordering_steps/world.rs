//! Shared world state for column ordering BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use corkboard::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::{BoardId, UserId},
    services::BoardService,
};
use corkboard::item::{
    adapters::memory::InMemoryItemRepository,
    domain::{Item, ItemId},
    services::{ItemService, ItemServiceError, PositionConfig},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Board service type used by the BDD world.
pub type TestBoards = BoardService<InMemoryBoardRepository, DefaultClock>;

/// Item service type used by the BDD world.
pub type TestItems = ItemService<InMemoryItemRepository, TestBoards, DefaultClock>;

/// Scenario world for column ordering behaviour tests.
pub struct OrderingWorld {
    pub boards: Arc<TestBoards>,
    pub items: TestItems,
    pub store: Arc<InMemoryItemRepository>,
    pub owner: UserId,
    pub board: Option<BoardId>,
    pub ids_by_title: HashMap<String, ItemId>,
    pub last_move: Option<Result<Item, ItemServiceError>>,
}

impl OrderingWorld {
    /// Creates a world with fresh in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        let boards = Arc::new(BoardService::new(
            Arc::new(InMemoryBoardRepository::new()),
            Arc::new(DefaultClock),
        ));
        let store = Arc::new(InMemoryItemRepository::new());
        let items = ItemService::new(
            Arc::clone(&store),
            Arc::clone(&boards),
            Arc::new(DefaultClock),
            PositionConfig::default(),
        );

        Self {
            boards,
            items,
            store,
            owner: UserId::new(),
            board: None,
            ids_by_title: HashMap::new(),
            last_move: None,
        }
    }

    /// Returns the scenario board.
    ///
    /// # Errors
    ///
    /// Returns an error when no board has been created yet.
    pub fn board(&self) -> Result<BoardId, eyre::Report> {
        self.board
            .ok_or_else(|| eyre::eyre!("missing board in scenario world"))
    }

    /// Returns the identifier of the item created with `title`.
    ///
    /// # Errors
    ///
    /// Returns an error when no such item was created in this scenario.
    pub fn item_id(&self, title: &str) -> Result<ItemId, eyre::Report> {
        self.ids_by_title
            .get(title)
            .copied()
            .ok_or_else(|| eyre::eyre!("no item titled {title} in scenario world"))
    }
}

impl Default for OrderingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> OrderingWorld {
    OrderingWorld::default()
}

/// Splits a comma-separated title list.
pub fn titles(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
