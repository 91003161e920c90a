//! Shared helpers for in-memory integration tests.

use std::sync::Arc;

use corkboard::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::{BoardId, UserId},
    services::BoardService,
};
use corkboard::item::{
    adapters::memory::InMemoryItemRepository,
    domain::{Column, Item},
    services::{CreateItemRequest, ItemService, PositionConfig},
};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest::fixture;

/// Board service type used by the integration tests.
pub type TestBoards = BoardService<InMemoryBoardRepository, DefaultClock>;

/// Item service type used by the integration tests.
pub type TestItems = ItemService<InMemoryItemRepository, TestBoards, DefaultClock>;

/// Board and item services sharing one set of in-memory stores.
pub struct Workspace {
    pub boards: Arc<TestBoards>,
    pub items: TestItems,
    pub owner: UserId,
}

impl Workspace {
    /// Creates a workspace with the given position configuration.
    #[must_use]
    pub fn with_config(config: PositionConfig) -> Self {
        let boards = Arc::new(BoardService::new(
            Arc::new(InMemoryBoardRepository::new()),
            Arc::new(DefaultClock),
        ));
        let items = ItemService::new(
            Arc::new(InMemoryItemRepository::new()),
            Arc::clone(&boards),
            Arc::new(DefaultClock),
            config,
        );
        Self {
            boards,
            items,
            owner: UserId::new(),
        }
    }

    /// Creates a board owned by the workspace owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the board service rejects the request.
    pub async fn board(&self, name: &str) -> Result<BoardId, eyre::Report> {
        let board = self
            .boards
            .create_board(self.owner, name)
            .await
            .wrap_err("create board")?;
        Ok(board.id())
    }

    /// Appends items with the given titles to `column`.
    ///
    /// # Errors
    ///
    /// Returns an error if any creation fails.
    pub async fn fill(
        &self,
        board: BoardId,
        column: Column,
        titles: &[&str],
    ) -> Result<Vec<Item>, eyre::Report> {
        let mut created = Vec::with_capacity(titles.len());
        for title in titles {
            let request = CreateItemRequest::new(board, *title).with_column(column.as_str());
            let item = self
                .items
                .create_item(self.owner, request)
                .await
                .wrap_err_with(|| format!("create {title}"))?;
            created.push(item);
        }
        Ok(created)
    }

    /// Returns the titles of a column in order.
    ///
    /// # Errors
    ///
    /// Returns an error if listing fails.
    pub async fn titles(
        &self,
        board: BoardId,
        column: Column,
    ) -> Result<Vec<String>, eyre::Report> {
        let columns = self
            .items
            .list_items(self.owner, board)
            .await
            .wrap_err("list items")?;
        Ok(columns
            .get(&column)
            .map(|items| {
                items
                    .iter()
                    .map(|item| item.title().as_str().to_owned())
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Verifies a column holds exactly `expected`, in order.
    ///
    /// # Errors
    ///
    /// Returns an error describing the mismatch, or if listing fails.
    pub async fn ensure_titles(
        &self,
        board: BoardId,
        column: Column,
        expected: &[&str],
    ) -> Result<(), eyre::Report> {
        let actual = self.titles(board, column).await?;
        eyre::ensure!(
            actual == expected,
            "column {column} holds {actual:?}, expected {expected:?}"
        );
        Ok(())
    }

    /// Verifies every column of `board` is numbered `1..=N`.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first column with a gap or duplicate.
    pub async fn ensure_dense(&self, board: BoardId) -> Result<(), eyre::Report> {
        let columns = self
            .items
            .list_items(self.owner, board)
            .await
            .wrap_err("list items")?;
        for (column, items) in &columns {
            let orders: Vec<u32> = items.iter().map(Item::order).collect();
            let expected: Vec<u32> = (1..=u32::try_from(items.len())?).collect();
            eyre::ensure!(
                orders == expected,
                "column {column} is not dense: {orders:?}"
            );
        }
        Ok(())
    }
}

/// Provides a workspace with the default position configuration.
#[fixture]
pub fn workspace() -> Workspace {
    Workspace::with_config(PositionConfig::default())
}
