//! `PostgreSQL` repository implementation for item storage.
//!
//! Every write is a single-row statement. A range shift issued through this
//! adapter is therefore a series of independent commits, matching the port
//! contract; no cross-row transaction is opened.

use super::{
    models::{ItemRecord, ItemRow},
    schema::items,
};
use crate::board::domain::BoardId;
use crate::item::{
    domain::{Column, Item, ItemId, ItemTitle, OrderRange, PersistedItemData},
    ports::{ItemRepository, ItemRepositoryError, ItemRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::ops::Bound;

/// `PostgreSQL` connection pool type used by item adapters.
pub type ItemPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed item repository.
#[derive(Debug, Clone)]
pub struct PostgresItemRepository {
    pool: ItemPgPool,
}

impl PostgresItemRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ItemPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ItemRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ItemRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ItemRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ItemRepositoryError::persistence)?
    }
}

#[async_trait]
impl ItemRepository for PostgresItemRepository {
    async fn insert(&self, item: &Item) -> ItemRepositoryResult<()> {
        let item_id = item.id();
        let record = to_record(item)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(items::table)
                .values(&record)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ItemRepositoryError::DuplicateItem(item_id)
                    }
                    _ => ItemRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, item: &Item) -> ItemRepositoryResult<()> {
        let item_id = item.id();
        let record = to_record(item)?;
        self.run_blocking(move |connection| {
            let live = items::table
                .filter(items::id.eq(record.id))
                .filter(items::deleted.eq(false));
            let affected = diesel::update(live)
                .set(&record)
                .execute(connection)
                .map_err(ItemRepositoryError::persistence)?;
            if affected == 0 {
                return Err(ItemRepositoryError::NotFound(item_id));
            }
            Ok(())
        })
        .await
    }

    async fn shift_order(&self, item: &Item, expected_order: u32) -> ItemRepositoryResult<bool> {
        let id = item.id().into_inner();
        let expected = to_sql_order(expected_order)?;
        let position = to_sql_order(item.order())?;
        let updated_at = item.updated_at();
        self.run_blocking(move |connection| {
            let target = items::table
                .filter(items::id.eq(id))
                .filter(items::deleted.eq(false))
                .filter(items::position.eq(expected));
            let affected = diesel::update(target)
                .set((
                    items::position.eq(position),
                    items::updated_at.eq(updated_at),
                ))
                .execute(connection)
                .map_err(ItemRepositoryError::persistence)?;
            Ok(affected == 1)
        })
        .await
    }

    async fn find_by_id(&self, id: ItemId) -> ItemRepositoryResult<Option<Item>> {
        self.run_blocking(move |connection| {
            let row = items::table
                .filter(items::id.eq(id.into_inner()))
                .select(ItemRow::as_select())
                .first::<ItemRow>(connection)
                .optional()
                .map_err(ItemRepositoryError::persistence)?;
            row.map(row_to_item).transpose()
        })
        .await
    }

    async fn find_last_in_column(
        &self,
        board: BoardId,
        column: Column,
    ) -> ItemRepositoryResult<Option<Item>> {
        self.run_blocking(move |connection| {
            let row = items::table
                .filter(items::board_id.eq(board.into_inner()))
                .filter(items::column_name.eq(column.as_str()))
                .filter(items::deleted.eq(false))
                .order(items::position.desc())
                .select(ItemRow::as_select())
                .first::<ItemRow>(connection)
                .optional()
                .map_err(ItemRepositoryError::persistence)?;
            row.map(row_to_item).transpose()
        })
        .await
    }

    async fn find_in_range(
        &self,
        board: BoardId,
        column: Column,
        range: OrderRange,
    ) -> ItemRepositoryResult<Vec<Item>> {
        let lower = sql_bound(range.lower())?;
        let upper = sql_bound(range.upper())?;
        self.run_blocking(move |connection| {
            let mut query = items::table
                .select(ItemRow::as_select())
                .filter(items::board_id.eq(board.into_inner()))
                .filter(items::column_name.eq(column.as_str()))
                .filter(items::deleted.eq(false))
                .into_boxed();
            query = match lower {
                Bound::Included(value) => query.filter(items::position.ge(value)),
                Bound::Excluded(value) => query.filter(items::position.gt(value)),
                Bound::Unbounded => query,
            };
            query = match upper {
                Bound::Included(value) => query.filter(items::position.le(value)),
                Bound::Excluded(value) => query.filter(items::position.lt(value)),
                Bound::Unbounded => query,
            };
            let rows = query
                .order(items::position.asc())
                .load::<ItemRow>(connection)
                .map_err(ItemRepositoryError::persistence)?;
            rows.into_iter().map(row_to_item).collect()
        })
        .await
    }

    async fn find_active_on_board(&self, board: BoardId) -> ItemRepositoryResult<Vec<Item>> {
        self.run_blocking(move |connection| {
            let rows = items::table
                .filter(items::board_id.eq(board.into_inner()))
                .filter(items::deleted.eq(false))
                .order((items::column_name.asc(), items::position.asc()))
                .select(ItemRow::as_select())
                .load::<ItemRow>(connection)
                .map_err(ItemRepositoryError::persistence)?;
            let mut found = rows
                .into_iter()
                .map(row_to_item)
                .collect::<ItemRepositoryResult<Vec<Item>>>()?;
            // Column names do not sort in board order.
            found.sort_by_key(|item| (item.column(), item.order()));
            Ok(found)
        })
        .await
    }
}

fn sql_bound(bound: Bound<u32>) -> ItemRepositoryResult<Bound<i32>> {
    let converted = match bound {
        Bound::Included(value) => Bound::Included(to_sql_order(value)?),
        Bound::Excluded(value) => Bound::Excluded(to_sql_order(value)?),
        Bound::Unbounded => Bound::Unbounded,
    };
    Ok(converted)
}

fn to_sql_order(order: u32) -> ItemRepositoryResult<i32> {
    i32::try_from(order).map_err(ItemRepositoryError::persistence)
}

fn to_record(item: &Item) -> ItemRepositoryResult<ItemRecord> {
    Ok(ItemRecord {
        id: item.id().into_inner(),
        board_id: item.board().into_inner(),
        column_name: item.column().as_str().to_owned(),
        position: to_sql_order(item.order())?,
        deleted: item.is_deleted(),
        title: item.title().as_str().to_owned(),
        description: item.description().map(ToOwned::to_owned),
        created_at: item.created_at(),
        updated_at: item.updated_at(),
    })
}

fn row_to_item(row: ItemRow) -> ItemRepositoryResult<Item> {
    let ItemRow {
        id,
        board_id,
        column_name,
        position,
        deleted,
        title,
        description,
        created_at,
        updated_at,
    } = row;

    let column =
        Column::try_from(column_name.as_str()).map_err(ItemRepositoryError::persistence)?;
    let order = u32::try_from(position).map_err(ItemRepositoryError::persistence)?;
    let title = ItemTitle::new(title).map_err(ItemRepositoryError::persistence)?;

    Ok(Item::from_persisted(PersistedItemData {
        id: ItemId::from_uuid(id),
        board: BoardId::from_uuid(board_id),
        column,
        order,
        deleted,
        title,
        description,
        created_at,
        updated_at,
    }))
}
