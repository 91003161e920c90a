//! `PostgreSQL` repository implementation for board storage.

use super::{
    models::{BoardRecord, BoardRow},
    schema::boards,
};
use crate::board::{
    domain::{Board, BoardId, BoardName, PersistedBoardData, UserId},
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed board repository.
#[derive(Debug, Clone)]
pub struct PostgresBoardRepository {
    pool: BoardPgPool,
}

impl PostgresBoardRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> BoardRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> BoardRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(BoardRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(BoardRepositoryError::persistence)?
    }
}

#[async_trait]
impl BoardRepository for PostgresBoardRepository {
    async fn store(&self, board: &Board) -> BoardRepositoryResult<()> {
        let board_id = board.id();
        let record = to_record(board);
        self.run_blocking(move |connection| {
            diesel::insert_into(boards::table)
                .values(&record)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        BoardRepositoryError::DuplicateBoard(board_id)
                    }
                    _ => BoardRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, board: &Board) -> BoardRepositoryResult<()> {
        let board_id = board.id();
        let record = to_record(board);
        self.run_blocking(move |connection| {
            let affected = diesel::update(boards::table.filter(boards::id.eq(record.id)))
                .set(&record)
                .execute(connection)
                .map_err(BoardRepositoryError::persistence)?;
            if affected == 0 {
                return Err(BoardRepositoryError::NotFound(board_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: BoardId) -> BoardRepositoryResult<Option<Board>> {
        self.run_blocking(move |connection| {
            let row = boards::table
                .filter(boards::id.eq(id.into_inner()))
                .select(BoardRow::as_select())
                .first::<BoardRow>(connection)
                .optional()
                .map_err(BoardRepositoryError::persistence)?;
            row.map(row_to_board).transpose()
        })
        .await
    }

    async fn find_active_by_owner(&self, owner: UserId) -> BoardRepositoryResult<Vec<Board>> {
        self.run_blocking(move |connection| {
            let rows = boards::table
                .filter(boards::owner_id.eq(owner.into_inner()))
                .filter(boards::deleted.eq(false))
                .order(boards::created_at.asc())
                .select(BoardRow::as_select())
                .load::<BoardRow>(connection)
                .map_err(BoardRepositoryError::persistence)?;
            rows.into_iter().map(row_to_board).collect()
        })
        .await
    }
}

fn to_record(board: &Board) -> BoardRecord {
    BoardRecord {
        id: board.id().into_inner(),
        owner_id: board.owner().into_inner(),
        name: board.name().as_str().to_owned(),
        deleted: board.is_deleted(),
        created_at: board.created_at(),
        updated_at: board.updated_at(),
    }
}

fn row_to_board(row: BoardRow) -> BoardRepositoryResult<Board> {
    let name = BoardName::new(row.name).map_err(BoardRepositoryError::persistence)?;
    Ok(Board::from_persisted(PersistedBoardData {
        id: BoardId::from_uuid(row.id),
        owner: UserId::from_uuid(row.owner_id),
        name,
        deleted: row.deleted,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
