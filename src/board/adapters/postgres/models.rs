//! Diesel row models for board persistence.

use super::schema::boards;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for board records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = boards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BoardRow {
    /// Board identifier.
    pub id: uuid::Uuid,
    /// Owning user identifier.
    pub owner_id: uuid::Uuid,
    /// Board name.
    pub name: String,
    /// Soft-delete flag.
    pub deleted: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert and changeset model for board records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = boards)]
pub struct BoardRecord {
    /// Board identifier.
    pub id: uuid::Uuid,
    /// Owning user identifier.
    pub owner_id: uuid::Uuid,
    /// Board name.
    pub name: String,
    /// Soft-delete flag.
    pub deleted: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
