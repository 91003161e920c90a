//! Diesel row models for item persistence.

use super::schema::items;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for item records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ItemRow {
    /// Item identifier.
    pub id: uuid::Uuid,
    /// Owning board identifier.
    pub board_id: uuid::Uuid,
    /// Workflow column.
    pub column_name: String,
    /// Order within the column.
    pub position: i32,
    /// Soft-delete flag.
    pub deleted: bool,
    /// Item title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert and changeset model for item records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = items)]
#[diesel(treat_none_as_null = true)]
pub struct ItemRecord {
    /// Item identifier.
    pub id: uuid::Uuid,
    /// Owning board identifier.
    pub board_id: uuid::Uuid,
    /// Workflow column.
    pub column_name: String,
    /// Order within the column.
    pub position: i32,
    /// Soft-delete flag.
    pub deleted: bool,
    /// Item title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
