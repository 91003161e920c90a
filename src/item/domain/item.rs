//! Item aggregate root and its placement within a board.

use super::{Column, ItemDomainError, ItemId, ShiftDirection};
use crate::board::domain::BoardId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order carried by tombstoned items; never a valid active position.
pub const DELETED_ORDER: u32 = 0;

/// Longest accepted item title, in characters.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Validated, trimmed item title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemTitle(String);

impl ItemTitle {
    /// Creates a validated item title.
    ///
    /// # Errors
    ///
    /// Returns [`ItemDomainError::EmptyTitle`] when the value is blank and
    /// [`ItemDomainError::TitleTooLong`] when the trimmed value exceeds
    /// [`MAX_TITLE_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ItemDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ItemDomainError::EmptyTitle);
        }
        if trimmed.chars().count() > MAX_TITLE_LENGTH {
            return Err(ItemDomainError::TitleTooLong {
                max: MAX_TITLE_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Position of an active item: its column and 1-based order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Column holding the item.
    pub column: Column,
    /// 1-based order within the column.
    pub order: u32,
}

impl Placement {
    /// Creates a placement.
    #[must_use]
    pub const fn new(column: Column, order: u32) -> Self {
        Self { column, order }
    }
}

/// Item aggregate root.
///
/// An item is either active, holding a [`Placement`] in its board's dense
/// per-column ordering, or deleted. Deletion is terminal: the tombstone keeps
/// its column, carries [`DELETED_ORDER`], and rejects every later change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    board: BoardId,
    column: Column,
    order: u32,
    deleted: bool,
    title: ItemTitle,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedItemData {
    /// Persisted item identifier.
    pub id: ItemId,
    /// Persisted owning board.
    pub board: BoardId,
    /// Persisted column.
    pub column: Column,
    /// Persisted order.
    pub order: u32,
    /// Persisted tombstone flag.
    pub deleted: bool,
    /// Persisted title.
    pub title: ItemTitle,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Creates a new active item at `placement` on `board`.
    ///
    /// # Errors
    ///
    /// Returns [`ItemDomainError::ReservedOrder`] when the placement order is
    /// [`DELETED_ORDER`].
    pub fn new(
        board: BoardId,
        placement: Placement,
        title: ItemTitle,
        description: Option<String>,
        clock: &impl Clock,
    ) -> Result<Self, ItemDomainError> {
        if placement.order == DELETED_ORDER {
            return Err(ItemDomainError::ReservedOrder);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: ItemId::new(),
            board,
            column: placement.column,
            order: placement.order,
            deleted: false,
            title,
            description: normalize_description(description),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs an item from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedItemData) -> Self {
        Self {
            id: data.id,
            board: data.board,
            column: data.column,
            order: data.order,
            deleted: data.deleted,
            title: data.title,
            description: data.description,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the item identifier.
    #[must_use]
    pub const fn id(&self) -> ItemId {
        self.id
    }

    /// Returns the owning board.
    #[must_use]
    pub const fn board(&self) -> BoardId {
        self.board
    }

    /// Returns the column, which tombstones keep.
    #[must_use]
    pub const fn column(&self) -> Column {
        self.column
    }

    /// Returns the order; [`DELETED_ORDER`] for tombstones.
    #[must_use]
    pub const fn order(&self) -> u32 {
        self.order
    }

    /// Returns `true` once the item has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Returns the active placement, or `None` for tombstones.
    #[must_use]
    pub const fn placement(&self) -> Option<Placement> {
        if self.deleted {
            None
        } else {
            Some(Placement::new(self.column, self.order))
        }
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &ItemTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the title.
    ///
    /// # Errors
    ///
    /// Returns [`ItemDomainError::ItemDeleted`] for tombstones.
    pub fn retitle(&mut self, title: ItemTitle, clock: &impl Clock) -> Result<(), ItemDomainError> {
        self.ensure_active()?;
        self.title = title;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the description; blank text clears it.
    ///
    /// # Errors
    ///
    /// Returns [`ItemDomainError::ItemDeleted`] for tombstones.
    pub fn describe(
        &mut self,
        description: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), ItemDomainError> {
        self.ensure_active()?;
        self.description = normalize_description(description);
        self.touch(clock);
        Ok(())
    }

    /// Moves the item to `placement`.
    ///
    /// The board is fixed at creation and never changes here.
    ///
    /// # Errors
    ///
    /// Returns [`ItemDomainError::ItemDeleted`] for tombstones and
    /// [`ItemDomainError::ReservedOrder`] for order `0`.
    pub fn place(
        &mut self,
        placement: Placement,
        clock: &impl Clock,
    ) -> Result<(), ItemDomainError> {
        self.ensure_active()?;
        if placement.order == DELETED_ORDER {
            return Err(ItemDomainError::ReservedOrder);
        }
        self.column = placement.column;
        self.order = placement.order;
        self.touch(clock);
        Ok(())
    }

    /// Shifts the order by one slot in `direction`.
    ///
    /// # Errors
    ///
    /// Returns [`ItemDomainError::ItemDeleted`] for tombstones and
    /// [`ItemDomainError::ReservedOrder`] when the shift would reach `0`.
    pub fn shift(
        &mut self,
        direction: ShiftDirection,
        clock: &impl Clock,
    ) -> Result<(), ItemDomainError> {
        let placement = Placement::new(self.column, direction.apply(self.order));
        self.place(placement, clock)
    }

    /// Tombstones the item and returns the placement it vacated.
    ///
    /// # Errors
    ///
    /// Returns [`ItemDomainError::ItemDeleted`] when already deleted.
    pub fn mark_deleted(&mut self, clock: &impl Clock) -> Result<Placement, ItemDomainError> {
        self.ensure_active()?;
        let vacated = Placement::new(self.column, self.order);
        self.deleted = true;
        self.order = DELETED_ORDER;
        self.touch(clock);
        Ok(vacated)
    }

    /// Takes over the order and modification time of `other`, keeping
    /// every other field.
    pub(crate) fn adopt_order(&mut self, other: &Self) {
        self.order = other.order;
        self.updated_at = other.updated_at;
    }

    const fn ensure_active(&self) -> Result<(), ItemDomainError> {
        if self.deleted {
            return Err(ItemDomainError::ItemDeleted(self.id));
        }
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}
