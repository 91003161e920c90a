//! Board aggregate root.

use super::{BoardDomainError, BoardId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest accepted board name, in characters.
pub const MAX_BOARD_NAME_LENGTH: usize = 255;

/// Validated, trimmed board name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardName(String);

impl BoardName {
    /// Creates a validated board name.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyBoardName`] when the value is blank
    /// and [`BoardDomainError::BoardNameTooLong`] when the trimmed value
    /// exceeds [`MAX_BOARD_NAME_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyBoardName);
        }
        if trimmed.chars().count() > MAX_BOARD_NAME_LENGTH {
            return Err(BoardDomainError::BoardNameTooLong {
                max: MAX_BOARD_NAME_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Board aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    id: BoardId,
    owner: UserId,
    name: BoardName,
    deleted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBoardData {
    /// Persisted board identifier.
    pub id: BoardId,
    /// Persisted owner.
    pub owner: UserId,
    /// Persisted name.
    pub name: BoardName,
    /// Persisted tombstone flag.
    pub deleted: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Board {
    /// Creates a new active board for `owner`.
    #[must_use]
    pub fn new(owner: UserId, name: BoardName, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: BoardId::new(),
            owner,
            name,
            deleted: false,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a board from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedBoardData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            name: data.name,
            deleted: data.deleted,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the board identifier.
    #[must_use]
    pub const fn id(&self) -> BoardId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the board name.
    #[must_use]
    pub const fn name(&self) -> &BoardName {
        &self.name
    }

    /// Returns `true` once the board has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Returns `true` when the board is active and owned by `user`.
    #[must_use]
    pub fn is_visible_to(&self, user: UserId) -> bool {
        !self.deleted && self.owner == user
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

    /// Renames the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::BoardDeleted`] for tombstoned boards.
    pub fn rename(&mut self, name: BoardName, clock: &impl Clock) -> Result<(), BoardDomainError> {
        self.ensure_active()?;
        self.name = name;
        self.touch(clock);
        Ok(())
    }

    /// Marks the board as deleted.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::BoardDeleted`] when already deleted.
    pub fn mark_deleted(&mut self, clock: &impl Clock) -> Result<(), BoardDomainError> {
        self.ensure_active()?;
        self.deleted = true;
        self.touch(clock);
        Ok(())
    }

    const fn ensure_active(&self) -> Result<(), BoardDomainError> {
        if self.deleted {
            return Err(BoardDomainError::BoardDeleted(self.id));
        }
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
