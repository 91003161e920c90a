//! Error types for item domain validation and parsing.

use super::ItemId;
use thiserror::Error;

/// Errors returned while constructing or mutating items.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ItemDomainError {
    /// The item title is empty after trimming.
    #[error("item title must not be empty")]
    EmptyTitle,

    /// The item title is longer than the stored column allows.
    #[error("item title must be at most {max} characters")]
    TitleTooLong {
        /// Longest accepted title, in characters.
        max: usize,
    },

    /// The item is a tombstone and accepts no further changes.
    #[error("item {0} has been deleted")]
    ItemDeleted(ItemId),

    /// Active items must hold a 1-based order.
    #[error("order 0 is reserved for deleted items")]
    ReservedOrder,
}

/// Error returned while parsing a column name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown column: {0}")]
pub struct ParseColumnError(pub String);
