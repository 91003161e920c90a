//! Domain model for board items.
//!
//! Items live in exactly one `(board, column)` partition. Within each
//! partition the active items form a dense 1-based ordering; tombstoned items
//! drop out of the ordering and carry [`DELETED_ORDER`].

mod column;
mod error;
mod ids;
mod item;
mod range;

pub use column::Column;
pub use error::{ItemDomainError, ParseColumnError};
pub use ids::ItemId;
pub use item::{
    DELETED_ORDER, Item, ItemTitle, MAX_TITLE_LENGTH, PersistedItemData, Placement,
};
pub use range::{OrderRange, ShiftDirection};
