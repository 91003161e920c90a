//! Application services for item placement and lifecycle.
//!
//! [`PositionEngine`] owns the ordering invariants; [`ItemService`] wraps it
//! with ownership checks and payload handling.

mod config;
mod lifecycle;
mod positions;

pub use config::{OutOfRangePolicy, PositionConfig};
pub use lifecycle::{
    CreateItemRequest, ErrorKind, ItemService, ItemServiceError, ItemServiceResult,
    UpdateItemRequest,
};
pub use positions::{InvalidTransition, PositionEngine, PositionError, PositionResult};
