//! Items (cards) placed in the fixed columns of a board.
//!
//! Each `(board, column)` pair is a partition whose active items are ordered
//! densely from 1. Creation appends, moves shift the span between the old
//! and new position, and soft deletion compacts the vacated column. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
