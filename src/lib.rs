//! Corkboard: Kanban board storage with dense per-column ordering.
//!
//! Users own boards; boards hold items arranged in four fixed columns
//! (`backlog`, `todo`, `doing`, `done`). Within each column the active items
//! are numbered `1..=N` without gaps, and every create, move, and delete
//! keeps that numbering intact.
//!
//! # Architecture
//!
//! Corkboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`board`]: Board ownership and lifecycle
//! - [`item`]: Items, the column position engine, and item lifecycle
//! - [`telemetry`]: Tracing subscriber installation

pub mod board;
pub mod item;
pub mod telemetry;
