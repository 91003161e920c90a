//! Application services for board management.

mod lifecycle;

pub use lifecycle::{BoardService, BoardServiceError, BoardServiceResult};
