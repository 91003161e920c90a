//! Fixed workflow columns.

use super::ParseColumnError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow stage partitioning items within a board.
///
/// The set is closed; variant order is the left-to-right board layout.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    /// Not yet scheduled.
    #[default]
    Backlog,
    /// Scheduled but not started.
    Todo,
    /// In progress.
    Doing,
    /// Finished.
    Done,
}

impl Column {
    /// Every column in board order.
    pub const ALL: [Self; 4] = [Self::Backlog, Self::Todo, Self::Doing, Self::Done];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
        }
    }
}

impl TryFrom<&str> for Column {
    type Error = ParseColumnError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "backlog" => Ok(Self::Backlog),
            "todo" => Ok(Self::Todo),
            "doing" => Ok(Self::Doing),
            "done" => Ok(Self::Done),
            _ => Err(ParseColumnError(value.to_owned())),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
