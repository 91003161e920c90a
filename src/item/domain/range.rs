//! Order predicates and shift directions used by range shifts.

use serde::{Deserialize, Serialize};
use std::ops::{Bound, RangeBounds};

/// Predicate over the `order` field of items in one partition.
///
/// Mirrors the range forms needed to open or close a single gap:
/// `> s`, `>= d`, `d <= order < s`, and `s < order <= d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderRange {
    start: Bound<u32>,
    end: Bound<u32>,
}

impl OrderRange {
    /// Orders strictly greater than `order`.
    #[must_use]
    pub const fn above(order: u32) -> Self {
        Self {
            start: Bound::Excluded(order),
            end: Bound::Unbounded,
        }
    }

    /// Orders greater than or equal to `order`.
    #[must_use]
    pub const fn at_or_above(order: u32) -> Self {
        Self {
            start: Bound::Included(order),
            end: Bound::Unbounded,
        }
    }

    /// Orders in `start <= order < end`.
    #[must_use]
    pub const fn closed_open(start: u32, end: u32) -> Self {
        Self {
            start: Bound::Included(start),
            end: Bound::Excluded(end),
        }
    }

    /// Orders in `start < order <= end`.
    #[must_use]
    pub const fn open_closed(start: u32, end: u32) -> Self {
        Self {
            start: Bound::Excluded(start),
            end: Bound::Included(end),
        }
    }

    /// Returns `true` when `order` satisfies the predicate.
    #[must_use]
    pub fn matches(&self, order: u32) -> bool {
        self.contains(&order)
    }

    /// Returns the lower bound by value.
    #[must_use]
    pub const fn lower(&self) -> Bound<u32> {
        self.start
    }

    /// Returns the upper bound by value.
    #[must_use]
    pub const fn upper(&self) -> Bound<u32> {
        self.end
    }
}

impl RangeBounds<u32> for OrderRange {
    fn start_bound(&self) -> Bound<&u32> {
        self.start.as_ref()
    }

    fn end_bound(&self) -> Bound<&u32> {
        self.end.as_ref()
    }
}

/// Direction of a single-slot range shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftDirection {
    /// Add one to every order in the range, opening a gap below it.
    Increment,
    /// Subtract one from every order in the range, closing a gap below it.
    Decrement,
}

impl ShiftDirection {
    /// Returns the signed step applied to each order.
    #[must_use]
    pub const fn delta(self) -> i32 {
        match self {
            Self::Increment => 1,
            Self::Decrement => -1,
        }
    }

    /// Applies the shift to `order`.
    #[must_use]
    pub const fn apply(self, order: u32) -> u32 {
        match self {
            Self::Increment => order.saturating_add(1),
            Self::Decrement => order.saturating_sub(1),
        }
    }
}
