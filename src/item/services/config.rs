//! Configuration for the position engine.

use serde::{Deserialize, Serialize};

/// How a destination order outside the valid range is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRangePolicy {
    /// Fail with an invalid-transition error and write nothing.
    #[default]
    Reject,
    /// Move the destination to the nearest valid order.
    Clamp,
}

/// Configuration for [`PositionEngine`](super::PositionEngine).
///
/// # Examples
///
/// ```
/// use corkboard::item::services::{OutOfRangePolicy, PositionConfig};
///
/// let config = PositionConfig::default();
/// assert_eq!(config.out_of_range, OutOfRangePolicy::Reject);
///
/// let parsed: PositionConfig =
///     serde_json::from_str(r#"{ "out_of_range": "clamp" }"#).expect("valid config");
/// assert_eq!(parsed, PositionConfig::clamping());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionConfig {
    /// Policy for destination orders outside `[1, N]` (same column) or
    /// `[1, N + 1]` (another column).
    pub out_of_range: OutOfRangePolicy,
}

impl PositionConfig {
    /// Creates a configuration that clamps out-of-range destinations.
    #[must_use]
    pub const fn clamping() -> Self {
        Self {
            out_of_range: OutOfRangePolicy::Clamp,
        }
    }
}
