//! Tracing subscriber installation.
//!
//! The library only emits `tracing` events and spans; binaries and test
//! harnesses call [`init`] once to route them somewhere.

use serde::{Deserialize, Serialize};
use std::env::{self, VarError};
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

/// Default filter directive when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "corkboard=info";

/// Configuration for the tracing subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub default_directive: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            default_directive: DEFAULT_DIRECTIVE.to_owned(),
            json: false,
        }
    }
}

/// Errors returned while installing the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive could not be parsed.
    #[error("invalid filter directive: {0}")]
    InvalidDirective(#[from] tracing_subscriber::filter::ParseError),

    /// `RUST_LOG` is set but is not valid unicode.
    #[error("unreadable RUST_LOG: {0}")]
    UnreadableEnv(#[source] VarError),

    /// A global subscriber is already installed.
    #[error("tracing subscriber already installed: {0}")]
    AlreadyInstalled(String),
}

/// Builds the filter: `RUST_LOG` when set, otherwise the configured
/// directive.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidDirective`] when `RUST_LOG` or the
/// configured directive does not parse, and
/// [`TelemetryError::UnreadableEnv`] when `RUST_LOG` is not unicode.
pub fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    filter_from(env::var(EnvFilter::DEFAULT_ENV), config)
}

fn filter_from(
    env_value: Result<String, VarError>,
    config: &TelemetryConfig,
) -> Result<EnvFilter, TelemetryError> {
    let directive = match env_value {
        Ok(value) => value,
        Err(VarError::NotPresent) => config.default_directive.clone(),
        Err(err) => return Err(TelemetryError::UnreadableEnv(err)),
    };
    Ok(EnvFilter::try_new(directive)?)
}

/// Installs a global fmt subscriber writing to stdout.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the directive is invalid or a subscriber
/// is already installed.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|err| TelemetryError::AlreadyInstalled(err.to_string()))
}
