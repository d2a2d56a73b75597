// crates/runs-on-harness/src/logging.rs
// ============================================================================
// Module: Logging
// Description: Global tracing subscriber setup for harness runs.
// Purpose: Give every test the same filtered, structured log output.
// Dependencies: thiserror, tracing-subscriber
// ============================================================================

//! ## Overview
//! Installs a `tracing-subscriber` registry with an [`EnvFilter`] read from
//! `RUST_LOG` (default `info`) and either a pretty or a JSON-lines formatter.
//! Output goes through the test writer so `cargo test` captures it per test.
//! Invariants:
//! - Installation happens at most once per process; the first format wins.
//! - Later calls return the outcome of the first call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::str::FromStr;
use std::sync::OnceLock;

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Filter applied when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "info";

/// Outcome of the first installation attempt.
static INSTALLED: OnceLock<Result<(), LoggingError>> = OnceLock::new();

// ============================================================================
// SECTION: Types
// ============================================================================

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Returns the canonical format name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(LoggingError::UnknownFormat(value.to_string())),
        }
    }
}

/// Logging setup errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoggingError {
    /// The requested format is not recognized.
    #[error("unknown log format '{0}', expected 'pretty' or 'json'")]
    UnknownFormat(String),
    /// Another global subscriber was already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Init(String),
}

// ============================================================================
// SECTION: Installation
// ============================================================================

/// Installs the global tracing subscriber.
///
/// Safe to call from every test; only the first call installs anything.
///
/// # Errors
///
/// Returns [`LoggingError::Init`] when a subscriber not installed by this
/// function already owns the global slot.
pub fn init_logging(format: LogFormat) -> Result<(), LoggingError> {
    INSTALLED.get_or_init(|| install(format)).clone()
}

/// Builds and installs the subscriber for `format`.
fn install(format: LogFormat) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().pretty().with_test_writer())
            .try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_test_writer())
            .try_init(),
    };
    result.map_err(|err| LoggingError::Init(err.to_string()))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
