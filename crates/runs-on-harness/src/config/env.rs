// crates/runs-on-harness/src/config/env.rs
// ============================================================================
// Module: Scenario Environment
// Description: Environment-backed lookups for scenario configuration.
// Purpose: Resolve required and optional values with strict UTF-8 validation.
// Dependencies: thiserror, tracing
// ============================================================================

//! ## Overview
//! [`EnvResolver`] reads scenario settings either from the process
//! environment or from a fixed in-memory map. Empty values are treated as
//! unset. Invalid UTF-8 fails closed for [`EnvResolver::required`] and
//! [`EnvResolver::get`]; [`EnvResolver::optional`] never fails.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::warn;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Region used when `AWS_REGION` is not set.
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Environment keys consumed by scenario configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioEnv {
    /// AWS region override.
    AwsRegion,
    /// GitHub organization the runner stack is registered for.
    GithubOrg,
    /// runs-on license key.
    LicenseKey,
    /// Explicit test identifier override.
    TestId,
    /// NAT gateway toggle for the network stage.
    EnableNat,
}

impl ScenarioEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AwsRegion => "AWS_REGION",
            Self::GithubOrg => "GITHUB_ORG",
            Self::LicenseKey => "RUNS_ON_LICENSE_KEY",
            Self::TestId => "TEST_ID",
            Self::EnableNat => "ENABLE_NAT",
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while resolving environment values.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    /// A required variable is unset and has no fallback.
    #[error("required environment variable {0} is not set")]
    MissingRequired(String),
    /// The variable is set but is not valid UTF-8.
    #[error("{0} must be valid UTF-8")]
    InvalidUtf8(String),
}

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Backing store for environment lookups.
#[derive(Debug, Clone, Default)]
enum EnvSource {
    /// Read from the current process environment.
    #[default]
    Process,
    /// Read from a fixed map; never touches the process environment.
    Fixed(BTreeMap<String, String>),
}

/// Resolves scenario settings from an environment source.
#[derive(Debug, Clone, Default)]
pub struct EnvResolver {
    /// Where values are read from.
    source: EnvSource,
}

impl EnvResolver {
    /// Creates a resolver over the process environment.
    #[must_use]
    pub fn from_process() -> Self {
        Self {
            source: EnvSource::Process,
        }
    }

    /// Creates a resolver over a fixed set of entries.
    #[must_use]
    pub fn from_map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries.into_iter().map(|(key, value)| (key.into(), value.into())).collect();
        Self {
            source: EnvSource::Fixed(map),
        }
    }

    /// Returns the value for `key`, or `fallback` with a warning when unset.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::MissingRequired`] when the variable is unset and
    /// `fallback` is empty, or [`EnvError::InvalidUtf8`] for non UTF-8 values.
    pub fn required(&self, key: &str, fallback: &str) -> Result<String, EnvError> {
        if let Some(value) = self.get(key)? {
            return Ok(value);
        }
        if fallback.is_empty() {
            return Err(EnvError::MissingRequired(key.to_string()));
        }
        warn!(key, "environment variable not set, using fallback value");
        Ok(fallback.to_string())
    }

    /// Returns the value for `key`, or `default` when unset or unreadable.
    ///
    /// Unreadable values are logged and replaced by `default`; use
    /// [`EnvResolver::get`] where they must fail closed.
    #[must_use]
    pub fn optional(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            Ok(Some(value)) => value,
            Ok(None) => default.to_string(),
            Err(err) => {
                warn!(key, error = %err, "ignoring unreadable environment variable");
                default.to_string()
            }
        }
    }

    /// Returns the AWS region for tests.
    #[must_use]
    pub fn aws_region(&self) -> String {
        self.optional(ScenarioEnv::AwsRegion.as_str(), DEFAULT_AWS_REGION)
    }

    /// Reads a value, mapping empty strings to `None`.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::InvalidUtf8`] for non UTF-8 values.
    pub fn get(&self, key: &str) -> Result<Option<String>, EnvError> {
        let value = match &self.source {
            EnvSource::Process => read_env_strict(key)?,
            EnvSource::Fixed(map) => map.get(key).cloned(),
        };
        Ok(value.filter(|value| !value.is_empty()))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
fn read_env_strict(name: &str) -> Result<Option<String>, EnvError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| EnvError::InvalidUtf8(name.to_string()))
    })
}
