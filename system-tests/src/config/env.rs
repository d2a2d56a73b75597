// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed configuration for system tests.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: runs-on-harness
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 fails closed, as do empty values.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;

use runs_on_harness::logging::LogFormat;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for harness configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessEnv {
    /// Optional fixture root containing `live/` and `fixtures/`.
    TestRoot,
    /// Skip expensive scenarios (`true`/`false` or `1`/`0`).
    Short,
    /// Optional artifact run root override.
    RunRoot,
    /// Optional health-check attempt budget (positive integer).
    HealthAttempts,
    /// Optional log format (`pretty` or `json`).
    LogFormat,
    /// Optional `terraform` binary override.
    TerraformBin,
    /// Optional `terragrunt` binary override.
    TerragruntBin,
}

impl HarnessEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TestRoot => "RUNS_ON_TEST_ROOT",
            Self::Short => "RUNS_ON_TEST_SHORT",
            Self::RunRoot => "RUNS_ON_TEST_RUN_ROOT",
            Self::HealthAttempts => "RUNS_ON_TEST_HEALTH_ATTEMPTS",
            Self::LogFormat => "RUNS_ON_TEST_LOG_FORMAT",
            Self::TerraformBin => "RUNS_ON_TEST_TERRAFORM_BIN",
            Self::TerragruntBin => "RUNS_ON_TEST_TERRAGRUNT_BIN",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed harness configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HarnessConfig {
    /// Optional fixture root override.
    pub test_root: Option<PathBuf>,
    /// Skip expensive scenarios.
    pub short: bool,
    /// Optional artifact run root override.
    pub run_root: Option<PathBuf>,
    /// Optional health-check attempt budget.
    pub health_attempts: Option<u32>,
    /// Log output format.
    pub log_format: LogFormat,
    /// Optional `terraform` binary override.
    pub terraform_bin: Option<String>,
    /// Optional `terragrunt` binary override.
    pub terragrunt_bin: Option<String>,
}

impl HarnessConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is empty,
    /// or fails validation (for example, an invalid count or boolean value).
    pub fn load() -> Result<Self, String> {
        let test_root = read_env_nonempty(HarnessEnv::TestRoot.as_str())?.map(PathBuf::from);
        let short =
            parse_bool_env(HarnessEnv::Short.as_str(), read_env_nonempty(HarnessEnv::Short.as_str())?)?;
        let run_root = read_env_nonempty(HarnessEnv::RunRoot.as_str())?.map(PathBuf::from);
        let health_attempts = read_env_nonempty(HarnessEnv::HealthAttempts.as_str())?
            .map(|value| parse_positive_count(HarnessEnv::HealthAttempts.as_str(), &value))
            .transpose()?;
        let log_format = read_env_nonempty(HarnessEnv::LogFormat.as_str())?
            .map(|value| {
                value
                    .parse::<LogFormat>()
                    .map_err(|err| format!("{}: {err}", HarnessEnv::LogFormat.as_str()))
            })
            .transpose()?
            .unwrap_or_default();
        let terraform_bin = read_env_nonempty(HarnessEnv::TerraformBin.as_str())?;
        let terragrunt_bin = read_env_nonempty(HarnessEnv::TerragruntBin.as_str())?;
        Ok(Self {
            test_root,
            short,
            run_root,
            health_attempts,
            log_format,
            terraform_bin,
            terragrunt_bin,
        })
    }

    /// Returns the fixture root, defaulting to `test/` at the workspace root.
    #[must_use]
    pub fn fixture_root(&self) -> PathBuf {
        self.test_root.clone().unwrap_or_else(default_fixture_root)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Default fixture root next to this crate.
fn default_fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("test")
}

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, String> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| format!("{name} must be valid UTF-8"))
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the variable is set but empty or whitespace.
fn read_env_nonempty(name: &str) -> Result<Option<String>, String> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(format!("{name} must not be empty")),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses a positive count from an environment variable string.
///
/// # Errors
///
/// Returns an error when the value is non-numeric or zero.
fn parse_positive_count(name: &str, raw: &str) -> Result<u32, String> {
    let count: u32 =
        raw.trim().parse().map_err(|_| format!("{name} must be a positive integer"))?;
    if count == 0 {
        return Err(format!("{name} must be greater than zero"));
    }
    Ok(count)
}

/// Parses a boolean environment variable; unset means false.
///
/// # Errors
///
/// Returns an error when the value is not a recognized boolean literal.
fn parse_bool_env(name: &str, raw: Option<String>) -> Result<bool, String> {
    let Some(value) = raw else {
        return Ok(false);
    };
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
        return Ok(true);
    }
    if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
        return Ok(false);
    }
    Err(format!("{name} must be 1, 0, true, or false"))
}
