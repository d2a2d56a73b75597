// crates/runs-on-harness/src/validate/battery.rs
// ============================================================================
// Module: Validation Battery
// Description: Independent execution and reporting of named validators.
// Purpose: Surface every failed check of a stack in a single run.
// Dependencies: serde, thiserror, tracing
// ============================================================================

//! ## Overview
//! A [`ValidationBattery`] records the result of each named check and keeps
//! going after a failure, so one broken resource never hides the state of
//! its siblings. [`run_stack_battery`] assembles the standard checks for a
//! deployed runs-on stack.
//! Invariants:
//! - Checks are recorded in execution order.
//! - A missing output is a failed check, never a skipped one.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::future::Future;

use serde::Serialize;
use thiserror::Error;
use tracing::error;
use tracing::info;

use super::health::HealthCheckPolicy;
use super::health::HealthProbe;
use super::health::validate_service_health;
use super::inspector::CloudInspector;
use super::logs::validate_log_retention;
use super::outcome::Outcome;
use super::outcome::ValidationError;
use super::outputs::validate_service_url;
use super::security::validate_role_not_overly_permissive;
use super::security::validate_table_encryption;
use super::storage::VersioningStatus;
use super::storage::validate_bucket_encryption;
use super::storage::validate_bucket_logging;
use super::storage::validate_bucket_public_access;
use super::storage::validate_bucket_versioning;
use crate::stack::StackOutputs;
use crate::stack::names;

// ============================================================================
// SECTION: Report Types
// ============================================================================

/// Recorded status of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckStatus {
    /// The check passed.
    Passed,
    /// The check passed with a note.
    Soft {
        /// Informational note.
        note: String,
    },
    /// The check failed.
    Failed {
        /// Failure message.
        message: String,
    },
}

/// Named check result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckRecord {
    /// Check name.
    pub name: String,
    /// Check status.
    #[serde(flatten)]
    pub status: CheckStatus,
}

/// Ordered results of a battery run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Battery name.
    pub battery: String,
    /// Check results in execution order.
    pub checks: Vec<CheckRecord>,
}

impl ValidationReport {
    /// Returns the failed checks.
    pub fn failures(&self) -> impl Iterator<Item = &CheckRecord> {
        self.checks.iter().filter(|check| matches!(check.status, CheckStatus::Failed { .. }))
    }
}

/// Battery run with at least one failed check.
#[derive(Debug, Error)]
#[error("validation battery {} failed: {summary}", report.battery)]
pub struct BatteryFailed {
    /// Failed checks and their messages.
    pub summary: String,
    /// Full report, including passing checks.
    pub report: ValidationReport,
}

// ============================================================================
// SECTION: Battery
// ============================================================================

/// Runs named checks independently and collects their results.
#[derive(Debug, Clone)]
pub struct ValidationBattery {
    /// Battery name.
    name: String,
    /// Recorded checks.
    entries: Vec<CheckRecord>,
}

impl ValidationBattery {
    /// Creates an empty battery.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Records the result of a check that already ran.
    pub fn record(&mut self, name: impl Into<String>, result: Result<Outcome, ValidationError>) {
        let name = name.into();
        let status = match result {
            Ok(Outcome::Passed) => {
                info!(battery = %self.name, check = %name, "check passed");
                CheckStatus::Passed
            }
            Ok(Outcome::Soft(note)) => {
                info!(battery = %self.name, check = %name, note = %note, "check passed with note");
                CheckStatus::Soft {
                    note,
                }
            }
            Err(err) => {
                error!(battery = %self.name, check = %name, error = %err, "check failed");
                CheckStatus::Failed {
                    message: err.to_string(),
                }
            }
        };
        self.entries.push(CheckRecord {
            name,
            status,
        });
    }

    /// Awaits a check and records its result.
    pub async fn check<F>(&mut self, name: impl Into<String>, check: F)
    where
        F: Future<Output = Result<Outcome, ValidationError>>,
    {
        let result = check.await;
        self.record(name, result);
    }

    /// Returns a snapshot of the results recorded so far.
    #[must_use]
    pub fn report(&self) -> ValidationReport {
        ValidationReport {
            battery: self.name.clone(),
            checks: self.entries.clone(),
        }
    }

    /// Consumes the battery.
    ///
    /// # Errors
    ///
    /// Returns [`BatteryFailed`] listing every failed check.
    pub fn finish(self) -> Result<ValidationReport, BatteryFailed> {
        let report = ValidationReport {
            battery: self.name,
            checks: self.entries,
        };
        let failed: Vec<String> = report
            .failures()
            .filter_map(|check| match &check.status {
                CheckStatus::Failed {
                    message,
                } => Some(format!("{}: {message}", check.name)),
                _ => None,
            })
            .collect();
        if failed.is_empty() {
            return Ok(report);
        }
        Err(BatteryFailed {
            summary: failed.join("; "),
            report,
        })
    }
}

// ============================================================================
// SECTION: Stack Battery
// ============================================================================

/// Health-check settings for [`run_stack_battery`].
#[derive(Clone, Copy)]
pub struct HealthCheck<'a> {
    /// Probe used for each attempt.
    pub probe: &'a dyn HealthProbe,
    /// Retry policy.
    pub policy: HealthCheckPolicy,
}

/// Error recorded when a stack output the battery depends on is empty.
fn missing_output(output: &str) -> ValidationError {
    ValidationError::violation(output, "output is empty")
}

/// Runs the standard validation battery against a deployed stack.
///
/// The health check runs only when `health` is provided.
pub async fn run_stack_battery(
    inspector: &dyn CloudInspector,
    outputs: &StackOutputs,
    health: Option<HealthCheck<'_>>,
) -> ValidationBattery {
    let mut battery = ValidationBattery::new(if outputs.stack_name.is_empty() {
        "stack".to_string()
    } else {
        outputs.stack_name.clone()
    });

    let buckets = [
        ("config", names::CONFIG_BUCKET, outputs.config_bucket.as_str(), VersioningStatus::Enabled),
        ("cache", names::CACHE_BUCKET, outputs.cache_bucket.as_str(), VersioningStatus::Suspended),
        ("logging", names::LOGGING_BUCKET, outputs.logging_bucket.as_str(), VersioningStatus::Enabled),
    ];
    for (role, output, bucket, versioning) in buckets {
        if bucket.is_empty() {
            battery.record(format!("{role} bucket"), Err(missing_output(output)));
            continue;
        }
        battery
            .check(format!("{role} bucket encryption"), validate_bucket_encryption(inspector, bucket))
            .await;
        battery
            .check(
                format!("{role} bucket public access"),
                validate_bucket_public_access(inspector, bucket),
            )
            .await;
        battery
            .check(
                format!("{role} bucket versioning"),
                validate_bucket_versioning(inspector, bucket, versioning),
            )
            .await;
    }

    if !outputs.config_bucket.is_empty() && !outputs.logging_bucket.is_empty() {
        battery
            .check(
                "config bucket access logging",
                validate_bucket_logging(inspector, &outputs.config_bucket, &outputs.logging_bucket),
            )
            .await;
    }

    if outputs.locks_table.is_empty() {
        battery.record("locks table encryption", Err(missing_output(names::LOCKS_TABLE)));
    } else {
        battery
            .check("locks table encryption", validate_table_encryption(inspector, &outputs.locks_table))
            .await;
    }

    if outputs.instance_role.is_empty() {
        battery.record("instance role permissions", Err(missing_output(names::INSTANCE_ROLE)));
    } else {
        battery
            .check(
                "instance role permissions",
                validate_role_not_overly_permissive(inspector, &outputs.instance_role),
            )
            .await;
    }

    if outputs.log_group.is_empty() {
        battery.record("log retention", Err(missing_output(names::LOG_GROUP)));
    } else {
        battery.check("log retention", validate_log_retention(inspector, &outputs.log_group)).await;
    }

    if let Some(health) = health {
        let url_check = validate_service_url(&outputs.service_url);
        let url_ok = url_check.is_ok();
        battery.record("service url", url_check);
        if url_ok {
            battery
                .check("service health", async {
                    validate_service_health(health.probe, &outputs.service_url, health.policy)
                        .await
                        .map(|_| Outcome::Passed)
                        .map_err(ValidationError::from)
                })
                .await;
        }
    }

    battery
}
