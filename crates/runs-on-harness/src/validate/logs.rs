// crates/runs-on-harness/src/validate/logs.rs
// ============================================================================
// Module: Log Retention Validator
// Description: CloudWatch log group retention check.
// Purpose: Ensure no stack log group keeps logs forever.
// Dependencies: runs-on-harness::validate::inspector, tracing
// ============================================================================

//! ## Overview
//! Every log group under the stack prefix must expire its events.

// ============================================================================
// SECTION: Imports
// ============================================================================

use tracing::info;

use super::inspector::CloudInspector;
use super::outcome::Outcome;
use super::outcome::ValidationError;

// ============================================================================
// SECTION: Validators
// ============================================================================

/// Checks every log group matching `prefix` has a retention policy.
///
/// # Errors
///
/// Returns [`ValidationError`] when no group matches or any group has
/// unbounded retention.
pub async fn validate_log_retention(
    inspector: &dyn CloudInspector,
    prefix: &str,
) -> Result<Outcome, ValidationError> {
    let groups = inspector.log_groups(prefix).await?;
    if groups.is_empty() {
        return Err(ValidationError::violation(
            format!("log groups with prefix {prefix}"),
            "no log group found",
        ));
    }
    let unbounded: Vec<&str> = groups
        .iter()
        .filter(|group| group.retention_days.is_none())
        .map(|group| group.name.as_str())
        .collect();
    if !unbounded.is_empty() {
        return Err(ValidationError::violation(
            format!("log groups with prefix {prefix}"),
            format!("retention policy missing (logs never expire): {}", unbounded.join(", ")),
        ));
    }
    for group in &groups {
        info!(log_group = %group.name, retention_days = group.retention_days, "log retention verified");
    }
    Ok(Outcome::Passed)
}
