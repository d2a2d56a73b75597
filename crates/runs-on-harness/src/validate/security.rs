// crates/runs-on-harness/src/validate/security.rs
// ============================================================================
// Module: Security Validators
// Description: DynamoDB encryption and IAM role permissiveness checks.
// Purpose: Catch unencrypted tables and administrator-equivalent roles.
// Dependencies: runs-on-harness::validate::inspector, tracing
// ============================================================================

//! ## Overview
//! A locks table without an SSE description is accepted as a soft pass,
//! since DynamoDB then encrypts with its default key. Runner roles must
//! not carry any policy in [`DENIED_POLICY_ARNS`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use tracing::info;

use super::inspector::CloudInspector;
use super::outcome::Outcome;
use super::outcome::ValidationError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Managed policies that must never be attached to runner roles.
pub const DENIED_POLICY_ARNS: [&str; 3] = [
    "arn:aws:iam::aws:policy/AdministratorAccess",
    "arn:aws:iam::aws:policy/PowerUserAccess",
    "arn:aws:iam::aws:policy/IAMFullAccess",
];

/// SSE statuses that count as encrypted.
const ENCRYPTED_SSE_STATUSES: [&str; 2] = ["ENABLED", "ENABLING"];

// ============================================================================
// SECTION: Validators
// ============================================================================

/// Checks the table is encrypted at rest.
///
/// A table without an SSE description uses the AWS-owned key, which is
/// accepted as a soft pass.
///
/// # Errors
///
/// Returns [`ValidationError`] when an explicit SSE status is neither
/// `ENABLED` nor `ENABLING`.
pub async fn validate_table_encryption(
    inspector: &dyn CloudInspector,
    table: &str,
) -> Result<Outcome, ValidationError> {
    let Some(status) = inspector.table_sse_status(table).await? else {
        info!(table, "table uses default AWS-owned key encryption");
        return Ok(Outcome::Soft(format!("table {table} uses default AWS-owned key encryption")));
    };
    if !ENCRYPTED_SSE_STATUSES.contains(&status.as_str()) {
        return Err(ValidationError::mismatch(
            format!("table {table} encryption status"),
            ENCRYPTED_SSE_STATUSES.join(" or "),
            status,
        ));
    }
    info!(table, status = %status, "table encryption verified");
    Ok(Outcome::Passed)
}

/// Checks the role has no administrator-equivalent managed policy attached.
///
/// # Errors
///
/// Returns [`ValidationError`] listing every denied policy found.
pub async fn validate_role_not_overly_permissive(
    inspector: &dyn CloudInspector,
    role: &str,
) -> Result<Outcome, ValidationError> {
    let attached = inspector.attached_role_policy_arns(role).await?;
    let denied: Vec<&str> = attached
        .iter()
        .map(String::as_str)
        .filter(|arn| DENIED_POLICY_ARNS.contains(arn))
        .collect();
    if !denied.is_empty() {
        return Err(ValidationError::violation(
            format!("role {role}"),
            format!("must not have {} attached", denied.join(", ")),
        ));
    }
    info!(role, attached = attached.len(), "role has no overly permissive policies attached");
    Ok(Outcome::Passed)
}
