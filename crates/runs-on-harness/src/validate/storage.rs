// crates/runs-on-harness/src/validate/storage.rs
// ============================================================================
// Module: Storage Validators
// Description: S3 bucket encryption, logging, versioning, and exposure checks.
// Purpose: Assert the bucket posture required for runs-on storage.
// Dependencies: runs-on-harness::validate::inspector, tracing
// ============================================================================

//! ## Overview
//! Bucket validators. Config and logging buckets are versioned; the cache
//! bucket is deliberately suspended so expired cache objects are not retained.

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

/// Default encryption algorithm required on every bucket (SSE-KMS).
pub const KMS_ALGORITHM: &str = "aws:kms";

/// Expected S3 versioning status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersioningStatus {
    /// Versioning is on.
    Enabled,
    /// Versioning was turned off after being enabled (or set suspended).
    Suspended,
}

impl VersioningStatus {
    /// Returns the S3 status literal.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enabled => "Enabled",
            Self::Suspended => "Suspended",
        }
    }
}

// ============================================================================
// SECTION: Validators
// ============================================================================

/// Checks the bucket's default encryption is SSE-KMS.
///
/// # Errors
///
/// Returns [`ValidationError`] when the bucket has no rules or any rule uses
/// another algorithm.
pub async fn validate_bucket_encryption(
    inspector: &dyn CloudInspector,
    bucket: &str,
) -> Result<Outcome, ValidationError> {
    let algorithms = inspector.bucket_encryption_algorithms(bucket).await?;
    if algorithms.is_empty() {
        return Err(ValidationError::violation(
            format!("bucket {bucket}"),
            "has no default encryption rules",
        ));
    }
    if let Some(other) = algorithms.iter().find(|algorithm| *algorithm != KMS_ALGORITHM) {
        return Err(ValidationError::mismatch(
            format!("bucket {bucket} encryption"),
            KMS_ALGORITHM,
            other.as_str(),
        ));
    }
    Ok(Outcome::Passed)
}

/// Checks the bucket ships access logs to `expected_target`.
///
/// # Errors
///
/// Returns [`ValidationError`] when logging is off or targets another bucket.
pub async fn validate_bucket_logging(
    inspector: &dyn CloudInspector,
    bucket: &str,
    expected_target: &str,
) -> Result<Outcome, ValidationError> {
    let target = inspector.bucket_logging_target(bucket).await?.unwrap_or_default();
    if target != expected_target {
        return Err(ValidationError::mismatch(
            format!("bucket {bucket} access logging target"),
            expected_target,
            if target.is_empty() { "<logging disabled>" } else { target.as_str() },
        ));
    }
    Ok(Outcome::Passed)
}

/// Checks all four public-access block flags are set.
///
/// # Errors
///
/// Returns [`ValidationError`] naming every disabled flag.
pub async fn validate_bucket_public_access(
    inspector: &dyn CloudInspector,
    bucket: &str,
) -> Result<Outcome, ValidationError> {
    let block = inspector.bucket_public_access_block(bucket).await?;
    let disabled = block.disabled_flags();
    if !disabled.is_empty() {
        return Err(ValidationError::violation(
            format!("bucket {bucket}"),
            format!("public access block flags disabled: {}", disabled.join(", ")),
        ));
    }
    Ok(Outcome::Passed)
}

/// Checks the bucket versioning status.
///
/// # Errors
///
/// Returns [`ValidationError`] when the status differs. A bucket that never
/// had versioning configured reports an empty status.
pub async fn validate_bucket_versioning(
    inspector: &dyn CloudInspector,
    bucket: &str,
    expected: VersioningStatus,
) -> Result<Outcome, ValidationError> {
    let status = inspector.bucket_versioning_status(bucket).await?.unwrap_or_default();
    if status != expected.as_str() {
        return Err(ValidationError::mismatch(
            format!("bucket {bucket} versioning"),
            expected.as_str(),
            format!("\"{status}\""),
        ));
    }
    info!(bucket, status = %status, "bucket versioning verified");
    Ok(Outcome::Passed)
}
