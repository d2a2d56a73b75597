// crates/runs-on-harness/src/validate/inspector.rs
// ============================================================================
// Module: Cloud Inspector
// Description: Read-only control-plane queries used by validators.
// Purpose: Separate AWS describe calls from the assertions made on them.
// Dependencies: async-trait, thiserror
// ============================================================================

//! ## Overview
//! [`CloudInspector`] returns plain data for each describe call the
//! validators need. The AWS implementation lives in [`super::AwsInspector`];
//! tests supply in-memory fakes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use thiserror::Error;

// ============================================================================
// SECTION: Types
// ============================================================================

/// S3 public-access block flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(
    clippy::struct_excessive_bools,
    reason = "Mirrors the four independent S3 public-access flags."
)]
pub struct PublicAccessBlock {
    /// Block public ACLs.
    pub block_public_acls: bool,
    /// Block public bucket policies.
    pub block_public_policy: bool,
    /// Ignore existing public ACLs.
    pub ignore_public_acls: bool,
    /// Restrict public bucket access.
    pub restrict_public_buckets: bool,
}

impl PublicAccessBlock {
    /// Returns every flag that is disabled.
    #[must_use]
    pub fn disabled_flags(&self) -> Vec<&'static str> {
        [
            ("BlockPublicAcls", self.block_public_acls),
            ("BlockPublicPolicy", self.block_public_policy),
            ("IgnorePublicAcls", self.ignore_public_acls),
            ("RestrictPublicBuckets", self.restrict_public_buckets),
        ]
        .into_iter()
        .filter(|(_, enabled)| !enabled)
        .map(|(name, _)| name)
        .collect()
    }
}

/// Retention state of one CloudWatch log group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogGroupRetention {
    /// Log group name.
    pub name: String,
    /// Retention in days; `None` means logs never expire.
    pub retention_days: Option<i32>,
}

/// Control-plane query failure.
#[derive(Debug, Error)]
#[error("{operation} failed for {resource}: {message}")]
pub struct InspectError {
    /// API operation name.
    pub operation: &'static str,
    /// Resource queried.
    pub resource: String,
    /// Error detail.
    pub message: String,
}

impl InspectError {
    /// Builds an inspect error.
    pub fn new(operation: &'static str, resource: &str, message: impl Into<String>) -> Self {
        Self {
            operation,
            resource: resource.to_string(),
            message: message.into(),
        }
    }
}

// ============================================================================
// SECTION: Inspector Trait
// ============================================================================

/// Read-only queries against the cloud control plane.
#[async_trait]
pub trait CloudInspector: Send + Sync {
    /// Returns the default encryption algorithm of each bucket encryption rule.
    async fn bucket_encryption_algorithms(&self, bucket: &str) -> Result<Vec<String>, InspectError>;

    /// Returns the access-logging target bucket, if logging is enabled.
    async fn bucket_logging_target(&self, bucket: &str) -> Result<Option<String>, InspectError>;

    /// Returns the bucket's public-access block configuration.
    async fn bucket_public_access_block(
        &self,
        bucket: &str,
    ) -> Result<PublicAccessBlock, InspectError>;

    /// Returns the bucket versioning status, if ever configured.
    async fn bucket_versioning_status(&self, bucket: &str) -> Result<Option<String>, InspectError>;

    /// Returns the table's SSE status, or `None` for provider-owned keys.
    async fn table_sse_status(&self, table: &str) -> Result<Option<String>, InspectError>;

    /// Returns the ARNs of managed policies attached to the role.
    async fn attached_role_policy_arns(&self, role: &str) -> Result<Vec<String>, InspectError>;

    /// Returns the log groups whose names start with `prefix`.
    async fn log_groups(&self, prefix: &str) -> Result<Vec<LogGroupRetention>, InspectError>;
}
