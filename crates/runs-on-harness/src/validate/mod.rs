// crates/runs-on-harness/src/validate/mod.rs
// ============================================================================
// Module: Validation Library
// Description: Read-only assertions against deployed AWS resources.
// Purpose: Verify security, compliance, and health of a runs-on stack.
// Dependencies: async-trait, aws-sdk-*, reqwest, tokio
// ============================================================================

//! ## Overview
//! Each validator is a stateless query-then-compare against current
//! control-plane state, expressed over the [`CloudInspector`] seam.
//! [`ValidationBattery`] runs validators as independent checks so one
//! failure never hides the others.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod aws;
mod battery;
mod health;
mod inspector;
mod logs;
mod outcome;
mod outputs;
mod security;
mod storage;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use aws::AwsInspector;
pub use battery::BatteryFailed;
pub use battery::CheckRecord;
pub use battery::CheckStatus;
pub use battery::HealthCheck;
pub use battery::ValidationBattery;
pub use battery::ValidationReport;
pub use battery::run_stack_battery;
pub use health::DEFAULT_HEALTH_ATTEMPTS;
pub use health::HEALTH_BACKOFF;
pub use health::HealthCheckError;
pub use health::HealthCheckPolicy;
pub use health::HealthProbe;
pub use health::HttpHealthProbe;
pub use health::health_url;
pub use health::validate_service_health;
pub use inspector::CloudInspector;
pub use inspector::InspectError;
pub use inspector::LogGroupRetention;
pub use inspector::PublicAccessBlock;
pub use logs::validate_log_retention;
pub use outcome::Outcome;
pub use outcome::ValidationError;
pub use outputs::APP_RUNNER_DOMAIN;
pub use outputs::validate_bucket_names;
pub use outputs::validate_ecr_outputs;
pub use outputs::validate_efs_output;
pub use outputs::validate_output_present;
pub use outputs::validate_service_url;
pub use security::DENIED_POLICY_ARNS;
pub use security::validate_role_not_overly_permissive;
pub use security::validate_table_encryption;
pub use storage::KMS_ALGORITHM;
pub use storage::VersioningStatus;
pub use storage::validate_bucket_encryption;
pub use storage::validate_bucket_logging;
pub use storage::validate_bucket_public_access;
pub use storage::validate_bucket_versioning;
