// crates/runs-on-harness/src/validate/outputs.rs
// ============================================================================
// Module: Output Validators
// Description: Shape checks on declared stack outputs.
// Purpose: Verify feature toggles are reflected in the outputs.
// Dependencies: runs-on-harness::deploy, runs-on-harness::stack
// ============================================================================

//! ## Overview
//! Output checks run without calling AWS. A disabled feature must leave its
//! outputs empty, never partially populated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use super::outcome::Outcome;
use super::outcome::ValidationError;
use crate::deploy::OutputSet;
use crate::stack::names;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Domain suffix of App Runner service URLs.
pub const APP_RUNNER_DOMAIN: &str = "awsapprunner.com";

/// Prefix of every ECR repository ARN.
const ECR_ARN_PREFIX: &str = "arn:aws:ecr";

// ============================================================================
// SECTION: Validators
// ============================================================================

/// Checks the service URL is set and on the App Runner domain.
///
/// # Errors
///
/// Returns [`ValidationError`] when the URL is empty or on another domain.
pub fn validate_service_url(service_url: &str) -> Result<Outcome, ValidationError> {
    if service_url.is_empty() {
        return Err(ValidationError::violation(names::APP_RUNNER_URL, "output is empty"));
    }
    if !service_url.contains(APP_RUNNER_DOMAIN) {
        return Err(ValidationError::mismatch(
            names::APP_RUNNER_URL,
            format!("a host on {APP_RUNNER_DOMAIN}"),
            service_url,
        ));
    }
    Ok(Outcome::Passed)
}

/// Checks a declared output is set.
///
/// # Errors
///
/// Returns [`ValidationError`] when the output is empty or undeclared.
pub fn validate_output_present(outputs: &OutputSet, name: &str) -> Result<Outcome, ValidationError> {
    if outputs.output(name).is_empty() {
        return Err(ValidationError::violation(name, "output is empty"));
    }
    Ok(Outcome::Passed)
}

/// Checks the EFS output matches the feature toggle.
///
/// # Errors
///
/// Returns [`ValidationError`] when the id is set while disabled, or empty
/// while enabled.
pub fn validate_efs_output(outputs: &OutputSet, enabled: bool) -> Result<Outcome, ValidationError> {
    let efs_id = outputs.output(names::EFS_ID);
    match (enabled, efs_id.is_empty()) {
        (true, true) => {
            Err(ValidationError::violation(names::EFS_ID, "output is empty while EFS is enabled"))
        }
        (false, false) => Err(ValidationError::mismatch(
            names::EFS_ID,
            "empty while EFS is disabled",
            efs_id,
        )),
        _ => Ok(Outcome::Passed),
    }
}

/// Checks the ECR outputs match the feature toggle.
///
/// When enabled, the repository URL must contain the stack name and the
/// ARN must be an ECR ARN.
///
/// # Errors
///
/// Returns [`ValidationError`] on the first mismatch.
pub fn validate_ecr_outputs(
    outputs: &OutputSet,
    enabled: bool,
    stack_name: &str,
) -> Result<Outcome, ValidationError> {
    let url = outputs.output(names::ECR_REPOSITORY_URL);
    if !enabled {
        if !url.is_empty() {
            return Err(ValidationError::mismatch(
                names::ECR_REPOSITORY_URL,
                "empty while ECR is disabled",
                url,
            ));
        }
        return Ok(Outcome::Passed);
    }
    if url.is_empty() {
        return Err(ValidationError::violation(
            names::ECR_REPOSITORY_URL,
            "output is empty while ECR is enabled",
        ));
    }
    if !url.contains(stack_name) {
        return Err(ValidationError::mismatch(
            names::ECR_REPOSITORY_URL,
            format!("a URL containing {stack_name}"),
            url,
        ));
    }
    let arn = outputs.output(names::ECR_REPOSITORY_ARN);
    if !arn.starts_with(ECR_ARN_PREFIX) {
        return Err(ValidationError::mismatch(
            names::ECR_REPOSITORY_ARN,
            format!("an ARN starting with {ECR_ARN_PREFIX}"),
            if arn.is_empty() { "<empty>".to_string() } else { arn },
        ));
    }
    Ok(Outcome::Passed)
}

/// Checks the three storage bucket names carry the stack name and role.
///
/// # Errors
///
/// Returns [`ValidationError`] naming the first bucket that does not match.
pub fn validate_bucket_names(
    outputs: &OutputSet,
    stack_name: &str,
) -> Result<Outcome, ValidationError> {
    for (output, role) in [
        (names::CONFIG_BUCKET, "config"),
        (names::CACHE_BUCKET, "cache"),
        (names::LOGGING_BUCKET, "logging"),
    ] {
        let bucket = outputs.output(output);
        if !bucket.contains(stack_name) || !bucket.contains(role) {
            return Err(ValidationError::mismatch(
                output,
                format!("a name containing {stack_name} and {role}"),
                bucket,
            ));
        }
    }
    Ok(Outcome::Passed)
}
