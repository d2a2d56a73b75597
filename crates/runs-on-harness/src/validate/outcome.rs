// crates/runs-on-harness/src/validate/outcome.rs
// ============================================================================
// Module: Validation Outcomes
// Description: Result and error types shared by all validators.
// Purpose: Distinguish hard failures from soft, informational passes.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Validators return [`Outcome`] on success and [`ValidationError`] on a
//! hard failure. A soft outcome passes but carries a note for the report.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use super::health::HealthCheckError;
use super::inspector::InspectError;

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Successful validator result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The resource matches the expected state.
    Passed,
    /// Accepted, with a note worth surfacing (for example provider-default
    /// encryption).
    Soft(String),
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Hard validation failure.
///
/// # Invariants
/// - Messages name the resource and the expected versus actual value.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The control-plane query failed.
    #[error(transparent)]
    Inspect(#[from] InspectError),
    /// The resource reports an unexpected value.
    #[error("{resource}: expected {expected}, got {actual}")]
    Mismatch {
        /// Resource under test.
        resource: String,
        /// Expected value.
        expected: String,
        /// Observed value.
        actual: String,
    },
    /// The resource violates a policy.
    #[error("{resource}: {message}")]
    Violation {
        /// Resource under test.
        resource: String,
        /// Violation description.
        message: String,
    },
    /// The service never reported healthy.
    #[error(transparent)]
    Health(#[from] HealthCheckError),
}

impl ValidationError {
    /// Builds a mismatch error.
    pub(crate) fn mismatch(
        resource: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::Mismatch {
            resource: resource.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Builds a policy violation error.
    pub(crate) fn violation(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Violation {
            resource: resource.into(),
            message: message.into(),
        }
    }
}
