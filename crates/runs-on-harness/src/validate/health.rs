// crates/runs-on-harness/src/validate/health.rs
// ============================================================================
// Module: Service Health Validator
// Description: Bounded polling of the App Runner health endpoint.
// Purpose: Wait for the service to report healthy without unbounded sleeps.
// Dependencies: async-trait, reqwest, tokio, tracing
// ============================================================================

//! ## Overview
//! The health check polls `https://<host>/ping` up to a fixed number of
//! attempts with a fixed backoff between attempts. The first HTTP 200 wins.
//! Invariants:
//! - No sleep follows the final attempt.
//! - Exhaustion reports the last observed error or status code.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::time::sleep;
use tracing::info;
use tracing::warn;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default number of health-check attempts.
pub const DEFAULT_HEALTH_ATTEMPTS: u32 = 10;

/// Fixed delay between health-check attempts.
pub const HEALTH_BACKOFF: Duration = Duration::from_secs(30);

/// Per-request timeout for the HTTP probe.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Health endpoint path served by runs-on.
const HEALTH_PATH: &str = "/ping";

/// Status code that marks the service healthy.
const HEALTHY_STATUS: u16 = 200;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Health-check failures.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HealthCheckError {
    /// The HTTP client could not be built.
    #[error("failed to build health-check client: {0}")]
    Client(String),
    /// The policy allows no attempts.
    #[error("health check for {url} configured with zero attempts")]
    NoAttempts {
        /// Health endpoint.
        url: String,
    },
    /// Every attempt failed.
    #[error("health check for {url} failed after {attempts} attempts: {last}")]
    Exhausted {
        /// Health endpoint.
        url: String,
        /// Attempts made.
        attempts: u32,
        /// Last error or unexpected status.
        last: String,
    },
}

// ============================================================================
// SECTION: Policy
// ============================================================================

/// Retry policy for the health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthCheckPolicy {
    /// Maximum attempts.
    pub attempts: u32,
    /// Delay between attempts.
    pub backoff: Duration,
}

impl Default for HealthCheckPolicy {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_HEALTH_ATTEMPTS,
            backoff: HEALTH_BACKOFF,
        }
    }
}

impl HealthCheckPolicy {
    /// Returns the policy with a different attempt budget.
    #[must_use]
    pub const fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }
}

// ============================================================================
// SECTION: Probe
// ============================================================================

/// Issues a single health request and returns the HTTP status.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Performs one GET against `url`.
    async fn get_status(&self, url: &str) -> Result<u16, String>;
}

/// HTTPS probe with TLS verification and a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpHealthProbe {
    /// Shared HTTP client.
    client: reqwest::Client,
}

impl HttpHealthProbe {
    /// Builds the probe.
    ///
    /// # Errors
    ///
    /// Returns [`HealthCheckError::Client`] when the TLS client cannot be built.
    pub fn new() -> Result<Self, HealthCheckError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| HealthCheckError::Client(err.to_string()))?;
        Ok(Self {
            client,
        })
    }
}

#[async_trait]
impl HealthProbe for HttpHealthProbe {
    async fn get_status(&self, url: &str) -> Result<u16, String> {
        let response = self.client.get(url).send().await.map_err(|err| err.to_string())?;
        Ok(response.status().as_u16())
    }
}

// ============================================================================
// SECTION: Validator
// ============================================================================

/// Builds the health endpoint for a service host or URL.
#[must_use]
pub fn health_url(service_url: &str) -> String {
    let host = service_url
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');
    format!("https://{host}{HEALTH_PATH}")
}

/// Polls the service health endpoint until it returns 200.
///
/// Returns the number of attempts it took.
///
/// # Errors
///
/// Returns [`HealthCheckError::Exhausted`] with the last observed error once
/// every attempt has failed.
pub async fn validate_service_health(
    probe: &dyn HealthProbe,
    service_url: &str,
    policy: HealthCheckPolicy,
) -> Result<u32, HealthCheckError> {
    let url = health_url(service_url);
    if policy.attempts == 0 {
        return Err(HealthCheckError::NoAttempts {
            url,
        });
    }
    let mut last = String::new();
    for attempt in 1 ..= policy.attempts {
        match probe.get_status(&url).await {
            Ok(HEALTHY_STATUS) => {
                info!(%url, attempts = attempt, "health check passed");
                return Ok(attempt);
            }
            Ok(status) => {
                last = format!("unexpected status code: {status}");
                warn!(%url, attempt, max = policy.attempts, status, "health check attempt failed");
            }
            Err(err) => {
                warn!(%url, attempt, max = policy.attempts, error = %err, "health check attempt failed");
                last = err;
            }
        }
        if attempt < policy.attempts {
            sleep(policy.backoff).await;
        }
    }
    Err(HealthCheckError::Exhausted {
        url,
        attempts: policy.attempts,
        last,
    })
}
