// crates/runs-on-harness/src/deploy/provisioner.rs
// ============================================================================
// Module: Provisioner
// Description: Provisioning-tool seam and its CLI implementation.
// Purpose: Run init/apply/destroy/output as blocking child processes.
// Dependencies: std::process, thiserror, tracing
// ============================================================================

//! ## Overview
//! [`Provisioner`] is the seam between the harness and the external tool.
//! [`CliProvisioner`] runs the real `terraform`/`terragrunt` binary with
//! captured stdout/stderr; a non-zero exit becomes [`DeployError`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::process::Command;
use std::process::Output;
use std::time::Instant;

use thiserror::Error;
use tracing::debug;
use tracing::info;

use super::handle::DeploymentHandle;
use super::handle::Subcommand;
use super::outputs::OutputSet;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Trailing stderr bytes kept in command failures.
const STDERR_TAIL_BYTES: usize = 4096;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while driving the provisioning tool.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum DeployError {
    /// Stage directory does not exist.
    #[error("stage directory does not exist: {0}")]
    MissingDirectory(String),
    /// The tool could not be spawned.
    #[error("failed to spawn {tool}: {source}")]
    Spawn {
        /// Tool binary.
        tool: String,
        /// Underlying spawn error.
        #[source]
        source: std::io::Error,
    },
    /// The tool exited unsuccessfully.
    #[error("{tool} {subcommand} failed in {dir} ({status}): {stderr}")]
    CommandFailed {
        /// Tool binary.
        tool: String,
        /// Subcommand that failed.
        subcommand: &'static str,
        /// Stage directory.
        dir: String,
        /// Exit status description.
        status: String,
        /// Trailing stderr output.
        stderr: String,
    },
    /// `output -json` did not produce a valid document.
    #[error("invalid output document: {0}")]
    InvalidOutput(String),
}

// ============================================================================
// SECTION: Provisioner Trait
// ============================================================================

/// Runs provisioning-tool operations for a stage.
pub trait Provisioner: Send + Sync {
    /// Runs `init` followed by `apply`.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError`] when either step fails, including partial applies.
    fn init_and_apply(&self, handle: &DeploymentHandle) -> Result<(), DeployError>;

    /// Runs `destroy`.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError`] when the destroy fails.
    fn destroy(&self, handle: &DeploymentHandle) -> Result<(), DeployError>;

    /// Reads all declared outputs.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError`] when the tool fails or prints invalid JSON.
    fn outputs(&self, handle: &DeploymentHandle) -> Result<OutputSet, DeployError>;
}

// ============================================================================
// SECTION: CLI Provisioner
// ============================================================================

/// Provisioner backed by the tool binary named in each handle.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliProvisioner;

impl CliProvisioner {
    /// Creates a CLI provisioner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Runs one subcommand and returns its output on success.
    fn run(&self, handle: &DeploymentHandle, subcommand: Subcommand) -> Result<Output, DeployError> {
        if !handle.dir.is_dir() {
            return Err(DeployError::MissingDirectory(handle.dir.display().to_string()));
        }
        let args = handle.args(subcommand);
        info!(
            tool = %handle.binary,
            subcommand = subcommand.as_str(),
            dir = %handle.dir.display(),
            "running provisioning command"
        );
        let started = Instant::now();
        let output = Command::new(&handle.binary)
            .args(&args)
            .current_dir(&handle.dir)
            .envs(&handle.env)
            .env("TF_IN_AUTOMATION", "1")
            .output()
            .map_err(|source| DeployError::Spawn {
                tool: handle.binary.clone(),
                source,
            })?;
        debug!(
            subcommand = subcommand.as_str(),
            elapsed_ms = started.elapsed().as_millis(),
            stdout = %tail(&String::from_utf8_lossy(&output.stdout), STDERR_TAIL_BYTES),
            "provisioning command finished"
        );
        if !output.status.success() {
            return Err(DeployError::CommandFailed {
                tool: handle.binary.clone(),
                subcommand: subcommand.as_str(),
                dir: handle.dir.display().to_string(),
                status: output.status.to_string(),
                stderr: tail(&String::from_utf8_lossy(&output.stderr), STDERR_TAIL_BYTES),
            });
        }
        Ok(output)
    }
}

impl Provisioner for CliProvisioner {
    fn init_and_apply(&self, handle: &DeploymentHandle) -> Result<(), DeployError> {
        self.run(handle, Subcommand::Init)?;
        self.run(handle, Subcommand::Apply)?;
        Ok(())
    }

    fn destroy(&self, handle: &DeploymentHandle) -> Result<(), DeployError> {
        self.run(handle, Subcommand::Destroy)?;
        Ok(())
    }

    fn outputs(&self, handle: &DeploymentHandle) -> Result<OutputSet, DeployError> {
        let output = self.run(handle, Subcommand::Output)?;
        OutputSet::from_json(&String::from_utf8_lossy(&output.stdout))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns at most the last `max` bytes of `text`, on a char boundary.
pub(crate) fn tail(text: &str, max: usize) -> String {
    let trimmed = text.trim_end();
    if trimmed.len() <= max {
        return trimmed.to_string();
    }
    let mut start = trimmed.len() - max;
    while !trimmed.is_char_boundary(start) {
        start += 1;
    }
    trimmed[start ..].to_string()
}
