// crates/runs-on-harness/src/deploy/stage.rs
// ============================================================================
// Module: Deployed Stage
// Description: Scope guard that destroys a stage when dropped.
// Purpose: Keep cloud resource lifetime bounded by the test scope.
// Dependencies: tracing
// ============================================================================

//! ## Overview
//! [`apply_stage`] registers teardown before running apply. The returned
//! [`DeployedStage`] destroys the stage on drop, including during unwinding,
//! unless [`DeployedStage::teardown`] already ran.

// ============================================================================
// SECTION: Imports
// ============================================================================

use tracing::error;
use tracing::info;

use super::handle::DeploymentHandle;
use super::outputs::OutputSet;
use super::provisioner::DeployError;
use super::provisioner::Provisioner;

// ============================================================================
// SECTION: Guard
// ============================================================================

/// A stage that has been applied (or attempted) and must be destroyed.
pub struct DeployedStage<'p> {
    /// Provisioner used for teardown.
    provisioner: &'p dyn Provisioner,
    /// Stage parameters.
    handle: DeploymentHandle,
    /// Outputs captured after apply.
    outputs: OutputSet,
    /// Set once teardown has run.
    released: bool,
}

impl DeployedStage<'_> {
    /// Returns the outputs captured after apply.
    #[must_use]
    pub const fn outputs(&self) -> &OutputSet {
        &self.outputs
    }

    /// Destroys the stage now and surfaces the result.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError`] when destroy fails. The guard is released
    /// either way, so drop will not retry.
    pub fn teardown(mut self) -> Result<(), DeployError> {
        self.released = true;
        self.provisioner.destroy(&self.handle)
    }
}

impl Drop for DeployedStage<'_> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        let dir = self.handle.dir.display().to_string();
        let panicking = std::thread::panicking();
        match self.provisioner.destroy(&self.handle) {
            Ok(()) => info!(%dir, panicking, "stage destroyed"),
            Err(err) => error!(%dir, panicking, error = %err, "stage teardown failed"),
        }
    }
}

// ============================================================================
// SECTION: Apply
// ============================================================================

/// Applies a stage and returns its teardown guard.
///
/// The guard is created before apply runs. When apply or output capture
/// fails, the guard drops here and destroys whatever was created.
///
/// # Errors
///
/// Returns [`DeployError`] when init, apply, or output capture fails.
pub fn apply_stage(
    provisioner: &dyn Provisioner,
    handle: DeploymentHandle,
) -> Result<DeployedStage<'_>, DeployError> {
    let mut stage = DeployedStage {
        provisioner,
        handle,
        outputs: OutputSet::default(),
        released: false,
    };
    provisioner.init_and_apply(&stage.handle)?;
    stage.outputs = provisioner.outputs(&stage.handle)?;
    info!(
        dir = %stage.handle.dir.display(),
        outputs = stage.outputs.names().count(),
        "stage applied"
    );
    Ok(stage)
}
