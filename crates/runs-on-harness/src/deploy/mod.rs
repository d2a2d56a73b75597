// crates/runs-on-harness/src/deploy/mod.rs
// ============================================================================
// Module: Deployment Driver
// Description: Provisioning-tool invocation with guaranteed teardown.
// Purpose: Apply Terraform/Terragrunt stages and capture their outputs.
// Dependencies: serde_json, thiserror, tracing
// ============================================================================

//! ## Overview
//! A [`DeploymentHandle`] describes one stage. A [`Provisioner`] runs the
//! tool against it, and [`apply_stage`] returns a [`DeployedStage`] guard
//! whose drop destroys the stage.
//! Invariants:
//! - The teardown guard exists before apply starts, so partial applies are
//!   destroyed too.
//! - Destroy failures during drop are logged, never panicked.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod handle;
mod outputs;
mod provisioner;
mod stage;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use handle::DeploymentHandle;
pub use handle::Subcommand;
pub use handle::TERRAFORM_BINARY;
pub use handle::TERRAGRUNT_BINARY;
pub use handle::VarMap;
pub use handle::VarValue;
pub use outputs::OutputSet;
pub use provisioner::CliProvisioner;
pub use provisioner::DeployError;
pub use provisioner::Provisioner;
pub use stage::DeployedStage;
pub use stage::apply_stage;
