// crates/runs-on-harness/src/lib.rs
// ============================================================================
// Module: runs-on Harness Library
// Description: Deploy-and-validate engine for runs-on infrastructure stacks.
// Purpose: Drive Terraform/Terragrunt stages and assert on AWS state.
// Dependencies: aws-sdk-*, reqwest, tokio, tracing
// ============================================================================

//! ## Overview
//! The harness provisions a runs-on stack in two stages (shared network, then
//! the application module), reads the declared outputs, and runs a battery of
//! read-only AWS validations against the result.
//! Invariants:
//! - Every stage that reaches apply has its teardown registered first.
//! - Teardown is LIFO: the module stage is destroyed before the network stage.
//! - Validations never mutate cloud state.
//!
//! Configuration is threaded explicitly; the process environment is only read.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod deploy;
pub mod logging;
pub mod scenario;
pub mod stack;
pub mod validate;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::EnvError;
pub use config::EnvResolver;
pub use config::ScenarioConfig;
pub use deploy::CliProvisioner;
pub use deploy::DeployError;
pub use deploy::DeployedStage;
pub use deploy::DeploymentHandle;
pub use deploy::OutputSet;
pub use deploy::Provisioner;
pub use deploy::VarMap;
pub use deploy::VarValue;
pub use deploy::apply_stage;
pub use scenario::DeployedScenario;
pub use scenario::FixtureLayout;
pub use scenario::RunError;
pub use scenario::RunOutcome;
pub use scenario::ScenarioKind;
pub use scenario::ScenarioPlan;
pub use stack::StackOutputs;
pub use validate::ValidationBattery;
pub use validate::ValidationError;
pub use validate::ValidationReport;
