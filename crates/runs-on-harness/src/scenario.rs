// crates/runs-on-harness/src/scenario.rs
// ============================================================================
// Module: Scenarios
// Description: Scenario catalog and two-stage deployment orchestration.
// Purpose: Deploy network then module stages and tear them down in reverse.
// Dependencies: runs-on-harness::config, runs-on-harness::deploy, thiserror, tracing
// ============================================================================

//! ## Overview
//! A [`ScenarioKind`] names a fixture under `live/scenarios/` and the
//! feature flags it enables. [`ScenarioPlan`] resolves the fixture paths and
//! stage parameters; [`ScenarioPlan::deploy`] applies the shared network
//! stage, then the module stage wired to the network outputs.
//! Invariants:
//! - The module stage never starts before the network stage has applied.
//! - Teardown runs module first, then network, on success, error, or panic.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use thiserror::Error;
use tracing::error;
use tracing::info;

use crate::config::ScenarioConfig;
use crate::deploy::DeployError;
use crate::deploy::DeployedStage;
use crate::deploy::DeploymentHandle;
use crate::deploy::OutputSet;
use crate::deploy::Provisioner;
use crate::deploy::apply_stage;
use crate::stack::StackOutputs;
use crate::stack::names;
use crate::validate::BatteryFailed;
use crate::validate::ValidationReport;

// ============================================================================
// SECTION: Scenario Catalog
// ============================================================================

/// Deployment scenarios exercised against real AWS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioKind {
    /// Default settings only.
    Minimal,
    /// Runners in public subnets, no NAT.
    PublicOnly,
    /// Runners in private subnets behind NAT.
    PrivateNetworking,
    /// Shared EFS filesystem.
    EfsEnabled,
    /// ECR pull-through repository.
    EcrEnabled,
    /// NAT, EFS, and ECR together.
    FullFeatured,
}

/// Optional features toggled by a scenario.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    /// Provision EFS.
    pub efs: bool,
    /// Provision ECR.
    pub ecr: bool,
    /// Provision NAT gateways.
    pub nat: bool,
}

impl ScenarioKind {
    /// Every scenario, cheapest first.
    pub const ALL: [Self; 6] = [
        Self::Minimal,
        Self::PublicOnly,
        Self::EcrEnabled,
        Self::PrivateNetworking,
        Self::EfsEnabled,
        Self::FullFeatured,
    ];

    /// Returns the fixture directory name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::PublicOnly => "public-only",
            Self::PrivateNetworking => "private-networking",
            Self::EfsEnabled => "efs-enabled",
            Self::EcrEnabled => "ecr-enabled",
            Self::FullFeatured => "full-featured",
        }
    }

    /// Returns the features this scenario enables.
    #[must_use]
    pub const fn features(self) -> FeatureFlags {
        match self {
            Self::Minimal | Self::PublicOnly => FeatureFlags {
                efs: false,
                ecr: false,
                nat: false,
            },
            Self::PrivateNetworking => FeatureFlags {
                efs: false,
                ecr: false,
                nat: true,
            },
            Self::EfsEnabled => FeatureFlags {
                efs: true,
                ecr: false,
                nat: false,
            },
            Self::EcrEnabled => FeatureFlags {
                efs: false,
                ecr: true,
                nat: false,
            },
            Self::FullFeatured => FeatureFlags {
                efs: true,
                ecr: true,
                nat: true,
            },
        }
    }

    /// Returns true when the scenario is skipped in short mode.
    ///
    /// NAT gateways and EFS mount targets dominate deploy time and cost.
    #[must_use]
    pub const fn is_expensive(self) -> bool {
        matches!(self, Self::PrivateNetworking | Self::EfsEnabled | Self::FullFeatured)
    }

    /// Applies the scenario's feature flags to a config.
    pub const fn apply_to(self, config: &mut ScenarioConfig) {
        let features = self.features();
        config.enable_efs = features.efs;
        config.enable_ecr = features.ecr;
        config.enable_nat = features.nat;
    }
}

// ============================================================================
// SECTION: Fixture Layout
// ============================================================================

/// Location of the HCL fixtures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureLayout {
    /// Root containing `live/` and `fixtures/`.
    root: PathBuf,
}

impl FixtureLayout {
    /// Creates a layout rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
        }
    }

    /// Shared network stage.
    #[must_use]
    pub fn network_dir(&self) -> PathBuf {
        self.root.join("live").join("_shared").join("vpc")
    }

    /// Module stage for a scenario.
    #[must_use]
    pub fn scenario_dir(&self, kind: ScenarioKind) -> PathBuf {
        self.root.join("live").join("scenarios").join(kind.as_str())
    }

    /// Standalone module fixture, such as `storage` or `optional`.
    #[must_use]
    pub fn module_fixture_dir(&self, name: &str) -> PathBuf {
        self.root.join("fixtures").join(name)
    }
}

// ============================================================================
// SECTION: Plan
// ============================================================================

/// Resolved parameters for one scenario deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioPlan {
    /// Scenario under test.
    pub kind: ScenarioKind,
    /// Config with the scenario's flags applied.
    pub config: ScenarioConfig,
    /// Network stage directory.
    pub network_dir: PathBuf,
    /// Module stage directory.
    pub module_dir: PathBuf,
    /// Tool binary for both stages.
    pub binary: String,
}

impl ScenarioPlan {
    /// Builds a plan, applying the scenario's flags to `config`.
    #[must_use]
    pub fn new(
        kind: ScenarioKind,
        mut config: ScenarioConfig,
        layout: &FixtureLayout,
        binary: impl Into<String>,
    ) -> Self {
        kind.apply_to(&mut config);
        Self {
            kind,
            config,
            network_dir: layout.network_dir(),
            module_dir: layout.scenario_dir(kind),
            binary: binary.into(),
        }
    }

    /// Returns the network stage handle.
    #[must_use]
    pub fn network_handle(&self) -> DeploymentHandle {
        DeploymentHandle::new(&self.network_dir, self.binary.as_str())
            .with_vars(self.config.to_network_vars())
            .with_env(self.config.to_stage_env())
    }

    /// Returns the module stage handle wired to the network outputs.
    #[must_use]
    pub fn module_handle(&self, network: &OutputSet) -> DeploymentHandle {
        let vars = self.config.to_module_vars(
            &network.output(names::VPC_ID),
            &network.output_list(names::PUBLIC_SUBNET_IDS),
            &network.output_list(names::PRIVATE_SUBNET_IDS),
        );
        DeploymentHandle::new(&self.module_dir, self.binary.as_str())
            .with_vars(vars)
            .with_env(self.config.to_stage_env())
    }

    /// Deploys the network stage, then the module stage.
    ///
    /// On failure every stage that reached apply has already been destroyed
    /// when this returns.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError`] from the first stage that fails.
    pub fn deploy<'p>(
        &self,
        provisioner: &'p dyn Provisioner,
    ) -> Result<DeployedScenario<'p>, DeployError> {
        info!(
            scenario = self.kind.as_str(),
            test_id = %self.config.test_id,
            stack = %self.config.stack_name(),
            "deploying scenario"
        );
        let network = apply_stage(provisioner, self.network_handle())?;
        let module = apply_stage(provisioner, self.module_handle(network.outputs()))?;
        Ok(DeployedScenario {
            module,
            network,
        })
    }
}

// ============================================================================
// SECTION: Deployed Scenario
// ============================================================================

/// Both stages of a deployed scenario.
///
/// # Invariants
/// - `module` is declared before `network`; fields drop in declaration
///   order, so dropping the scenario destroys the module stage first.
pub struct DeployedScenario<'p> {
    /// Application module stage.
    module: DeployedStage<'p>,
    /// Shared network stage.
    network: DeployedStage<'p>,
}

impl DeployedScenario<'_> {
    /// Returns the module stage outputs.
    #[must_use]
    pub const fn outputs(&self) -> &OutputSet {
        self.module.outputs()
    }

    /// Returns the network stage outputs.
    #[must_use]
    pub const fn network_outputs(&self) -> &OutputSet {
        self.network.outputs()
    }

    /// Returns the typed module outputs used by validation.
    #[must_use]
    pub fn stack_outputs(&self) -> StackOutputs {
        StackOutputs::from_outputs(self.module.outputs())
    }

    /// Destroys both stages now, module first.
    ///
    /// The network stage is destroyed even when the module destroy fails.
    ///
    /// # Errors
    ///
    /// Returns the first [`DeployError`] encountered.
    pub fn teardown(self) -> Result<(), DeployError> {
        let Self {
            module,
            network,
        } = self;
        let module_result = module.teardown();
        if let Err(err) = &module_result {
            error!(error = %err, "module stage teardown failed");
        }
        let network_result = network.teardown();
        if let Err(err) = &network_result {
            error!(error = %err, "network stage teardown failed");
        }
        module_result.and(network_result)
    }
}

// ============================================================================
// SECTION: Run Outcome
// ============================================================================

/// Failure surfaced at the end of a deploy, validate, teardown run.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum RunError {
    /// At least one validation check failed.
    #[error(transparent)]
    Validation(#[from] BatteryFailed),
    /// Validation passed but a stage could not be destroyed.
    #[error("teardown failed: {0}")]
    Teardown(#[source] DeployError),
}

/// Validation and teardown results of one run, kept side by side.
///
/// # Invariants
/// - A validation failure is reported ahead of a teardown failure.
/// - A teardown failure is always visible in [`RunOutcome::notes`].
#[derive(Debug)]
pub struct RunOutcome {
    /// Result of the validation battery.
    validation: Result<ValidationReport, BatteryFailed>,
    /// Result of destroying the deployed stages.
    teardown: Result<(), DeployError>,
}

impl RunOutcome {
    /// Pairs a finished battery with the teardown that followed it.
    #[must_use]
    pub const fn new(
        validation: Result<ValidationReport, BatteryFailed>,
        teardown: Result<(), DeployError>,
    ) -> Self {
        Self {
            validation,
            teardown,
        }
    }

    /// Returns true when validation and teardown both succeeded.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.validation.is_ok() && self.teardown.is_ok()
    }

    /// Returns the summary status label, `pass` or `fail`.
    #[must_use]
    pub const fn status(&self) -> &'static str {
        if self.passed() { "pass" } else { "fail" }
    }

    /// Returns summary notes describing any failure.
    #[must_use]
    pub fn notes(&self) -> Vec<String> {
        let mut notes = Vec::new();
        if let Err(err) = &self.validation {
            notes.push(err.to_string());
        }
        if let Err(err) = &self.teardown {
            notes.push(format!("teardown failed: {err}"));
        }
        notes
    }

    /// Resolves the run into its report or its primary failure.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Validation`] when any check failed, otherwise
    /// [`RunError::Teardown`] when a stage could not be destroyed.
    pub fn into_result(self) -> Result<ValidationReport, RunError> {
        match (self.validation, self.teardown) {
            (Err(failed), teardown) => {
                if let Err(err) = teardown {
                    error!(error = %err, "teardown also failed after validation failure");
                }
                Err(RunError::Validation(failed))
            }
            (Ok(_), Err(err)) => Err(RunError::Teardown(err)),
            (Ok(report), Ok(())) => Ok(report),
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
