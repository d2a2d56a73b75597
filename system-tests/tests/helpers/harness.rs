// system-tests/tests/helpers/harness.rs
// ============================================================================
// Module: Harness Context
// Description: Per-test wiring of config, fixtures, provisioner, and AWS.
// Purpose: Keep scenario and module suites free of setup boilerplate.
// Dependencies: system-tests, runs-on-harness
// ============================================================================

//! ## Overview
//! [`HarnessContext`] loads the harness configuration, installs logging, and
//! hands out scenario plans, module-fixture handles, and AWS clients.

use std::error::Error;

use runs_on_harness::CliProvisioner;
use runs_on_harness::DeploymentHandle;
use runs_on_harness::EnvResolver;
use runs_on_harness::FixtureLayout;
use runs_on_harness::ScenarioConfig;
use runs_on_harness::ScenarioKind;
use runs_on_harness::ScenarioPlan;
use runs_on_harness::deploy::TERRAFORM_BINARY;
use runs_on_harness::deploy::TERRAGRUNT_BINARY;
use runs_on_harness::logging::init_logging;
use runs_on_harness::validate::AwsInspector;
use runs_on_harness::validate::HealthCheckPolicy;
use system_tests::config::HarnessConfig;
use tracing::info;

/// Shared setup for one system test.
pub struct HarnessContext {
    /// Harness configuration.
    pub config: HarnessConfig,
    /// Fixture locations.
    pub layout: FixtureLayout,
    /// Provisioner invoking the real tools.
    pub provisioner: CliProvisioner,
}

impl HarnessContext {
    /// Loads configuration and installs logging.
    pub fn load() -> Result<Self, Box<dyn Error>> {
        let config = HarnessConfig::load()?;
        init_logging(config.log_format)?;
        let layout = FixtureLayout::new(config.fixture_root());
        Ok(Self {
            config,
            layout,
            provisioner: CliProvisioner::new(),
        })
    }

    /// Returns true when `kind` should be skipped in this run.
    pub fn skips(&self, kind: ScenarioKind) -> bool {
        if self.config.short && kind.is_expensive() {
            info!(scenario = kind.as_str(), "skipping expensive scenario in short mode");
            return true;
        }
        false
    }

    /// Builds a scenario plan from the process environment.
    pub fn plan(&self, kind: ScenarioKind) -> Result<ScenarioPlan, Box<dyn Error>> {
        let config = ScenarioConfig::from_env(&EnvResolver::from_process())?;
        Ok(ScenarioPlan::new(kind, config, &self.layout, self.terragrunt()))
    }

    /// Returns a `terraform` handle for a standalone module fixture.
    pub fn module_fixture(&self, name: &str) -> DeploymentHandle {
        DeploymentHandle::new(self.layout.module_fixture_dir(name), self.terraform())
    }

    /// Returns the `terragrunt` binary to run.
    pub fn terragrunt(&self) -> String {
        self.config.terragrunt_bin.clone().unwrap_or_else(|| TERRAGRUNT_BINARY.to_string())
    }

    /// Returns the `terraform` binary to run.
    pub fn terraform(&self) -> String {
        self.config.terraform_bin.clone().unwrap_or_else(|| TERRAFORM_BINARY.to_string())
    }

    /// Returns the health-check policy, honoring the attempt override.
    pub fn health_policy(&self) -> HealthCheckPolicy {
        let policy = HealthCheckPolicy::default();
        self.config.health_attempts.map_or(policy, |attempts| policy.with_attempts(attempts))
    }

    /// Returns the region for standalone module fixtures.
    pub fn aws_region(&self) -> String {
        EnvResolver::from_process().aws_region()
    }

    /// Builds AWS clients for `region` from the default credential chain.
    pub async fn inspector(&self, region: &str) -> AwsInspector {
        AwsInspector::from_env(region).await
    }
}
