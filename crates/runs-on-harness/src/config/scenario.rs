// crates/runs-on-harness/src/config/scenario.rs
// ============================================================================
// Module: Scenario Configuration
// Description: Per-test configuration and stage variable mapping.
// Purpose: Build network and module variable sets from one typed config.
// Dependencies: rand
// ============================================================================

//! ## Overview
//! [`ScenarioConfig`] is built once per test and maps into the variable sets
//! for the network stage and the application module stage.
//! Invariants:
//! - `private_subnet_ids` is passed only when private subnets exist and NAT
//!   is enabled; private runners without a NAT path cannot reach the internet.
//! - Stage environment is returned as data for the child process, never set
//!   on the current process.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use rand::Rng;

use super::env::DEFAULT_AWS_REGION;
use super::env::EnvError;
use super::env::EnvResolver;
use super::env::ScenarioEnv;
use crate::deploy::VarMap;
use crate::deploy::VarValue;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Lowercase alphabet for identifiers that end up in bucket names.
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Random suffix length appended to every test id.
const TEST_ID_SUFFIX_LEN: usize = 4;

/// Random suffix length for module-fixture stack names.
const STACK_SUFFIX_LEN: usize = 6;

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Common test configuration for all scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioConfig {
    /// Unique identifier used in resource names.
    pub test_id: String,
    /// GitHub organization the runners register with.
    pub github_org: String,
    /// runs-on license key.
    pub license_key: String,
    /// Provision the shared EFS filesystem.
    pub enable_efs: bool,
    /// Provision the ECR pull-through repository.
    pub enable_ecr: bool,
    /// Provision NAT gateways for private subnets.
    pub enable_nat: bool,
    /// Target AWS region.
    pub aws_region: String,
}

impl ScenarioConfig {
    /// Builds a config with test defaults, honoring environment overrides.
    ///
    /// Every call yields a fresh test id. A `TEST_ID` value becomes the id
    /// prefix, so configs built from one environment never share a stack.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError`] when an environment value cannot be read.
    pub fn from_env(env: &EnvResolver) -> Result<Self, EnvError> {
        let test_id = match env.get(ScenarioEnv::TestId.as_str())? {
            Some(prefix) => prefixed_test_id(&prefix),
            None => generate_test_id(),
        };
        Ok(Self {
            test_id,
            github_org: env.required(ScenarioEnv::GithubOrg.as_str(), "test-org")?,
            license_key: env.required(ScenarioEnv::LicenseKey.as_str(), "test-license")?,
            enable_efs: false,
            enable_ecr: false,
            enable_nat: false,
            aws_region: DEFAULT_AWS_REGION.to_string(),
        })
    }

    /// Returns the stack name derived from the test id.
    #[must_use]
    pub fn stack_name(&self) -> String {
        format!("test-{}", self.test_id)
    }

    /// Maps the config to network-stage variables.
    #[must_use]
    pub fn to_network_vars(&self) -> VarMap {
        let mut vars = VarMap::new();
        vars.insert("test_id".to_string(), VarValue::from(self.test_id.as_str()));
        vars.insert("aws_region".to_string(), VarValue::from(self.aws_region.as_str()));
        vars.insert("enable_nat".to_string(), VarValue::Bool(self.enable_nat));
        vars
    }

    /// Maps the config plus network outputs to module-stage variables.
    #[must_use]
    pub fn to_module_vars(
        &self,
        vpc_id: &str,
        public_subnets: &[String],
        private_subnets: &[String],
    ) -> VarMap {
        let mut vars = VarMap::new();
        vars.insert("stack_name".to_string(), VarValue::Str(self.stack_name()));
        vars.insert("github_organization".to_string(), VarValue::from(self.github_org.as_str()));
        vars.insert("license_key".to_string(), VarValue::from(self.license_key.as_str()));
        vars.insert("vpc_id".to_string(), VarValue::from(vpc_id));
        vars.insert("public_subnet_ids".to_string(), VarValue::List(public_subnets.to_vec()));
        vars.insert("enable_efs".to_string(), VarValue::Bool(self.enable_efs));
        vars.insert("enable_ecr".to_string(), VarValue::Bool(self.enable_ecr));
        vars.insert("environment".to_string(), VarValue::from("test"));
        vars.insert("log_retention_days".to_string(), VarValue::Int(1));
        vars.insert("cache_expiration_days".to_string(), VarValue::Int(1));
        vars.insert("detailed_monitoring_enabled".to_string(), VarValue::Bool(false));
        vars.insert("app_cpu".to_string(), VarValue::Int(1024));
        vars.insert("app_memory".to_string(), VarValue::Int(2048));

        if !private_subnets.is_empty() && self.enable_nat {
            vars.insert("private_subnet_ids".to_string(), VarValue::List(private_subnets.to_vec()));
        }
        vars
    }

    /// Returns the child-process environment read by Terragrunt stages.
    #[must_use]
    pub fn to_stage_env(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (ScenarioEnv::TestId.as_str().to_string(), self.test_id.clone()),
            (ScenarioEnv::GithubOrg.as_str().to_string(), self.github_org.clone()),
            (ScenarioEnv::LicenseKey.as_str().to_string(), self.license_key.clone()),
            (ScenarioEnv::EnableNat.as_str().to_string(), self.enable_nat.to_string()),
            (ScenarioEnv::AwsRegion.as_str().to_string(), self.aws_region.clone()),
        ])
    }
}

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// Generates a test id: unix seconds plus a random suffix.
///
/// Seconds alone collide when parallel tests start together.
#[must_use]
pub fn generate_test_id() -> String {
    let secs = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
    format!("{secs}-{}", random_suffix(TEST_ID_SUFFIX_LEN))
}

/// Generates a random stack name with the given prefix.
#[must_use]
pub fn random_stack_name(prefix: &str) -> String {
    format!("{prefix}-{}", random_suffix(STACK_SUFFIX_LEN))
}

/// Appends a random suffix to an operator-supplied test id prefix.
fn prefixed_test_id(prefix: &str) -> String {
    format!("{prefix}-{}", random_suffix(TEST_ID_SUFFIX_LEN))
}

/// Returns `len` random lowercase base36 characters.
fn random_suffix(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0 .. len)
        .map(|_| {
            let index = rng.gen_range(0 .. ID_ALPHABET.len());
            char::from(ID_ALPHABET[index])
        })
        .collect()
}
