// crates/runs-on-harness/tests/teardown.rs
// ============================================================================
// Module: Teardown Integration Tests
// Description: Public-API checks that stages are destroyed on every exit path.
// Purpose: Prove teardown runs on panic and on partial deployment.
// Dependencies: runs-on-harness, serde_json, tempfile
// ============================================================================

//! ## Overview
//! Drives [`runs_on_harness::ScenarioPlan`] through a counting provisioner
//! and asserts the destroy sequence after panics and failed applies.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::panic::AssertUnwindSafe;
use std::panic::catch_unwind;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use runs_on_harness::DeployError;
use runs_on_harness::DeploymentHandle;
use runs_on_harness::EnvResolver;
use runs_on_harness::FixtureLayout;
use runs_on_harness::OutputSet;
use runs_on_harness::Provisioner;
use runs_on_harness::ScenarioConfig;
use runs_on_harness::ScenarioKind;
use runs_on_harness::ScenarioPlan;
use runs_on_harness::apply_stage;
use serde_json::json;

// ============================================================================
// SECTION: Counting Provisioner
// ============================================================================

/// Counts destroys and records their order by stage directory name.
#[derive(Default)]
struct CountingProvisioner {
    destroys: AtomicUsize,
    order: Mutex<Vec<String>>,
    fail_apply_in: Option<&'static str>,
}

impl CountingProvisioner {
    fn stage_name(handle: &DeploymentHandle) -> String {
        handle.dir.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default()
    }

    fn order(&self) -> Vec<String> {
        self.order.lock().unwrap().clone()
    }
}

impl Provisioner for CountingProvisioner {
    fn init_and_apply(&self, handle: &DeploymentHandle) -> Result<(), DeployError> {
        if self.fail_apply_in == Some(Self::stage_name(handle).as_str()) {
            return Err(DeployError::CommandFailed {
                tool: handle.binary.clone(),
                subcommand: "apply",
                dir: handle.dir.display().to_string(),
                status: "exit status: 1".to_string(),
                stderr: "Error: creating App Runner service".to_string(),
            });
        }
        Ok(())
    }

    fn destroy(&self, handle: &DeploymentHandle) -> Result<(), DeployError> {
        self.destroys.fetch_add(1, Ordering::SeqCst);
        self.order.lock().unwrap().push(Self::stage_name(handle));
        Ok(())
    }

    fn outputs(&self, _handle: &DeploymentHandle) -> Result<OutputSet, DeployError> {
        Ok(OutputSet::from_values([
            ("vpc_id", json!("vpc-0abc")),
            ("public_subnet_ids", json!(["subnet-a"])),
        ]))
    }
}

fn plan(kind: ScenarioKind) -> ScenarioPlan {
    let root = tempfile::tempdir().unwrap();
    let env = EnvResolver::from_map([("GITHUB_ORG", "acme"), ("RUNS_ON_LICENSE_KEY", "key")]);
    let config = ScenarioConfig::from_env(&env).unwrap();
    ScenarioPlan::new(kind, config, &FixtureLayout::new(root.path()), "terragrunt")
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn panic_after_deploy_destroys_module_then_network() {
    let provisioner = CountingProvisioner::default();
    let plan = plan(ScenarioKind::Minimal);

    let result = catch_unwind(AssertUnwindSafe(|| {
        let deployed = plan.deploy(&provisioner).unwrap();
        assert_eq!(deployed.network_outputs().output("vpc_id"), "vpc-0abc");
        panic!("assertion failed mid-test");
    }));

    assert!(result.is_err());
    assert_eq!(provisioner.destroys.load(Ordering::SeqCst), 2);
    assert_eq!(provisioner.order(), vec!["minimal", "vpc"]);
}

#[test]
fn failed_module_apply_destroys_network_stage() {
    let provisioner = CountingProvisioner {
        fail_apply_in: Some("public-only"),
        ..CountingProvisioner::default()
    };
    let err = plan(ScenarioKind::PublicOnly).deploy(&provisioner).err().unwrap();

    assert!(err.to_string().contains("creating App Runner service"));
    assert_eq!(provisioner.order(), vec!["public-only", "vpc"]);
}

#[test]
fn failed_network_apply_never_starts_module() {
    let provisioner = CountingProvisioner {
        fail_apply_in: Some("vpc"),
        ..CountingProvisioner::default()
    };
    assert!(plan(ScenarioKind::Minimal).deploy(&provisioner).is_err());
    assert_eq!(provisioner.order(), vec!["vpc"]);
}

#[test]
fn single_stage_guard_survives_panic() {
    let provisioner = CountingProvisioner::default();
    let result = catch_unwind(AssertUnwindSafe(|| {
        let _stage = apply_stage(&provisioner, DeploymentHandle::new("fixtures/storage", "terraform"))
            .unwrap();
        panic!("validation failed");
    }));
    assert!(result.is_err());
    assert_eq!(provisioner.order(), vec!["storage"]);
}
