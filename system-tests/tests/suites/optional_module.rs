// system-tests/tests/suites/optional_module.rs
// ============================================================================
// Module: Optional Module Tests
// Description: Standalone Terraform deploys of the optional module fixture.
// Purpose: Verify EFS and ECR outputs follow their feature toggles.
// Dependencies: system-tests helpers, runs-on-harness
// ============================================================================

//! ## Overview
//! EFS needs a VPC and subnets, so the enabled case is covered by the
//! `efs-enabled` scenario instead of this fixture.

use std::error::Error;

use helpers::artifacts::TestReporter;
use helpers::harness::HarnessContext;
use runs_on_harness::RunOutcome;
use runs_on_harness::apply_stage;
use runs_on_harness::config::random_stack_name;
use runs_on_harness::validate::ValidationBattery;
use runs_on_harness::validate::validate_ecr_outputs;
use runs_on_harness::validate::validate_efs_output;
use tokio::task::block_in_place;

use crate::helpers;

#[tokio::test(flavor = "multi_thread")]
async fn optional_module_features_disabled() -> Result<(), Box<dyn Error>> {
    run_optional_fixture("optional_module_features_disabled", "test-optional-off", false).await
}

#[tokio::test(flavor = "multi_thread")]
async fn optional_module_ecr_enabled() -> Result<(), Box<dyn Error>> {
    run_optional_fixture("optional_module_ecr_enabled", "test-optional-ecr", true).await
}

async fn run_optional_fixture(
    test_name: &str,
    prefix: &str,
    enable_ecr: bool,
) -> Result<(), Box<dyn Error>> {
    let mut reporter = TestReporter::new(test_name)?;
    let ctx = HarnessContext::load()?;
    let stack_name = random_stack_name(prefix);
    let handle = ctx
        .module_fixture("optional")
        .with_var("stack_name", stack_name.as_str())
        .with_var("enable_efs", false)
        .with_var("enable_ecr", enable_ecr);

    let stage = block_in_place(|| apply_stage(&ctx.provisioner, handle))?;
    let mut battery = ValidationBattery::new(stack_name.as_str());
    battery.record("efs output", validate_efs_output(stage.outputs(), false));
    battery.record("ecr outputs", validate_ecr_outputs(stage.outputs(), enable_ecr, &stack_name));
    reporter.record_validation(battery.report());
    let validation = battery.finish();
    let teardown = block_in_place(|| stage.teardown());

    reporter.finish_run(
        RunOutcome::new(validation, teardown),
        vec![format!("stack {stack_name}, ecr enabled: {enable_ecr}")],
        vec!["summary.json".to_string(), "summary.md".to_string()],
    )?;
    Ok(())
}
