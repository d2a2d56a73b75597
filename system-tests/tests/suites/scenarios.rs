// system-tests/tests/suites/scenarios.rs
// ============================================================================
// Module: Deployment Scenario Tests
// Description: End-to-end deploy and validation of each runs-on scenario.
// Purpose: Prove every supported configuration deploys and meets posture.
// Dependencies: system-tests helpers, runs-on-harness
// ============================================================================

//! ## Overview
//! Each test deploys the shared VPC stage and one scenario stage with
//! Terragrunt, runs the standard validation battery, and tears both stages
//! down module first. Expensive scenarios are skipped in short mode.

use std::error::Error;

use helpers::artifacts::TestReporter;
use helpers::harness::HarnessContext;
use runs_on_harness::RunOutcome;
use runs_on_harness::ScenarioKind;
use runs_on_harness::stack::names;
use runs_on_harness::validate::HealthCheck;
use runs_on_harness::validate::HttpHealthProbe;
use runs_on_harness::validate::run_stack_battery;
use runs_on_harness::validate::validate_ecr_outputs;
use runs_on_harness::validate::validate_efs_output;
use tokio::task::block_in_place;
use tracing::info;

use crate::helpers;

#[tokio::test(flavor = "multi_thread")]
async fn scenario_minimal() -> Result<(), Box<dyn Error>> {
    run_scenario(ScenarioKind::Minimal).await
}

#[tokio::test(flavor = "multi_thread")]
async fn scenario_public_only() -> Result<(), Box<dyn Error>> {
    run_scenario(ScenarioKind::PublicOnly).await
}

#[tokio::test(flavor = "multi_thread")]
async fn scenario_private_networking() -> Result<(), Box<dyn Error>> {
    run_scenario(ScenarioKind::PrivateNetworking).await
}

#[tokio::test(flavor = "multi_thread")]
async fn scenario_efs_enabled() -> Result<(), Box<dyn Error>> {
    run_scenario(ScenarioKind::EfsEnabled).await
}

#[tokio::test(flavor = "multi_thread")]
async fn scenario_ecr_enabled() -> Result<(), Box<dyn Error>> {
    run_scenario(ScenarioKind::EcrEnabled).await
}

#[tokio::test(flavor = "multi_thread")]
async fn scenario_full_featured() -> Result<(), Box<dyn Error>> {
    run_scenario(ScenarioKind::FullFeatured).await
}

async fn run_scenario(kind: ScenarioKind) -> Result<(), Box<dyn Error>> {
    let test_name = format!("scenario_{}", kind.as_str().replace('-', "_"));
    let mut reporter = TestReporter::new(&test_name)?;
    let ctx = HarnessContext::load()?;
    if ctx.skips(kind) {
        reporter.finish(
            "skip",
            vec![format!("{} skipped in short mode", kind.as_str())],
            vec!["summary.json".to_string(), "summary.md".to_string()],
        )?;
        return Ok(());
    }

    let plan = ctx.plan(kind)?;
    let stack_name = plan.config.stack_name();
    let deployed = block_in_place(|| plan.deploy(&ctx.provisioner))?;

    let outputs = deployed.stack_outputs();
    let inspector = ctx.inspector(&plan.config.aws_region).await;
    let probe = HttpHealthProbe::new()?;
    let health = HealthCheck {
        probe: &probe,
        policy: ctx.health_policy(),
    };
    let mut battery = run_stack_battery(&inspector, &outputs, Some(health)).await;
    battery.record("efs output", validate_efs_output(deployed.outputs(), plan.config.enable_efs));
    battery.record(
        "ecr outputs",
        validate_ecr_outputs(deployed.outputs(), plan.config.enable_ecr, &stack_name),
    );
    reporter.record_validation(battery.report());
    reporter.artifacts().write_json("validation.json", &battery.report())?;

    let vpc_id = deployed.network_outputs().output(names::VPC_ID);
    let validation = battery.finish();
    let teardown = block_in_place(|| deployed.teardown());

    let report = reporter.finish_run(
        RunOutcome::new(validation, teardown),
        vec![format!(
            "stack {stack_name} in {vpc_id} deployed from {}",
            plan.module_dir.display()
        )],
        vec!["summary.json".to_string(), "summary.md".to_string(), "validation.json".to_string()],
    )?;
    info!(
        scenario = kind.as_str(),
        stack = %stack_name,
        vpc_id = %vpc_id,
        service_url = %outputs.service_url,
        efs_id = %outputs.efs_id,
        ecr_repository_url = %outputs.ecr_repository_url,
        checks = report.checks.len(),
        "scenario deployment validated"
    );
    Ok(())
}
