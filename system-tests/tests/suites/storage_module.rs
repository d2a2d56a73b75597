// system-tests/tests/suites/storage_module.rs
// ============================================================================
// Module: Storage Module Tests
// Description: Standalone Terraform deploys of the storage module fixture.
// Purpose: Verify bucket naming and encryption outside a full stack.
// Dependencies: system-tests helpers, runs-on-harness
// ============================================================================

//! ## Overview
//! Each test applies the storage fixture under a random stack name, checks
//! it, and tears it down. The summary is written before any failure is
//! returned, and a validation failure is reported ahead of a teardown one.

use std::error::Error;

use helpers::artifacts::TestReporter;
use helpers::harness::HarnessContext;
use runs_on_harness::RunOutcome;
use runs_on_harness::apply_stage;
use runs_on_harness::config::random_stack_name;
use runs_on_harness::stack::names;
use runs_on_harness::validate::ValidationBattery;
use runs_on_harness::validate::validate_bucket_encryption;
use runs_on_harness::validate::validate_bucket_names;
use runs_on_harness::validate::validate_bucket_public_access;
use runs_on_harness::validate::validate_output_present;
use tokio::task::block_in_place;

use crate::helpers;

#[tokio::test(flavor = "multi_thread")]
async fn storage_module_bucket_creation() -> Result<(), Box<dyn Error>> {
    let mut reporter = TestReporter::new("storage_module_bucket_creation")?;
    let ctx = HarnessContext::load()?;
    let stack_name = random_stack_name("test-storage");
    let handle = ctx.module_fixture("storage").with_var("stack_name", stack_name.as_str());

    let stage = block_in_place(|| apply_stage(&ctx.provisioner, handle))?;
    let mut battery = ValidationBattery::new(stack_name.as_str());
    battery.record("bucket names", validate_bucket_names(stage.outputs(), &stack_name));
    reporter.record_validation(battery.report());
    let validation = battery.finish();
    let teardown = block_in_place(|| stage.teardown());

    reporter.finish_run(
        RunOutcome::new(validation, teardown),
        vec![format!("stack {stack_name}")],
        vec!["summary.json".to_string(), "summary.md".to_string()],
    )?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn storage_module_bucket_encryption() -> Result<(), Box<dyn Error>> {
    let mut reporter = TestReporter::new("storage_module_bucket_encryption")?;
    let ctx = HarnessContext::load()?;
    let stack_name = random_stack_name("test-storage-enc");
    let handle = ctx.module_fixture("storage").with_var("stack_name", stack_name.as_str());

    let stage = block_in_place(|| apply_stage(&ctx.provisioner, handle))?;
    let inspector = ctx.inspector(&ctx.aws_region()).await;
    let mut battery = ValidationBattery::new(stack_name.as_str());
    for output in [names::CONFIG_BUCKET, names::CACHE_BUCKET, names::LOGGING_BUCKET] {
        let bucket = stage.outputs().output(output);
        battery
            .check(format!("{output} encryption"), validate_bucket_encryption(&inspector, &bucket))
            .await;
        battery
            .check(
                format!("{output} public access"),
                validate_bucket_public_access(&inspector, &bucket),
            )
            .await;
    }
    reporter.record_validation(battery.report());
    let validation = battery.finish();
    let teardown = block_in_place(|| stage.teardown());

    reporter.finish_run(
        RunOutcome::new(validation, teardown),
        vec![format!("stack {stack_name}")],
        vec!["summary.json".to_string(), "summary.md".to_string()],
    )?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn storage_module_cache_expiration() -> Result<(), Box<dyn Error>> {
    let mut reporter = TestReporter::new("storage_module_cache_expiration")?;
    let ctx = HarnessContext::load()?;
    let stack_name = random_stack_name("test-storage-cache");
    let handle = ctx
        .module_fixture("storage")
        .with_var("stack_name", stack_name.as_str())
        .with_var("cache_expiration_days", 7_i64);

    let stage = block_in_place(|| apply_stage(&ctx.provisioner, handle))?;
    let cache_bucket = stage.outputs().output(names::CACHE_BUCKET);
    let mut battery = ValidationBattery::new(stack_name.as_str());
    battery.record("cache bucket", validate_output_present(stage.outputs(), names::CACHE_BUCKET));
    reporter.record_validation(battery.report());
    let validation = battery.finish();
    let teardown = block_in_place(|| stage.teardown());

    reporter.finish_run(
        RunOutcome::new(validation, teardown),
        vec![format!("cache bucket: {cache_bucket}")],
        vec!["summary.json".to_string(), "summary.md".to_string()],
    )?;
    Ok(())
}
