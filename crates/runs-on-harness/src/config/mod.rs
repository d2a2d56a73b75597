// crates/runs-on-harness/src/config/mod.rs
// ============================================================================
// Module: Harness Configuration
// Description: Environment resolution and scenario configuration.
// Purpose: Provide typed access to scenario settings and stage variables.
// Dependencies: rand, tracing
// ============================================================================

//! ## Overview
//! Scenario configuration is read from environment variables through an
//! [`EnvResolver`] and mapped into a [`ScenarioConfig`] that produces the
//! variable sets for each provisioning stage.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod env;
mod scenario;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::DEFAULT_AWS_REGION;
pub use env::EnvError;
pub use env::EnvResolver;
pub use env::ScenarioEnv;
pub use scenario::ScenarioConfig;
pub use scenario::generate_test_id;
pub use scenario::random_stack_name;
