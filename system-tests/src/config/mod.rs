// system-tests/src/config/mod.rs
// ============================================================================
// Module: System Test Configuration
// Description: Centralized configuration for runs-on system tests.
// Purpose: Provide typed access to harness environment settings and defaults.
// Dependencies: runs-on-harness
// ============================================================================

//! ## Overview
//! Harness configuration is read from environment variables and mapped into
//! a small typed structure for reuse across test helpers. Scenario settings
//! (`GITHUB_ORG`, `TEST_ID`, ...) are resolved separately by
//! [`runs_on_harness::ScenarioConfig`].

// ============================================================================
// SECTION: Modules
// ============================================================================

mod env;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::HarnessConfig;
pub use env::HarnessEnv;
pub use env::read_env_strict;
