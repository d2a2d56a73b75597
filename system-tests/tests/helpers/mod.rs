// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for runs-on system-tests.
// Purpose: Provide harness wiring and artifact utilities.
// Dependencies: system-tests, runs-on-harness
// ============================================================================

//! ## Overview
//! Shared helpers for runs-on system-tests.
//! Invariants:
//! - Every deployed stage is destroyed before the test returns.
//! - Each test writes a summary artifact, including on panic.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod artifacts;
pub mod harness;
