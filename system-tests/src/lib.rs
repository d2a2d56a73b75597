// system-tests/src/lib.rs
// ============================================================================
// Module: runs-on System Tests Library
// Description: Shared configuration for live AWS system tests.
// Purpose: Provide typed harness settings to the system-test binaries.
// Dependencies: runs-on-harness
// ============================================================================

//! ## Overview
//! This crate hosts the harness configuration used by the system-test
//! binaries in `system-tests/tests`. Those binaries deploy real AWS
//! resources and only build with the `system-tests` feature.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
