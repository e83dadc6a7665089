// crates/agent-forge-cli/src/tests/mod.rs
// ============================================================================
// Module: CLI Library Tests
// Description: Unit test tree for the CLI library modules.
// Purpose: Group in-crate tests so lint relaxations stay test-scoped.
// Dependencies: agent-forge-cli library modules
// ============================================================================

//! ## Overview
//! In-crate unit tests for the CLI library. Each child module covers one
//! library module.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]
