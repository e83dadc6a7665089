// crates/agent-forge-verify/src/lib.rs
// ============================================================================
// Module: agent-forge-verify
// Description: Smoke-test suite for generated agent service projects.
// Purpose: Prove a parameter set generates a working project skeleton.
// Dependencies: agent-forge-core, serde, tempfile, thiserror, toml
// ============================================================================

//! # agent-forge-verify
//!
//! ## Overview
//! End-to-end verification of the generator: a parameter set is stamped out
//! into scratch space and the resulting tree is checked for essential files,
//! Python syntax, a valid project manifest, resolvable dependencies, and
//! container tooling, plus a render-twice idempotency probe. Checks degrade
//! to skips when optional tools are absent, so the suite is safe to run on a
//! bare machine.
//!
//! ## Index
//! - [`suite`]: run configuration and the check runner
//! - [`report`]: outcome and report types
//! - [`probe`]: optional-tool discovery

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod probe;
pub mod report;
pub mod suite;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use probe::ToolInfo;
pub use report::CheckName;
pub use report::CheckOutcome;
pub use report::CheckStatus;
pub use report::StatusCounts;
pub use report::VerificationReport;
pub use suite::VerifyError;
pub use suite::VerifyOptions;
pub use suite::run_suite;
