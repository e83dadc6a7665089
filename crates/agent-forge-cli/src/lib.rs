// crates/agent-forge-cli/src/lib.rs
// ============================================================================
// Module: agent-forge-cli (library)
// Description: Shared pieces of the command-line interface.
// Purpose: Host the localization catalog so both the binary and its
//          integration tests can resolve user-facing messages.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Library half of the `agent-forge` binary. The command tree, argument
//! parsing, and process exit policy live in `main.rs`; this crate root only
//! exposes the localization layer that both the binary and the integration
//! tests need.
//!
//! ## Index
//! - [`i18n`]: locale selection and the message catalog behind [`t!`].

// ==== SECTION: Modules ====

pub mod i18n;

#[cfg(test)]
mod tests;
