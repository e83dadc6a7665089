// crates/agent-forge-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for locale resolution and the starter parameter set.
// Purpose: Cover the binary's pure helpers without spawning a process.
// Dependencies: agent-forge-cli main helpers
// ============================================================================

//! ## Overview
//! Validates the argument surface, `--lang`/environment locale resolution,
//! and that `params init` output resolves back to the documented defaults.

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

// ============================================================================
// SECTION: Imports
// ============================================================================

use agent_forge_cli::i18n::Locale;
use agent_forge_core::ParamsFile;
use agent_forge_core::TemplateParams;
use clap::CommandFactory;

use super::Cli;
use super::LangArg;
use super::StarterParams;
use super::resolve_locale;

// ============================================================================
// SECTION: Argument surface
// ============================================================================

#[test]
fn command_tree_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn lang_flag_maps_to_locale() {
    assert_eq!(Locale::from(LangArg::En), Locale::En);
    assert_eq!(Locale::from(LangArg::Ca), Locale::Ca);
}

// ============================================================================
// SECTION: Locale resolution
// ============================================================================

#[test]
fn resolve_locale_prefers_flag_over_environment() {
    let locale = resolve_locale(Some(LangArg::Ca), Some("en")).expect("flag locale");
    assert_eq!(locale, Locale::Ca);
}

#[test]
fn resolve_locale_defaults_to_english() {
    assert_eq!(resolve_locale(None, None).expect("unset"), Locale::En);
    assert_eq!(resolve_locale(None, Some("")).expect("empty"), Locale::En);
    assert_eq!(resolve_locale(None, Some("   ")).expect("blank"), Locale::En);
}

#[test]
fn resolve_locale_parses_regional_environment_tags() {
    assert_eq!(resolve_locale(None, Some("ca_ES.UTF-8")).expect("regional"), Locale::Ca);
    assert_eq!(resolve_locale(None, Some("en-US")).expect("regional"), Locale::En);
}

#[test]
fn resolve_locale_rejects_unsupported_environment_values() {
    let error = resolve_locale(None, Some("fr")).expect_err("unsupported tag");
    let message = error.to_string();
    assert!(message.contains("AGENT_FORGE_LANG"), "message: {message}");
    assert!(message.contains("'fr'"), "message: {message}");
}

// ============================================================================
// SECTION: Starter parameters
// ============================================================================

#[test]
fn starter_params_resolve_back_to_the_defaults_via_json() {
    let starter = StarterParams::from_defaults().expect("starter defaults");
    let rendered = serde_json::to_string_pretty(&starter).expect("starter json");
    let file: ParamsFile = serde_json::from_str(&rendered).expect("starter parse");
    let resolved = TemplateParams::resolve(file).expect("starter resolve");
    assert_eq!(resolved, TemplateParams::defaults().expect("defaults"));
}

#[test]
fn starter_params_resolve_back_to_the_defaults_via_toml() {
    let starter = StarterParams::from_defaults().expect("starter defaults");
    let rendered = toml::to_string_pretty(&starter).expect("starter toml");
    let file: ParamsFile = toml::from_str(&rendered).expect("starter parse");
    let resolved = TemplateParams::resolve(file).expect("starter resolve");
    assert_eq!(resolved, TemplateParams::defaults().expect("defaults"));
}
