// crates/agent-forge-core/tests/params.rs
// ============================================================================
// Module: Parameter Loading Tests
// Description: Integration tests for parameter files, defaults, and grammars.
// Purpose: Ensure both formats load, defaults and derivations resolve, and
//          invalid input is rejected with the specific error variant.
// Dependencies: agent-forge-core params module, tempfile
// ============================================================================

//! ## Overview
//! Covers the full parameter lifecycle: reading JSON and TOML files, filling
//! documented defaults, deriving slugs and module names, and rejecting
//! malformed input (unknown fields, oversized files, grammar violations).

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

use std::fs;
use std::path::PathBuf;

use agent_forge_core::ParamsError;
use agent_forge_core::ParamsFormat;
use agent_forge_core::TemplateParams;
use agent_forge_core::params::MAX_PARAMS_BYTES;
use agent_forge_core::params::derive_agent_module;
use agent_forge_core::params::derive_domain_name;
use agent_forge_core::params::derive_project_slug;
use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn write_params(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write params file");
    path
}

// ============================================================================
// SECTION: Loading and defaults
// ============================================================================

#[test]
fn json_file_loads_and_resolves() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_params(
        &dir,
        "params.json",
        r#"{
            "project_name": "Test News Agent",
            "agent_name": "TestNewsAgent",
            "author_email": "news@example.com",
            "use_langsmith": true
        }"#,
    );

    let params = TemplateParams::from_file(&path).expect("load params");
    assert_eq!(params.project_name, "Test News Agent");
    assert_eq!(params.project_slug.as_str(), "test-news-agent");
    assert_eq!(params.agent_name.as_str(), "TestNewsAgent");
    assert_eq!(params.domain_name.as_str(), "testnews");
    assert_eq!(params.agent_module(), "test_news_agent");
    assert_eq!(params.agent_env_prefix(), "TESTNEWSAGENT");
    assert!(params.use_langsmith);
    assert!(!params.use_microsoft_bot_framework);
}

#[test]
fn toml_file_loads_with_textual_toggles() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_params(
        &dir,
        "params.toml",
        r#"
            project_name = "Support Desk"
            agent_name = "SupportAgent"
            use_langsmith = "yes"
            use_microsoft_bot_framework = "no"
        "#,
    );

    let params = TemplateParams::from_file(&path).expect("load params");
    assert_eq!(params.project_slug.as_str(), "support-desk");
    assert!(params.use_langsmith);
    assert!(!params.use_microsoft_bot_framework);
}

#[test]
fn empty_file_resolves_to_documented_defaults() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_params(&dir, "params.json", "{}");

    let params = TemplateParams::from_file(&path).expect("load params");
    assert_eq!(params.project_name, "My Agent Service");
    assert_eq!(params.project_slug.as_str(), "my-agent-service");
    assert_eq!(params.agent_name.as_str(), "MyAgent");
    assert_eq!(params.domain_name.as_str(), "myagent");
    assert_eq!(params.python_version.as_str(), "3.12");
    assert_eq!(params.openai_model, "gpt-4o-mini");
    assert_eq!(params, TemplateParams::defaults().expect("defaults"));
}

#[test]
fn explicit_slug_and_domain_override_derivation() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_params(
        &dir,
        "params.json",
        r#"{
            "project_name": "Test News Agent",
            "project_slug": "newsroom",
            "agent_name": "TestNewsAgent",
            "domain_name": "headlines"
        }"#,
    );

    let params = TemplateParams::from_file(&path).expect("load params");
    assert_eq!(params.project_slug.as_str(), "newsroom");
    assert_eq!(params.domain_name.as_str(), "headlines");
}

// ============================================================================
// SECTION: Derivations
// ============================================================================

#[test]
fn project_slug_derivation_collapses_separators() {
    assert_eq!(derive_project_slug("My News Agent"), "my-news-agent");
    assert_eq!(derive_project_slug("  spaced__out--name  "), "spaced-out-name");
    assert_eq!(derive_project_slug("Café Agent"), "caf-agent");
    assert_eq!(derive_project_slug("UPPER"), "upper");
}

#[test]
fn agent_module_derivation_splits_pascal_case() {
    assert_eq!(derive_agent_module("TestNewsAgent"), "test_news_agent");
    assert_eq!(derive_agent_module("MyAgent"), "my_agent");
    assert_eq!(derive_agent_module("HTTPAgent"), "http_agent");
    assert_eq!(derive_agent_module("Agent2Go"), "agent2_go");
    assert_eq!(derive_agent_module("X"), "x");
}

#[test]
fn domain_name_derivation_lowercases_and_truncates() {
    assert_eq!(derive_domain_name("TestNewsAgent"), "testnewsagent");
    assert_eq!(derive_domain_name("MyAgent"), "myagent");
    let long = derive_domain_name("AbcdefghijAbcdefghijAbcdefghijAbcdefghij");
    assert_eq!(long.len(), 32);
}

// ============================================================================
// SECTION: Rejections
// ============================================================================

#[test]
fn unknown_field_is_a_parse_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_params(&dir, "params.json", r#"{"bogus_field": true}"#);

    let error = TemplateParams::from_file(&path).expect_err("unknown field");
    assert!(
        matches!(
            error,
            ParamsError::Parse {
                format: ParamsFormat::Json,
                ..
            }
        ),
        "unexpected error: {error}"
    );
}

#[test]
fn oversized_file_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let oversized = " ".repeat(usize::try_from(MAX_PARAMS_BYTES).expect("limit fits") + 1);
    let path = write_params(&dir, "params.json", &oversized);

    let error = TemplateParams::from_file(&path).expect_err("oversized file");
    assert!(matches!(error, ParamsError::TooLarge { .. }), "unexpected error: {error}");
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_params(&dir, "params.yaml", "project_name: nope");

    let error = TemplateParams::from_file(&path).expect_err("yaml params");
    assert!(matches!(error, ParamsError::UnknownFormat { .. }), "unexpected error: {error}");
}

#[test]
fn missing_file_reports_io_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("absent.json");

    let error = TemplateParams::from_file(&path).expect_err("missing file");
    assert!(matches!(error, ParamsError::Io { .. }), "unexpected error: {error}");
}

#[test]
fn invalid_slugs_are_rejected_with_the_field_name() {
    let dir = TempDir::new().expect("temp dir");
    for slug in ["My-Agent", "agent-", "-agent", "my--agent", "9agent", ""] {
        let path = write_params(
            &dir,
            "params.json",
            &format!(r#"{{"project_slug": "{slug}"}}"#),
        );
        let error = TemplateParams::from_file(&path).expect_err("invalid slug");
        let ParamsError::InvalidField { field, .. } = error else {
            panic!("expected InvalidField for slug {slug:?}, got {error}");
        };
        assert_eq!(field, "project_slug");
    }
}

#[test]
fn invalid_agent_names_are_rejected() {
    let dir = TempDir::new().expect("temp dir");
    for name in ["lowercase", "Has Space", "Tr\u{e9}s", "1Agent", ""] {
        let path = write_params(
            &dir,
            "params.json",
            &format!(r#"{{"agent_name": "{name}"}}"#),
        );
        let error = TemplateParams::from_file(&path).expect_err("invalid agent name");
        let ParamsError::InvalidField { field, .. } = error else {
            panic!("expected InvalidField for agent name {name:?}, got {error}");
        };
        assert_eq!(field, "agent_name");
    }
}

#[test]
fn invalid_domain_names_are_rejected() {
    let dir = TempDir::new().expect("temp dir");
    for domain in ["News", "my_domain", "my-domain", "9domain", ""] {
        let path = write_params(
            &dir,
            "params.json",
            &format!(r#"{{"domain_name": "{domain}"}}"#),
        );
        let error = TemplateParams::from_file(&path).expect_err("invalid domain");
        let ParamsError::InvalidField { field, .. } = error else {
            panic!("expected InvalidField for domain {domain:?}, got {error}");
        };
        assert_eq!(field, "domain_name");
    }
}

#[test]
fn invalid_emails_are_rejected() {
    let dir = TempDir::new().expect("temp dir");
    for email in ["not-an-email", "two@at@signs", "@example.com", "user@", "has space@x.com"] {
        let path = write_params(
            &dir,
            "params.json",
            &format!(r#"{{"author_email": "{email}"}}"#),
        );
        let error = TemplateParams::from_file(&path).expect_err("invalid email");
        let ParamsError::InvalidField { field, .. } = error else {
            panic!("expected InvalidField for email {email:?}, got {error}");
        };
        assert_eq!(field, "author_email");
    }
}

#[test]
fn python_version_range_is_enforced() {
    let dir = TempDir::new().expect("temp dir");
    for version in ["3.8", "3.15", "2.7", "3.012", "3", "3.x"] {
        let path = write_params(
            &dir,
            "params.json",
            &format!(r#"{{"python_version": "{version}"}}"#),
        );
        let error = TemplateParams::from_file(&path).expect_err("invalid python version");
        let ParamsError::InvalidField { field, .. } = error else {
            panic!("expected InvalidField for version {version:?}, got {error}");
        };
        assert_eq!(field, "python_version");
    }

    let path = write_params(&dir, "ok.json", r#"{"python_version": "3.13"}"#);
    let params = TemplateParams::from_file(&path).expect("supported version");
    assert_eq!(params.python_version.as_str(), "3.13");
}

#[test]
fn unrecognized_toggle_text_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_params(&dir, "params.json", r#"{"use_langsmith": "maybe"}"#);

    let error = TemplateParams::from_file(&path).expect_err("bad toggle");
    let ParamsError::InvalidField { field, .. } = error else {
        panic!("expected InvalidField, got {error}");
    };
    assert_eq!(field, "use_langsmith");
}

#[test]
fn display_fields_reject_quoting_hazards() {
    let dir = TempDir::new().expect("temp dir");
    let cases = [
        (r#"{"project_name": "Has \" quote"}"#, "project_name"),
        (r#"{"project_name": "Back\\slash"}"#, "project_name"),
        (r#"{"description": "line one\nline two"}"#, "description"),
        (r#"{"author_name": "   "}"#, "author_name"),
    ];
    for (body, expected_field) in cases {
        let path = write_params(&dir, "params.json", body);
        let error = TemplateParams::from_file(&path).expect_err("quoting hazard");
        let ParamsError::InvalidField { field, .. } = error else {
            panic!("expected InvalidField for {body}, got {error}");
        };
        assert_eq!(field, expected_field);
    }
}
