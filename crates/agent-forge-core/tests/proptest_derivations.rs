// crates/agent-forge-core/tests/proptest_derivations.rs
// ============================================================================
// Module: Derivation Property-Based Tests
// Description: Property tests for slug, module, and domain derivation.
// Purpose: Detect panics and shape violations across wide input ranges.
// ============================================================================

//! Property-based tests for the parameter derivation helpers.

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
    reason = "Test-only assertions and helpers are permitted."
)]

use agent_forge_core::params::ProjectSlug;
use agent_forge_core::params::derive_agent_module;
use agent_forge_core::params::derive_domain_name;
use agent_forge_core::params::derive_project_slug;
use proptest::prelude::*;

proptest! {
    #[test]
    fn derived_slug_has_a_valid_shape(name in ".*") {
        let slug = derive_project_slug(&name);
        prop_assert!(
            slug.chars().all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
        );
        prop_assert!(!slug.starts_with('-'));
        prop_assert!(!slug.ends_with('-'));
        prop_assert!(!slug.contains("--"));
    }

    #[test]
    fn slug_derivation_is_idempotent(name in ".*") {
        let once = derive_project_slug(&name);
        let twice = derive_project_slug(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn valid_slugs_derive_to_themselves(slug in "[a-z][a-z0-9]{0,15}(-[a-z0-9]{1,8}){0,3}") {
        prop_assert!(ProjectSlug::new(slug.clone()).is_ok());
        prop_assert_eq!(derive_project_slug(&slug), slug);
    }

    #[test]
    fn derived_module_is_snake_case(agent_name in "[A-Za-z0-9]{0,48}") {
        let module = derive_agent_module(&agent_name);
        prop_assert!(
            module
                .chars()
                .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_')
        );
        prop_assert!(!module.starts_with('_'));
        prop_assert!(!module.contains("__"));
    }

    #[test]
    fn derived_module_preserves_the_letters(agent_name in "[A-Za-z0-9]{0,48}") {
        let module = derive_agent_module(&agent_name);
        let stripped: String = module.chars().filter(|ch| *ch != '_').collect();
        prop_assert_eq!(stripped, agent_name.to_ascii_lowercase());
    }

    #[test]
    fn derived_domain_is_bounded_lowercase(agent_name in ".*") {
        let domain = derive_domain_name(&agent_name);
        prop_assert!(domain.len() <= 32);
        prop_assert!(
            domain.chars().all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit())
        );
    }
}
