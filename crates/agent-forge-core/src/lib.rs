// crates/agent-forge-core/src/lib.rs
// ============================================================================
// Module: agent-forge-core
// Description: Core engine for stamping out agent service projects.
// Purpose: Parameters, template catalog, rendering, scaffolding, hashing.
// Dependencies: minijinja, serde, serde_jcs, serde_json, sha2, thiserror, toml
// ============================================================================

//! # agent-forge-core
//!
//! ## Overview
//! Core engine behind the `agent-forge` generator. A parameter set is loaded
//! and validated ([`params`]), matched against the built-in template pack
//! ([`catalog`]), rendered into a deterministic plan ([`render`]), and
//! written through a sink ([`scaffold`]). Digest helpers ([`hashing`]) give
//! plans and files stable identities for idempotency checks and reporting.
//!
//! The generated output is a FastAPI + LangGraph agent service skeleton:
//! a layered `app/` package with a main-processing / reflection / adjustment
//! workflow, configuration surface, and container setup, all derived from a
//! small set of project parameters.
//!
//! ## Index
//! - [`params`]: parameter loading, validation, and derivations
//! - [`catalog`]: built-in template pack and verification contracts
//! - [`render`]: substitution engine and render plans
//! - [`scaffold`]: sinks and the generation driver
//! - [`hashing`]: canonical JSON digests

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod catalog;
pub mod hashing;
pub mod params;
pub mod render;
pub mod scaffold;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use catalog::AssetCondition;
pub use catalog::AssetKind;
pub use catalog::ESSENTIAL_FILES;
pub use catalog::SYNTAX_CHECK_FILES;
pub use catalog::TemplateAsset;
pub use catalog::TemplateCatalog;
pub use hashing::DEFAULT_HASH_ALGORITHM;
pub use hashing::HashAlgorithm;
pub use hashing::HashDigest;
pub use hashing::HashError;
pub use params::ParamsError;
pub use params::ParamsFile;
pub use params::ParamsFormat;
pub use params::TemplateParams;
pub use render::RenderError;
pub use render::RenderPlan;
pub use render::RenderedFile;
pub use render::Renderer;
pub use scaffold::DirectorySink;
pub use scaffold::GenerationSummary;
pub use scaffold::MemorySink;
pub use scaffold::ScaffoldError;
pub use scaffold::ScaffoldSink;
pub use scaffold::Scaffolder;
