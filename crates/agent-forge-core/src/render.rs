// crates/agent-forge-core/src/render.rs
// ============================================================================
// Module: Rendering
// Description: Substitution engine that turns the catalog into file bodies.
// Purpose: Produce a deterministic, validated render plan from parameters.
// Dependencies: minijinja, serde, thiserror
// ============================================================================

//! ## Overview
//! Rendering takes the built-in catalog plus a resolved parameter set and
//! produces a [`RenderPlan`]: the full list of project-relative paths and
//! file bodies, sorted lexicographically by path. Both file bodies and path
//! templates go through the same engine with strict undefined handling, so a
//! placeholder missing from the parameter context fails the whole run instead
//! of leaking an empty string into generated code.
//!
//! Every rendered path is validated against relative-path rules before it is
//! admitted to the plan, and the plan rejects two assets rendering to the
//! same path. Plans hash to a stable digest over their path/content manifest,
//! which is what the idempotency check compares.
//!
//! ## Index
//! - [`Renderer`]: engine wrapper bound to a catalog
//! - [`RenderPlan`]: ordered rendered files plus digest
//! - [`RenderedFile`]: one path/body pair
//! - [`RenderError`]: rendering failures

// ============================================================================
// SECTION: Imports
// ============================================================================

use minijinja::AutoEscape;
use minijinja::Environment;
use minijinja::UndefinedBehavior;
use serde::Serialize;
use thiserror::Error;

use crate::catalog::AssetKind;
use crate::catalog::TemplateCatalog;
use crate::hashing::DEFAULT_HASH_ALGORITHM;
use crate::hashing::HashDigest;
use crate::hashing::HashError;
use crate::hashing::hash_bytes;
use crate::hashing::hash_canonical_json;
use crate::params::TemplateParams;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum byte length of a single rendered file body.
pub const MAX_RENDERED_FILE_BYTES: usize = 4 * 1024 * 1024;

/// Maximum byte length of a rendered relative path.
pub const MAX_PATH_BYTES: usize = 4096;

/// Maximum byte length of a single path component.
pub const MAX_COMPONENT_BYTES: usize = 255;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures while producing a render plan.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A file body template failed to parse or render.
    #[error("template '{path}' failed to render: {detail}")]
    Template {
        /// Catalog path of the failing asset.
        path: String,
        /// Engine error detail.
        detail: String,
    },
    /// A path template failed to render.
    #[error("path template '{path}' failed to render: {detail}")]
    PathTemplate {
        /// Path template of the failing asset.
        path: String,
        /// Engine error detail.
        detail: String,
    },
    /// A rendered path violated the relative-path rules.
    #[error("rendered path '{path}' is not a safe relative path: {detail}")]
    UnsafePath {
        /// Offending rendered path.
        path: String,
        /// Violated rule.
        detail: String,
    },
    /// Two assets rendered to the same path.
    #[error("rendered path '{path}' is produced by more than one asset")]
    DuplicatePath {
        /// Colliding rendered path.
        path: String,
    },
    /// A rendered body exceeded the per-file size cap.
    #[error("rendered file '{path}' exceeds {max_bytes} bytes")]
    FileTooLarge {
        /// Offending rendered path.
        path: String,
        /// Configured cap in bytes.
        max_bytes: usize,
    },
    /// Plan digest computation failed.
    #[error("render plan digest failed: {0}")]
    Digest(#[from] HashError),
}

// ============================================================================
// SECTION: Rendered Output
// ============================================================================

/// One rendered file of the plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Project-relative path, forward slashes only.
    pub path: String,
    /// Rendered body.
    pub contents: String,
}

impl RenderedFile {
    /// Returns the content digest of this file.
    #[must_use]
    pub fn digest(&self) -> HashDigest {
        hash_bytes(DEFAULT_HASH_ALGORITHM, self.contents.as_bytes())
    }
}

/// One row of the plan manifest used for digesting.
#[derive(Debug, Clone, Serialize)]
struct ManifestEntry {
    /// Project-relative path.
    path: String,
    /// Lowercase hex SHA-256 of the body.
    sha256: String,
}

/// A complete, validated render of the template pack.
///
/// # Invariants
/// - Files are sorted lexicographically by path.
/// - Paths are unique and satisfy the relative-path rules.
#[derive(Debug, Clone)]
pub struct RenderPlan {
    /// Rendered files in path order.
    files: Vec<RenderedFile>,
}

impl RenderPlan {
    /// Returns the rendered files in path order.
    #[must_use]
    pub fn files(&self) -> &[RenderedFile] {
        &self.files
    }

    /// Returns the number of files in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns whether the plan is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Returns the total body size across all files.
    #[must_use]
    pub fn total_bytes(&self) -> usize {
        self.files.iter().map(|file| file.contents.len()).sum()
    }

    /// Looks up a rendered file by its project-relative path.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&RenderedFile> {
        self.files.iter().find(|file| file.path == path)
    }

    /// Returns the digest of the whole plan.
    ///
    /// The digest covers the canonical JSON of the sorted path/content-hash
    /// manifest, so it is stable across runs and filesystems.
    ///
    /// # Errors
    /// Returns [`RenderError::Digest`] if canonicalization fails.
    pub fn digest(&self) -> Result<HashDigest, RenderError> {
        let manifest: Vec<ManifestEntry> = self
            .files
            .iter()
            .map(|file| ManifestEntry {
                path: file.path.clone(),
                sha256: file.digest().value,
            })
            .collect();
        Ok(hash_canonical_json(DEFAULT_HASH_ALGORITHM, &manifest)?)
    }
}

// ============================================================================
// SECTION: Renderer
// ============================================================================

/// Substitution engine bound to a catalog.
///
/// All body templates are registered at construction, so template syntax
/// errors surface before any parameter set is rendered.
#[derive(Debug)]
pub struct Renderer {
    /// Catalog whose assets this renderer produces.
    catalog: TemplateCatalog,
    /// Engine with strict undefined handling and no auto-escaping.
    env: Environment<'static>,
}

impl Renderer {
    /// Builds a renderer for the given catalog.
    ///
    /// # Errors
    /// Returns [`RenderError::Template`] if an asset body fails to parse.
    pub fn new(catalog: TemplateCatalog) -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_name| AutoEscape::None);
        // Block tags own their lines; rendered files keep their final newline.
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        for asset in catalog.assets() {
            if asset.kind == AssetKind::Rendered {
                env.add_template(asset.path, asset.body)
                    .map_err(|err| RenderError::Template {
                        path: asset.path.to_owned(),
                        detail: err.to_string(),
                    })?;
            }
        }
        Ok(Self { catalog, env })
    }

    /// Builds a renderer for the built-in catalog.
    ///
    /// # Errors
    /// Returns [`RenderError::Template`] if a built-in body fails to parse.
    pub fn builtin() -> Result<Self, RenderError> {
        Self::new(TemplateCatalog::builtin())
    }

    /// Renders the full plan for the given parameters.
    ///
    /// # Errors
    /// Returns a [`RenderError`] if any body or path template fails, a
    /// rendered path is unsafe or duplicated, or a body exceeds the size cap.
    pub fn render_plan(&self, params: &TemplateParams) -> Result<RenderPlan, RenderError> {
        let context = params.render_context();
        let mut files = Vec::new();
        for asset in self.catalog.assets_for(params) {
            let path = self.render_path(asset.path, &context)?;
            validate_rendered_path(&path)?;
            let contents = match asset.kind {
                AssetKind::Verbatim => asset.body.to_owned(),
                AssetKind::Rendered => self.render_body(asset.path, &context)?,
            };
            if contents.len() > MAX_RENDERED_FILE_BYTES {
                return Err(RenderError::FileTooLarge {
                    path,
                    max_bytes: MAX_RENDERED_FILE_BYTES,
                });
            }
            files.push(RenderedFile { path, contents });
        }
        files.sort_by(|left, right| left.path.cmp(&right.path));
        for pair in files.windows(2) {
            if pair[0].path == pair[1].path {
                return Err(RenderError::DuplicatePath {
                    path: pair[0].path.clone(),
                });
            }
        }
        Ok(RenderPlan { files })
    }

    /// Renders a standalone path template against a parameter set.
    ///
    /// Used by checks that resolve catalog path templates (for example the
    /// essential-file list) without rendering a full plan.
    ///
    /// # Errors
    /// Returns a [`RenderError`] if the template fails or the rendered path
    /// is unsafe.
    pub fn render_path_template(
        &self,
        template: &str,
        params: &TemplateParams,
    ) -> Result<String, RenderError> {
        let context = params.render_context();
        let path = self.render_path(template, &context)?;
        validate_rendered_path(&path)?;
        Ok(path)
    }

    /// Renders a single registered body template.
    fn render_body<S: Serialize>(&self, name: &str, context: S) -> Result<String, RenderError> {
        let template = self
            .env
            .get_template(name)
            .map_err(|err| RenderError::Template {
                path: name.to_owned(),
                detail: err.to_string(),
            })?;
        template.render(context).map_err(|err| RenderError::Template {
            path: name.to_owned(),
            detail: err.to_string(),
        })
    }

    /// Renders a path template to its concrete relative path.
    fn render_path<S: Serialize>(&self, path: &str, context: S) -> Result<String, RenderError> {
        self.env
            .render_str(path, context)
            .map_err(|err| RenderError::PathTemplate {
                path: path.to_owned(),
                detail: err.to_string(),
            })
    }
}

// ============================================================================
// SECTION: Path Rules
// ============================================================================

/// Validates a rendered path against the relative-path rules.
///
/// Paths must be non-empty, relative, forward-slash separated, free of `.`
/// and `..` components and control characters, and within the component and
/// total length caps.
///
/// # Errors
/// Returns [`RenderError::UnsafePath`] naming the violated rule.
pub fn validate_rendered_path(path: &str) -> Result<(), RenderError> {
    let violation = |detail: &str| RenderError::UnsafePath {
        path: path.to_owned(),
        detail: detail.to_owned(),
    };
    if path.is_empty() {
        return Err(violation("path is empty"));
    }
    if path.len() > MAX_PATH_BYTES {
        return Err(violation("path exceeds the length cap"));
    }
    if path.starts_with('/') {
        return Err(violation("path is absolute"));
    }
    if path.contains('\\') {
        return Err(violation("path contains a backslash"));
    }
    for component in path.split('/') {
        if component.is_empty() {
            return Err(violation("path contains an empty component"));
        }
        if component == "." || component == ".." {
            return Err(violation("path contains a traversal component"));
        }
        if component.len() > MAX_COMPONENT_BYTES {
            return Err(violation("path component exceeds the length cap"));
        }
        if component.chars().any(char::is_control) {
            return Err(violation("path contains a control character"));
        }
    }
    Ok(())
}
