// crates/agent-forge-core/src/scaffold.rs
// ============================================================================
// Module: Scaffolding
// Description: Materializes render plans into project trees.
// Purpose: Write generated projects to disk or memory behind a sink seam.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Scaffolding turns a [`RenderPlan`] into an actual project tree. The write
//! target sits behind the [`ScaffoldSink`] trait so generation, verification,
//! and tests share one code path: [`DirectorySink`] writes under an output
//! directory with path-escape defenses, while [`MemorySink`] collects files
//! into a map for inspection without touching the filesystem.
//!
//! [`Scaffolder`] drives the whole run and reports a [`GenerationSummary`]
//! with the file count, byte total, and plan digest.
//!
//! ## Index
//! - [`ScaffoldSink`]: write-target seam
//! - [`DirectorySink`]: filesystem target rooted at an output directory
//! - [`MemorySink`]: in-memory target for checks and tests
//! - [`Scaffolder`]: render-and-write driver
//! - [`GenerationSummary`]: per-run report
//! - [`ScaffoldError`]: scaffolding failures

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::hashing::HashDigest;
use crate::params::TemplateParams;
use crate::render::RenderError;
use crate::render::RenderPlan;
use crate::render::Renderer;
use crate::render::validate_rendered_path;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures while materializing a project tree.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Rendering the plan failed.
    #[error(transparent)]
    Render(#[from] RenderError),
    /// The project directory exists and already has contents.
    #[error("destination '{path}' already exists and is not empty; pass force to overwrite")]
    DestinationNotEmpty {
        /// Existing project directory.
        path: String,
    },
    /// The project path exists but is not a directory.
    #[error("destination '{path}' exists and is not a directory")]
    DestinationNotADirectory {
        /// Existing non-directory path.
        path: String,
    },
    /// A write target resolved outside the project directory.
    #[error("refusing to write outside the project directory: '{path}'")]
    EscapesDestination {
        /// Offending resolved path.
        path: String,
    },
    /// A project-relative path violated the path rules.
    #[error("unsafe project-relative path '{path}': {detail}")]
    UnsafePath {
        /// Offending path.
        path: String,
        /// Violated rule.
        detail: String,
    },
    /// A sink was written to before its project directory was prepared.
    #[error("sink used before its project directory was prepared")]
    SinkNotStarted,
    /// Filesystem operation failed.
    #[error("i/o failure at '{path}': {detail}")]
    Io {
        /// Path involved in the failing operation.
        path: String,
        /// Underlying error detail.
        detail: String,
    },
}

/// Wraps an i/o error with the path it occurred at.
fn io_error(path: &Path, err: &io::Error) -> ScaffoldError {
    ScaffoldError::Io {
        path: path.display().to_string(),
        detail: err.to_string(),
    }
}

// ============================================================================
// SECTION: Sink Seam
// ============================================================================

/// Write target for scaffolded project trees.
///
/// `begin` is called once with the project slug before any file is written;
/// `write_file` receives project-relative paths in plan order.
pub trait ScaffoldSink {
    /// Prepares the project root for the given slug.
    ///
    /// # Errors
    /// Returns a [`ScaffoldError`] if the destination cannot be prepared.
    fn begin(&mut self, project_slug: &str) -> Result<(), ScaffoldError>;

    /// Writes one file under the project root.
    ///
    /// # Errors
    /// Returns a [`ScaffoldError`] if the path is unsafe or the write fails.
    fn write_file(&mut self, relative_path: &str, contents: &[u8]) -> Result<(), ScaffoldError>;

    /// Returns a display label for the destination.
    fn destination(&self) -> String;
}

// ============================================================================
// SECTION: Directory Sink
// ============================================================================

/// Filesystem sink that writes the project under an output directory.
///
/// The project directory is `<output>/<project-slug>`. An existing non-empty
/// project directory is refused unless force is set; force removes the old
/// project directory before writing, so no file from a previous generation
/// survives. Every write re-validates its relative path and confirms the
/// resolved parent stays inside the project directory, so symlinked subtrees
/// cannot redirect writes elsewhere.
#[derive(Debug)]
pub struct DirectorySink {
    /// Output directory that will contain the project directory.
    output: PathBuf,
    /// Overwrite policy for existing non-empty project directories.
    force: bool,
    /// Project directory, set by `begin`.
    project_dir: Option<PathBuf>,
    /// Canonical project directory used for escape checks.
    canonical_project_dir: Option<PathBuf>,
}

impl DirectorySink {
    /// Builds a sink rooted at the given output directory.
    #[must_use]
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            force: false,
            project_dir: None,
            canonical_project_dir: None,
        }
    }

    /// Sets the overwrite policy for existing non-empty project directories.
    #[must_use]
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Returns the project directory once `begin` has run.
    #[must_use]
    pub fn project_dir(&self) -> Option<&Path> {
        self.project_dir.as_deref()
    }
}

impl ScaffoldSink for DirectorySink {
    fn begin(&mut self, project_slug: &str) -> Result<(), ScaffoldError> {
        let project_dir = self.output.join(project_slug);
        match fs::metadata(&project_dir) {
            Ok(meta) if meta.is_dir() => {
                let mut entries =
                    fs::read_dir(&project_dir).map_err(|err| io_error(&project_dir, &err))?;
                if entries.next().is_some() {
                    if !self.force {
                        return Err(ScaffoldError::DestinationNotEmpty {
                            path: project_dir.display().to_string(),
                        });
                    }
                    drop(entries);
                    fs::remove_dir_all(&project_dir)
                        .map_err(|err| io_error(&project_dir, &err))?;
                }
            }
            Ok(_) => {
                return Err(ScaffoldError::DestinationNotADirectory {
                    path: project_dir.display().to_string(),
                });
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(io_error(&project_dir, &err)),
        }
        fs::create_dir_all(&project_dir).map_err(|err| io_error(&project_dir, &err))?;
        let canonical =
            fs::canonicalize(&project_dir).map_err(|err| io_error(&project_dir, &err))?;
        self.project_dir = Some(project_dir);
        self.canonical_project_dir = Some(canonical);
        Ok(())
    }

    fn write_file(&mut self, relative_path: &str, contents: &[u8]) -> Result<(), ScaffoldError> {
        let project_dir = self
            .project_dir
            .as_ref()
            .ok_or(ScaffoldError::SinkNotStarted)?;
        let canonical_root = self
            .canonical_project_dir
            .as_ref()
            .ok_or(ScaffoldError::SinkNotStarted)?;
        validate_rendered_path(relative_path).map_err(|err| ScaffoldError::UnsafePath {
            path: relative_path.to_owned(),
            detail: err.to_string(),
        })?;
        let target = project_dir.join(relative_path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|err| io_error(parent, &err))?;
            let canonical_parent =
                fs::canonicalize(parent).map_err(|err| io_error(parent, &err))?;
            if !canonical_parent.starts_with(canonical_root) {
                return Err(ScaffoldError::EscapesDestination {
                    path: target.display().to_string(),
                });
            }
        }
        fs::write(&target, contents).map_err(|err| io_error(&target, &err))
    }

    fn destination(&self) -> String {
        self.project_dir
            .as_ref()
            .map_or_else(|| self.output.display().to_string(), |dir| {
                dir.display().to_string()
            })
    }
}

// ============================================================================
// SECTION: Memory Sink
// ============================================================================

/// In-memory sink that collects files into a sorted map.
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Project slug recorded by `begin`.
    project_slug: Option<String>,
    /// Collected files keyed by project-relative path.
    files: BTreeMap<String, Vec<u8>>,
}

impl MemorySink {
    /// Builds an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collected files keyed by project-relative path.
    #[must_use]
    pub const fn files(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.files
    }

    /// Returns the contents of one collected file.
    #[must_use]
    pub fn contents(&self, relative_path: &str) -> Option<&[u8]> {
        self.files.get(relative_path).map(Vec::as_slice)
    }
}

impl ScaffoldSink for MemorySink {
    fn begin(&mut self, project_slug: &str) -> Result<(), ScaffoldError> {
        self.project_slug = Some(project_slug.to_owned());
        self.files.clear();
        Ok(())
    }

    fn write_file(&mut self, relative_path: &str, contents: &[u8]) -> Result<(), ScaffoldError> {
        if self.project_slug.is_none() {
            return Err(ScaffoldError::SinkNotStarted);
        }
        validate_rendered_path(relative_path).map_err(|err| ScaffoldError::UnsafePath {
            path: relative_path.to_owned(),
            detail: err.to_string(),
        })?;
        self.files.insert(relative_path.to_owned(), contents.to_vec());
        Ok(())
    }

    fn destination(&self) -> String {
        self.project_slug
            .as_ref()
            .map_or_else(|| "<memory>".to_owned(), |slug| format!("<memory>/{slug}"))
    }
}

// ============================================================================
// SECTION: Scaffolder
// ============================================================================

/// Per-run report of a completed generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationSummary {
    /// Destination label of the generated project.
    pub project_dir: String,
    /// Number of files written.
    pub files_written: usize,
    /// Total bytes written across all files.
    pub bytes_written: usize,
    /// Digest of the rendered plan.
    pub digest: HashDigest,
}

/// Renders the template pack and writes it through a sink.
#[derive(Debug)]
pub struct Scaffolder {
    /// Renderer producing the plans this scaffolder writes.
    renderer: Renderer,
}

impl Scaffolder {
    /// Builds a scaffolder around an existing renderer.
    #[must_use]
    pub const fn new(renderer: Renderer) -> Self {
        Self { renderer }
    }

    /// Builds a scaffolder for the built-in catalog.
    ///
    /// # Errors
    /// Returns a [`ScaffoldError`] if a built-in template fails to parse.
    pub fn builtin() -> Result<Self, ScaffoldError> {
        Ok(Self::new(Renderer::builtin()?))
    }

    /// Returns the renderer backing this scaffolder.
    #[must_use]
    pub const fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Renders the plan for `params` and writes it through `sink`.
    ///
    /// # Errors
    /// Returns a [`ScaffoldError`] if rendering or any write fails.
    pub fn generate(
        &self,
        params: &TemplateParams,
        sink: &mut dyn ScaffoldSink,
    ) -> Result<GenerationSummary, ScaffoldError> {
        let plan = self.renderer.render_plan(params)?;
        self.apply(params, &plan, sink)
    }

    /// Writes an already-rendered plan through `sink`.
    ///
    /// # Errors
    /// Returns a [`ScaffoldError`] if any write fails.
    pub fn apply(
        &self,
        params: &TemplateParams,
        plan: &RenderPlan,
        sink: &mut dyn ScaffoldSink,
    ) -> Result<GenerationSummary, ScaffoldError> {
        sink.begin(params.project_slug.as_str())?;
        let mut bytes_written = 0usize;
        for file in plan.files() {
            sink.write_file(&file.path, file.contents.as_bytes())?;
            bytes_written += file.contents.len();
        }
        let digest = plan.digest()?;
        Ok(GenerationSummary {
            project_dir: sink.destination(),
            files_written: plan.len(),
            bytes_written,
            digest,
        })
    }
}
