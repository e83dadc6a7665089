// crates/agent-forge-verify/src/suite.rs
// ============================================================================
// Module: Verification Suite
// Description: End-to-end smoke test of project generation.
// Purpose: Generate into scratch space, run every check, aggregate a report.
// Dependencies: agent-forge-core, serde, tempfile, thiserror, toml
// ============================================================================

//! ## Overview
//! The suite generates a project from a parameter set and walks it through
//! the checks in a fixed order: generation, essential files, Python syntax,
//! project manifest, dependency resolution, Docker presence, idempotency.
//! A check failure is recorded and the suite continues; only setup problems
//! (template engine, scratch directory) abort the run as a [`VerifyError`].
//!
//! Checks that need the generated tree record failures of their own when
//! generation itself failed, while checks that shell out to optional tools
//! are skipped when the tool is absent, so the suite gives the same verdict
//! on a bare machine and a fully provisioned one unless something is
//! genuinely broken.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Stdio;

use agent_forge_core::ESSENTIAL_FILES;
use agent_forge_core::Renderer;
use agent_forge_core::ScaffoldSink;
use agent_forge_core::SYNTAX_CHECK_FILES;
use agent_forge_core::Scaffolder;
use agent_forge_core::TemplateParams;
use agent_forge_core::hashing::DEFAULT_HASH_ALGORITHM;
use agent_forge_core::hashing::hash_bytes;
use agent_forge_core::hashing::hash_canonical_json;
use agent_forge_core::scaffold::DirectorySink;
use serde::Serialize;
use thiserror::Error;

use crate::probe;
use crate::report::CheckName;
use crate::report::CheckOutcome;
use crate::report::VerificationReport;

// ============================================================================
// SECTION: Options and Errors
// ============================================================================

/// Failure detail recorded by tree-dependent checks when generation failed.
const FAIL_NO_PROJECT: &str = "generation failed";

/// Configuration of a verification run.
#[derive(Debug, Clone)]
pub struct VerifyOptions {
    /// Parameter set to generate with.
    pub params: TemplateParams,
    /// Generate under this directory and keep it after the run.
    ///
    /// When unset, generation happens in a temporary directory that is
    /// removed once the run finishes. The project directory inside a kept
    /// directory is overwritten if it already exists.
    pub keep: Option<PathBuf>,
    /// Skip the dependency-resolution check even when `uv` is available.
    pub skip_uv: bool,
    /// Skip the docker-presence check even when `docker` is available.
    pub skip_docker: bool,
}

impl VerifyOptions {
    /// Returns the default smoke-test run over the fixed example parameters.
    #[must_use]
    pub fn smoke() -> Self {
        Self {
            params: TemplateParams::example(),
            keep: None,
            skip_uv: false,
            skip_docker: false,
        }
    }
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self::smoke()
    }
}

/// Setup failures that prevent the suite from running at all.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The template engine could not be constructed.
    #[error("template engine setup failed: {detail}")]
    Engine {
        /// Underlying error detail.
        detail: String,
    },
    /// The scratch directory could not be prepared.
    #[error("scratch directory setup failed: {detail}")]
    Scratch {
        /// Underlying error detail.
        detail: String,
    },
}

// ============================================================================
// SECTION: Scratch Space
// ============================================================================

/// Scratch directory holding the generated project for one run.
#[derive(Debug)]
enum Scratch {
    /// Caller-provided directory, kept after the run.
    Kept(PathBuf),
    /// Temporary directory, deleted on drop.
    Temp(tempfile::TempDir),
}

impl Scratch {
    /// Prepares the scratch directory for the given options.
    fn prepare(options: &VerifyOptions) -> Result<Self, VerifyError> {
        match &options.keep {
            Some(dir) => {
                fs::create_dir_all(dir).map_err(|err| VerifyError::Scratch {
                    detail: format!("{}: {err}", dir.display()),
                })?;
                Ok(Self::Kept(dir.clone()))
            }
            None => tempfile::TempDir::with_prefix("agent-forge-verify-")
                .map(Self::Temp)
                .map_err(|err| VerifyError::Scratch {
                    detail: err.to_string(),
                }),
        }
    }

    /// Returns the scratch root path.
    fn root(&self) -> &Path {
        match self {
            Self::Kept(path) => path,
            Self::Temp(dir) => dir.path(),
        }
    }
}

// ============================================================================
// SECTION: Suite Runner
// ============================================================================

/// Runs the full verification suite.
///
/// # Errors
/// Returns a [`VerifyError`] only for setup failures; check failures are
/// recorded in the report instead.
pub fn run_suite(options: &VerifyOptions) -> Result<VerificationReport, VerifyError> {
    let scaffolder = Scaffolder::builtin().map_err(|err| VerifyError::Engine {
        detail: err.to_string(),
    })?;
    let scratch = Scratch::prepare(options)?;
    let mut sink = DirectorySink::new(scratch.root().to_path_buf()).with_force(true);

    let generation = scaffolder.generate(&options.params, &mut sink);
    let mut report = VerificationReport::new(sink.destination());
    let mut baseline_digest = None;
    let project_dir = match generation {
        Ok(summary) => {
            baseline_digest = Some(summary.digest.value.clone());
            report.record(CheckOutcome::pass(
                CheckName::Generation,
                format!(
                    "{} files, {} bytes written to {}",
                    summary.files_written, summary.bytes_written, summary.project_dir
                ),
            ));
            sink.project_dir().map(Path::to_path_buf)
        }
        Err(err) => {
            report.record(CheckOutcome::fail(CheckName::Generation, err.to_string()));
            None
        }
    };

    match &project_dir {
        Some(dir) => report.record(check_essential_files(
            scaffolder.renderer(),
            &options.params,
            dir,
        )),
        None => report.record(CheckOutcome::fail(CheckName::EssentialFiles, FAIL_NO_PROJECT)),
    }
    match &project_dir {
        Some(dir) => report.record(check_python_syntax(
            scaffolder.renderer(),
            &options.params,
            dir,
        )),
        None => report.record(CheckOutcome::fail(CheckName::PythonSyntax, FAIL_NO_PROJECT)),
    }
    match &project_dir {
        Some(dir) => report.record(check_project_manifest(&options.params, dir)),
        None => report.record(CheckOutcome::fail(CheckName::ProjectManifest, FAIL_NO_PROJECT)),
    }
    if options.skip_uv {
        report.record(CheckOutcome::skip(
            CheckName::DependencyResolution,
            "skipped by --skip-uv",
        ));
    } else {
        match &project_dir {
            Some(dir) => report.record(check_dependency_resolution(dir)),
            None => report.record(CheckOutcome::fail(
                CheckName::DependencyResolution,
                FAIL_NO_PROJECT,
            )),
        }
    }
    if options.skip_docker {
        report.record(CheckOutcome::skip(
            CheckName::DockerPresence,
            "skipped by --skip-docker",
        ));
    } else {
        report.record(check_docker());
    }
    report.record(check_idempotency(&options.params, baseline_digest.as_deref()));

    Ok(report)
}

// ============================================================================
// SECTION: Individual Checks
// ============================================================================

/// Checks that every essential file exists in the generated tree.
fn check_essential_files(
    renderer: &Renderer,
    params: &TemplateParams,
    project_dir: &Path,
) -> CheckOutcome {
    let mut missing = Vec::new();
    for template in ESSENTIAL_FILES {
        match renderer.render_path_template(template, params) {
            Ok(path) => {
                if !project_dir.join(&path).is_file() {
                    missing.push(path);
                }
            }
            Err(err) => {
                return CheckOutcome::fail(
                    CheckName::EssentialFiles,
                    format!("failed to resolve '{template}': {err}"),
                );
            }
        }
    }
    if missing.is_empty() {
        CheckOutcome::pass(
            CheckName::EssentialFiles,
            format!("{} essential files present", ESSENTIAL_FILES.len()),
        )
    } else {
        CheckOutcome::fail(
            CheckName::EssentialFiles,
            format!("missing: {}", missing.join(", ")),
        )
    }
}

/// Byte-compiles every generated Python source with the discovered
/// interpreter.
///
/// Sources on the [`SYNTAX_CHECK_FILES`] list are named individually in the
/// detail line; the remaining sources are reported as one batch count.
fn check_python_syntax(
    renderer: &Renderer,
    params: &TemplateParams,
    project_dir: &Path,
) -> CheckOutcome {
    let Some(python) = probe::find_python() else {
        return CheckOutcome::skip(
            CheckName::PythonSyntax,
            "no python interpreter on PATH; syntax not checked",
        );
    };
    let mut named = Vec::new();
    for template in SYNTAX_CHECK_FILES {
        match renderer.render_path_template(template, params) {
            Ok(path) => named.push(path),
            Err(err) => {
                return CheckOutcome::fail(
                    CheckName::PythonSyntax,
                    format!("failed to resolve '{template}': {err}"),
                );
            }
        }
    }
    let sources = match collect_python_sources(project_dir) {
        Ok(sources) => sources,
        Err(err) => {
            return CheckOutcome::fail(
                CheckName::PythonSyntax,
                format!("failed to walk the generated tree: {err}"),
            );
        }
    };
    if sources.is_empty() {
        return CheckOutcome::fail(CheckName::PythonSyntax, "no python sources were generated");
    }
    let mut failures = Vec::new();
    let mut named_compiled = Vec::new();
    let mut batch_compiled = 0usize;
    for source in &sources {
        let relative = relative_path(project_dir, source);
        let result = Command::new(&python.command)
            .arg("-m")
            .arg("py_compile")
            .arg(source)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();
        match result {
            Ok(output) if output.status.success() => {
                if named.contains(&relative) {
                    named_compiled.push(relative);
                } else {
                    batch_compiled += 1;
                }
            }
            Ok(output) => {
                failures.push(format!("{relative}: {}", last_error_line(&output.stderr)));
            }
            Err(err) => {
                return CheckOutcome::fail(
                    CheckName::PythonSyntax,
                    format!("failed to run {}: {err}", python.command),
                );
            }
        }
    }
    if failures.is_empty() {
        let mut parts: Vec<String> = named_compiled
            .iter()
            .map(|path| format!("{path} ok"))
            .collect();
        parts.push(format!("{batch_compiled} more sources compiled"));
        CheckOutcome::pass(
            CheckName::PythonSyntax,
            format!("{} ({})", parts.join("; "), python.version),
        )
    } else {
        CheckOutcome::fail(CheckName::PythonSyntax, failures.join("; "))
    }
}

/// Checks that the generated `pyproject.toml` parses and names the project.
fn check_project_manifest(params: &TemplateParams, project_dir: &Path) -> CheckOutcome {
    let path = project_dir.join("pyproject.toml");
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) => {
            return CheckOutcome::fail(
                CheckName::ProjectManifest,
                format!("failed to read {}: {err}", path.display()),
            );
        }
    };
    let value: toml::Value = match text.parse() {
        Ok(value) => value,
        Err(err) => {
            return CheckOutcome::fail(
                CheckName::ProjectManifest,
                format!("pyproject.toml does not parse: {err}"),
            );
        }
    };
    let name = value
        .get("project")
        .and_then(|project| project.get("name"))
        .and_then(toml::Value::as_str);
    match name {
        Some(name) if name == params.project_slug.as_str() => {
            CheckOutcome::pass(CheckName::ProjectManifest, format!("project.name = '{name}'"))
        }
        Some(name) => CheckOutcome::fail(
            CheckName::ProjectManifest,
            format!(
                "project.name is '{name}', expected '{}'",
                params.project_slug
            ),
        ),
        None => CheckOutcome::fail(
            CheckName::ProjectManifest,
            "pyproject.toml declares no project.name",
        ),
    }
}

/// Resolves the generated dependency set with `uv`, warning on failure.
///
/// Resolution reaches the network, so a failure here is a warning rather
/// than a verdict on the generated project.
fn check_dependency_resolution(project_dir: &Path) -> CheckOutcome {
    let Some(uv) = probe::find_uv() else {
        return CheckOutcome::skip(
            CheckName::DependencyResolution,
            "uv not found on PATH; dependency resolution not checked",
        );
    };
    let result = Command::new(&uv.command)
        .arg("sync")
        .arg("--dry-run")
        .current_dir(project_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output();
    match result {
        Ok(output) if output.status.success() => CheckOutcome::pass(
            CheckName::DependencyResolution,
            format!("dependencies resolve ({})", uv.version),
        ),
        Ok(output) => CheckOutcome::warn(
            CheckName::DependencyResolution,
            format!("uv sync --dry-run failed: {}", last_error_line(&output.stderr)),
        ),
        Err(err) => CheckOutcome::warn(
            CheckName::DependencyResolution,
            format!("failed to run uv: {err}"),
        ),
    }
}

/// Reports whether the docker CLI is available for the generated Dockerfile.
fn check_docker() -> CheckOutcome {
    probe::find_docker().map_or_else(
        || {
            CheckOutcome::skip(
                CheckName::DockerPresence,
                "docker not found on PATH; container build not checked",
            )
        },
        |docker| CheckOutcome::pass(CheckName::DockerPresence, docker.version),
    )
}

/// One row of the on-disk manifest digested after a re-scaffold.
///
/// Field names and ordering match the render plan's manifest rows, so a
/// faithful sink write digests to the same value as the plan itself.
#[derive(Debug, Serialize)]
struct DiskManifestEntry {
    /// Project-relative path, forward slashes only.
    path: String,
    /// Lowercase hex SHA-256 of the file bytes.
    sha256: String,
}

/// Renders the plan twice from fresh engines, re-scaffolds into a second
/// scratch directory, and requires every digest to agree.
fn check_idempotency(params: &TemplateParams, baseline: Option<&str>) -> CheckOutcome {
    let first = match render_digest(params) {
        Ok(digest) => digest,
        Err(detail) => return CheckOutcome::fail(CheckName::Idempotency, detail),
    };
    let second = match render_digest(params) {
        Ok(digest) => digest,
        Err(detail) => return CheckOutcome::fail(CheckName::Idempotency, detail),
    };
    if first != second {
        return CheckOutcome::fail(
            CheckName::Idempotency,
            format!("plan digest changed between renders: {first} != {second}"),
        );
    }
    let rescaffold = match rescaffold_digest(params) {
        Ok(digest) => digest,
        Err(detail) => return CheckOutcome::fail(CheckName::Idempotency, detail),
    };
    if rescaffold != first {
        return CheckOutcome::fail(
            CheckName::Idempotency,
            format!("re-scaffolded tree digest differs from the plan: {rescaffold} != {first}"),
        );
    }
    if let Some(baseline) = baseline
        && baseline != first
    {
        return CheckOutcome::fail(
            CheckName::Idempotency,
            format!("plan digest differs from the generated tree: {baseline} != {first}"),
        );
    }
    CheckOutcome::pass(
        CheckName::Idempotency,
        format!("stable digest {first} across renders and re-scaffold"),
    )
}

/// Renders one plan on a fresh engine and returns its digest value.
fn render_digest(params: &TemplateParams) -> Result<String, String> {
    let renderer = Renderer::builtin().map_err(|err| err.to_string())?;
    let plan = renderer.render_plan(params).map_err(|err| err.to_string())?;
    let digest = plan.digest().map_err(|err| err.to_string())?;
    Ok(digest.value)
}

/// Scaffolds into a fresh scratch directory and digests the bytes read back
/// from disk.
fn rescaffold_digest(params: &TemplateParams) -> Result<String, String> {
    let scratch = tempfile::TempDir::with_prefix("agent-forge-rescaffold-")
        .map_err(|err| format!("scratch directory: {err}"))?;
    let scaffolder = Scaffolder::builtin().map_err(|err| err.to_string())?;
    let mut sink = DirectorySink::new(scratch.path().to_path_buf());
    scaffolder
        .generate(params, &mut sink)
        .map_err(|err| err.to_string())?;
    let project_dir = sink
        .project_dir()
        .ok_or_else(|| "project directory missing after re-scaffold".to_owned())?;
    let mut entries = Vec::new();
    for path in collect_files(project_dir).map_err(|err| err.to_string())? {
        let bytes = fs::read(&path).map_err(|err| format!("{}: {err}", path.display()))?;
        entries.push(DiskManifestEntry {
            path: relative_path(project_dir, &path),
            sha256: hash_bytes(DEFAULT_HASH_ALGORITHM, &bytes).value,
        });
    }
    entries.sort_by(|left, right| left.path.cmp(&right.path));
    hash_canonical_json(DEFAULT_HASH_ALGORITHM, &entries)
        .map(|digest| digest.value)
        .map_err(|err| err.to_string())
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Collects every file under the project tree, skipping `__pycache__`.
fn collect_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut stack = vec![dir.to_path_buf()];
    while let Some(current) = stack.pop() {
        for entry in fs::read_dir(&current)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                if entry.file_name() != "__pycache__" {
                    stack.push(path);
                }
            } else {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Collects every `.py` file under the project tree.
fn collect_python_sources(dir: &Path) -> io::Result<Vec<PathBuf>> {
    Ok(collect_files(dir)?
        .into_iter()
        .filter(|path| path.extension().is_some_and(|extension| extension == "py"))
        .collect())
}

/// Returns the project-relative form of a path, forward-slash separated.
fn relative_path(project_dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(project_dir).unwrap_or(path);
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Extracts the last non-empty line of a captured stderr stream.
fn last_error_line(stderr: &[u8]) -> String {
    String::from_utf8_lossy(stderr)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .next_back()
        .map_or_else(|| "no error output".to_owned(), str::to_owned)
}
