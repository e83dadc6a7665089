// crates/agent-forge-verify/src/probe.rs
// ============================================================================
// Module: Tool Probing
// Description: Discovery of optional external tools on the PATH.
// Purpose: Let checks skip cleanly when an interpreter or CLI is absent.
// Dependencies: none (std process handling)
// ============================================================================

//! ## Overview
//! The suite shells out to a Python interpreter, `uv`, and `docker` when they
//! are available. Probing runs each candidate with its version flag and keeps
//! the first one that exits successfully; anything else (missing binary,
//! non-zero exit, spawn failure) counts as absent so the owning check can
//! report a skip instead of an environment-specific failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::process::Command;
use std::process::Stdio;

// ============================================================================
// SECTION: Probe Results
// ============================================================================

/// An external tool found on the PATH.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInfo {
    /// Command name that answered the probe.
    pub command: String,
    /// First line of the tool's version output.
    pub version: String,
}

/// Interpreter candidates tried for the Python syntax check, in order.
const PYTHON_CANDIDATES: &[&str] = &["python3", "python"];

/// Probes for a Python interpreter.
#[must_use]
pub fn find_python() -> Option<ToolInfo> {
    probe(PYTHON_CANDIDATES, "--version")
}

/// Probes for the `uv` package manager.
#[must_use]
pub fn find_uv() -> Option<ToolInfo> {
    probe(&["uv"], "--version")
}

/// Probes for the `docker` CLI.
#[must_use]
pub fn find_docker() -> Option<ToolInfo> {
    probe(&["docker"], "--version")
}

// ============================================================================
// SECTION: Probe Runner
// ============================================================================

/// Runs each candidate with the version flag and returns the first success.
fn probe(candidates: &[&str], version_flag: &str) -> Option<ToolInfo> {
    for candidate in candidates {
        let result = Command::new(candidate)
            .arg(version_flag)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();
        if let Ok(output) = result
            && output.status.success()
        {
            return Some(ToolInfo {
                command: (*candidate).to_owned(),
                version: version_line(&output.stdout, &output.stderr),
            });
        }
    }
    None
}

/// Extracts the first non-empty line of the probe output.
///
/// Older interpreters print their version banner to stderr, so both streams
/// are considered.
fn version_line(stdout: &[u8], stderr: &[u8]) -> String {
    let text = if stdout.iter().any(|byte| !byte.is_ascii_whitespace()) {
        String::from_utf8_lossy(stdout).into_owned()
    } else {
        String::from_utf8_lossy(stderr).into_owned()
    };
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .to_owned()
}
