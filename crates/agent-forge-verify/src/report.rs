// crates/agent-forge-verify/src/report.rs
// ============================================================================
// Module: Verification Report
// Description: Check identities, statuses, and the aggregated run report.
// Purpose: Carry per-check outcomes to the console and JSON emitters.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Every check in the suite produces a [`CheckOutcome`]; the suite collects
//! them into a [`VerificationReport`]. A run passes when no outcome is
//! [`CheckStatus::Fail`]. Warnings and skips never affect the verdict: a
//! missing optional tool downgrades its check to a skip rather than failing
//! the run on an environment difference.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;

// ============================================================================
// SECTION: Check Identity
// ============================================================================

/// Identity of each check in the suite, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckName {
    /// Project generation into the scratch directory.
    Generation,
    /// Presence of every essential generated file.
    EssentialFiles,
    /// Byte-compilation of the generated Python sources.
    PythonSyntax,
    /// Generated `pyproject.toml` parses and names the project.
    ProjectManifest,
    /// Declared dependencies resolve with `uv`.
    DependencyResolution,
    /// Container tooling is available for the generated Dockerfile.
    DockerPresence,
    /// Repeated rendering produces an identical plan digest.
    Idempotency,
}

impl CheckName {
    /// Returns the kebab-case label for this check.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generation => "generation",
            Self::EssentialFiles => "essential-files",
            Self::PythonSyntax => "python-syntax",
            Self::ProjectManifest => "project-manifest",
            Self::DependencyResolution => "dependency-resolution",
            Self::DockerPresence => "docker-presence",
            Self::Idempotency => "idempotency",
        }
    }
}

impl fmt::Display for CheckName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Check Status
// ============================================================================

/// Outcome class of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// Check ran and succeeded.
    Pass,
    /// Check ran and surfaced a non-fatal concern.
    Warn,
    /// Check could not run in this environment (missing optional tool).
    Skip,
    /// Check ran and failed.
    Fail,
}

impl CheckStatus {
    /// Returns the uppercase console label for this status.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Warn => "WARN",
            Self::Skip => "SKIP",
            Self::Fail => "FAIL",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Result of one check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    /// Check identity.
    pub name: CheckName,
    /// Outcome class.
    pub status: CheckStatus,
    /// Human-readable detail line (may be empty for a plain pass).
    pub detail: String,
}

impl CheckOutcome {
    /// Builds a passing outcome with a detail line.
    #[must_use]
    pub fn pass(name: CheckName, detail: impl Into<String>) -> Self {
        Self {
            name,
            status: CheckStatus::Pass,
            detail: detail.into(),
        }
    }

    /// Builds a warning outcome with a detail line.
    #[must_use]
    pub fn warn(name: CheckName, detail: impl Into<String>) -> Self {
        Self {
            name,
            status: CheckStatus::Warn,
            detail: detail.into(),
        }
    }

    /// Builds a skipped outcome with the skip reason.
    #[must_use]
    pub fn skip(name: CheckName, detail: impl Into<String>) -> Self {
        Self {
            name,
            status: CheckStatus::Skip,
            detail: detail.into(),
        }
    }

    /// Builds a failing outcome with the failure detail.
    #[must_use]
    pub fn fail(name: CheckName, detail: impl Into<String>) -> Self {
        Self {
            name,
            status: CheckStatus::Fail,
            detail: detail.into(),
        }
    }
}

/// Per-status outcome counts for the summary line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    /// Number of passing checks.
    pub passed: usize,
    /// Number of warning checks.
    pub warned: usize,
    /// Number of skipped checks.
    pub skipped: usize,
    /// Number of failing checks.
    pub failed: usize,
}

// ============================================================================
// SECTION: Report
// ============================================================================

/// Aggregated result of a verification run.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    /// Destination the project was generated into.
    pub project_dir: String,
    /// Outcomes in execution order.
    pub outcomes: Vec<CheckOutcome>,
}

impl VerificationReport {
    /// Builds an empty report for the given destination.
    #[must_use]
    pub const fn new(project_dir: String) -> Self {
        Self {
            project_dir,
            outcomes: Vec::new(),
        }
    }

    /// Records one check outcome.
    pub fn record(&mut self, outcome: CheckOutcome) {
        self.outcomes.push(outcome);
    }

    /// Returns whether the run passed (no failing outcome).
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcomes
            .iter()
            .all(|outcome| outcome.status != CheckStatus::Fail)
    }

    /// Returns the per-status counts.
    #[must_use]
    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for outcome in &self.outcomes {
            match outcome.status {
                CheckStatus::Pass => counts.passed += 1,
                CheckStatus::Warn => counts.warned += 1,
                CheckStatus::Skip => counts.skipped += 1,
                CheckStatus::Fail => counts.failed += 1,
            }
        }
        counts
    }

    /// Returns the recorded outcomes in execution order.
    #[must_use]
    pub fn outcomes(&self) -> &[CheckOutcome] {
        &self.outcomes
    }
}
