// crates/agent-forge-core/src/params.rs
// ============================================================================
// Module: Template Parameters
// Description: Parameter model, validated identifiers, and parameter files.
// Purpose: Parse, default, and validate the inputs that drive generation.
// Dependencies: serde, serde_json, toml, thiserror
// ============================================================================

//! ## Overview
//! This module defines the parameter set consumed by the generator. Parameters
//! arrive as a JSON or TOML file with every field optional; loading applies
//! defaults, derives missing values, and validates everything into
//! [`TemplateParams`]. Identifier-like fields are opaque validated newtypes so
//! that a constructed parameter set is always safe to substitute into file
//! paths and Python module names.
//!
//! ## Index
//! - Formats: [`ParamsFormat`], [`detect_format`]
//! - Identifiers: [`ProjectSlug`], [`AgentName`], [`DomainName`], [`PythonVersion`]
//! - Files: [`ParamsFile`], [`ToggleValue`]
//! - Resolved set: [`TemplateParams`], [`RenderContext`]
//! - Derivations: [`derive_project_slug`], [`derive_agent_module`], [`derive_domain_name`]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// CONSTANTS: Parameter defaults and limits
// ============================================================================

/// Maximum parameter file size accepted by the loader.
pub const MAX_PARAMS_BYTES: u64 = 256 * 1024;

/// Maximum length of display fields (project name, author name, email).
const MAX_DISPLAY_CHARS: usize = 100;

/// Maximum length of the free-form description field.
const MAX_DESCRIPTION_CHARS: usize = 500;

/// Maximum length of slug and agent identifiers.
const MAX_IDENTIFIER_CHARS: usize = 64;

/// Maximum length of the domain name identifier.
const MAX_DOMAIN_CHARS: usize = 32;

/// Default project display name when the parameter file omits one.
const DEFAULT_PROJECT_NAME: &str = "My Agent Service";

/// Default agent class name when the parameter file omits one.
const DEFAULT_AGENT_NAME: &str = "MyAgent";

/// Default project description when the parameter file omits one.
const DEFAULT_DESCRIPTION: &str = "LLM micro-agent service built with FastAPI and LangGraph";

/// Default author name when the parameter file omits one.
const DEFAULT_AUTHOR_NAME: &str = "Your Name";

/// Default author email when the parameter file omits one.
const DEFAULT_AUTHOR_EMAIL: &str = "you@example.com";

/// Default Python version when the parameter file omits one.
const DEFAULT_PYTHON_VERSION: &str = "3.12";

/// Default OpenAI model name when the parameter file omits one.
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Supported Python minor version range (inclusive).
const PYTHON_MINOR_RANGE: std::ops::RangeInclusive<u8> = 9..=14;

// ============================================================================
// SECTION: Parameter Formats
// ============================================================================

/// Supported parameter file encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamsFormat {
    /// JSON parameter file.
    Json,
    /// TOML parameter file.
    Toml,
}

impl ParamsFormat {
    /// Returns the lowercase label for this format.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }

    /// Returns the conventional file extension for this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        self.label()
    }

    /// Parses a format from a file extension.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

impl fmt::Display for ParamsFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Detects the parameter file format from a path extension.
#[must_use]
pub fn detect_format(path: &Path) -> Option<ParamsFormat> {
    path.extension()
        .and_then(|extension| extension.to_str())
        .and_then(ParamsFormat::from_extension)
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading or validating template parameters.
#[derive(Debug, Error)]
pub enum ParamsError {
    /// Failed to read the parameter file.
    #[error("failed to read parameter file {path}: {detail}")]
    Io {
        /// Path that failed to read.
        path: String,
        /// Underlying I/O error message.
        detail: String,
    },
    /// The parameter file extension is not a supported format.
    #[error("unsupported parameter file format: {path} (expected .json or .toml)")]
    UnknownFormat {
        /// Path with the unsupported extension.
        path: String,
    },
    /// The parameter file exceeds the size limit.
    #[error("parameter file exceeds maximum size of {max_bytes} bytes")]
    TooLarge {
        /// Maximum accepted size in bytes.
        max_bytes: u64,
    },
    /// Failed to parse the parameter file.
    #[error("failed to parse {format} parameters: {detail}")]
    Parse {
        /// Format that failed to parse.
        format: ParamsFormat,
        /// Underlying parse error message.
        detail: String,
    },
    /// A parameter value failed validation.
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidField {
        /// Parameter field name.
        field: String,
        /// Human-readable rejection reason.
        reason: String,
    },
}

impl ParamsError {
    /// Builds an [`ParamsError::InvalidField`] for the given field and reason.
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

// ============================================================================
// SECTION: Validated Identifiers
// ============================================================================

/// Project slug used as the generated project directory name.
///
/// # Invariants
/// - Lowercase ASCII letters, digits, and single hyphens only.
/// - Starts with a letter; never ends with a hyphen; 1..=64 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProjectSlug(String);

impl ProjectSlug {
    /// Creates a project slug, validating the slug grammar.
    ///
    /// # Errors
    /// Returns [`ParamsError::InvalidField`] when the value violates the slug
    /// grammar.
    pub fn new(value: impl Into<String>) -> Result<Self, ParamsError> {
        let value = value.into();
        validate_slug_grammar("project_slug", &value)?;
        Ok(Self(value))
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Agent class name substituted into generated Python class definitions.
///
/// # Invariants
/// - PascalCase ASCII: uppercase first letter, alphanumerics only.
/// - 1..=64 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AgentName(String);

impl AgentName {
    /// Creates an agent name, validating the PascalCase grammar.
    ///
    /// # Errors
    /// Returns [`ParamsError::InvalidField`] when the value is not PascalCase
    /// ASCII alphanumeric.
    pub fn new(value: impl Into<String>) -> Result<Self, ParamsError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ParamsError::invalid("agent_name", "must not be empty"));
        }
        if value.len() > MAX_IDENTIFIER_CHARS {
            return Err(ParamsError::invalid(
                "agent_name",
                format!("must be at most {MAX_IDENTIFIER_CHARS} characters"),
            ));
        }
        let mut chars = value.chars();
        if !chars.next().is_some_and(|ch| ch.is_ascii_uppercase()) {
            return Err(ParamsError::invalid(
                "agent_name",
                "must start with an uppercase ASCII letter",
            ));
        }
        if !value.chars().all(|ch| ch.is_ascii_alphanumeric()) {
            return Err(ParamsError::invalid(
                "agent_name",
                "must contain only ASCII letters and digits",
            ));
        }
        Ok(Self(value))
    }

    /// Returns the agent name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Domain name used in the URL prefix and domain-keyed module names.
///
/// # Invariants
/// - Lowercase ASCII letters and digits only; starts with a letter.
/// - 1..=32 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DomainName(String);

impl DomainName {
    /// Creates a domain name, validating the identifier grammar.
    ///
    /// # Errors
    /// Returns [`ParamsError::InvalidField`] when the value is not a lowercase
    /// ASCII alphanumeric identifier.
    pub fn new(value: impl Into<String>) -> Result<Self, ParamsError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ParamsError::invalid("domain_name", "must not be empty"));
        }
        if value.len() > MAX_DOMAIN_CHARS {
            return Err(ParamsError::invalid(
                "domain_name",
                format!("must be at most {MAX_DOMAIN_CHARS} characters"),
            ));
        }
        let mut chars = value.chars();
        if !chars.next().is_some_and(|ch| ch.is_ascii_lowercase()) {
            return Err(ParamsError::invalid(
                "domain_name",
                "must start with a lowercase ASCII letter",
            ));
        }
        if !value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit())
        {
            return Err(ParamsError::invalid(
                "domain_name",
                "must contain only lowercase ASCII letters and digits",
            ));
        }
        Ok(Self(value))
    }

    /// Returns the domain name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Target Python version in `3.<minor>` form, kept verbatim for substitution.
///
/// # Invariants
/// - Always `3.<minor>` with minor in the supported range, no leading zeros.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PythonVersion(String);

impl PythonVersion {
    /// Creates a Python version, validating the `3.<minor>` form.
    ///
    /// # Errors
    /// Returns [`ParamsError::InvalidField`] when the value is not a supported
    /// `3.<minor>` version string.
    pub fn new(value: impl Into<String>) -> Result<Self, ParamsError> {
        let value = value.into();
        let Some(minor_text) = value.strip_prefix("3.") else {
            return Err(ParamsError::invalid(
                "python_version",
                "must be of the form 3.<minor>",
            ));
        };
        let minor: u8 = minor_text.parse().map_err(|_| {
            ParamsError::invalid("python_version", "minor version must be a number")
        })?;
        if minor_text != minor.to_string() {
            return Err(ParamsError::invalid(
                "python_version",
                "minor version must not carry leading zeros",
            ));
        }
        if !PYTHON_MINOR_RANGE.contains(&minor) {
            return Err(ParamsError::invalid(
                "python_version",
                format!(
                    "minor version must be between {} and {}",
                    PYTHON_MINOR_RANGE.start(),
                    PYTHON_MINOR_RANGE.end()
                ),
            ));
        }
        Ok(Self(value))
    }

    /// Returns the version as a string slice (e.g. `3.12`).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// SECTION: Parameter Files
// ============================================================================

/// Boolean toggle value as written in parameter files.
///
/// Accepts native booleans plus the `"yes"`/`"no"` spelling used by the
/// original template parameter files.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ToggleValue {
    /// Native boolean toggle.
    Flag(bool),
    /// Textual toggle (`yes`/`no`/`true`/`false`, case-insensitive).
    Text(String),
}

impl ToggleValue {
    /// Resolves the toggle into a boolean.
    ///
    /// # Errors
    /// Returns [`ParamsError::InvalidField`] when the text form is not a
    /// recognized toggle spelling.
    pub fn resolve(&self, field: &str) -> Result<bool, ParamsError> {
        match self {
            Self::Flag(value) => Ok(*value),
            Self::Text(text) => match text.to_ascii_lowercase().as_str() {
                "yes" | "true" => Ok(true),
                "no" | "false" => Ok(false),
                _ => Err(ParamsError::invalid(
                    field,
                    "must be true/false or yes/no",
                )),
            },
        }
    }
}

/// On-disk parameter file with every field optional.
///
/// Unknown fields are rejected so typos surface instead of silently falling
/// back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamsFile {
    /// Project display name.
    #[serde(default)]
    pub project_name: Option<String>,
    /// Project slug (directory name); derived from `project_name` if absent.
    #[serde(default)]
    pub project_slug: Option<String>,
    /// PascalCase agent class name.
    #[serde(default)]
    pub agent_name: Option<String>,
    /// Domain identifier; derived from `agent_name` if absent.
    #[serde(default)]
    pub domain_name: Option<String>,
    /// Free-form project description.
    #[serde(default)]
    pub description: Option<String>,
    /// Author display name.
    #[serde(default)]
    pub author_name: Option<String>,
    /// Author email address.
    #[serde(default)]
    pub author_email: Option<String>,
    /// Target Python version (`3.<minor>`).
    #[serde(default)]
    pub python_version: Option<String>,
    /// Enables LangSmith tracing wiring in the generated service.
    #[serde(default)]
    pub use_langsmith: Option<ToggleValue>,
    /// Enables the Microsoft Bot Framework endpoint in the generated service.
    #[serde(default)]
    pub use_microsoft_bot_framework: Option<ToggleValue>,
    /// OpenAI model name forwarded to the generated configuration.
    #[serde(default)]
    pub openai_model: Option<String>,
}

// ============================================================================
// SECTION: Resolved Parameters
// ============================================================================

/// Fully resolved and validated parameter set.
///
/// # Invariants
/// - Identifier fields satisfy their newtype grammars, so every rendered path
///   is a safe relative path and every module name is a Python identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateParams {
    /// Project display name (FastAPI title, README heading).
    pub project_name: String,
    /// Project slug; generated project directory name.
    pub project_slug: ProjectSlug,
    /// PascalCase agent class name.
    pub agent_name: AgentName,
    /// Domain identifier (URL prefix, entity/router module names).
    pub domain_name: DomainName,
    /// Free-form project description.
    pub description: String,
    /// Author display name.
    pub author_name: String,
    /// Author email address.
    pub author_email: String,
    /// Target Python version.
    pub python_version: PythonVersion,
    /// LangSmith tracing toggle.
    pub use_langsmith: bool,
    /// Microsoft Bot Framework toggle.
    pub use_microsoft_bot_framework: bool,
    /// OpenAI model name.
    pub openai_model: String,
}

impl TemplateParams {
    /// Loads, defaults, and validates parameters from a JSON or TOML file.
    ///
    /// # Errors
    /// Returns [`ParamsError`] when the file cannot be read, exceeds
    /// [`MAX_PARAMS_BYTES`], fails to parse, or carries an invalid field.
    pub fn from_file(path: &Path) -> Result<Self, ParamsError> {
        let format = detect_format(path).ok_or_else(|| ParamsError::UnknownFormat {
            path: path.display().to_string(),
        })?;
        let bytes = read_params_bytes(path)?;
        let file = parse_params(format, &bytes)?;
        Self::resolve(file)
    }

    /// Resolves a parameter file into a validated parameter set.
    ///
    /// Missing fields take their documented defaults; `project_slug` and
    /// `domain_name` are derived from `project_name` and `agent_name` when
    /// absent.
    ///
    /// # Errors
    /// Returns [`ParamsError::InvalidField`] when any resolved value fails
    /// validation.
    pub fn resolve(file: ParamsFile) -> Result<Self, ParamsError> {
        let project_name = file
            .project_name
            .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string());
        validate_display_field("project_name", &project_name)?;

        let slug_value = match file.project_slug {
            Some(value) => value,
            None => derive_project_slug(&project_name),
        };
        let project_slug = ProjectSlug::new(slug_value)?;

        let agent_name = AgentName::new(
            file.agent_name
                .unwrap_or_else(|| DEFAULT_AGENT_NAME.to_string()),
        )?;

        let domain_value = match file.domain_name {
            Some(value) => value,
            None => derive_domain_name(agent_name.as_str()),
        };
        let domain_name = DomainName::new(domain_value)?;

        let description = file
            .description
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());
        validate_description("description", &description)?;

        let author_name = file
            .author_name
            .unwrap_or_else(|| DEFAULT_AUTHOR_NAME.to_string());
        validate_display_field("author_name", &author_name)?;

        let author_email = file
            .author_email
            .unwrap_or_else(|| DEFAULT_AUTHOR_EMAIL.to_string());
        validate_author_email("author_email", &author_email)?;

        let python_version = PythonVersion::new(
            file.python_version
                .unwrap_or_else(|| DEFAULT_PYTHON_VERSION.to_string()),
        )?;

        let use_langsmith = match file.use_langsmith {
            Some(toggle) => toggle.resolve("use_langsmith")?,
            None => false,
        };
        let use_microsoft_bot_framework = match file.use_microsoft_bot_framework {
            Some(toggle) => toggle.resolve("use_microsoft_bot_framework")?,
            None => false,
        };

        let openai_model = file
            .openai_model
            .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string());
        validate_model_name("openai_model", &openai_model)?;

        Ok(Self {
            project_name,
            project_slug,
            agent_name,
            domain_name,
            description,
            author_name,
            author_email,
            python_version,
            use_langsmith,
            use_microsoft_bot_framework,
            openai_model,
        })
    }

    /// Returns the fixed smoke-test parameter set used by verification.
    #[must_use]
    pub fn example() -> Self {
        // Literals are known-good for the newtype grammars.
        Self {
            project_name: "Test News Agent".to_string(),
            project_slug: ProjectSlug("test-news-agent".to_string()),
            agent_name: AgentName("TestNewsAgent".to_string()),
            domain_name: DomainName("testnews".to_string()),
            description: "Automated smoke-test agent service".to_string(),
            author_name: "Agent Forge".to_string(),
            author_email: "agent-forge@example.com".to_string(),
            python_version: PythonVersion(DEFAULT_PYTHON_VERSION.to_string()),
            use_langsmith: false,
            use_microsoft_bot_framework: false,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
        }
    }

    /// Returns the default parameter set (every field at its documented
    /// default).
    ///
    /// # Errors
    /// Returns [`ParamsError`] if a documented default fails validation, which
    /// would indicate a defect in the defaults themselves.
    pub fn defaults() -> Result<Self, ParamsError> {
        Self::resolve(ParamsFile::default())
    }

    /// Returns the snake_case Python module segment derived from the agent
    /// name.
    #[must_use]
    pub fn agent_module(&self) -> String {
        derive_agent_module(self.agent_name.as_str())
    }

    /// Returns the uppercase environment-variable prefix derived from the
    /// agent name.
    #[must_use]
    pub fn agent_env_prefix(&self) -> String {
        self.agent_name.as_str().to_ascii_uppercase()
    }

    /// Builds the flat substitution namespace handed to the renderer.
    #[must_use]
    pub fn render_context(&self) -> RenderContext {
        RenderContext {
            project_name: self.project_name.clone(),
            project_slug: self.project_slug.as_str().to_string(),
            agent_name: self.agent_name.as_str().to_string(),
            agent_module: self.agent_module(),
            agent_env_prefix: self.agent_env_prefix(),
            domain_name: self.domain_name.as_str().to_string(),
            description: self.description.clone(),
            author_name: self.author_name.clone(),
            author_email: self.author_email.clone(),
            python_version: self.python_version.as_str().to_string(),
            use_langsmith: self.use_langsmith,
            use_microsoft_bot_framework: self.use_microsoft_bot_framework,
            openai_model: self.openai_model.clone(),
        }
    }
}

/// Flat substitution namespace visible to template bodies and path templates.
///
/// Field names are the placeholder names available inside templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderContext {
    /// Project display name.
    pub project_name: String,
    /// Project slug.
    pub project_slug: String,
    /// PascalCase agent class name.
    pub agent_name: String,
    /// snake_case agent module segment.
    pub agent_module: String,
    /// Uppercase agent environment-variable prefix.
    pub agent_env_prefix: String,
    /// Domain identifier.
    pub domain_name: String,
    /// Project description.
    pub description: String,
    /// Author display name.
    pub author_name: String,
    /// Author email address.
    pub author_email: String,
    /// Target Python version.
    pub python_version: String,
    /// LangSmith tracing toggle.
    pub use_langsmith: bool,
    /// Microsoft Bot Framework toggle.
    pub use_microsoft_bot_framework: bool,
    /// OpenAI model name.
    pub openai_model: String,
}

// ============================================================================
// SECTION: Derivations
// ============================================================================

/// Derives a project slug from a display name.
///
/// Lowercases ASCII letters, maps whitespace/underscore/hyphen runs to a
/// single hyphen, and drops every other character. The result may still fail
/// slug validation (e.g. it may be empty or start with a digit).
#[must_use]
pub fn derive_project_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;
    for ch in name.chars() {
        let lower = ch.to_ascii_lowercase();
        if lower.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(lower);
        } else if matches!(lower, ' ' | '\t' | '_' | '-') {
            pending_separator = true;
        }
    }
    slug
}

/// Derives the snake_case Python module segment from a PascalCase agent name.
///
/// `TestNewsAgent` becomes `test_news_agent`; acronym runs split before the
/// last capital (`HTTPAgent` becomes `http_agent`).
#[must_use]
pub fn derive_agent_module(agent_name: &str) -> String {
    let chars: Vec<char> = agent_name.chars().collect();
    let mut module = String::with_capacity(agent_name.len() + 4);
    for (index, ch) in chars.iter().enumerate() {
        if ch.is_ascii_uppercase() {
            let after_lower = index > 0
                && (chars[index - 1].is_ascii_lowercase() || chars[index - 1].is_ascii_digit());
            let before_lower = index + 1 < chars.len() && chars[index + 1].is_ascii_lowercase();
            if index > 0 && (after_lower || before_lower) {
                module.push('_');
            }
            module.push(ch.to_ascii_lowercase());
        } else {
            module.push(*ch);
        }
    }
    module
}

/// Derives a domain name from an agent name (lowercase alphanumerics,
/// truncated to the domain length limit).
#[must_use]
pub fn derive_domain_name(agent_name: &str) -> String {
    agent_name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|ch| ch.to_ascii_lowercase())
        .take(MAX_DOMAIN_CHARS)
        .collect()
}

// ============================================================================
// SECTION: Loading Helpers
// ============================================================================

/// Reads a parameter file with the size cap applied.
fn read_params_bytes(path: &Path) -> Result<Vec<u8>, ParamsError> {
    let file = fs::File::open(path).map_err(|err| ParamsError::Io {
        path: path.display().to_string(),
        detail: err.to_string(),
    })?;
    let mut reader = file.take(MAX_PARAMS_BYTES.saturating_add(1));
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(|err| ParamsError::Io {
        path: path.display().to_string(),
        detail: err.to_string(),
    })?;
    if bytes.len() as u64 > MAX_PARAMS_BYTES {
        return Err(ParamsError::TooLarge {
            max_bytes: MAX_PARAMS_BYTES,
        });
    }
    Ok(bytes)
}

/// Parses parameter bytes in the detected format.
fn parse_params(format: ParamsFormat, bytes: &[u8]) -> Result<ParamsFile, ParamsError> {
    match format {
        ParamsFormat::Json => {
            serde_json::from_slice(bytes).map_err(|err| ParamsError::Parse {
                format,
                detail: err.to_string(),
            })
        }
        ParamsFormat::Toml => {
            let text = std::str::from_utf8(bytes).map_err(|err| ParamsError::Parse {
                format,
                detail: err.to_string(),
            })?;
            toml::from_str(text).map_err(|err| ParamsError::Parse {
                format,
                detail: err.to_string(),
            })
        }
    }
}

// ============================================================================
// SECTION: Validation Helpers
// ============================================================================

/// Validates the slug grammar shared by `project_slug` values.
fn validate_slug_grammar(field: &str, value: &str) -> Result<(), ParamsError> {
    if value.is_empty() {
        return Err(ParamsError::invalid(field, "must not be empty"));
    }
    if value.len() > MAX_IDENTIFIER_CHARS {
        return Err(ParamsError::invalid(
            field,
            format!("must be at most {MAX_IDENTIFIER_CHARS} characters"),
        ));
    }
    let mut chars = value.chars();
    if !chars.next().is_some_and(|ch| ch.is_ascii_lowercase()) {
        return Err(ParamsError::invalid(
            field,
            "must start with a lowercase ASCII letter",
        ));
    }
    if !value
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
    {
        return Err(ParamsError::invalid(
            field,
            "must contain only lowercase ASCII letters, digits, and hyphens",
        ));
    }
    if value.ends_with('-') {
        return Err(ParamsError::invalid(field, "must not end with a hyphen"));
    }
    if value.contains("--") {
        return Err(ParamsError::invalid(
            field,
            "must not contain consecutive hyphens",
        ));
    }
    Ok(())
}

/// Validates a non-empty display field.
///
/// Display fields are substituted into quoted TOML and Python strings, so
/// control characters, double quotes, and backslashes are rejected rather
/// than escaped.
fn validate_display_field(field: &str, value: &str) -> Result<(), ParamsError> {
    if value.trim().is_empty() {
        return Err(ParamsError::invalid(field, "must not be empty"));
    }
    if value.chars().count() > MAX_DISPLAY_CHARS {
        return Err(ParamsError::invalid(
            field,
            format!("must be at most {MAX_DISPLAY_CHARS} characters"),
        ));
    }
    validate_plain_text(field, value)
}

/// Validates the free-form description (may be longer than display fields but
/// follows the same single-line quoting rules).
fn validate_description(field: &str, value: &str) -> Result<(), ParamsError> {
    if value.trim().is_empty() {
        return Err(ParamsError::invalid(field, "must not be empty"));
    }
    if value.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(ParamsError::invalid(
            field,
            format!("must be at most {MAX_DESCRIPTION_CHARS} characters"),
        ));
    }
    validate_plain_text(field, value)
}

/// Rejects characters that would escape a quoted TOML or Python string.
fn validate_plain_text(field: &str, value: &str) -> Result<(), ParamsError> {
    if value.chars().any(char::is_control) {
        return Err(ParamsError::invalid(
            field,
            "must not contain control characters",
        ));
    }
    if value.contains('"') || value.contains('\\') {
        return Err(ParamsError::invalid(
            field,
            "must not contain double quotes or backslashes",
        ));
    }
    Ok(())
}

/// Validates the author email shape (single `@`, non-empty sides).
fn validate_author_email(field: &str, value: &str) -> Result<(), ParamsError> {
    validate_display_field(field, value)?;
    if value.chars().any(char::is_whitespace) {
        return Err(ParamsError::invalid(field, "must not contain whitespace"));
    }
    let mut sides = value.splitn(2, '@');
    let local = sides.next().unwrap_or_default();
    let Some(domain) = sides.next() else {
        return Err(ParamsError::invalid(field, "must contain an @"));
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ParamsError::invalid(
            field,
            "must have exactly one @ with text on both sides",
        ));
    }
    Ok(())
}

/// Validates the model name charset (letters, digits, `.`, `_`, `-`).
fn validate_model_name(field: &str, value: &str) -> Result<(), ParamsError> {
    if value.is_empty() {
        return Err(ParamsError::invalid(field, "must not be empty"));
    }
    if value.len() > MAX_IDENTIFIER_CHARS {
        return Err(ParamsError::invalid(
            field,
            format!("must be at most {MAX_IDENTIFIER_CHARS} characters"),
        ));
    }
    if !value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-'))
    {
        return Err(ParamsError::invalid(
            field,
            "must contain only ASCII letters, digits, dots, underscores, and hyphens",
        ));
    }
    Ok(())
}
