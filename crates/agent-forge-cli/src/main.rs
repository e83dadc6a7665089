// crates/agent-forge-cli/src/main.rs
// ============================================================================
// Module: agent-forge (binary)
// Description: Command-line interface for the agent service generator.
// Purpose: Parse arguments, dispatch to the core engine and verification
//          suite, and print localized results with a deterministic exit code.
// Dependencies: agent-forge-core, agent-forge-verify, clap, serde, serde_jcs
// ============================================================================

//! ## Overview
//! The `agent-forge` binary. Four command families:
//!
//! - `generate`: render the template pack for a parameter set and write the
//!   project tree (or list it with `--dry-run`).
//! - `verify`: generate into a scratch directory and run the end-to-end
//!   check suite; the exit code reflects the verdict.
//! - `params`: write a starter parameter file or validate an existing one.
//! - `template`: inspect the rendered path list or a single rendered body.
//!
//! All console output flows through the wrapper functions in the output
//! section and the [`t!`] message catalog, so the binary never prints an
//! unlocalized or unflushed line. Errors funnel into [`CliError`] and are
//! emitted on stderr with a failure exit code.

// ==== SECTION: Modules ====

#[cfg(test)]
mod main_tests;

// ==== SECTION: Imports ====

use std::env;
use std::fs;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use agent_forge_cli::i18n;
use agent_forge_cli::i18n::Locale;
use agent_forge_cli::t;
use agent_forge_core::ParamsFormat;
use agent_forge_core::RenderPlan;
use agent_forge_core::Renderer;
use agent_forge_core::Scaffolder;
use agent_forge_core::TemplateParams;
use agent_forge_core::params::detect_format;
use agent_forge_core::scaffold::DirectorySink;
use agent_forge_verify::VerificationReport;
use agent_forge_verify::VerifyOptions;
use agent_forge_verify::run_suite;
use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use serde::Serialize;
use thiserror::Error;

// ==== SECTION: Constants ====

/// Environment variable consulted for the output language when `--lang` is
/// absent.
const LANG_ENV: &str = "AGENT_FORGE_LANG";

// ==== SECTION: Command-line surface ====

/// Top-level argument surface for the `agent-forge` binary.
#[derive(Debug, Parser)]
#[command(
    name = "agent-forge",
    disable_help_subcommand = true,
    disable_version_flag = true
)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,

    /// Output language (overrides the `AGENT_FORGE_LANG` environment
    /// variable).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,

    /// Subcommand to execute; prints help when omitted.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output languages accepted by `--lang`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

/// Output encodings accepted by `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable lines.
    Text,
    /// Canonical JSON on a single line.
    Json,
}

/// Subcommand tree.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate an agent service project from a parameter set.
    Generate(GenerateCommand),
    /// Generate into a scratch directory and run the verification suite.
    Verify(VerifyCommand),
    /// Parameter-file utilities.
    Params {
        /// Parameter operation to run.
        #[command(subcommand)]
        command: ParamsCommand,
    },
    /// Template-pack inspection utilities.
    Template {
        /// Template operation to run.
        #[command(subcommand)]
        command: TemplateCommand,
    },
}

/// Arguments for `agent-forge generate`.
#[derive(Debug, Args)]
struct GenerateCommand {
    /// Parameter file (.json or .toml); documented defaults apply when
    /// omitted.
    #[arg(long, value_name = "FILE")]
    params: Option<PathBuf>,

    /// Directory that will contain the generated project directory.
    #[arg(long, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// Replace an existing non-empty project directory.
    #[arg(long, action = ArgAction::SetTrue)]
    force: bool,

    /// Print the rendered file list without writing anything.
    #[arg(long, action = ArgAction::SetTrue)]
    dry_run: bool,

    /// Summary encoding.
    #[arg(long, value_enum, value_name = "FORMAT", default_value = "text")]
    format: OutputFormat,
}

/// Arguments for `agent-forge verify`.
#[derive(Debug, Args)]
struct VerifyCommand {
    /// Parameter file; the built-in smoke-test set applies when omitted.
    #[arg(long, value_name = "FILE")]
    params: Option<PathBuf>,

    /// Keep the generated project under this directory instead of a
    /// temporary one.
    #[arg(long, value_name = "DIR")]
    keep: Option<PathBuf>,

    /// Skip the dependency-resolution check.
    #[arg(long, action = ArgAction::SetTrue)]
    skip_uv: bool,

    /// Skip the container-runtime check.
    #[arg(long, action = ArgAction::SetTrue)]
    skip_docker: bool,

    /// Report encoding.
    #[arg(long, value_enum, value_name = "FORMAT", default_value = "text")]
    format: OutputFormat,
}

/// Subcommands under `agent-forge params`.
#[derive(Debug, Subcommand)]
enum ParamsCommand {
    /// Write a starter parameter file with the documented defaults.
    Init(ParamsInitCommand),
    /// Resolve and validate a parameter file.
    Validate(ParamsValidateCommand),
}

/// Arguments for `agent-forge params init`.
#[derive(Debug, Args)]
struct ParamsInitCommand {
    /// Destination path; the extension selects JSON or TOML.
    #[arg(long, value_name = "FILE", default_value = "agent-forge.json")]
    output: PathBuf,
}

/// Arguments for `agent-forge params validate`.
#[derive(Debug, Args)]
struct ParamsValidateCommand {
    /// Parameter file to resolve and validate.
    #[arg(long, value_name = "FILE")]
    params: PathBuf,

    /// Resolved-set encoding.
    #[arg(long, value_enum, value_name = "FORMAT", default_value = "text")]
    format: OutputFormat,
}

/// Subcommands under `agent-forge template`.
#[derive(Debug, Subcommand)]
enum TemplateCommand {
    /// Print the project-relative path of every rendered file.
    List(TemplateListCommand),
    /// Print one rendered file body to stdout.
    Show(TemplateShowCommand),
}

/// Arguments for `agent-forge template list`.
#[derive(Debug, Args)]
struct TemplateListCommand {
    /// Parameter file; documented defaults apply when omitted.
    #[arg(long, value_name = "FILE")]
    params: Option<PathBuf>,
}

/// Arguments for `agent-forge template show`.
#[derive(Debug, Args)]
struct TemplateShowCommand {
    /// Project-relative path of the rendered file to print.
    #[arg(value_name = "PATH")]
    path: String,

    /// Parameter file; documented defaults apply when omitted.
    #[arg(long, value_name = "FILE")]
    params: Option<PathBuf>,
}

// ==== SECTION: Error type ====

/// Terminal CLI error carrying a fully localized message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Localized message emitted on stderr.
    message: String,
}

impl CliError {
    /// Wraps an already-localized message.
    const fn new(message: String) -> Self {
        Self { message }
    }
}

/// Result alias for command handlers.
type CliResult<T> = Result<T, CliError>;

// ==== SECTION: Entry point ====

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(error) => emit_error(&error.to_string()),
    }
}

/// Parses arguments, fixes the locale, and dispatches the selected command.
///
/// # Errors
/// Returns [`CliError`] when the language selection is invalid, a command
/// fails, or console output cannot be written.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    let env_lang = env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    i18n::set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|error| CliError::new(output_error("stderr", &error)))?;
    }

    if cli.show_version {
        write_stdout_line(&t!("main.version", version = env!("CARGO_PKG_VERSION")))
            .map_err(|error| CliError::new(output_error("stdout", &error)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        return show_help();
    };
    match command {
        Commands::Generate(command) => command_generate(&command),
        Commands::Verify(command) => command_verify(&command),
        Commands::Params { command } => command_params(&command),
        Commands::Template { command } => command_template(&command),
    }
}

/// Prints the top-level help text.
///
/// # Errors
/// Returns [`CliError`] when stdout is unwritable.
fn show_help() -> CliResult<ExitCode> {
    let mut command = Cli::command();
    command
        .print_help()
        .map_err(|error| CliError::new(output_error("stdout", &error)))?;
    Ok(ExitCode::SUCCESS)
}

// ==== SECTION: generate ====

/// One row of the `--dry-run` file listing.
#[derive(Debug, Serialize)]
struct PlannedFile {
    /// Project-relative path.
    path: String,
    /// Rendered body size in bytes.
    bytes: usize,
}

/// Handles `agent-forge generate`.
///
/// # Errors
/// Returns [`CliError`] when parameters fail to load, rendering or writing
/// fails, or output cannot be written.
fn command_generate(command: &GenerateCommand) -> CliResult<ExitCode> {
    let params = load_params(command.params.as_deref())?;

    if command.dry_run {
        let plan = render_plan(&params)?;
        match command.format {
            OutputFormat::Text => {
                let mut listing = String::new();
                for file in plan.files() {
                    listing.push_str(&t!(
                        "generate.dry_run.entry",
                        path = file.path,
                        bytes = file.contents.len()
                    ));
                    listing.push('\n');
                }
                listing.push_str(&t!(
                    "generate.dry_run.summary",
                    count = plan.len(),
                    bytes = plan.total_bytes()
                ));
                listing.push('\n');
                write_stdout_bytes(listing.as_bytes())
                    .map_err(|error| CliError::new(output_error("stdout", &error)))?;
            }
            OutputFormat::Json => {
                let files: Vec<PlannedFile> = plan
                    .files()
                    .iter()
                    .map(|file| PlannedFile {
                        path: file.path.clone(),
                        bytes: file.contents.len(),
                    })
                    .collect();
                write_canonical_json(&files)?;
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    let scaffolder =
        Scaffolder::builtin().map_err(|error| CliError::new(t!("generate.failed", error = error)))?;
    let mut sink = DirectorySink::new(command.output.clone()).with_force(command.force);
    let summary = scaffolder
        .generate(&params, &mut sink)
        .map_err(|error| CliError::new(t!("generate.failed", error = error)))?;

    match command.format {
        OutputFormat::Text => write_stdout_line(&t!(
            "generate.ok",
            count = summary.files_written,
            bytes = summary.bytes_written,
            path = summary.project_dir
        ))
        .map_err(|error| CliError::new(output_error("stdout", &error)))?,
        OutputFormat::Json => write_canonical_json(&summary)?,
    }
    Ok(ExitCode::SUCCESS)
}

// ==== SECTION: verify ====

/// Handles `agent-forge verify`.
///
/// Exit code is `SUCCESS` only when no check failed; warnings and skips do
/// not affect it.
///
/// # Errors
/// Returns [`CliError`] when parameters fail to load, the suite cannot be
/// set up, or output cannot be written.
fn command_verify(command: &VerifyCommand) -> CliResult<ExitCode> {
    let params = match &command.params {
        Some(path) => TemplateParams::from_file(path)
            .map_err(|error| CliError::new(t!("params.load_failed", error = error)))?,
        None => TemplateParams::example(),
    };
    let options = VerifyOptions {
        params,
        keep: command.keep.clone(),
        skip_uv: command.skip_uv,
        skip_docker: command.skip_docker,
    };
    let report = run_suite(&options)
        .map_err(|error| CliError::new(t!("verify.setup_failed", error = error)))?;

    match command.format {
        OutputFormat::Text => write_verify_report(&report)?,
        OutputFormat::Json => write_canonical_json(&report)?,
    }

    if report.passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Prints the per-check lines and the aggregate verdict for a report.
///
/// # Errors
/// Returns [`CliError`] when stdout is unwritable.
fn write_verify_report(report: &VerificationReport) -> CliResult<()> {
    let mut listing = String::new();
    listing.push_str(&t!("verify.project_dir", path = report.project_dir));
    listing.push('\n');
    for outcome in report.outcomes() {
        let line = if outcome.detail.is_empty() {
            t!(
                "verify.check.plain",
                status = outcome.status,
                name = outcome.name
            )
        } else {
            t!(
                "verify.check.detailed",
                status = outcome.status,
                name = outcome.name,
                detail = outcome.detail
            )
        };
        listing.push_str(&line);
        listing.push('\n');
    }
    let counts = report.counts();
    listing.push_str(&t!(
        "verify.summary",
        passed = counts.passed,
        warned = counts.warned,
        skipped = counts.skipped,
        failed = counts.failed
    ));
    listing.push('\n');
    if report.passed() {
        listing.push_str(&t!("verify.verdict.pass"));
    } else {
        listing.push_str(&t!("verify.verdict.fail"));
    }
    listing.push('\n');
    write_stdout_bytes(listing.as_bytes())
        .map_err(|error| CliError::new(output_error("stdout", &error)))
}

// ==== SECTION: params ====

/// Starter parameter file contents: every documented default, spelled out so
/// a new user can edit rather than recall field names.
#[derive(Debug, Serialize)]
struct StarterParams {
    /// Project display name.
    project_name: String,
    /// Project slug and directory name.
    project_slug: String,
    /// PascalCase agent class name.
    agent_name: String,
    /// Domain identifier.
    domain_name: String,
    /// Project description.
    description: String,
    /// Author display name.
    author_name: String,
    /// Author email address.
    author_email: String,
    /// Target Python version.
    python_version: String,
    /// LangSmith tracing toggle.
    use_langsmith: bool,
    /// Microsoft Bot Framework toggle.
    use_microsoft_bot_framework: bool,
    /// OpenAI model name.
    openai_model: String,
}

impl StarterParams {
    /// Builds the starter set from the documented defaults.
    ///
    /// # Errors
    /// Returns [`CliError`] if the documented defaults fail validation.
    fn from_defaults() -> CliResult<Self> {
        let params = TemplateParams::defaults()
            .map_err(|error| CliError::new(t!("params.load_failed", error = error)))?;
        Ok(Self {
            project_name: params.project_name.clone(),
            project_slug: params.project_slug.as_str().to_owned(),
            agent_name: params.agent_name.as_str().to_owned(),
            domain_name: params.domain_name.as_str().to_owned(),
            description: params.description.clone(),
            author_name: params.author_name.clone(),
            author_email: params.author_email.clone(),
            python_version: params.python_version.as_str().to_owned(),
            use_langsmith: params.use_langsmith,
            use_microsoft_bot_framework: params.use_microsoft_bot_framework,
            openai_model: params.openai_model.clone(),
        })
    }
}

/// Dispatches `agent-forge params` subcommands.
///
/// # Errors
/// Returns [`CliError`] from the selected handler.
fn command_params(command: &ParamsCommand) -> CliResult<ExitCode> {
    match command {
        ParamsCommand::Init(command) => command_params_init(command),
        ParamsCommand::Validate(command) => command_params_validate(command),
    }
}

/// Handles `agent-forge params init`.
///
/// Refuses to overwrite an existing file; the serialization format follows
/// the destination extension.
///
/// # Errors
/// Returns [`CliError`] when the extension is unsupported, the destination
/// exists, or the write fails.
fn command_params_init(command: &ParamsInitCommand) -> CliResult<ExitCode> {
    let format = detect_format(&command.output).ok_or_else(|| {
        CliError::new(t!(
            "params.init.format_unknown",
            path = command.output.display()
        ))
    })?;
    if command.output.exists() {
        return Err(CliError::new(t!(
            "params.init.exists",
            path = command.output.display()
        )));
    }

    let starter = StarterParams::from_defaults()?;
    let contents = match format {
        ParamsFormat::Json => {
            let mut rendered = serde_json::to_string_pretty(&starter)
                .map_err(|error| CliError::new(t!("params.init.render_failed", error = error)))?;
            rendered.push('\n');
            rendered
        }
        ParamsFormat::Toml => toml::to_string_pretty(&starter)
            .map_err(|error| CliError::new(t!("params.init.render_failed", error = error)))?,
    };
    fs::write(&command.output, contents).map_err(|error| {
        CliError::new(t!(
            "params.init.write_failed",
            path = command.output.display(),
            error = error
        ))
    })?;
    write_stdout_line(&t!("params.init.ok", path = command.output.display()))
        .map_err(|error| CliError::new(output_error("stdout", &error)))?;
    Ok(ExitCode::SUCCESS)
}

/// Handles `agent-forge params validate`.
///
/// Text output names the two derived identifiers most users care about;
/// JSON output is the full resolved substitution namespace.
///
/// # Errors
/// Returns [`CliError`] when the file fails to load or validate, or output
/// cannot be written.
fn command_params_validate(command: &ParamsValidateCommand) -> CliResult<ExitCode> {
    let params = TemplateParams::from_file(&command.params)
        .map_err(|error| CliError::new(t!("params.load_failed", error = error)))?;
    match command.format {
        OutputFormat::Text => write_stdout_line(&t!(
            "params.validate.ok",
            slug = params.project_slug,
            module = params.agent_module()
        ))
        .map_err(|error| CliError::new(output_error("stdout", &error)))?,
        OutputFormat::Json => write_canonical_json(&params.render_context())?,
    }
    Ok(ExitCode::SUCCESS)
}

// ==== SECTION: template ====

/// Dispatches `agent-forge template` subcommands.
///
/// # Errors
/// Returns [`CliError`] from the selected handler.
fn command_template(command: &TemplateCommand) -> CliResult<ExitCode> {
    match command {
        TemplateCommand::List(command) => command_template_list(command),
        TemplateCommand::Show(command) => command_template_show(command),
    }
}

/// Handles `agent-forge template list`.
///
/// # Errors
/// Returns [`CliError`] when parameters fail to load, rendering fails, or
/// stdout is unwritable.
fn command_template_list(command: &TemplateListCommand) -> CliResult<ExitCode> {
    let params = load_params(command.params.as_deref())?;
    let plan = render_plan(&params)?;
    let mut listing = String::new();
    for file in plan.files() {
        listing.push_str(&file.path);
        listing.push('\n');
    }
    write_stdout_bytes(listing.as_bytes())
        .map_err(|error| CliError::new(output_error("stdout", &error)))?;
    Ok(ExitCode::SUCCESS)
}

/// Handles `agent-forge template show`.
///
/// # Errors
/// Returns [`CliError`] when parameters fail to load, rendering fails, the
/// requested path is not part of the plan, or stdout is unwritable.
fn command_template_show(command: &TemplateShowCommand) -> CliResult<ExitCode> {
    let params = load_params(command.params.as_deref())?;
    let plan = render_plan(&params)?;
    let Some(file) = plan.find(&command.path) else {
        return Err(CliError::new(t!(
            "template.show.missing",
            path = command.path
        )));
    };
    write_stdout_bytes(file.contents.as_bytes())
        .map_err(|error| CliError::new(output_error("stdout", &error)))?;
    Ok(ExitCode::SUCCESS)
}

// ==== SECTION: Shared helpers ====

/// Loads a parameter file, or the documented defaults when no path is given.
///
/// # Errors
/// Returns [`CliError`] when the file cannot be read or fails validation.
fn load_params(path: Option<&Path>) -> CliResult<TemplateParams> {
    match path {
        Some(path) => TemplateParams::from_file(path)
            .map_err(|error| CliError::new(t!("params.load_failed", error = error))),
        None => TemplateParams::defaults()
            .map_err(|error| CliError::new(t!("params.load_failed", error = error))),
    }
}

/// Renders the full plan for a parameter set.
///
/// # Errors
/// Returns [`CliError`] when the engine cannot be built or a template fails
/// to render.
fn render_plan(params: &TemplateParams) -> CliResult<RenderPlan> {
    let renderer =
        Renderer::builtin().map_err(|error| CliError::new(t!("render.failed", error = error)))?;
    renderer
        .render_plan(params)
        .map_err(|error| CliError::new(t!("render.failed", error = error)))
}

/// Resolves the output locale from the `--lang` flag and the environment.
///
/// The flag wins; an unset or empty environment variable means English.
///
/// # Errors
/// Returns [`CliError`] when the environment variable holds an unsupported
/// language tag.
fn resolve_locale(flag: Option<LangArg>, env_value: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = flag {
        return Ok(lang.into());
    }
    match env_value {
        None => Ok(Locale::En),
        Some(value) if value.trim().is_empty() => Ok(Locale::En),
        Some(value) => Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        }),
    }
}

// ==== SECTION: Console output ====

/// Writes one line to stdout.
///
/// # Errors
/// Returns the underlying I/O error so callers can report the stream.
fn write_stdout_line(line: &str) -> io::Result<()> {
    let mut handle = io::stdout().lock();
    writeln!(handle, "{line}")
}

/// Writes raw bytes to stdout without appending a newline.
///
/// # Errors
/// Returns the underlying I/O error so callers can report the stream.
fn write_stdout_bytes(bytes: &[u8]) -> io::Result<()> {
    let mut handle = io::stdout().lock();
    handle.write_all(bytes)
}

/// Writes one line to stderr.
///
/// # Errors
/// Returns the underlying I/O error so callers can report the stream.
fn write_stderr_line(line: &str) -> io::Result<()> {
    let mut handle = io::stderr().lock();
    writeln!(handle, "{line}")
}

/// Serializes a value as canonical JSON and writes it to stdout with a
/// trailing newline.
///
/// # Errors
/// Returns [`CliError`] when serialization or the write fails.
fn write_canonical_json<T: Serialize>(value: &T) -> CliResult<()> {
    let mut bytes = serde_jcs::to_vec(value)
        .map_err(|error| CliError::new(t!("output.json_failed", error = error)))?;
    bytes.push(b'\n');
    write_stdout_bytes(&bytes).map_err(|error| CliError::new(output_error("stdout", &error)))
}

/// Builds a localized message for a failed console write.
fn output_error(stream: &str, error: &io::Error) -> String {
    let stream = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream, error = error)
}

/// Prints a terminal error to stderr and returns the failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
