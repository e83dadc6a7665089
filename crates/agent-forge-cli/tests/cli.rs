// crates/agent-forge-cli/tests/cli.rs
// ============================================================================
// Module: CLI Command Tests
// Description: Integration tests driving the agent-forge binary end to end.
// Purpose: Ensure each subcommand writes the right files, output, and exit
//          codes, including failure paths.
// Dependencies: agent-forge binary
// ============================================================================

//! ## Overview
//! Spawns the real `agent-forge` binary for every command family: generation
//! into fresh and occupied destinations, dry runs, parameter init/validate,
//! template inspection, localization, and the verification suite's exit
//! policy.

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
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde_json::Value;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn agent_forge_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_agent-forge"))
}

fn temp_root(label: &str) -> PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).expect("clock drift").as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("agent-forge-cli-{label}-{nanos}"));
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

fn cleanup(path: &PathBuf) {
    let _ = fs::remove_dir_all(path);
}

fn run_forge(args: &[&str]) -> Output {
    Command::new(agent_forge_bin())
        .args(args)
        .env_remove("AGENT_FORGE_LANG")
        .output()
        .expect("run agent-forge")
}

fn run_forge_in(cwd: &Path, args: &[&str]) -> Output {
    Command::new(agent_forge_bin())
        .args(args)
        .current_dir(cwd)
        .env_remove("AGENT_FORGE_LANG")
        .output()
        .expect("run agent-forge")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ============================================================================
// SECTION: Version and language
// ============================================================================

/// Verifies `--version` reports the package version on stdout.
#[test]
fn cli_version_prints_package_version() {
    let output = run_forge(&["--version"]);
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")), "unexpected stdout: {stdout}");
    assert!(stdout.contains("agent-forge"), "unexpected stdout: {stdout}");
}

/// Verifies non-English output carries the machine-translation disclaimer.
#[test]
fn cli_lang_ca_writes_disclaimer_to_stderr() {
    let output = run_forge(&["--lang", "ca", "--version"]);
    assert!(output.status.success());
    let stderr = stderr_of(&output);
    assert!(stderr.contains("Nota"), "unexpected stderr: {stderr}");
}

/// Verifies an unsupported language in the environment fails closed.
#[test]
fn cli_rejects_unsupported_language_from_environment() {
    let output = Command::new(agent_forge_bin())
        .args(["--version"])
        .env("AGENT_FORGE_LANG", "fr")
        .output()
        .expect("run agent-forge");
    assert!(!output.status.success());
    let stderr = stderr_of(&output);
    assert!(stderr.contains("AGENT_FORGE_LANG"), "unexpected stderr: {stderr}");
}

// ============================================================================
// SECTION: generate
// ============================================================================

/// Verifies the default parameter set scaffolds a complete project tree.
#[test]
fn cli_generate_scaffolds_default_project() {
    let root = temp_root("generate-defaults");
    let output = run_forge(&["generate", "--output", root.to_string_lossy().as_ref()]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Generated"), "unexpected stdout: {stdout}");

    let project = root.join("my-agent-service");
    assert!(project.join("main.py").is_file());
    assert!(project.join("pyproject.toml").is_file());
    assert!(project.join(".gitignore").is_file());
    assert!(project.join("app/domain/entities/myagent.py").is_file());
    assert!(project.join("app/presentation/myagent_router.py").is_file());
    assert!(
        project
            .join("app/application/agent/my_agent/node_functions/my_agent_node/node.py")
            .is_file()
    );

    cleanup(&root);
}

/// Verifies a parameter file steers slugs, module names, and domain files.
#[test]
fn cli_generate_honors_params_file() {
    let root = temp_root("generate-params");
    let params_path = root.join("params.json");
    let params = r#"{
  "project_name": "Test News Agent",
  "agent_name": "TestNewsAgent"
}"#;
    fs::write(&params_path, params).expect("write params");

    let output = run_forge(&[
        "generate",
        "--params",
        params_path.to_string_lossy().as_ref(),
        "--output",
        root.to_string_lossy().as_ref(),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let project = root.join("test-news-agent");
    assert!(project.join("app/domain/entities/testnews.py").is_file());
    assert!(project.join("app/presentation/testnews_router.py").is_file());
    assert!(project.join("app/domain/state/test_news_agent_state.py").is_file());

    cleanup(&root);
}

/// Verifies an occupied project directory is refused without `--force`.
#[test]
fn cli_generate_refuses_existing_project_without_force() {
    let root = temp_root("generate-force");
    let first = run_forge(&["generate", "--output", root.to_string_lossy().as_ref()]);
    assert!(first.status.success(), "stderr: {}", stderr_of(&first));

    let second = run_forge(&["generate", "--output", root.to_string_lossy().as_ref()]);
    assert!(!second.status.success());
    assert!(!stderr_of(&second).is_empty());

    let forced = run_forge(&["generate", "--output", root.to_string_lossy().as_ref(), "--force"]);
    assert!(forced.status.success(), "stderr: {}", stderr_of(&forced));

    cleanup(&root);
}

/// Verifies `--dry-run` lists the plan without touching the destination.
#[test]
fn cli_generate_dry_run_lists_without_writing() {
    let root = temp_root("generate-dry-run");
    let output =
        run_forge(&["generate", "--output", root.to_string_lossy().as_ref(), "--dry-run"]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("main.py"), "unexpected stdout: {stdout}");
    assert!(stdout.contains("dry run"), "unexpected stdout: {stdout}");

    let entries = fs::read_dir(&root).expect("read output dir").count();
    assert_eq!(entries, 0, "dry run must not create the project directory");

    cleanup(&root);
}

/// Verifies the JSON summary carries the plan digest and file counts.
#[test]
fn cli_generate_json_summary_reports_digest() {
    let root = temp_root("generate-json");
    let output = run_forge(&[
        "generate",
        "--output",
        root.to_string_lossy().as_ref(),
        "--format",
        "json",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let summary: Value = serde_json::from_str(stdout_of(&output).trim()).expect("summary json");
    let files_written = summary["files_written"].as_u64().expect("files_written");
    assert!(files_written > 0);
    assert_eq!(summary["digest"]["algorithm"], "sha256");
    let digest = summary["digest"]["value"].as_str().expect("digest value");
    assert_eq!(digest.len(), 64);
    let project_dir = summary["project_dir"].as_str().expect("project_dir");
    assert!(project_dir.ends_with("my-agent-service"), "project_dir: {project_dir}");

    cleanup(&root);
}

// ============================================================================
// SECTION: params
// ============================================================================

/// Verifies `params init` output validates cleanly and refuses overwrites.
#[test]
fn cli_params_init_and_validate_round_trip() {
    let root = temp_root("params-init");
    let init = run_forge_in(&root, &["params", "init"]);
    assert!(init.status.success(), "stderr: {}", stderr_of(&init));
    let starter = root.join("agent-forge.json");
    assert!(starter.is_file());

    let validate =
        run_forge(&["params", "validate", "--params", starter.to_string_lossy().as_ref()]);
    assert!(validate.status.success(), "stderr: {}", stderr_of(&validate));
    let stdout = stdout_of(&validate);
    assert!(stdout.contains("my-agent-service"), "unexpected stdout: {stdout}");
    assert!(stdout.contains("my_agent"), "unexpected stdout: {stdout}");

    let again = run_forge_in(&root, &["params", "init"]);
    assert!(!again.status.success(), "init must refuse to overwrite");

    cleanup(&root);
}

/// Verifies `params init` writes TOML when the extension asks for it.
#[test]
fn cli_params_init_writes_toml_by_extension() {
    let root = temp_root("params-toml");
    let starter = root.join("starter.toml");
    let init =
        run_forge(&["params", "init", "--output", starter.to_string_lossy().as_ref()]);
    assert!(init.status.success(), "stderr: {}", stderr_of(&init));

    let text = fs::read_to_string(&starter).expect("read starter");
    assert!(text.contains("project_name"), "unexpected starter: {text}");
    let validate =
        run_forge(&["params", "validate", "--params", starter.to_string_lossy().as_ref()]);
    assert!(validate.status.success(), "stderr: {}", stderr_of(&validate));

    cleanup(&root);
}

/// Verifies unknown parameter fields fail validation with a nonzero exit.
#[test]
fn cli_params_validate_rejects_unknown_field() {
    let root = temp_root("params-unknown");
    let params_path = root.join("params.json");
    fs::write(&params_path, r#"{"bogus_field": true}"#).expect("write params");

    let output =
        run_forge(&["params", "validate", "--params", params_path.to_string_lossy().as_ref()]);
    assert!(!output.status.success());
    assert!(!stderr_of(&output).is_empty());

    cleanup(&root);
}

/// Verifies the resolved JSON namespace exposes the derived identifiers.
#[test]
fn cli_params_validate_json_reports_derivations() {
    let root = temp_root("params-json");
    let params_path = root.join("params.json");
    fs::write(&params_path, r#"{"agent_name": "TestNewsAgent"}"#).expect("write params");

    let output = run_forge(&[
        "params",
        "validate",
        "--params",
        params_path.to_string_lossy().as_ref(),
        "--format",
        "json",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let resolved: Value = serde_json::from_str(stdout_of(&output).trim()).expect("resolved json");
    assert_eq!(resolved["agent_module"], "test_news_agent");
    assert_eq!(resolved["agent_env_prefix"], "TESTNEWSAGENT");
    assert_eq!(resolved["domain_name"], "testnews");

    cleanup(&root);
}

// ============================================================================
// SECTION: template
// ============================================================================

/// Verifies `template list` prints the full rendered path list.
#[test]
fn cli_template_list_prints_rendered_paths() {
    let output = run_forge(&["template", "list"]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert!(stdout.lines().any(|line| line == "main.py"));
    assert!(stdout.lines().any(|line| line == "app/domain/entities/myagent.py"));
    assert!(
        !stdout.contains("{{"),
        "path templates must be fully substituted: {stdout}"
    );
}

/// Verifies `template show` renders one body and rejects unknown paths.
#[test]
fn cli_template_show_prints_rendered_body() {
    let output = run_forge(&["template", "show", "pyproject.toml"]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("name = \"my-agent-service\""), "unexpected stdout: {stdout}");

    let missing = run_forge(&["template", "show", "does/not/exist.py"]);
    assert!(!missing.status.success());
    assert!(!stderr_of(&missing).is_empty());
}

// ============================================================================
// SECTION: verify
// ============================================================================

/// Verifies the suite passes end to end with advisory checks skipped.
#[test]
fn cli_verify_passes_with_advisory_checks_skipped() {
    let output = run_forge(&["verify", "--skip-uv", "--skip-docker", "--format", "json"]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let report: Value = serde_json::from_str(stdout_of(&output).trim()).expect("report json");
    let outcomes = report["outcomes"].as_array().expect("outcomes");
    assert_eq!(outcomes.len(), 7);
    for outcome in outcomes {
        assert_ne!(outcome["status"], "fail", "unexpected failure: {outcome}");
    }
    let skipped: Vec<&str> = outcomes
        .iter()
        .filter(|outcome| outcome["status"] == "skip")
        .map(|outcome| outcome["name"].as_str().unwrap_or_default())
        .collect();
    assert!(skipped.contains(&"dependency-resolution"), "skipped: {skipped:?}");
    assert!(skipped.contains(&"docker-presence"), "skipped: {skipped:?}");
}

/// Verifies a parameter set that collides on a rendered path exits nonzero.
#[test]
fn cli_verify_fails_on_router_path_collision() {
    let root = temp_root("verify-collision");
    let params_path = root.join("params.json");
    let params = r#"{
  "domain_name": "bot",
  "use_microsoft_bot_framework": true
}"#;
    fs::write(&params_path, params).expect("write params");

    let output = run_forge(&[
        "verify",
        "--params",
        params_path.to_string_lossy().as_ref(),
        "--skip-uv",
        "--skip-docker",
        "--format",
        "json",
    ]);
    assert!(!output.status.success(), "collision must fail verification");

    let report: Value = serde_json::from_str(stdout_of(&output).trim()).expect("report json");
    let outcomes = report["outcomes"].as_array().expect("outcomes");
    assert_eq!(outcomes[0]["name"], "generation");
    assert_eq!(outcomes[0]["status"], "fail");

    cleanup(&root);
}

/// Verifies `--keep` persists the generated project for inspection.
#[test]
fn cli_verify_keep_persists_project() {
    let root = temp_root("verify-keep");
    let output = run_forge(&[
        "verify",
        "--keep",
        root.to_string_lossy().as_ref(),
        "--skip-uv",
        "--skip-docker",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(root.join("test-news-agent/main.py").is_file());

    cleanup(&root);
}
