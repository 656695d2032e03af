// tests/cli_test.rs
use git2::{Repository, Signature};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_release-selector");

/// Working directory plus a config file pointing the controller at `controller`
fn workspace(controller: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("selector.toml"),
        format!(
            "package_name_env = \"RELEASE_SELECTOR_CLI_PACKAGE\"\n\n[commands]\ncontroller = \"{}\"\nregistry = \"/nonexistent/snap\"\n",
            controller
        ),
    )
    .unwrap();
    dir
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(BIN)
        .args(args)
        .current_dir(dir)
        .env("RELEASE_SELECTOR_CONFIG", dir.join("selector.toml"))
        .env_remove("RELEASE_SELECTOR_CLI_PACKAGE")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute release-selector")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_unknown_argument_exits_one_before_anything_runs() {
    let dir = workspace("/nonexistent/snapcraftctl");
    let output = run_in(dir.path(), &["--dry-run", "--bogus"]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("--bogus"), "stderr was: {}", err);
    assert!(!err.contains("Failed to execute"), "stderr was: {}", err);
    assert!(output.stdout.is_empty());
}

#[test]
fn test_help_is_a_usage_error() {
    let dir = workspace("/nonexistent/snapcraftctl");
    let output = run_in(dir.path(), &["--help"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_dry_run_without_history_reports_unknown_on_stderr() {
    let dir = workspace("/nonexistent/snapcraftctl");
    let output = run_in(dir.path(), &["--dry-run"]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let err = stderr(&output);
    assert!(err.contains("unknown"), "stderr was: {}", err);
    assert!(output.stdout.is_empty());
}

#[test]
fn test_controller_failure_is_fatal() {
    let dir = workspace("/nonexistent/snapcraftctl");
    let output = run_in(dir.path(), &["--force-snapshot"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("/nonexistent/snapcraftctl pull"));
}

#[cfg(unix)]
#[test]
fn test_successful_run_reports_version() {
    let dir = workspace("true");
    let output = run_in(dir.path(), &["--force-snapshot", "--debug"]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("Reported version unknown"));
}

#[test]
fn test_missing_package_name_is_fatal_on_release_path() {
    let dir = workspace("/nonexistent/snapcraftctl");
    let repo = Repository::init(dir.path()).unwrap();

    fs::write(dir.path().join("README"), "demo\n").unwrap();
    let mut index = repo.index().unwrap();
    index.add_path(Path::new("README")).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let signature = Signature::now("Test Author", "test@example.com").unwrap();
    let oid = repo
        .commit(Some("HEAD"), &signature, &signature, "initial", &tree, &[])
        .unwrap();
    let object = repo.find_object(oid, None).unwrap();
    repo.tag_lightweight("v1.0", &object, false).unwrap();

    let output = run_in(dir.path(), &["--dry-run"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("RELEASE_SELECTOR_CLI_PACKAGE"));
}
