//! End-to-end CLI behaviour tests for `maven-fetch`.
//!
//! These scenarios invoke the compiled binary and check exit codes and
//! output for usage errors, offline URL printing and fetch failures.

mod support;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use std::process::{Command, Output};
use support::temp_root;
use tempfile::TempDir;

#[derive(Default)]
struct CliWorld {
    args: RefCell<Vec<String>>,
    output: RefCell<Option<Output>>,
    // Keep the isolated home directory alive for the scenario.
    _home: RefCell<Option<TempDir>>,
}

#[fixture]
fn cli_world() -> CliWorld {
    CliWorld::default()
}

/// Helper function to retrieve the command output from the CLI world.
fn get_output(cli_world: &CliWorld) -> std::cell::Ref<'_, Output> {
    let output = cli_world.output.borrow();
    std::cell::Ref::map(output, |opt| opt.as_ref().expect("output not set"))
}

#[given("maven-fetch is invoked with no arguments")]
fn given_no_arguments(cli_world: &CliWorld) {
    cli_world.args.replace(Vec::new());
}

#[given("maven-fetch is invoked with \"{args}\"")]
fn given_arguments(cli_world: &CliWorld, args: String) {
    cli_world
        .args
        .replace(args.split_whitespace().map(str::to_owned).collect());
}

#[when("the CLI is run")]
fn when_cli_run(cli_world: &CliWorld) {
    let (home, home_path) = temp_root();
    let args = cli_world.args.borrow();
    let output = Command::new(env!("CARGO_BIN_EXE_maven-fetch"))
        .args(args.iter())
        .current_dir(&home_path)
        .env("HOME", &home_path)
        .env("XDG_CONFIG_HOME", home_path.join("config"))
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run maven-fetch");
    cli_world.output.replace(Some(output));
    cli_world._home.replace(Some(home));
}

#[then("the CLI exits with code {code}")]
fn then_exit_code(cli_world: &CliWorld, code: i32) {
    let output = get_output(cli_world);
    assert_eq!(
        output.status.code(),
        Some(code),
        "stdout: {}, stderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

#[then("stderr mentions \"{text}\"")]
fn then_stderr_mentions(cli_world: &CliWorld, text: String) {
    let output = get_output(cli_world);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(&text), "unexpected stderr: {stderr}");
}

#[then("stdout is \"{text}\"")]
fn then_stdout_is(cli_world: &CliWorld, text: String) {
    let output = get_output(cli_world);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim_end(), text);
}

#[scenario(
    path = "tests/features/cli.feature",
    name = "Missing coordinate is a usage error"
)]
fn scenario_missing_coordinate(cli_world: CliWorld) {
    let _ = cli_world;
}

#[scenario(
    path = "tests/features/cli.feature",
    name = "Malformed coordinate is a usage error"
)]
fn scenario_malformed_coordinate(cli_world: CliWorld) {
    let _ = cli_world;
}

#[scenario(
    path = "tests/features/cli.feature",
    name = "Printing the URL of a release needs no network access"
)]
fn scenario_print_url(cli_world: CliWorld) {
    let _ = cli_world;
}

#[scenario(
    path = "tests/features/cli.feature",
    name = "Unreachable repository is a fetch failure"
)]
fn scenario_unreachable_repository(cli_world: CliWorld) {
    let _ = cli_world;
}
