use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures")
        .join(name)
        .canonicalize()
        .expect("fixture grid present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("pathfinder");
    cmd.env("RUST_LOG", "error");
    cmd
}

/// Copy a fixture into a fresh temp dir and return the grid name without extension.
fn prepare_grid(fixture: &str) -> (PathBuf, TempDir) {
    let temp_dir = tempdir().expect("create temp dir");
    let stem = Path::new(fixture)
        .file_stem()
        .expect("fixture has a stem")
        .to_owned();
    let name = temp_dir.path().join(stem);
    fs::copy(fixture_path(fixture), name.with_extension("cav")).expect("copy fixture");
    (name, temp_dir)
}

#[test]
fn writes_csn_next_to_grid() {
    let (name, _temp) = prepare_grid("chain.cav");

    cli().arg(&name).assert().success().stdout(predicate::str::is_empty());

    let solution = fs::read_to_string(name.with_extension("csn")).expect("solution written");
    assert_eq!(solution, "1 2 3 4");
}

#[test]
fn unreachable_goal_writes_zero_and_succeeds() {
    let (name, _temp) = prepare_grid("isolated.cav");

    cli().arg(&name).assert().success();

    let solution = fs::read_to_string(name.with_extension("csn")).expect("solution written");
    assert_eq!(solution, "0");
}

#[test]
fn stdout_flag_prints_solution() {
    let (name, _temp) = prepare_grid("sample.cav");

    cli()
        .arg(&name)
        .arg("--stdout")
        .assert()
        .success()
        .stdout("1 2 5 7\n");
    assert!(!name.with_extension("csn").exists());
}

#[test]
fn accepts_name_with_cav_extension() {
    let (name, _temp) = prepare_grid("chain.cav");

    cli()
        .arg(name.with_extension("cav"))
        .arg("--stdout")
        .assert()
        .success()
        .stdout("1 2 3 4\n");
}

#[test]
fn custom_endpoints_and_output_path() {
    let (name, temp) = prepare_grid("sample.cav");
    let output = temp.path().join("answers").join("reverse.csn");

    cli()
        .arg(&name)
        .args(["--start", "7", "--goal", "1"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&output).expect("written"), "7 5 2 1");
}

#[test]
fn json_format_includes_cost() {
    let (name, _temp) = prepare_grid("chain.cav");

    let assert = cli()
        .arg(&name)
        .args(["--stdout", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value["solution"], "1 2 3 4");
    assert_eq!(value["cost"], 3.0);
    assert_eq!(value["hops"], 3);
}

#[test]
fn malformed_grid_fails_with_reason() {
    let temp_dir = tempdir().expect("create temp dir");
    let name = temp_dir.path().join("broken");
    fs::write(name.with_extension("cav"), "3,0,0,1,1").expect("write grid");

    cli()
        .arg(&name)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load cave grid"))
        .stderr(predicate::str::contains("malformed cave grid"));
    assert!(!name.with_extension("csn").exists());
}

#[test]
fn missing_grid_fails() {
    let temp_dir = tempdir().expect("create temp dir");

    cli()
        .arg(temp_dir.path().join("nowhere"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("cave grid not found"));
}

#[test]
fn out_of_range_goal_fails() {
    let (name, _temp) = prepare_grid("chain.cav");

    cli()
        .arg(&name)
        .args(["--goal", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cave 9 is out of range"));
}

#[test]
fn expansion_bound_is_enforced() {
    let (name, _temp) = prepare_grid("chain.cav");

    cli()
        .arg(&name)
        .args(["--max-expansions", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeded the limit of 1"));
}

#[test]
fn stdout_conflicts_with_output() {
    let (name, temp) = prepare_grid("chain.cav");

    cli()
        .arg(&name)
        .arg("--stdout")
        .arg("--output")
        .arg(temp.path().join("x.csn"))
        .assert()
        .failure();
}
