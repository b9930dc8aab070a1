//! Integration tests for the climdir binary.
//!
//! These tests exercise the full CLI: argument parsing, config loading,
//! extraction, generation and output formatting.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FNAME: &str = "tas_Amon_HadGEM2-ES_rcp45_r1i1p1_200601-210012.nc";

/// Get a command for running climdir without any user config.
fn climdir() -> Command {
    let mut cmd = Command::cargo_bin("climdir").unwrap();
    cmd.arg("--no-config");
    cmd
}

fn datanode_fp() -> String {
    Path::new("CMIP5/output1/MOHC/HadGEM2-ES/rcp45/mon/atmos/Amon/r1i1p1/v20110101/tas")
        .join(FNAME)
        .to_string_lossy()
        .into_owned()
}

fn cmor_fp() -> String {
    Path::new("CMIP5/output1/MOHC/HadGEM2-ES/rcp45/mon/atmos/tas/r1i1p1")
        .join(FNAME)
        .to_string_lossy()
        .into_owned()
}

#[test]
fn version_flag_works() {
    climdir()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("climdir"));
}

#[test]
fn parse_filename_text() {
    climdir()
        .args(["parse", FNAME])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Cmip5File(variable_name = 'tas', mip_table = 'Amon', model = 'HadGEM2-ES'",
        ))
        .stdout(predicate::str::contains("temporal_subset = '200601-210012'"));
}

#[test]
fn parse_datanode_json() {
    let output = climdir()
        .args(["parse", "--json", &datanode_fp()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["version_number"], "v20110101");
    assert_eq!(value["mip_table"], "Amon");
}

#[test]
fn parse_with_explicit_encoding_failure() {
    climdir()
        .args(["parse", "--as", "cmor-fp", FNAME])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: Failed to parse"))
        .stderr(predicate::str::contains("expected 10"));
}

#[test]
fn parse_strips_data_root() {
    let rooted = Path::new("/badc/cmip5/data").join(cmor_fp());
    climdir()
        .args(["parse", "--root", "/badc/cmip5/data"])
        .arg(&rooted)
        .assert()
        .success()
        .stdout(predicate::str::contains("institute = 'MOHC'"));
}

#[test]
fn parse_rejects_rooted_path_without_root() {
    let rooted = Path::new("/badc/cmip5/data").join(cmor_fp());
    climdir()
        .args(["parse", "--as", "cmor-fp"])
        .arg(&rooted)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a relative path"));
}

#[test]
fn parse_debug_reports_guess() {
    climdir()
        .args(["--debug", "parse", &cmor_fp()])
        .assert()
        .success()
        .stderr(predicate::str::contains("[debug] Guessed encoding: cmor-fp"));
}

#[test]
fn generate_converts_datanode_to_cmor_path() {
    climdir()
        .args(["generate", "--to", "cmor-fp", "--from-datanode-fp", &datanode_fp()])
        .assert()
        .success()
        .stdout(format!("{}\n", cmor_fp()));
}

#[test]
fn generate_round_trips_filename() {
    climdir()
        .args(["generate", "--to", "cmor-fname", "--from-cmor-fname", FNAME])
        .assert()
        .success()
        .stdout(format!("{FNAME}\n"));
}

#[test]
fn generate_with_assignments() {
    climdir()
        .args([
            "generate",
            "--to",
            "cmor-fname",
            "--from-cmor-fname",
            FNAME,
            "--set",
            "t_start=200001",
            "--set",
            "temporal_suffix=clim",
        ])
        .assert()
        .success()
        .stdout("tas_Amon_HadGEM2-ES_rcp45_r1i1p1_200001-210012-clim.nc\n");
}

#[test]
fn generate_empty_assignment_deletes() {
    climdir()
        .args([
            "generate",
            "--to",
            "cmor-fname",
            "--from-cmor-fname",
            FNAME,
            "--set",
            "experiment=",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing field: experiment"));
}

#[test]
fn generate_rejects_unknown_field() {
    climdir()
        .args([
            "generate",
            "--to",
            "cmor-fname",
            "--from-cmor-fname",
            FNAME,
            "--set",
            "bogus=1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown field: bogus"));
}

#[test]
fn generate_warns_on_multiple_sources() {
    climdir()
        .args([
            "generate",
            "--to",
            "cmor-fname",
            "--from-cmor-fname",
            "pr_day_CanESM2_historical_r1i1p1.nc",
            "--from-cmor-fp",
            &cmor_fp(),
        ])
        .assert()
        .success()
        .stdout(format!("{FNAME}\n"))
        .stderr(predicate::str::contains("warning: Several sources given"));
}

#[test]
fn config_defaults_fill_path_segments() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.toml");
    fs::write(
        &config,
        r#"
        [defaults]
        activity = "CMIP5"
        product = "output1"
        institute = "MOHC"
        frequency = "mon"
        modeling_realm = "atmos"
        "#,
    )
    .unwrap();

    Command::cargo_bin("climdir")
        .unwrap()
        .env("CLIMDIR_CONFIG", &config)
        .args(["generate", "--to", "cmor-fp", "--from-cmor-fname", FNAME])
        .assert()
        .success()
        .stdout(format!("{}\n", cmor_fp()));
}

#[test]
fn config_output_json() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.toml");
    fs::write(&config, "output = \"json\"\n").unwrap();

    Command::cargo_bin("climdir")
        .unwrap()
        .env("CLIMDIR_CONFIG", &config)
        .args(["parse", FNAME])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"model\": \"HadGEM2-ES\""));
}

#[test]
fn invalid_config_is_an_error() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.toml");
    fs::write(&config, "[defaults]\nrealm = \"atmos\"\n").unwrap();

    Command::cargo_bin("climdir")
        .unwrap()
        .env("CLIMDIR_CONFIG", &config)
        .args(["parse", FNAME])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn derived_config_default_is_an_error() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.toml");
    fs::write(&config, "[defaults]\nt_start = \"190001\"\n").unwrap();

    Command::cargo_bin("climdir")
        .unwrap()
        .env("CLIMDIR_CONFIG", &config)
        .args(["generate", "--to", "cmor-fname", "--from-cmor-fname", FNAME])
        .assert()
        .failure()
        .stderr(predicate::str::contains("derived from temporal_subset"));
}

#[test]
fn generate_rejects_hyphenated_start() {
    climdir()
        .args([
            "generate",
            "--to",
            "cmor-fname",
            "--from-cmor-fname",
            FNAME,
            "--set",
            "t_start=2000-01",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid t_start '2000-01'"));
}

#[test]
fn completion_bash() {
    climdir()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("climdir"));
}
