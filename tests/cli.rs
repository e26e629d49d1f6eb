use std::fs;

use assert_cmd::Command;
use csv::Reader;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn size_writes_segments_and_summary() {
    let dir = tempdir().expect("tempdir");
    let segments_path = dir.path().join("out/segments.csv");
    let json_path = dir.path().join("out/summary.json");

    Command::cargo_bin("size")
        .expect("size binary")
        .args(["--config", "configs/aircraft/dual_motor_dep.toml"])
        .arg("--segments-csv")
        .arg(&segments_path)
        .arg("--json")
        .arg(&json_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Status          : converged"))
        .stdout(predicate::str::contains("cruise").and(predicate::str::contains("folded")));

    let mut reader = Reader::from_path(&segments_path).expect("segments csv");
    let headers = reader.headers().expect("headers").clone();
    assert_eq!(&headers[1], "phase");
    assert_eq!(&headers[8], "energy_kwh");
    let rows: Vec<_> = reader.records().collect::<Result<_, _>>().expect("rows");
    assert_eq!(rows.len(), 6);
    assert_eq!(&rows[0][1], "takeoff");
    assert_eq!(&rows[2][3], "false", "high-lift set folded in cruise");
    let csv_energy: f64 = rows
        .iter()
        .map(|row| row[8].parse::<f64>().expect("energy"))
        .sum();

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).expect("json")).expect("parse");
    assert_eq!(summary["status"], "converged");
    assert!(summary["generated_utc"].as_str().is_some_and(|s| s.ends_with('Z')));
    let energy = summary["mission_energy_kwh"].as_f64().expect("energy");
    assert!((csv_energy - energy).abs() < 1e-3);
    let gross = summary["weights"]["gross_weight_lb"].as_f64().expect("gross");
    assert!(gross > 7_000.0 && gross < 8_000.0);
    assert_eq!(summary["segments"].as_array().map(Vec::len), Some(6));
}

#[test]
fn size_selects_catalog_entry_by_name() {
    Command::cargo_bin("size")
        .expect("size binary")
        .args(["--aircraft", "Single-motor electric baseline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Single-motor electric baseline"));
}

#[test]
fn size_fails_loudly_on_divergence() {
    let dir = tempdir().expect("tempdir");
    let config = fs::read_to_string("configs/aircraft/dual_motor_dep.toml")
        .expect("fixture")
        .replace(
            "specific_power_kw_per_kg = 2.5",
            "specific_power_kw_per_kg = 0.0001",
        );
    let path = dir.path().join("undersized.toml");
    fs::write(&path, config).expect("write config");

    Command::cargo_bin("size")
        .expect("size binary")
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("diverged"));
}

#[test]
fn sweep_writes_one_row_per_value() {
    let dir = tempdir().expect("tempdir");
    let output = dir.path().join("range.csv");

    Command::cargo_bin("sweep")
        .expect("sweep binary")
        .args([
            "--config",
            "configs/aircraft/dual_motor_dep.toml",
            "--parameter",
            "range",
            "--values",
            "50,100,300",
        ])
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("2 of 3 scenarios converged"));

    let mut reader = Reader::from_path(&output).expect("sweep csv");
    let rows: Vec<_> = reader.records().collect::<Result<_, _>>().expect("rows");
    let statuses: Vec<&str> = rows.iter().map(|row| &row[3]).collect();
    assert_eq!(statuses, ["converged", "converged", "diverged"]);
    assert!(rows[2][5].is_empty(), "diverged rows carry no sized values");
    assert!(!rows[2][11].is_empty(), "diverged rows carry the error");
}

#[test]
fn sweep_runs_plan_files_to_stdout() {
    Command::cargo_bin("sweep")
        .expect("sweep binary")
        .args(["--plan", "data/scenarios/sweeps.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("label,parameter,value,status"))
        .stdout(predicate::str::contains("highlift_motor_count"));
}

#[test]
fn sweep_rejects_unknown_parameters() {
    Command::cargo_bin("sweep")
        .expect("sweep binary")
        .args(["--parameter", "wingspan", "--values", "30,40"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("wingspan"));
}
