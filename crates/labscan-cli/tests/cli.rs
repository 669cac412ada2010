//! CLI test cases.
//!
//! Every test points `HOME` and `XDG_CONFIG_HOME` at a scratch directory so a
//! real user configuration never leaks in.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// A one-line report yielding two normal Haemoglobin records.
static REPORT: &str = "HAEMOGLOBIN 13.5 g/dL (12.0-15.0)\n";

/// Create a new `Command` with our binary, isolated in `home`.
fn cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("labscan").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

fn write_report(dir: &TempDir, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_help() {
    let home = TempDir::new().unwrap();
    cmd(home.path()).arg("--help").assert().success();
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    cmd(home.path()).arg("--version").assert().success();
}

#[test]
fn test_process_json() {
    let home = TempDir::new().unwrap();
    let input = write_report(&home, "report.txt", REPORT);

    cmd(home.path())
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""success":true"#))
        .stdout(predicate::str::contains(r#""name":"Haemoglobin""#))
        .stdout(predicate::str::contains(r#""status":"normal""#));
}

#[test]
fn test_process_csv_to_file() {
    let home = TempDir::new().unwrap();
    let input = write_report(&home, "report.txt", REPORT);
    let output = home.path().join("out.csv");

    cmd(home.path())
        .arg("process")
        .arg(&input)
        .args(["--format", "csv", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let csv = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "name,value,unit,normal_range,status");
    assert_eq!(lines[1], "Haemoglobin,13.5,g/dL,12.0-15.0,normal");
    assert_eq!(lines[2], "Haemoglobin,13.5,g/dL,(12.0-15.0),normal");
}

#[test]
fn test_process_text_counts() {
    let home = TempDir::new().unwrap();
    let input = write_report(&home, "report.txt", REPORT);

    cmd(home.path())
        .arg("process")
        .arg(&input)
        .args(["-f", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "2 parameters: 2 normal, 0 high, 0 low, 0 unknown (0 abnormal)",
        ));
}

#[test]
fn test_process_missing_file() {
    let home = TempDir::new().unwrap();

    cmd(home.path())
        .args(["process", "missing.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_process_rejects_images() {
    let home = TempDir::new().unwrap();
    let input = write_report(&home, "scan.png", "not really an image");

    cmd(home.path())
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("OCR"));
}

#[test]
fn test_save_requires_user() {
    let home = TempDir::new().unwrap();
    let input = write_report(&home, "report.txt", REPORT);

    cmd(home.path())
        .arg("process")
        .arg(&input)
        .arg("--save")
        .assert()
        .failure();
}

#[test]
fn test_save_and_list_history() {
    let home = TempDir::new().unwrap();
    let store = home.path().join("reports.json");
    let first = write_report(&home, "first.txt", REPORT);
    let second = write_report(&home, "second.txt", "PCV 50 % 36-46\n");

    for input in [&first, &second] {
        cmd(home.path())
            .arg("process")
            .arg(input)
            .args(["--save", "--user", "u1", "--store"])
            .arg(&store)
            .assert()
            .success()
            .stderr(predicate::str::contains("Report saved successfully!"));
    }

    let output = cmd(home.path())
        .args(["history", "list", "--user", "u1", "--format", "json", "--store"])
        .arg(&store)
        .output()
        .unwrap();
    assert!(output.status.success());

    let listing: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(listing["totalReports"], 2);
    assert_eq!(listing["reports"][0]["fileName"], "second.txt");
    assert_eq!(listing["reports"][1]["fileName"], "first.txt");
    assert_eq!(listing["reports"][1]["parametersCount"], 2);

    cmd(home.path())
        .args(["history", "list", "--user", "someone-else", "--store"])
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved reports"));
}

#[test]
fn test_history_requires_user() {
    let home = TempDir::new().unwrap();

    cmd(home.path())
        .args(["history", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unauthorized"));
}

#[test]
fn test_batch_summary() {
    let home = TempDir::new().unwrap();
    let reports = home.path().join("reports");
    let out = home.path().join("out");
    fs::create_dir_all(&reports).unwrap();
    fs::write(reports.join("a.txt"), REPORT).unwrap();
    fs::write(reports.join("b.txt"), "MCV 105 fL (80-100)\n").unwrap();
    fs::write(reports.join("broken.txt"), [0xff, 0xfe]).unwrap();

    cmd(home.path())
        .arg("batch")
        .arg(format!("{}/*.txt", reports.display()))
        .arg("--output-dir")
        .arg(&out)
        .args(["--summary", "--continue-on-error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 successful"));

    assert!(out.join("a.json").exists());
    assert!(out.join("b.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(
        lines[0],
        "filename,status,parameters,normal,high,low,processing_time_ms,error"
    );
    assert!(lines[1].starts_with("a.txt,success,2,2,0,0,"));
    assert!(lines.iter().any(|l| l.starts_with("broken.txt,error,")));
}

#[test]
fn test_batch_stops_on_error() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("broken.txt"), [0xff, 0xfe]).unwrap();

    cmd(home.path())
        .arg("batch")
        .arg(format!("{}/*.txt", home.path().display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn test_config_init_set_get() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("labscan.json");

    cmd(home.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();

    cmd(home.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "history.max_reports", "10"])
        .assert()
        .success();

    cmd(home.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "history.max_reports"])
        .assert()
        .success()
        .stdout(predicate::str::diff("10\n"));

    cmd(home.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_set_rejects_bad_type() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("labscan.json");

    cmd(home.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "extraction.trace", "not-a-bool"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value"));
}
