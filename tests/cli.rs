use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use lcs_ops::metrics::{read_metrics, ADDITIONAL_HEADER, METRICS_HEADER};

fn lcs_report(args: &[&Path], flags: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lcs_report"))
        .args(args)
        .args(flags)
        .env("RUST_LOG", "warn")
        .output()
        .unwrap()
}

fn write_input(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("input.txt");
    fs::write(&path, "S1=ABCBDAB\nS2=BDCABA\nS3=abc12\n").unwrap();
    path
}

#[test]
fn missing_input_exits_with_status_one() {
    let dir = tempfile::tempdir().unwrap();
    let out = lcs_report(&[&dir.path().join("absent.txt"), &dir.path().join("out.txt")], &[]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("absent.txt"), "stderr: {stderr}");
    assert!(!dir.path().join("out.txt").exists());
}

#[test]
fn directory_as_input_exits_with_status_one() {
    let dir = tempfile::tempdir().unwrap();
    let out = lcs_report(&[dir.path(), &dir.path().join("out.txt")], &[]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn creates_output_directory_and_reports_completion() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path());
    let report = dir.path().join("nested").join("deeper").join("out.txt");
    let metrics_dir = dir.path().join("metrics");

    let out = lcs_report(
        &[&input, &report],
        &["--metrics-dir", metrics_dir.to_str().unwrap()],
    );
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains(&format!(
        "Processing complete. Output written to {}.",
        report.display()
    )));

    let text = fs::read_to_string(&report).unwrap();
    assert_eq!(text.matches("String 1: ").count(), 6);
    let rows = read_metrics(&metrics_dir.join("runtime_metrics.csv")).unwrap();
    assert_eq!(rows.len(), 6);
    assert!(!metrics_dir.join("combined_metrics.csv").exists());
}

#[test]
fn plot_flag_writes_growth_analysis() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path());
    let report = dir.path().join("out.txt");
    let metrics_dir = dir.path().join("analysis");

    let out = lcs_report(
        &[&input, &report],
        &["--plot", "--metrics-dir", metrics_dir.to_str().unwrap()],
    );
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let combined = fs::read_to_string(metrics_dir.join("combined_metrics.csv")).unwrap();
    assert_eq!(combined.lines().next(), Some(METRICS_HEADER));
    // lengths 7, 6 and 5: every ordered pair gets a mirrored row
    assert_eq!(combined.lines().count(), 1 + 12);

    let additional = fs::read_to_string(metrics_dir.join("additional_metrics.csv")).unwrap();
    assert_eq!(additional.lines().next(), Some(ADDITIONAL_HEADER));
    assert_eq!(additional.lines().count(), 1 + 12);

    #[cfg(feature = "plot")]
    assert!(metrics_dir.join("runtime_metrics.png").is_file());
}

#[test]
fn left_tie_break_changes_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path());
    let report = dir.path().join("out.txt");
    let metrics_dir = dir.path().join("metrics");

    let out = lcs_report(
        &[&input, &report],
        &["--tie-break", "left", "--metrics-dir", metrics_dir.to_str().unwrap()],
    );
    assert!(out.status.success());
    let text = fs::read_to_string(&report).unwrap();
    assert!(text.starts_with("String 1: S1 - ABCBDAB\n"));
    assert!(text.contains("LCS: BDAB\n"));
}
