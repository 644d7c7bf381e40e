//! End-to-end batch tests against a shell stub standing in for the converter.

#![cfg(unix)]

use std::path::{Path, PathBuf};

use docbench_core::config::converter::ConverterConfig;
use docbench_runner::{BatchRunner, REPORT_FILE_NAME, Registry, RunnerError};
use tempfile::TempDir;

/// Temporary input document plus output directory.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("sample.pdf"), b"%PDF-1.4\n").expect("Failed to seed input");
        Self { dir }
    }

    fn input(&self) -> PathBuf {
        self.dir.path().join("sample.pdf")
    }

    fn output(&self) -> PathBuf {
        self.dir.path().join("output")
    }
}

/// Runner whose converter is `sh -c <script> stub <generated args...>`.
fn stub_runner(script: &str) -> BatchRunner {
    let config = ConverterConfig {
        program: "sh".to_string(),
        args: vec!["-c".to_string(), script.to_string(), "stub".to_string()],
        echo_output: false,
        ..Default::default()
    };
    BatchRunner::from_config(&config)
}

fn read_report(output_dir: &Path) -> String {
    std::fs::read_to_string(output_dir.join(REPORT_FILE_NAME)).expect("Failed to read report")
}

#[tokio::test]
async fn test_all_configurations_succeed() {
    let ws = Workspace::new();
    let registry = Registry::builtin();

    let outcome = stub_runner("exit 0")
        .run(registry, &ws.input(), &ws.output())
        .await
        .expect("batch should complete");

    assert_eq!(outcome.results.len(), registry.len());
    assert_eq!(outcome.tally.succeeded(), registry.len());
    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(outcome.report_path, ws.output().join(REPORT_FILE_NAME));

    let report = read_report(&ws.output());
    assert_eq!(report.matches("✅ Success").count(), registry.len() * 2);
    assert!(!report.contains("**Error Output:**"));
}

#[tokio::test]
async fn test_failures_do_not_stop_batch() {
    let ws = Workspace::new();
    let registry = Registry::builtin();
    let script = r#"case "$*" in *"--config-name ocr_mac"*) echo "ocrmac unavailable" >&2; exit 1;; esac"#;

    let outcome = stub_runner(script)
        .run(registry, &ws.input(), &ws.output())
        .await
        .expect("batch should complete");

    assert_eq!(outcome.results.len(), registry.len());
    assert_eq!(outcome.tally.failed(), 1);
    assert_eq!(outcome.exit_code(), 1);

    let names: Vec<&str> = outcome.results.iter().map(|r| r.config.name.as_str()).collect();
    let expected: Vec<&str> = registry.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, expected);

    let failed = outcome
        .results
        .iter()
        .find(|r| !r.success)
        .expect("one failure");
    assert_eq!(failed.config.name, "ocr_mac");
    assert_eq!(failed.output.trim(), "ocrmac unavailable");

    let report = read_report(&ws.output());
    assert!(report.contains("| ocr_mac | ❌ Failed | OCR (macOS) + Images |"));
    assert_eq!(report.matches("**Error Output:**").count(), 1);
    assert!(report.contains("ocrmac unavailable"));
}

#[tokio::test]
async fn test_every_run_failing() {
    let ws = Workspace::new();
    let registry = Registry::builtin();

    let outcome = stub_runner("exit 2")
        .run(registry, &ws.input(), &ws.output())
        .await
        .expect("batch should complete");

    assert_eq!(outcome.tally.failed(), registry.len());
    assert_eq!(outcome.exit_code(), 1);
    assert!(ws.output().join(REPORT_FILE_NAME).exists());
}

#[tokio::test]
async fn test_converter_receives_output_dir_and_name() {
    let ws = Workspace::new();
    let registry = Registry::builtin()
        .select(&["baseline".to_string(), "full_page_thumbnails".to_string()])
        .expect("known names");
    let script = r#"for last; do :; done; touch "$3/$(basename "$1" .pdf)_$last.md""#;

    let outcome = stub_runner(script)
        .run(&registry, &ws.input(), &ws.output())
        .await
        .expect("batch should complete");

    assert_eq!(outcome.exit_code(), 0);
    assert!(ws.output().join("sample_baseline.md").exists());
    assert!(ws.output().join("sample_full_page_thumbnails.md").exists());
}

#[tokio::test]
async fn test_selected_subset_only() {
    let ws = Workspace::new();
    let registry = Registry::builtin()
        .select(&["images_with_descriptions".to_string(), "baseline".to_string()])
        .expect("known names");

    let outcome = stub_runner("exit 0")
        .run(&registry, &ws.input(), &ws.output())
        .await
        .expect("batch should complete");

    let names: Vec<&str> = outcome.results.iter().map(|r| r.config.name.as_str()).collect();
    assert_eq!(names, vec!["baseline", "images_with_descriptions"]);

    let report = read_report(&ws.output());
    assert!(report.contains("### baseline:"));
    assert!(!report.contains("### ocr_auto:"));
}

#[tokio::test]
async fn test_missing_input_aborts() {
    let ws = Workspace::new();
    let missing = ws.dir.path().join("nope.pdf");

    let err = stub_runner("exit 0")
        .run(Registry::builtin(), &missing, &ws.output())
        .await
        .expect_err("missing input");

    match err {
        RunnerError::InputNotFound { path } => assert_eq!(path, missing),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!ws.output().join(REPORT_FILE_NAME).exists());
}

#[tokio::test]
async fn test_rerun_overwrites_report() {
    let ws = Workspace::new();
    let registry = Registry::builtin()
        .select(&["baseline".to_string()])
        .expect("known name");

    stub_runner("exit 1")
        .run(&registry, &ws.input(), &ws.output())
        .await
        .expect("first batch");
    assert!(read_report(&ws.output()).contains("❌ Failed"));

    stub_runner("exit 0")
        .run(&registry, &ws.input(), &ws.output())
        .await
        .expect("second batch");
    let report = read_report(&ws.output());
    assert!(report.contains("✅ Success"));
    assert!(!report.contains("❌ Failed"));
}
