//! CLI integration tests
//!
//! These tests drive the `modelver` binary against a store in a TempDir and
//! check what it prints.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn modelver(base_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_modelver"))
        .arg("--base-dir")
        .arg(base_dir)
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write_responses(dir: &Path, files: &[(&str, &str)]) {
    fs::create_dir_all(dir).unwrap();
    for (name, text) in files {
        fs::write(dir.join(name), text).unwrap();
    }
}

fn snapshot_names(base_dir: &Path, model_dir: &str) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(base_dir.join(model_dir))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_latest_on_empty_store() {
    let temp_dir = TempDir::new().unwrap();
    let output = modelver(temp_dir.path(), &["latest", "class"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("no class snapshots"));
}

#[test]
fn test_apply_then_show_and_history() {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path().join("models");
    let responses = temp_dir.path().join("responses");
    write_responses(
        &responses,
        &[
            ("classes.txt", "```RESULT\nAdded:\nOrder\nCustomer\n```"),
            ("attributes.txt", "```RESULT\nAdded:\nOrder.total\n```"),
        ],
    );

    let output = modelver(
        &base,
        &[
            "apply",
            "class",
            "--responses",
            responses.to_str().unwrap(),
            "--request",
            "Customers place orders",
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("classes"));
    assert!(text.contains("(parent none)"));

    let output = modelver(&base, &["show", "class", "--kind", "classes"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("# Class List"));
    assert!(text.contains("* Customer"));
    assert!(text.contains("* Order"));

    let output = modelver(&base, &["history", "class"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Customers place orders"));
}

#[test]
fn test_diff_between_cycles() {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path().join("models");
    let first = temp_dir.path().join("first");
    let second = temp_dir.path().join("second");
    write_responses(&first, &[("actors.txt", "```RESULT\nCustomer\n```")]);
    write_responses(&second, &[("actors.txt", "```RESULT\nCustomer\nClerk\n```")]);

    for (dir, request) in [(&first, "Customers"), (&second, "Clerks too")] {
        let output = modelver(
            &base,
            &[
                "apply",
                "usecase",
                "--responses",
                dir.to_str().unwrap(),
                "--request",
                request,
            ],
        );
        assert!(output.status.success(), "stderr: {}", stderr(&output));
    }

    let names = snapshot_names(&base, "usecase_model");
    assert_eq!(names.len(), 2);

    let output = modelver(&base, &["diff", "usecase", &names[0]]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("**Added**: 1"));
    assert!(text.contains("Clerk"));

    let output = modelver(&base, &["diff", "usecase", &names[0], &names[1], "--json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["model"], "use_case");
}

#[test]
fn test_unbalanced_flow_fails_and_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path().join("models");
    let responses = temp_dir.path().join("responses");
    write_responses(&responses, &[("flow.txt", "```RESULT\nloop retry\nA->B: ping\n```")]);

    let output = modelver(
        &base,
        &[
            "apply",
            "sequence",
            "--responses",
            responses.to_str().unwrap(),
            "--request",
            "Retry pings",
        ],
    );

    assert!(!output.status.success());
    assert!(stderr(&output).contains("ERR_FLOW_STRUCTURE"));
    assert!(!base.join("sequence_model").exists());
}

#[test]
fn test_eval_against_reference() {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path().join("models");
    let responses = temp_dir.path().join("responses");
    write_responses(&responses, &[("classes.txt", "```RESULT\nAdded:\nOrder\nInvoice\n```")]);
    let reference = temp_dir.path().join("reference");
    fs::create_dir(&reference).unwrap();
    fs::write(reference.join("classes.md"), "# Class List\n\n* Order\n").unwrap();

    let output = modelver(
        &base,
        &[
            "apply",
            "class",
            "--responses",
            responses.to_str().unwrap(),
            "--request",
            "Billing",
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let output = modelver(
        &base,
        &["eval", "class", "--reference", reference.to_str().unwrap(), "--json"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["scores"][0]["kind"], "class");
    assert_eq!(value["scores"][0]["score"], 0.5);
}

#[test]
fn test_config_file_and_prefixed_naming() {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path().join("configured");
    let config = temp_dir.path().join("modelver.toml");
    fs::write(
        &config,
        format!("base_dir = {:?}\nnaming = \"prefixed\"\n", base.to_str().unwrap()),
    )
    .unwrap();
    let responses = temp_dir.path().join("responses");
    write_responses(&responses, &[("objects.txt", "```RESULT\nUser:Actor\n```")]);

    let output = Command::new(env!("CARGO_BIN_EXE_modelver"))
        .args([
            "--config",
            config.to_str().unwrap(),
            "apply",
            "sequence",
            "--responses",
            responses.to_str().unwrap(),
            "--request",
            "Login",
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let names = snapshot_names(&base, "sequence_model");
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("sequence-"));
}
