use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::tempdir;

fn xyz_grid(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_xyz-grid"))
        .current_dir(cwd)
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("spawn xyz-grid")
}

fn read_corpus(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).expect("read corpus")).expect("json")
}

#[test]
fn build_from_filenames_writes_requested_count() {
    let dir = tempdir().expect("dir");
    let input = dir.path().join("input");
    fs::create_dir_all(&input).expect("mkdir");
    for i in 0..6 {
        fs::write(input.join(format!("subject {i}_v1.png")), b"\x89PNG\r\n\x1a\n").expect("img");
    }

    let output = xyz_grid(
        dir.path(),
        &[
            "build", "-n", "4", "-f", "-s", "-1", "-z", "Steps", "-Z", "10,20",
            "--sample-seed", "7",
        ],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let corpus = read_corpus(&dir.path().join("xyz_prompts.json"));
    let records = corpus.as_array().expect("array");
    assert_eq!(records.len(), 4);
    for record in records {
        assert!(record["prompt"].as_str().expect("prompt").starts_with("subject "));
        assert_eq!(record["seed"], -1);
        assert_eq!(record["z_axis_type"], "Steps");
        assert!(record.get("x_axis_type").is_none());
    }
}

#[test]
fn build_without_enough_images_fails_and_writes_nothing() {
    let dir = tempdir().expect("dir");
    fs::create_dir_all(dir.path().join("input")).expect("mkdir");
    fs::write(dir.path().join("input/only_1.png"), b"\x89PNG\r\n\x1a\n").expect("img");

    let output = xyz_grid(dir.path(), &["build", "-n", "3", "-f"]);
    assert!(!output.status.success());
    assert!(!dir.path().join("xyz_prompts.json").exists());
}

#[test]
fn append_three_times_grows_in_order() {
    let dir = tempdir().expect("dir");
    for prompt in ["first", "second", "third"] {
        let output = xyz_grid(
            dir.path(),
            &["append", "-p", prompt, "-z", "CFG Scale", "-Z", "4,7"],
        );
        assert!(output.status.success());
    }
    let corpus = read_corpus(&dir.path().join("xyz_prompts.json"));
    let prompts: Vec<_> = corpus
        .as_array()
        .expect("array")
        .iter()
        .map(|record| record["prompt"].as_str().expect("prompt").to_string())
        .collect();
    assert_eq!(prompts, vec!["first", "second", "third"]);
}

#[test]
fn run_with_missing_corpus_fails() {
    let dir = tempdir().expect("dir");
    let output = xyz_grid(dir.path(), &["run", "-i", "absent.json", "--port", "1"]);
    assert!(!output.status.success());
    assert!(!dir.path().join("output").exists());
}

#[test]
fn axes_lists_wire_indices() {
    let dir = tempdir().expect("dir");
    let output = xyz_grid(dir.path(), &["axes", "--json"]);
    assert!(output.status.success());
    let table: Value = serde_json::from_slice(&output.stdout).expect("json");
    let table = table.as_array().expect("array");
    assert_eq!(table.len(), 21);
    assert_eq!(table[6]["type"], "CFG Scale");
    assert_eq!(table[20]["index"], 20);
}
