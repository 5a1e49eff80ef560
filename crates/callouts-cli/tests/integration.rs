//! Integration tests for the callouts CLI

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::sync::atomic::{AtomicU64, Ordering};

static COUNTER: AtomicU64 = AtomicU64::new(0);

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn callouts_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/debug/callouts")
}

/// A unique scratch path so parallel tests never collide
fn scratch_path(name: &str, ext: &str) -> PathBuf {
    let unique_id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let pid = std::process::id();
    std::env::temp_dir().join(format!("callouts_test_{name}_{pid}_{unique_id}.{ext}"))
}

/// Run the binary on a fixture file, returning parsed stdout JSON
fn transform_fixture_to_stdout(name: &str, args: &[&str]) -> serde_json::Value {
    let input = fixtures_dir().join(format!("{name}.json"));

    let mut cmd = Command::new(callouts_binary());
    cmd.arg(&input);
    for arg in args {
        cmd.arg(arg);
    }

    let output = cmd.output().expect("Failed to run callouts");
    assert!(
        output.status.success(),
        "callouts failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    serde_json::from_slice(&output.stdout).expect("stdout is not valid JSON")
}

fn class_names(node: &serde_json::Value) -> Vec<&str> {
    node["data"]["hProperties"]["className"]
        .as_array()
        .map(|classes| classes.iter().filter_map(|c| c.as_str()).collect())
        .unwrap_or_default()
}

#[test]
fn test_note_to_stdout() {
    let doc = transform_fixture_to_stdout("note", &[]);

    let quote = &doc["children"][1];
    assert_eq!(quote["type"], "blockquote");
    assert_eq!(class_names(quote), ["callout", "callout-note"]);

    let title = &quote["children"][0];
    assert_eq!(title["type"], "paragraph");
    assert_eq!(class_names(title), ["callout-title"]);
    assert_eq!(title["children"][0]["type"], "html");
    assert_eq!(title["children"][1]["value"], "Note");

    let body = &quote["children"][1];
    assert_eq!(body["children"][0]["value"], "Remember to save your work.");

    // Surrounding content is untouched.
    assert_eq!(doc["children"][0]["type"], "heading");
    assert_eq!(doc["children"][2]["type"], "paragraph");
}

#[test]
fn test_marker_only_paragraph_collapses() {
    let doc = transform_fixture_to_stdout("marker_only", &[]);

    let quote = &doc["children"][0];
    assert_eq!(class_names(quote), ["callout", "callout-warning"]);

    // Title node plus the original second paragraph; the emptied lead
    // paragraph is gone.
    let children = quote["children"].as_array().unwrap();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0]["children"][1]["value"], "Warning");
    assert_eq!(children[1]["children"][0]["value"], "Mind the gap.");
}

#[test]
fn test_plain_document_passes_through() {
    let doc = transform_fixture_to_stdout("plain", &[]);

    for quote in doc["children"].as_array().unwrap() {
        assert_eq!(quote["type"], "blockquote");
        assert!(quote.get("data").is_none());
    }
    // The unrecognized marker survives as an ordinary link reference.
    assert_eq!(
        doc["children"][1]["children"][0]["children"][0]["identifier"],
        "!danger"
    );
}

#[test]
fn test_output_flag_writes_file() {
    let input = fixtures_dir().join("note.json");
    let output = scratch_path("note_out", "json");

    let status = Command::new(callouts_binary())
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--quiet")
        .status()
        .expect("Failed to run callouts");
    assert!(status.success());

    let content = fs::read_to_string(&output).expect("Failed to read output file");
    let _ = fs::remove_file(&output);
    assert!(content.contains("callout-note"));
}

#[test]
fn test_pretty_flag() {
    let input = fixtures_dir().join("note.json");

    let output = Command::new(callouts_binary())
        .arg(&input)
        .arg("--pretty")
        .output()
        .expect("Failed to run callouts");
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.lines().count() > 1);
    let _: serde_json::Value = serde_json::from_str(&text).unwrap();
}

#[test]
fn test_directory_mode() {
    let content_dir = scratch_path("content", "d");
    let out_dir = scratch_path("build", "d");
    fs::create_dir_all(&content_dir).unwrap();
    for name in ["note.json", "plain.json"] {
        fs::copy(fixtures_dir().join(name), content_dir.join(name)).unwrap();
    }

    let report = scratch_path("usage", "json");
    let status = Command::new(callouts_binary())
        .arg(&content_dir)
        .arg("-o")
        .arg(&out_dir)
        .arg("-j1")
        .arg("--report")
        .arg(&report)
        .arg("--quiet")
        .status()
        .expect("Failed to run callouts");
    assert!(status.success());

    let transformed = fs::read_to_string(out_dir.join("note.json")).unwrap();
    assert!(transformed.contains("callout-note"));
    let untouched = fs::read_to_string(out_dir.join("plain.json")).unwrap();
    assert!(!untouched.contains("callout-title"));

    let usage: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(usage["total"], 1);
    assert_eq!(usage["documents"][0]["file"], "note.json");
    assert_eq!(usage["documents"][0]["by_kind"]["note"], 1);

    let _ = fs::remove_file(&report);
    let _ = fs::remove_dir_all(&content_dir);
    let _ = fs::remove_dir_all(&out_dir);
}

#[test]
fn test_directory_mode_requires_output() {
    let content_dir = scratch_path("no_output", "d");
    fs::create_dir_all(&content_dir).unwrap();
    fs::copy(
        fixtures_dir().join("note.json"),
        content_dir.join("note.json"),
    )
    .unwrap();

    let output = Command::new(callouts_binary())
        .arg(&content_dir)
        .output()
        .expect("Failed to run callouts");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("output"));

    let _ = fs::remove_dir_all(&content_dir);
}

#[test]
fn test_missing_input_fails() {
    let output = Command::new(callouts_binary())
        .arg("/nonexistent/document.json")
        .output()
        .expect("Failed to run callouts");
    assert!(!output.status.success());
}

#[test]
fn test_config_file_enables_pretty() {
    let content_dir = scratch_path("config", "d");
    fs::create_dir_all(&content_dir).unwrap();
    fs::copy(
        fixtures_dir().join("note.json"),
        content_dir.join("note.json"),
    )
    .unwrap();
    fs::write(content_dir.join("_callouts.toml"), "[output]\npretty = true\n").unwrap();

    let output = Command::new(callouts_binary())
        .arg(content_dir.join("note.json"))
        .output()
        .expect("Failed to run callouts");
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.lines().count() > 1);

    let _ = fs::remove_dir_all(&content_dir);
}
