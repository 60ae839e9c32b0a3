use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn docmate() -> Command {
    let mut command = Command::cargo_bin("docmate").expect("binary builds");
    command.env_remove("DOCMATE_ENTRY");
    command
}

#[test]
fn extract_writes_the_document_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("package.json"),
        r#"{"name": "demo", "author": "Ada", "main": "index.js"}"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("index.js"),
        "export const answer = 42;\nexport default function run(): void {}\n",
    )
    .unwrap();

    docmate()
        .current_dir(dir.path())
        .arg("extract")
        .assert()
        .success();

    let output = dir.path().join(".fox/doc-mate-data.json");
    let contents = std::fs::read_to_string(&output).expect("output file exists");
    let json: serde_json::Value = serde_json::from_str(&contents).expect("valid json");
    assert_eq!(json["name"], "demo");
    assert_eq!(json["author"], "Ada");
    assert_eq!(json["github"], "unknown");
    assert_eq!(json["commonExport"][0]["name"], "answer");
    assert_eq!(json["defaultInfo"]["name"], "run");
}

#[test]
fn extract_entry_flag_overrides_package_json() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("package.json"),
        r#"{"name": "demo", "main": "missing.js"}"#,
    )
    .unwrap();
    std::fs::write(dir.path().join("other.js"), "export const X = 1;\n").unwrap();

    docmate()
        .current_dir(dir.path())
        .args(["extract", "--entry", "other"])
        .assert()
        .success();

    let contents =
        std::fs::read_to_string(dir.path().join(".fox/doc-mate-data.json")).unwrap();
    assert!(contents.contains("\"X\""));
}

#[test]
fn extract_without_any_entry_fails() {
    let dir = TempDir::new().unwrap();

    docmate()
        .current_dir(dir.path())
        .arg("extract")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no entry module"));
}

#[test]
fn strict_mode_fails_on_unresolved_exports() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("util.js"), "export const present = 1;\n").unwrap();
    std::fs::write(
        dir.path().join("index.js"),
        "export { absent } from './util';\n",
    )
    .unwrap();

    docmate()
        .current_dir(dir.path())
        .args(["extract", "--entry", "index.js", "--fail-on-unresolved"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unresolved export"));
}

#[test]
fn deps_prints_the_tree_on_stdout() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("dep.js"), "export const D = 1;\n").unwrap();
    std::fs::write(dir.path().join("index.js"), "import './dep';\n").unwrap();

    docmate()
        .current_dir(dir.path())
        .args(["deps", "--entry", "index.js"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dep.js"));
}
