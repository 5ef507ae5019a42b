//! Command-line behavior of the gofmtx binary

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use crate::common::TestProject;

const UNSORTED: &str = "package main\n\nimport (\n\t\"os\"\n\t\"fmt\"\n)\n\nfunc main() { fmt.Println(os.Args) }\n";
const SORTED: &str = "package main\n\nimport (\n\t\"fmt\"\n\t\"os\"\n)\n\nfunc main() { fmt.Println(os.Args) }\n";

fn gofmtx(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gofmtx"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run gofmtx")
}

#[test]
fn test_stdin_to_stdout() {
    let project = TestProject::new();
    let mut child = Command::new(env!("CARGO_BIN_EXE_gofmtx"))
        .current_dir(project.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to run gofmtx");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(UNSORTED.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), SORTED);
}

#[test]
fn test_list_then_write() {
    let project = TestProject::new();
    project.add_file("a.go", UNSORTED);
    project.add_file("b.go", SORTED);

    let output = gofmtx(project.path(), &["-l", "."]);
    assert_eq!(output.status.code(), Some(3));
    let listed = String::from_utf8_lossy(&output.stdout);
    assert!(listed.contains("a.go"));
    assert!(!listed.contains("b.go"));

    let output = gofmtx(project.path(), &["-w", "."]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(project.read("a.go"), SORTED);

    let output = gofmtx(project.path(), &["-l", "."]);
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_diff_output() {
    let project = TestProject::new();
    project.add_file("a.go", UNSORTED);

    let output = gofmtx(project.path(), &["-d", "a.go"]);
    assert_eq!(output.status.code(), Some(0));
    let diff = String::from_utf8_lossy(&output.stdout);
    assert!(diff.starts_with("--- a.go.orig\n+++ a.go\n"));
    assert!(diff.lines().any(|l| l.starts_with("@@")));
    assert!(diff.lines().any(|l| l.starts_with("-\t\"")));
    assert!(diff.lines().any(|l| l.starts_with("+\t\"")));
    // The file itself is left alone
    assert_eq!(project.read("a.go"), UNSORTED);
}

#[test]
fn test_invalid_rule_exit_code() {
    let project = TestProject::new();
    project.add_file("a.go", SORTED);

    let output = gofmtx(project.path(), &["-r", "invalid ->", "a.go"]);
    assert_eq!(output.status.code(), Some(7));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid rewrite rule"));
}

#[test]
fn test_inline_rule_applied() {
    let project = TestProject::new();
    project.add_file(
        "a.go",
        "package main\n\nimport \"io/ioutil\"\n\nvar _, _ = ioutil.ReadFile(\"x\")\n",
    );

    let output = gofmtx(
        project.path(),
        &["--no-builtin", "-r", "io/#ioutil.ReadFile -> os.ReadFile", "a.go"],
    );
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "package main\n\nimport (\n\t\"os\"\n)\n\nvar _, _ = os.ReadFile(\"x\")\n"
    );
}

#[test]
fn test_init_writes_config_once() {
    let project = TestProject::new();

    let output = gofmtx(project.path(), &["init"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(project.path().join(".gofmtx.toml").is_file());

    let output = gofmtx(project.path(), &["init"]);
    assert_eq!(output.status.code(), Some(6));

    let output = gofmtx(project.path(), &["init", "--force"]);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_missing_path_reports_error() {
    let project = TestProject::new();
    let output = gofmtx(project.path(), &["-l", "nope.go"]);
    assert_eq!(output.status.code(), Some(5));
}
