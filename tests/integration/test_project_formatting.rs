//! Whole-project runs: discovery, go.mod detection and configuration

use gofmtx::config::FilesConfig;
use gofmtx::{FileWalker, Formatter, Settings};

use crate::common::TestProject;

const EXPECTED_MAIN: &str = r#"// Command app prints its arguments.
package main

import (
	"fmt" // printing
	"io"
	"os"

	// "github.com/fsgo/cache"
	// fst helpers
	"github.com/fsgo/fst"

	"github.com/jzero-io/demo/internal/greet"
)

func main() {
	b, _ := io.ReadAll(os.Stdin)
	fmt.Println(greet.Hello(string(b)), fst.Version)
}
"#;

#[test]
fn test_format_fixture_project() {
    let project = TestProject::from_fixture("project");

    let files = FileWalker::new(&FilesConfig::default()).collect(&[project.path().to_path_buf()]);
    assert_eq!(files, vec![project.path().join("cmd/app/main.go")]);

    let settings = Settings::default();
    let formatter = Formatter::new(settings.to_options().unwrap())
        .with_builtin_rules()
        .unwrap();
    let results = formatter.format_files(&files);
    assert_eq!(results.len(), 1);

    let outcome = results.into_iter().next().unwrap().unwrap();
    assert!(outcome.changed());
    assert_eq!(outcome.rewrites, 1);
    assert_eq!(outcome.formatted, EXPECTED_MAIN);

    // Formatting the output again changes nothing
    std::fs::write(&outcome.path, &outcome.formatted).unwrap();
    let again = formatter.format_file(&outcome.path).unwrap();
    assert!(!again.changed());
}

#[test]
fn test_nested_directory_uses_enclosing_module() {
    let project = TestProject::with_module("example.com/app", "1.21");
    let path = project.add_file(
        "internal/deep/pkg/a.go",
        "package pkg\n\nimport (\n\t\"example.com/app/internal/util\"\n\t\"example.com/other\"\n\t\"strings\"\n)\n",
    );

    let outcome = Formatter::new(Default::default()).format_file(&path).unwrap();
    assert_eq!(
        outcome.formatted,
        "package pkg\n\nimport (\n\t\"strings\"\n\n\t\"example.com/other\"\n\n\t\"example.com/app/internal/util\"\n)\n"
    );
}

#[test]
fn test_generated_files_skipped() {
    let project = TestProject::new();
    let code = "// Code generated by stringer. DO NOT EDIT.\n\npackage main\n\nimport (\n\t\"os\"\n\t\"fmt\"\n)\n";
    let path = project.add_file("kind_string.go", code);

    let outcome = Formatter::new(Default::default()).format_file(&path).unwrap();
    assert!(outcome.skipped);
    assert!(!outcome.changed());

    let outcome = Formatter::new(Default::default())
        .skip_generated(false)
        .format_file(&path)
        .unwrap();
    assert!(!outcome.skipped);
    assert!(outcome.formatted.contains("\t\"fmt\"\n\t\"os\"\n"));
}

#[test]
fn test_settings_from_project_config() {
    let project = TestProject::new();
    let config = project.add_file(
        ".gofmtx.toml",
        r#"
[imports]
group = false

[rewrite]
build_in = false
go_version = "1.15"
"#,
    );

    let settings = Settings::load_from(&config).unwrap();
    let options = settings.to_options().unwrap();
    assert!(!options.group);
    assert!(!settings.rewrite.build_in);
    assert_eq!(options.go_version.unwrap().to_string(), "1.15");
}
