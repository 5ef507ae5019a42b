//! Import reorganizer behavior through the public formatter

use gofmtx::imports::IMPORT_GROUP_SENTINEL;
use gofmtx::{Formatter, GroupKind, Options};
use std::path::PathBuf;

use crate::common::TestProject;

fn format(project: &TestProject, code: &str, options: Options) -> String {
    let path: PathBuf = project.path().join("main.go");
    Formatter::new(options)
        .format_source(&path, code)
        .expect("format should succeed")
        .formatted
}

const MIXED: &str = r#"package main

import "github.com/fsgo/fst"
import (
	// process arguments
	"os"
	xerrors "golang.org/x/xerrors"
	_ "embed"
	"fmt" // printing

	// "github.com/fsgo/cache"

	. "strings"
)

func main() {
	fmt.Println(os.Args, fst.Version, xerrors.New("x"), ToUpper("y"))
}
"#;

#[test]
fn test_groups_sorts_and_keeps_comments() {
    let project = TestProject::new();
    let out = format(&project, MIXED, Options::default());

    let expected = r#"package main

import (
	_ "embed"
	"fmt" // printing
	// process arguments
	"os"
	. "strings"

	// "github.com/fsgo/cache"
	"github.com/fsgo/fst"
	xerrors "golang.org/x/xerrors"
)

func main() {
	fmt.Println(os.Args, fst.Version, xerrors.New("x"), ToUpper("y"))
}
"#;
    assert_eq!(out, expected);
}

#[test]
fn test_formatting_is_idempotent() {
    let project = TestProject::new();
    let once = format(&project, MIXED, Options::default());
    let twice = format(&project, &once, Options::default());
    assert_eq!(once, twice);
}

#[test]
fn test_sentinel_never_leaks() {
    let project = TestProject::new();
    let out = format(&project, MIXED, Options::default());
    assert!(!out.contains(IMPORT_GROUP_SENTINEL));
    assert!(!out.contains("gofmtx.invalid"));
}

#[test]
fn test_local_module_group_from_options() {
    let project = TestProject::new();
    let code = "package main\n\nimport (\n\t\"github.com/jzero-io/demo/util\"\n\t\"github.com/fsgo/fst\"\n\t\"fmt\"\n)\n";
    let options = Options {
        local_modules: vec!["github.com/jzero-io/demo".to_string()],
        ..Options::default()
    };
    assert_eq!(
        format(&project, code, options),
        "package main\n\nimport (\n\t\"fmt\"\n\n\t\"github.com/fsgo/fst\"\n\n\t\"github.com/jzero-io/demo/util\"\n)\n"
    );
}

#[test]
fn test_custom_group_order() {
    let project = TestProject::new();
    let code = "package main\n\nimport (\n\t\"github.com/jzero-io/demo/util\"\n\t\"github.com/fsgo/fst\"\n\t\"fmt\"\n)\n";
    let options = Options {
        local_modules: vec!["github.com/jzero-io/demo".to_string()],
        group_order: vec![GroupKind::Local, GroupKind::Std],
        ..Options::default()
    };
    // Kinds left out of the order follow in their default position
    assert_eq!(
        format(&project, code, options),
        "package main\n\nimport (\n\t\"github.com/jzero-io/demo/util\"\n\n\t\"fmt\"\n\n\t\"github.com/fsgo/fst\"\n)\n"
    );
}

#[test]
fn test_grouping_disabled_sorts_one_block() {
    let project = TestProject::new();
    let code = "package main\n\nimport (\n\t\"os\"\n\n\t\"github.com/fsgo/fst\"\n\n\t\"fmt\"\n)\n";
    let options = Options {
        group: false,
        ..Options::default()
    };
    assert_eq!(
        format(&project, code, options),
        "package main\n\nimport (\n\t\"fmt\"\n\t\"github.com/fsgo/fst\"\n\t\"os\"\n)\n"
    );
}

#[test]
fn test_trailing_comment_block_stays_last() {
    let project = TestProject::new();
    let code = "package main\n\nimport (\n\t\"os\"\n\t\"fmt\"\n\n\t// keep me\n)\n";
    assert_eq!(
        format(&project, code, Options::default()),
        "package main\n\nimport (\n\t\"fmt\"\n\t\"os\"\n\n\t// keep me\n)\n"
    );
}

#[test]
fn test_comment_block_keeps_its_place() {
    let project = TestProject::new();
    let code = "package main\n\nimport (\n\t\"github.com/a/b\"\n\n\t// std stuff below\n\n\t\"os\"\n)\n";
    let expected = "package main\n\nimport (\n\t// std stuff below\n\n\t\"os\"\n\n\t\"github.com/a/b\"\n)\n";
    let out = format(&project, code, Options::default());
    assert_eq!(out, expected);
    assert_eq!(format(&project, &out, Options::default()), expected);
}

#[test]
fn test_block_comment_ending_on_import_line() {
    let project = TestProject::new();
    let code = "package main\n\nimport (\n\t\"os\"\n\t/* multi\n\t   line */ \"fmt\"\n\t\"github.com/a/b\"\n)\n";
    assert_eq!(
        format(&project, code, Options::default()),
        "package main\n\nimport (\n\t/* multi\n\tline */ \"fmt\"\n\t\"os\"\n\n\t\"github.com/a/b\"\n)\n"
    );
}

#[test]
fn test_comment_after_closing_paren_stays_outside() {
    let project = TestProject::new();
    let code = "package main\n\nimport (\n\t\"os\"\n\t\"fmt\"\n) // trailing\n\nfunc main() {}\n";
    assert_eq!(
        format(&project, code, Options::default()),
        "package main\n\nimport (\n\t\"fmt\"\n\t\"os\"\n) // trailing\n\nfunc main() {}\n"
    );
}

#[test]
fn test_empty_import_block_removed() {
    let project = TestProject::new();
    let code = "package main\n\nimport ()\n\nfunc main() {}\n";
    assert_eq!(
        format(&project, code, Options::default()),
        "package main\n\nfunc main() {}\n"
    );
}

#[test]
fn test_syntax_error_reported() {
    let project = TestProject::new();
    let err = Formatter::new(Options::default())
        .format_source(&project.path().join("bad.go"), "package main\n\nimport (\n")
        .unwrap_err();
    assert_eq!(err.status_code(), "SYNTAX_ERROR");
}
