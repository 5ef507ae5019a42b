//! Rewrite rules: inline rules, rule files, built-in rules and version gates

use gofmtx::{
    FormatError, Formatter, GoVersion, Options, Request, build_in_rewrite_rules, rewrite, rewrites,
};

use crate::common::{TestProject, fixture};

const IOUTIL: &str = r#"package main

import (
	"fmt"
	"io/ioutil"
)

func main() {
	b, _ := ioutil.ReadAll(nil)
	_ = ioutil.WriteFile("x", b, 0o644)
	fmt.Println(len(b))
}
"#;

#[test]
fn test_builtin_rules_replace_ioutil() {
    let project = TestProject::new();
    let formatter = Formatter::new(Options::default())
        .with_builtin_rules()
        .unwrap();

    let outcome = formatter
        .format_source(&project.path().join("main.go"), IOUTIL)
        .unwrap();
    let expected = r#"package main

import (
	"fmt"
	"io"
	"os"
)

func main() {
	b, _ := io.ReadAll(nil)
	_ = os.WriteFile("x", b, 0o644)
	fmt.Println(len(b))
}
"#;
    assert_eq!(outcome.formatted, expected);
    assert_eq!(outcome.rewrites, 2);

    // A second run finds nothing left to do
    let again = formatter
        .format_source(&project.path().join("main.go"), &outcome.formatted)
        .unwrap();
    assert!(!again.changed());
    assert_eq!(again.rewrites, 0);
}

#[test]
fn test_invalid_rule_aborts_batch() {
    let mut req = Request::new("main.go", IOUTIL, Options::default()).unwrap();
    let err = rewrites(
        &mut req,
        &["io/#ioutil.ReadAll -> io.ReadAll", "invalid ->"],
    )
    .unwrap_err();
    assert!(matches!(err, FormatError::InvalidRule { .. }));

    // Rules before the bad one stay applied
    assert!(req.source().contains("io.ReadAll(nil)"));
    assert!(req.source().contains("ioutil.WriteFile"));
}

#[test]
fn test_invalid_rules_rejected() {
    for text in ["invalid", "invalid ->", "-> os.WriteFile", "io/#ioutil.ReadAll -> io"] {
        let mut req = Request::new("main.go", IOUTIL, Options::default()).unwrap();
        let err = rewrite(&mut req, text).unwrap_err();
        assert_eq!(err.status_code(), "INVALID_RULE", "rule {text:?}");
        assert_eq!(req.source(), IOUTIL);
    }
}

const SORTING: &str = r#"package main

import (
	"io/ioutil"
	"sort"
)

func main() {
	b, _ := ioutil.ReadAll(nil)
	names := []string{string(b)}
	sort.Strings(names)
}
"#;

#[test]
fn test_rule_file_version_sections() {
    let rules = fixture("rules/rule1.txt");
    let rules = rules.to_str().unwrap();

    let old = TestProject::with_module("example.com/old", "1.18");
    let path = old.add_file("main.go", SORTING);
    let outcome = Formatter::new(Options::default())
        .with_rules(&[rules])
        .unwrap()
        .format_file(&path)
        .unwrap();
    assert_eq!(outcome.rewrites, 1);
    assert!(outcome.formatted.contains("import (\n\t\"io\"\n\t\"sort\"\n)\n"));
    assert!(outcome.formatted.contains("io.ReadAll(nil)"));
    assert!(outcome.formatted.contains("sort.Strings(names)"));

    let new = TestProject::with_module("example.com/new", "1.22");
    let path = new.add_file("main.go", SORTING);
    let outcome = Formatter::new(Options::default())
        .with_rules(&[rules])
        .unwrap()
        .format_file(&path)
        .unwrap();
    assert_eq!(outcome.rewrites, 2);
    assert!(outcome.formatted.contains("import (\n\t\"io\"\n\t\"slices\"\n)\n"));
    assert!(outcome.formatted.contains("slices.Sort(names)"));
}

#[test]
fn test_invalid_rule_file() {
    let rules = fixture("rules/rule2.txt");
    let err = Formatter::new(Options::default())
        .with_rules(&[rules.to_str().unwrap()])
        .err()
        .unwrap();
    assert_eq!(err.status_code(), "INVALID_RULE");
    assert!(err.to_string().contains("rule2.txt:3"));
}

#[test]
fn test_missing_rule_file() {
    let err = Formatter::new(Options::default())
        .with_rules(&["rules/does-not-exist.txt"])
        .err()
        .unwrap();
    assert_eq!(err.status_code(), "RULE_FILE_ERROR");
}

#[test]
fn test_package_rule_renames_import() {
    let project = TestProject::new();
    let code = r#"package main

import (
	"fmt"

	"golang.org/x/net/context"
)

func run(ctx context.Context) {
	fmt.Println(ctx)
}
"#;
    let outcome = Formatter::new(Options::default())
        .with_builtin_rules()
        .unwrap()
        .format_source(&project.path().join("main.go"), code)
        .unwrap();
    let expected = r#"package main

import (
	"context"
	"fmt"
)

func run(ctx context.Context) {
	fmt.Println(ctx)
}
"#;
    assert_eq!(outcome.formatted, expected);
}

#[test]
fn test_rule_skipped_when_name_is_taken() {
    let project = TestProject::new();
    let code = r#"package main

import (
	"io/ioutil"

	"example.com/lib/io"
)

func main() {
	b, _ := ioutil.ReadAll(nil)
	io.Use(b)
}
"#;
    let outcome = Formatter::new(Options::default())
        .with_rules(&["io/#ioutil.ReadAll -> io.ReadAll"])
        .unwrap()
        .format_source(&project.path().join("main.go"), code)
        .unwrap();
    assert_eq!(outcome.rewrites, 0);
    assert!(!outcome.changed());
}

#[test]
fn test_seek_constants_keep_os_import() {
    let project = TestProject::new();
    let code = r#"package main

import "os"

func main() {
	f, _ := os.Open("x")
	f.Seek(0, os.SEEK_END)
}
"#;
    let outcome = Formatter::new(Options::default())
        .with_builtin_rules()
        .unwrap()
        .format_source(&project.path().join("main.go"), code)
        .unwrap();
    let expected = r#"package main

import (
	"io"
	"os"
)

func main() {
	f, _ := os.Open("x")
	f.Seek(0, io.SeekEnd)
}
"#;
    assert_eq!(outcome.formatted, expected);
}

#[test]
fn test_build_constraint_gates_builtin_rules() {
    let code = "//go:build go1.17\n\npackage main\n\nimport \"reflect\"\n\nvar kind = reflect.Ptr\n";

    let mut req = Request::new("main.go", code, Options::default()).unwrap();
    assert_eq!(rewrites(&mut req, build_in_rewrite_rules()).unwrap(), 0);
    assert_eq!(req.source(), code);

    // An explicit target version wins over the constraint
    let options = Options {
        go_version: GoVersion::parse("1.18"),
        ..Options::default()
    };
    let mut req = Request::new("main.go", code, options).unwrap();
    assert_eq!(rewrites(&mut req, build_in_rewrite_rules()).unwrap(), 1);
    assert!(req.source().ends_with("var kind = reflect.Pointer\n"));
}
