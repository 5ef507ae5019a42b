//! Current-module detection from `go.mod`
//!
//! Walks from a directory up to the filesystem root looking for `go.mod` and
//! reads its `module` and `go` directives. The grouping pass only consumes the
//! module path; the rewrite engine uses the `go` directive as the fallback
//! target version.

use std::path::{Path, PathBuf};

use crate::error::{FormatError, FormatResult};
use crate::rewrite::GoVersion;

/// A module found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoModule {
    /// Directory holding `go.mod`
    pub root: PathBuf,
    /// Declared module path, e.g. `github.com/user/project`
    pub path: String,
    /// Version from the `go` directive
    pub go_version: Option<GoVersion>,
}

/// Find the module enclosing `start`.
///
/// Returns `Ok(None)` when no `go.mod` with a `module` directive exists in
/// `start` or any of its ancestors.
pub fn detect(start: &Path) -> FormatResult<Option<GoModule>> {
    let start = if start.as_os_str().is_empty() {
        Path::new(".")
    } else {
        start
    };
    let start = std::fs::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());

    for ancestor in start.ancestors() {
        let go_mod = ancestor.join("go.mod");
        if !go_mod.is_file() {
            continue;
        }
        let content = std::fs::read_to_string(&go_mod).map_err(|source| FormatError::GoMod {
            path: go_mod.clone(),
            source,
        })?;
        let info = parse_go_mod(&content);
        if let Some(path) = info.module {
            return Ok(Some(GoModule {
                root: ancestor.to_path_buf(),
                path,
                go_version: info.go_version,
            }));
        }
    }

    Ok(None)
}

/// Directives read from a `go.mod` file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoModInfo {
    pub module: Option<String>,
    pub go_version: Option<GoVersion>,
}

/// Extract the `module` and `go` directives from `go.mod` content
pub fn parse_go_mod(content: &str) -> GoModInfo {
    let mut info = GoModInfo::default();

    for line in content.lines() {
        let line = match line.find("//") {
            Some(i) => &line[..i],
            None => line,
        }
        .trim();

        if let Some(rest) = directive(line, "module") {
            let module = rest.trim_matches(|c| c == '"' || c == '`');
            if !module.is_empty() && info.module.is_none() {
                info.module = Some(module.to_string());
            }
        } else if let Some(rest) = directive(line, "go") {
            if info.go_version.is_none() {
                info.go_version = GoVersion::parse(rest);
            }
        }
    }

    info
}

fn directive<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    if rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}
