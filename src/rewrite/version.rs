//! Go version gate
//!
//! Rules carry the Go release that introduced their replacement. A rule is
//! skipped for files targeting an older release.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::{FormatError, FormatResult};

static GO_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bgo(\d+(?:\.\d+)*)").expect("Invalid regex"));

static BUILD_CONSTRAINT_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(!?)\bgo(\d+(?:\.\d+)*)").expect("Invalid regex"));

/// A dotted Go release number such as `1.16` or `1.21.3`.
///
/// Stored with exactly the significant components: `1.21.0` becomes `1.21`
/// and `1` becomes `1.0`, so equal versions compare and hash equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GoVersion(Vec<u32>);

impl GoVersion {
    /// Parse `1.16`, `go1.16` or `1.21.3`. Anything after the numeric
    /// components (`1.21rc1`) is ignored.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let text = text.strip_prefix("go").unwrap_or(text);

        let mut parts = Vec::new();
        for piece in text.split('.') {
            let digits: String = piece.chars().take_while(char::is_ascii_digit).collect();
            if digits.is_empty() {
                break;
            }
            parts.push(digits.parse().ok()?);
            if digits.len() != piece.len() {
                break;
            }
        }
        if parts.is_empty() {
            return None;
        }
        while parts.len() > 2 && parts.last() == Some(&0) {
            parts.pop();
        }
        if parts.len() == 1 {
            parts.push(0);
        }
        Some(Self(parts))
    }
}

impl Ord for GoVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.0.len().max(other.0.len());
        for i in 0..len {
            let a = self.0.get(i).copied().unwrap_or(0);
            let b = other.0.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for GoVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for GoVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(u32::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

impl FromStr for GoVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("'{s}' is not a Go version"))
    }
}

impl TryFrom<String> for GoVersion {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GoVersion> for String {
    fn from(value: GoVersion) -> Self {
        value.to_string()
    }
}

/// Extract the first `go<version>` token of a comment.
///
/// Returns an empty string when the comment names no version.
/// `"// go1.19 other"` yields `"1.19"`.
pub fn go_version_from_comment(comment: &str) -> String {
    GO_VERSION
        .captures(comment)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Minimum Go version named by a `//go:build` line in the file header.
///
/// Negated terms (`!go1.18`) are ignored. Only lines before the `package`
/// clause are considered.
pub fn go_version_from_build_constraint(source: &str) -> Option<GoVersion> {
    for line in source.lines() {
        let line = line.trim();
        if line.starts_with("package ") {
            break;
        }
        let Some(expr) = line.strip_prefix("//go:build") else {
            continue;
        };
        for caps in BUILD_CONSTRAINT_VERSION.captures_iter(expr) {
            let negated = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
            if negated {
                continue;
            }
            if let Some(version) = caps.get(2).and_then(|m| GoVersion::parse(m.as_str())) {
                return Some(version);
            }
        }
    }
    None
}

/// Check a rule's minimum version against the target.
///
/// An unknown target accepts every rule.
pub(crate) fn check_version(
    required: Option<&GoVersion>,
    target: Option<&GoVersion>,
) -> FormatResult<()> {
    match (required, target) {
        (Some(required), Some(target)) if target < required => {
            Err(FormatError::UnsupportedVersion {
                required: required.to_string(),
                found: target.to_string(),
            })
        }
        _ => Ok(()),
    }
}
