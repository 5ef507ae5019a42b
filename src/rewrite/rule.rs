//! Rewrite rule parsing
//!
//! A rule is `<old> -> <new>`. Rule text (inline or from a file) holds one
//! rule per line; blank lines are ignored and lines starting with `#` or `//`
//! are comments. A comment naming a Go version (`# go1.16`) sets the minimum
//! version of every rule after it, so a leading comment block applies to the
//! whole file.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::reference::Reference;
use super::version::{GoVersion, go_version_from_comment};
use crate::error::{FormatError, FormatResult};

const ARROW: &str = "->";

/// One parsed `old -> new` rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    pub old: Reference,
    pub new: Reference,
    /// Go release that introduced the replacement
    pub min_version: Option<GoVersion>,
    text: String,
}

impl RewriteRule {
    /// Parse a single rule line
    pub fn parse(text: &str) -> FormatResult<Self> {
        let trimmed = text.trim();
        let Some((old, new)) = trimmed.split_once(ARROW) else {
            return Err(FormatError::invalid_rule(text, "missing '->' separator"));
        };
        let (old, new) = (old.trim(), new.trim());
        if old.is_empty() {
            return Err(FormatError::invalid_rule(text, "left side is empty"));
        }
        if new.is_empty() {
            return Err(FormatError::invalid_rule(text, "right side is empty"));
        }

        let old = Reference::parse(old)
            .map_err(|reason| FormatError::invalid_rule(text, format!("left side: {reason}")))?;
        let new = Reference::parse(new)
            .map_err(|reason| FormatError::invalid_rule(text, format!("right side: {reason}")))?;

        if old.member.is_some() != new.member.is_some() {
            return Err(FormatError::invalid_rule(
                text,
                "both sides must name a member, or neither",
            ));
        }
        if old == new {
            return Err(FormatError::invalid_rule(text, "rule rewrites a reference to itself"));
        }

        Ok(Self {
            old,
            new,
            min_version: None,
            text: trimmed.to_string(),
        })
    }

    pub fn with_min_version(mut self, version: Option<GoVersion>) -> Self {
        self.min_version = version;
        self
    }

    /// The rule as written
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl FromStr for RewriteRule {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// An ordered list of rules from one rule text or rule file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<RewriteRule>,
    origin: Option<PathBuf>,
}

impl RuleSet {
    /// Parse inline rule text (one or more lines)
    pub fn parse(text: &str) -> FormatResult<Self> {
        Self::parse_lines(text, None)
    }

    /// Read and parse a rule file
    pub fn from_file(path: &Path) -> FormatResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| FormatError::RuleFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_lines(&text, Some(path))
    }

    /// Resolve `spec` as inline rule text when it contains `->`, otherwise as
    /// the path of a rule file.
    pub fn load(spec: &str) -> FormatResult<Self> {
        if spec.contains(ARROW) {
            return Self::parse(spec);
        }

        let path = Path::new(spec.trim());
        if path.is_file() {
            return Self::from_file(path);
        }
        if looks_like_path(spec.trim()) {
            return Err(FormatError::RuleFile {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "rule file not found"),
            });
        }
        Err(FormatError::invalid_rule(spec, "missing '->' separator"))
    }

    fn parse_lines(text: &str, origin: Option<&Path>) -> FormatResult<Self> {
        let mut rules = Vec::new();
        let mut version = None;

        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('#') || line.starts_with("//") {
                let found = go_version_from_comment(line);
                if !found.is_empty() {
                    version = GoVersion::parse(&found);
                }
                continue;
            }

            let rule = RewriteRule::parse(line).map_err(|err| match (err, origin) {
                (FormatError::InvalidRule { rule, reason }, Some(path)) => FormatError::InvalidRule {
                    rule,
                    reason: format!("{reason} ({}:{})", path.display(), idx + 1),
                },
                (err, _) => err,
            })?;
            rules.push(rule.with_min_version(version.clone()));
        }

        if rules.is_empty() {
            let reason = match origin {
                Some(path) => format!("no rule found in {}", path.display()),
                None => "no rule found".to_string(),
            };
            return Err(FormatError::invalid_rule(text, reason));
        }

        Ok(Self {
            rules,
            origin: origin.map(Path::to_path_buf),
        })
    }

    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    pub fn iter(&self) -> impl Iterator<Item = &RewriteRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// File the rules were read from, if any
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }
}

fn looks_like_path(spec: &str) -> bool {
    let path = Path::new(spec);
    path.extension().is_some() || spec.contains(std::path::MAIN_SEPARATOR) || spec.contains('/')
}
