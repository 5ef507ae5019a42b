//! Qualified references used on both sides of a rewrite rule
//!
//! Grammar: `[<dir>#]<package>[.<Member>]`
//!
//! - `io/#ioutil.WriteFile`: path `io/ioutil`, qualifier `ioutil`, member `WriteFile`
//! - `os.WriteFile`: path `os`, qualifier `os`, member `WriteFile`
//! - `golang.org/x/net/context`: path only, qualifier `context`
//! - `gopkg.in/yaml.v3.Marshal`: path `gopkg.in/yaml.v3`, qualifier `yaml`
//!
//! `#` marks where the package name starts inside the path; the text after it
//! is used verbatim as the qualifier. Without `#` the qualifier is guessed
//! from the last path element. A member is only split off when it starts with
//! an uppercase letter, since other packages can only see exported names.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Reference {
    /// Import path, e.g. `io/ioutil`
    pub path: String,
    /// Package name at use sites, e.g. `ioutil`
    pub qualifier: String,
    /// Selected member, e.g. `WriteFile`
    pub member: Option<String>,
}

impl Reference {
    /// Parse one side of a rule. The error is a human readable reason.
    pub fn parse(text: &str) -> Result<Self, String> {
        let text = text.trim();
        if text.is_empty() {
            return Err("empty reference".to_string());
        }
        if text.contains(char::is_whitespace) {
            return Err(format!("'{text}' contains whitespace"));
        }

        let (dir, rest, explicit) = match text.split_once('#') {
            Some((dir, rest)) => (dir, rest, true),
            None => match text.rfind('/') {
                Some(i) => (&text[..=i], &text[i + 1..], false),
                None => ("", text, false),
            },
        };
        if rest.contains('#') {
            return Err(format!("'{text}' has more than one '#'"));
        }
        if explicit && rest.contains('/') {
            return Err(format!("'#' in '{text}' must precede the last path element"));
        }

        let (package, member) = match rest.rsplit_once('.') {
            Some((package, member)) if member.starts_with(|c: char| c.is_ascii_uppercase()) => {
                (package, Some(member))
            }
            _ => (rest, None),
        };
        if package.is_empty() {
            return Err(format!("'{text}' names no package"));
        }

        let path = format!("{dir}{package}");
        if path.starts_with('/') || path.contains("//") {
            return Err(format!("'{path}' is not a valid import path"));
        }

        let qualifier = if explicit {
            package.to_string()
        } else {
            guess_package_name(&path)
        };
        if !is_identifier(&qualifier) {
            return Err(format!("'{qualifier}' is not a valid package name"));
        }
        if let Some(member) = member {
            if !is_identifier(member) {
                return Err(format!("'{member}' is not a valid member name"));
            }
        }

        Ok(Self {
            path,
            qualifier,
            member: member.map(str::to_string),
        })
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.member {
            Some(member) => write!(f, "{}.{}", self.path, member),
            None => write!(f, "{}", self.path),
        }
    }
}

/// Best guess at the package name an import path declares.
///
/// Uses the last path element, skipping a major-version suffix (`/v2`),
/// cutting at the first dot (`yaml.v3`), dropping a `go-` prefix and dashes.
pub fn guess_package_name(path: &str) -> String {
    let elements: Vec<&str> = path.split('/').filter(|e| !e.is_empty()).collect();
    let mut name = elements.last().copied().unwrap_or_default();
    if elements.len() > 1 && is_major_version(name) {
        name = elements[elements.len() - 2];
    }
    let name = name.split('.').next().unwrap_or(name);
    let name = name.strip_prefix("go-").unwrap_or(name);
    name.replace('-', "")
}

fn is_major_version(element: &str) -> bool {
    element
        .strip_prefix('v')
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
}

/// Whether `s` is a Go identifier
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_alphanumeric())
}
