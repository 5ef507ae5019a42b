//! Default modernization rules
//!
//! The table is an embedded rule file. Each entry carries its version comment
//! so it can be passed to `rewrites` on its own.

use std::sync::LazyLock;

use super::version::go_version_from_comment;

const BUILTIN_RULES: &str = include_str!("builtin_rules.txt");

static RULES: LazyLock<Vec<String>> = LazyLock::new(|| {
    let mut rules = Vec::new();
    let mut version = String::new();
    for line in BUILTIN_RULES.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') {
            let found = go_version_from_comment(line);
            if !found.is_empty() {
                version = found;
            }
            continue;
        }
        if version.is_empty() {
            rules.push(line.to_string());
        } else {
            rules.push(format!("# go{version}\n{line}"));
        }
    }
    rules
});

/// The built-in rules in application order
pub fn build_in_rewrite_rules() -> &'static [String] {
    RULES.as_slice()
}
