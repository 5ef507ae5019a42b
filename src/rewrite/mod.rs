//! Pattern-based rewrite engine
//!
//! Rules rename package-qualified references (`ioutil.ReadAll` to
//! `io.ReadAll`) or whole import paths, adjusting the import declarations to
//! match. Every rule can be gated on the Go version the file targets.

mod apply;
pub mod builtin;
pub mod reference;
pub mod rule;
pub mod version;

pub use builtin::build_in_rewrite_rules;
pub use reference::Reference;
pub use rule::{RewriteRule, RuleSet};
pub use version::{GoVersion, go_version_from_comment};

use tracing::debug;

use crate::error::{FormatError, FormatResult};
use crate::request::Request;

/// Apply one rule text (inline rules or a rule-file path) to the request.
///
/// Returns the number of rewritten nodes.
pub fn rewrite(req: &mut Request, rule_text: &str) -> FormatResult<usize> {
    let rules = RuleSet::load(rule_text)?;
    apply_rules(req, &rules)
}

/// Apply several rule texts in order, stopping at the first error.
///
/// Rules applied before the error stay applied.
pub fn rewrites<S: AsRef<str>>(req: &mut Request, rule_texts: &[S]) -> FormatResult<usize> {
    let mut total = 0;
    for text in rule_texts {
        total += rewrite(req, text.as_ref())?;
    }
    Ok(total)
}

/// Apply an already parsed rule set, skipping rules the target version
/// does not support.
pub fn apply_rules(req: &mut Request, rules: &RuleSet) -> FormatResult<usize> {
    let mut total = 0;
    for rule in rules.iter() {
        match apply::apply_rule(req, rule) {
            Ok(count) => total += count,
            Err(FormatError::UnsupportedVersion { required, found }) => {
                debug!(
                    rule = rule.text(),
                    origin = ?rules.origin(),
                    required = required.as_str(),
                    found = found.as_str(),
                    "skipping rule for older Go version"
                );
            }
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}
