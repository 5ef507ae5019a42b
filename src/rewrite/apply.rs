//! Matching a rule against one file and producing the edits that apply it
//!
//! Matching is purely syntactic: an import of `old.path` gives the names it
//! binds, and every `name.Member` selector or qualified type using one of
//! those names is a candidate. Edits are computed against one snapshot of the
//! source and applied together, so a rule either applies fully or not at all.

use tracing::debug;

use super::reference::guess_package_name;
use super::rule::RewriteRule;
use super::version::check_version;
use crate::error::FormatResult;
use crate::parsing::{
    Edit, ImportName, ImportSpec, QualifiedRef, apply_edits, collect_import_specs,
    collect_qualified_refs, line_start, next_line_start,
};
use crate::request::Request;

/// Edits for one rule and the number of rewritten nodes
#[derive(Debug, Default)]
struct Plan {
    edits: Vec<Edit>,
    count: usize,
}

/// Apply a single rule to the request.
///
/// Returns the number of rewritten nodes. Fails with `UnsupportedVersion`
/// when the file targets a Go release older than the rule requires.
pub(crate) fn apply_rule(req: &mut Request, rule: &RewriteRule) -> FormatResult<usize> {
    let target = req.target_go_version();
    check_version(rule.min_version.as_ref(), target.as_ref())?;

    let plan = {
        let code = req.source();
        let root = req.tree().root_node();
        let specs = collect_import_specs(root, code);
        if !specs.iter().any(|s| s.path == rule.old.path) {
            return Ok(0);
        }
        let refs = collect_qualified_refs(root, code);
        match rule.old.member {
            Some(_) => member_plan(code, rule, &specs, &refs),
            None => package_plan(code, rule, &specs, &refs),
        }
    };

    let Some(plan) = plan else {
        return Ok(0);
    };
    if plan.count == 0 {
        return Ok(0);
    }

    let rewritten = apply_edits(req.source(), plan.edits);
    req.replace_source(rewritten)?;
    debug!(rule = rule.text(), count = plan.count, "applied rewrite rule");
    Ok(plan.count)
}

/// Package name an unaliased import of `path` binds
fn default_name(path: &str, rule: &RewriteRule) -> String {
    if path == rule.old.path {
        rule.old.qualifier.clone()
    } else if path == rule.new.path {
        rule.new.qualifier.clone()
    } else {
        guess_package_name(path)
    }
}

fn binding(spec: &ImportSpec, rule: &RewriteRule) -> Option<String> {
    spec.local_name(&default_name(&spec.path, rule))
}

fn member_plan(
    code: &str,
    rule: &RewriteRule,
    specs: &[ImportSpec],
    refs: &[QualifiedRef],
) -> Option<Plan> {
    let old_member = rule.old.member.as_deref()?;
    let new_member = rule.new.member.as_deref()?;

    let old_specs: Vec<(&ImportSpec, String)> = specs
        .iter()
        .filter(|s| s.path == rule.old.path)
        .filter_map(|s| binding(s, rule).map(|name| (s, name)))
        .collect();
    let targets: Vec<&QualifiedRef> = refs
        .iter()
        .filter(|r| r.member == old_member && old_specs.iter().any(|(_, n)| *n == r.qualifier))
        .collect();
    if targets.is_empty() {
        debug!(rule = rule.text(), "no references matched");
        return None;
    }

    let mut plan = Plan {
        count: targets.len(),
        ..Plan::default()
    };

    if rule.old.path == rule.new.path {
        for target in &targets {
            plan.edits
                .push(Edit::replace(target.member_range.clone(), new_member));
        }
        return Some(plan);
    }

    let is_target = |r: &QualifiedRef| targets.iter().any(|t| t.range == r.range);
    let used_after = |name: &str| refs.iter().any(|r| r.qualifier == name && !is_target(r));

    let existing = specs
        .iter()
        .filter(|s| s.path == rule.new.path)
        .find_map(|s| binding(s, rule));
    let need_import = existing.is_none();
    let new_name = existing.unwrap_or_else(|| rule.new.qualifier.clone());

    // The new name must not be bound by an import that keeps being used
    let clash = specs.iter().any(|s| {
        if s.path == rule.new.path || binding(s, rule).as_deref() != Some(new_name.as_str()) {
            return false;
        }
        s.path != rule.old.path || used_after(new_name.as_str())
    });
    if clash {
        debug!(
            rule = rule.text(),
            name = new_name.as_str(),
            "skipping rule, name already bound by another import"
        );
        return None;
    }

    for target in &targets {
        plan.edits.push(Edit::replace(
            target.range.clone(),
            format!("{new_name}.{new_member}"),
        ));
    }

    let mut inserted = !need_import;
    for (spec, name) in &old_specs {
        if used_after(name.as_str()) {
            continue;
        }
        if !inserted && spec.name == ImportName::Default {
            plan.edits.push(replace_path(code, spec, &rule.new.path));
            inserted = true;
        } else {
            plan.edits.push(remove_spec(code, spec));
        }
    }

    if !inserted {
        let (anchor, _) = old_specs.first()?;
        plan.edits.push(insert_import(code, anchor, &rule.new.path));
    }

    Some(plan)
}

fn package_plan(
    code: &str,
    rule: &RewriteRule,
    specs: &[ImportSpec],
    refs: &[QualifiedRef],
) -> Option<Plan> {
    let old_specs: Vec<&ImportSpec> = specs.iter().filter(|s| s.path == rule.old.path).collect();
    let existing = specs
        .iter()
        .filter(|s| s.path == rule.new.path)
        .find_map(|s| binding(s, rule));

    let renames_qualifier = rule.old.qualifier != rule.new.qualifier
        && old_specs.iter().any(|s| s.name == ImportName::Default);
    if renames_qualifier {
        let clash = specs.iter().any(|s| {
            s.path != rule.old.path
                && s.path != rule.new.path
                && binding(s, rule).as_deref() == Some(rule.new.qualifier.as_str())
        });
        if clash {
            debug!(
                rule = rule.text(),
                name = rule.new.qualifier.as_str(),
                "skipping rule, name already bound by another import"
            );
            return None;
        }
    }

    let mut plan = Plan::default();
    let mut renamed = false;
    for spec in old_specs {
        let redundant =
            spec.name == ImportName::Default && existing.as_deref() == Some(rule.new.qualifier.as_str());
        if redundant {
            plan.edits.push(remove_spec(code, spec));
        } else {
            plan.edits.push(replace_path(code, spec, &rule.new.path));
        }
        plan.count += 1;
        renamed |= spec.name == ImportName::Default;
    }

    if renamed && rule.old.qualifier != rule.new.qualifier {
        for r in refs.iter().filter(|r| r.qualifier == rule.old.qualifier) {
            plan.edits
                .push(Edit::replace(r.qualifier_range.clone(), rule.new.qualifier.as_str()));
            plan.count += 1;
        }
    }

    Some(plan)
}

/// Rewrite the path literal of `spec`, keeping its quote style
fn replace_path(code: &str, spec: &ImportSpec, path: &str) -> Edit {
    let quote = code[spec.path_range.clone()].chars().next().unwrap_or('"');
    Edit::replace(spec.path_range.clone(), format!("{quote}{path}{quote}"))
}

/// Remove an import spec, or its whole declaration when it is not grouped
fn remove_spec(code: &str, spec: &ImportSpec) -> Edit {
    let range = if spec.grouped {
        spec.range.clone()
    } else {
        spec.declaration.clone()
    };
    let start = line_start(code, range.start);
    if code[start..range.start].trim().is_empty() {
        Edit::delete(start..next_line_start(code, range.end))
    } else {
        Edit::delete(range)
    }
}

/// Add an import of `path` right after `anchor`
fn insert_import(code: &str, anchor: &ImportSpec, path: &str) -> Edit {
    if anchor.grouped {
        let at = next_line_start(code, anchor.range.end);
        let declaration = &code[anchor.declaration.clone()];
        match declaration.rfind(')').map(|i| anchor.declaration.start + i) {
            // `)` shares the anchor's line
            Some(close) if close < at => Edit::insert(close, format!("\n\t\"{path}\"\n")),
            _ => Edit::insert(at, format!("\t\"{path}\"\n")),
        }
    } else {
        let at = next_line_start(code, anchor.declaration.end);
        let newline = if code[..at].ends_with('\n') { "" } else { "\n" };
        Edit::insert(at, format!("{newline}import \"{path}\"\n"))
    }
}
