//! Source printer seam
//!
//! The reorganizer hands its output to a `SourcePrinter` before removing the
//! group sentinels. `BuiltinPrinter` only normalizes import blocks; a caller
//! with a full Go pretty-printer can plug it in through `Request::with_printer`.

use std::path::Path;
use tree_sitter::Node;

use crate::error::FormatResult;
use crate::parsing::{Edit, apply_edits, parse_go};

pub trait SourcePrinter: Send + Sync {
    /// Pretty-print a whole Go file. `path` labels errors.
    fn print(&self, code: &str, path: &Path) -> FormatResult<String>;
}

/// Re-indents import blocks and trims blank lines around them
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinPrinter;

impl SourcePrinter for BuiltinPrinter {
    fn print(&self, code: &str, path: &Path) -> FormatResult<String> {
        let tree = parse_go(code, path)?;
        let root = tree.root_node();

        let mut edits = Vec::new();
        let mut cursor = root.walk();
        for decl in root.children(&mut cursor) {
            if decl.kind() != "import_declaration" {
                continue;
            }
            let mut decl_cursor = decl.walk();
            for list in decl.children(&mut decl_cursor) {
                if list.kind() == "import_spec_list" {
                    if let Some(edit) = normalize_spec_list(list, code) {
                        edits.push(edit);
                    }
                }
            }
        }

        let mut out = apply_edits(code, edits);
        let trimmed = out.trim_end().len();
        out.truncate(trimmed);
        out.push('\n');

        parse_go(&out, path)?;
        Ok(out)
    }
}

/// Edit rewriting the inside of `( ... )`, or `None` when already normal
fn normalize_spec_list(list: Node, code: &str) -> Option<Edit> {
    let range = list.byte_range();
    let text = &code[range.clone()];
    let open = range.start + text.find('(')? + 1;
    let close = range.start + text.rfind(')')?;
    if close < open {
        return None;
    }

    let body = &code[open..close];
    let normalized = normalize_body(body);
    if normalized == body {
        return None;
    }
    Some(Edit::replace(open..close, normalized))
}

fn normalize_body(body: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for line in body.lines().map(str::trim) {
        if line.is_empty() && lines.last().is_none_or(|prev| prev.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    if lines.is_empty() {
        return String::new();
    }

    let mut out = String::from("\n");
    for line in lines {
        if !line.is_empty() {
            out.push('\t');
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}
