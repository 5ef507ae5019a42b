//! Import declarations as seen by tree-sitter
//!
//! Two views of the same syntax: `ImportSpec` is one parsed `import_spec`
//! node used by the rewrite engine, `ImportRegion` is the raw text of every
//! top-level import declaration used by the reorganizer.

use std::ops::Range;
use tree_sitter::Node;

use super::parser::node_text;

/// How an import binds its package name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportName {
    /// `import "fmt"`
    Default,
    /// `import f "fmt"`
    Alias(String),
    /// `import _ "database/sql"`
    Blank,
    /// `import . "fmt"`
    Dot,
}

/// A single import spec with the byte ranges needed to edit it
#[derive(Debug, Clone)]
pub struct ImportSpec {
    /// Unquoted import path
    pub path: String,
    pub name: ImportName,
    /// The whole `import_spec` node
    pub range: Range<usize>,
    /// The string literal, quotes included
    pub path_range: Range<usize>,
    /// The enclosing `import_declaration`
    pub declaration: Range<usize>,
    /// Whether the spec sits inside `import ( ... )`
    pub grouped: bool,
}

impl ImportSpec {
    /// Name the package is referenced by in this file.
    ///
    /// `default` is the package name used when the spec has no alias.
    /// Blank and dot imports have no qualifier.
    pub fn local_name(&self, default: &str) -> Option<String> {
        match &self.name {
            ImportName::Default => Some(default.to_string()),
            ImportName::Alias(alias) => Some(alias.clone()),
            ImportName::Blank | ImportName::Dot => None,
        }
    }
}

/// Collect every import spec in the file, in source order
pub fn collect_import_specs(root: Node, code: &str) -> Vec<ImportSpec> {
    let mut specs = Vec::new();
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        if child.kind() == "import_declaration" {
            process_import_declaration(child, code, &mut specs);
        }
    }
    specs
}

fn process_import_declaration(node: Node, code: &str, specs: &mut Vec<ImportSpec>) {
    // import_declaration holds either a single import_spec or an import_spec_list
    for child in node.children(&mut node.walk()) {
        match child.kind() {
            "import_spec" => {
                if let Some(spec) = process_import_spec(child, node, code, false) {
                    specs.push(spec);
                }
            }
            "import_spec_list" => {
                for spec_child in child.children(&mut child.walk()) {
                    if spec_child.kind() == "import_spec" {
                        if let Some(spec) = process_import_spec(spec_child, node, code, true) {
                            specs.push(spec);
                        }
                    }
                }
            }
            _ => {}
        }
    }
}

fn process_import_spec(
    node: Node,
    declaration: Node,
    code: &str,
    grouped: bool,
) -> Option<ImportSpec> {
    let path_node = node.child_by_field_name("path")?;
    let literal = node_text(path_node, code);
    let path = literal.trim_matches(|c| c == '"' || c == '`').to_string();

    let name = match node.child_by_field_name("name") {
        Some(name) => match name.kind() {
            "dot" => ImportName::Dot,
            "blank_identifier" => ImportName::Blank,
            _ => ImportName::Alias(node_text(name, code).to_string()),
        },
        None => ImportName::Default,
    };

    Some(ImportSpec {
        path,
        name,
        range: node.byte_range(),
        path_range: path_node.byte_range(),
        declaration: declaration.byte_range(),
        grouped,
    })
}

/// The stretch of the file holding all top-level import declarations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRegion {
    /// Bytes to replace with the reorganized block
    pub range: Range<usize>,
    /// Import lines and comments of the region, one per line.
    /// Parenthesized declarations contribute their body, single ones their spec.
    pub raw: String,
}

/// Find the import region of a file, if it has any imports.
///
/// The region runs from the first to the last top-level `import` declaration
/// and also swallows the comments between them. A comment trailing a single
/// import on the same line belongs to that import; one trailing the closing
/// `)` of a block is left where it is.
pub fn import_region(root: Node, code: &str) -> Option<ImportRegion> {
    let mut cursor = root.walk();
    let children: Vec<Node> = root
        .children(&mut cursor)
        .filter(|n| n.kind() == "import_declaration" || n.kind() == "comment")
        .collect();

    let first = children
        .iter()
        .position(|n| n.kind() == "import_declaration")?;
    let last = children
        .iter()
        .rposition(|n| n.kind() == "import_declaration")?;

    let mut end = last;
    if let Some(next) = children.get(last + 1) {
        if next.kind() == "comment"
            && !is_grouped(children[last])
            && next.start_position().row == children[last].end_position().row
        {
            end = last + 1;
        }
    }

    let mut raw = String::new();
    let mut prev_end_row: Option<usize> = None;
    let mut prev_grouped = false;
    for node in &children[first..=end] {
        let start_row = node.start_position().row;
        if let Some(prev) = prev_end_row {
            if node.kind() == "comment" && start_row == prev && !prev_grouped {
                // Trailing comment: keep it on the line it annotates
                if raw.ends_with('\n') {
                    raw.pop();
                }
                raw.push(' ');
                raw.push_str(node_text(*node, code));
                raw.push('\n');
                prev_end_row = Some(node.end_position().row);
                continue;
            }
            if start_row > prev + 1 {
                raw.push('\n');
            }
        }

        if node.kind() == "comment" {
            raw.push_str(node_text(*node, code));
        } else {
            raw.push_str(declaration_body(*node, code));
        }
        raw.push('\n');
        prev_end_row = Some(node.end_position().row);
        prev_grouped = is_grouped(*node);
    }

    Some(ImportRegion {
        range: children[first].start_byte()..children[end].end_byte(),
        raw,
    })
}

/// Whether an import declaration is the parenthesized form
fn is_grouped(node: Node) -> bool {
    node.kind() == "import_declaration"
        && node
            .children(&mut node.walk())
            .any(|c| c.kind() == "import_spec_list")
}

/// Text of an import declaration without the `import` keyword and parentheses
fn declaration_body<'a>(node: Node, code: &'a str) -> &'a str {
    let mut keyword_end = node.start_byte();
    for child in node.children(&mut node.walk()) {
        match child.kind() {
            "import" => keyword_end = child.end_byte(),
            "import_spec_list" => {
                let range = child.byte_range();
                let open = code[range.clone()].find('(').map_or(range.start, |i| range.start + i + 1);
                let close = code[range.clone()]
                    .rfind(')')
                    .map_or(range.end, |i| range.start + i);
                return &code[open..close.max(open)];
            }
            _ => {}
        }
    }
    code[keyword_end..node.end_byte()].trim()
}
