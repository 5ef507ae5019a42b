//! Go parser setup
//!
//! Uses tree-sitter-go crate's LANGUAGE constant (converted via .into()).
//!
//! Note: This parser uses ABI-15. When updating the grammar, check that the
//! node kinds used by `import` and `qualified` still exist.

use std::path::Path;
use tree_sitter::{Node, Parser, Tree};

use crate::error::{FormatError, FormatResult};

/// Thin wrapper around a tree-sitter parser configured for Go
pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    /// Create a new Go parser
    pub fn new() -> FormatResult<Self> {
        let mut parser = Parser::new();
        let lang = tree_sitter_go::LANGUAGE;
        parser
            .set_language(&lang.into())
            .map_err(|e| FormatError::ParserInit {
                reason: format!("Failed to set Go language: {e}"),
            })?;

        Ok(Self { parser })
    }

    /// Parse Go source, returning `None` only when tree-sitter gives up
    pub fn parse(&mut self, code: &str) -> Option<Tree> {
        self.parser.parse(code, None)
    }
}

/// Parse `code` and reject trees that contain syntax errors.
///
/// `path` is only used to label the error.
pub fn parse_go(code: &str, path: &Path) -> FormatResult<Tree> {
    let mut parser = GoParser::new()?;
    let tree = parser.parse(code).ok_or_else(|| FormatError::Syntax {
        path: path.to_path_buf(),
        reason: "parser returned no tree".to_string(),
    })?;

    let root = tree.root_node();
    if root.has_error() {
        let reason = match first_error(root) {
            Some(node) => format!(
                "syntax error at line {}, column {}",
                node.start_position().row + 1,
                node.start_position().column + 1
            ),
            None => "syntax error".to_string(),
        };
        return Err(FormatError::Syntax {
            path: path.to_path_buf(),
            reason,
        });
    }

    Ok(tree)
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            if let Some(found) = first_error(child) {
                return Some(found);
            }
        }
    }
    None
}

/// Source text covered by `node`
pub fn node_text<'a>(node: Node, code: &'a str) -> &'a str {
    &code[node.byte_range()]
}
