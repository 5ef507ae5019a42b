//! Package-qualified references (`pkg.Member`)
//!
//! Covers selector expressions whose operand is a bare identifier
//! (`ioutil.ReadAll(r)`) and qualified types (`var c context.Context`).
//! Without type information a local variable shadowing a package name looks
//! the same as the package; callers accept that.

use std::ops::Range;
use tree_sitter::Node;

use super::parser::node_text;

/// One `qualifier.member` occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedRef {
    pub qualifier: String,
    pub member: String,
    /// The whole `qualifier.member` expression or type
    pub range: Range<usize>,
    pub qualifier_range: Range<usize>,
    pub member_range: Range<usize>,
}

/// Collect every qualified reference below `root`, in source order
pub fn collect_qualified_refs(root: Node, code: &str) -> Vec<QualifiedRef> {
    let mut refs = Vec::new();
    collect_recursive(root, code, &mut refs);
    refs
}

fn collect_recursive(node: Node, code: &str, refs: &mut Vec<QualifiedRef>) {
    match node.kind() {
        "selector_expression" => {
            if let (Some(operand), Some(field)) = (
                node.child_by_field_name("operand"),
                node.child_by_field_name("field"),
            ) {
                if operand.kind() == "identifier" {
                    refs.push(qualified_ref(node, operand, field, code));
                }
            }
        }
        "qualified_type" => {
            if let (Some(package), Some(name)) = (
                node.child_by_field_name("package"),
                node.child_by_field_name("name"),
            ) {
                refs.push(qualified_ref(node, package, name, code));
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_recursive(child, code, refs);
    }
}

fn qualified_ref(node: Node, qualifier: Node, member: Node, code: &str) -> QualifiedRef {
    QualifiedRef {
        qualifier: node_text(qualifier, code).to_string(),
        member: node_text(member, code).to_string(),
        range: node.byte_range(),
        qualifier_range: qualifier.byte_range(),
        member_range: member.byte_range(),
    }
}
