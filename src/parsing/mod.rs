//! Go syntax access on top of tree-sitter
//!
//! The reorganizer and the rewrite engine never touch tree-sitter directly;
//! they go through the extraction helpers here and express every mutation as
//! an [`Edit`] against the current source.

pub mod edit;
pub mod import;
pub mod parser;
pub mod qualified;

pub use edit::{Edit, apply_edits, line_start, next_line_start};
pub use import::{ImportName, ImportRegion, ImportSpec, collect_import_specs, import_region};
pub use parser::{GoParser, node_text, parse_go};
pub use qualified::{QualifiedRef, collect_qualified_refs};
