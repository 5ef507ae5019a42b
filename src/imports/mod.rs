//! Import-block reorganizer
//!
//! Collects every top-level import declaration of a file into one
//! parenthesized block, grouped (standard library, third party, local module)
//! and sorted, while keeping comments attached to the imports they describe.

pub mod decl;
pub mod group;
pub mod serialize;

pub use decl::{ImportDecl, parse_decls};
pub use group::{GroupKind, ImportGroup, classify, group_decls};
pub use serialize::{IMPORT_GROUP_SENTINEL, clean_sentinel, render_import_block};

use tracing::{debug, info};

use crate::error::FormatResult;
use crate::parsing::{Edit, apply_edits, collect_import_specs, import_region, next_line_start};
use crate::request::Request;

/// Reorganize the imports of the request.
///
/// Returns whether the source changed.
pub fn format(req: &mut Request) -> FormatResult<bool> {
    let edit = {
        let code = req.source();
        let root = req.tree().root_node();

        // The cgo preamble must stay directly above `import "C"`
        if collect_import_specs(root, code).iter().any(|s| s.path == "C") {
            debug!(path = %req.path().display(), "leaving cgo imports untouched");
            return Ok(false);
        }

        let Some(region) = import_region(root, code) else {
            return Ok(false);
        };

        let mut groups = group_decls(parse_decls(&region.raw), req.options());
        if req.options().trace {
            match serde_json::to_string_pretty(&groups) {
                Ok(json) => info!(path = %req.path().display(), "import groups:\n{json}"),
                Err(e) => debug!("failed to serialize import groups: {e}"),
            }
        }

        let block = render_import_block(&mut groups);
        if block.is_empty() {
            Edit::delete(region.range.start..skip_blank_lines(code, region.range.end))
        } else {
            Edit::replace(region.range, block.trim_end_matches('\n'))
        }
    };

    let replaced = apply_edits(req.source(), vec![edit]);
    let printed = req.printer().print(&replaced, req.path())?;
    let cleaned = clean_sentinel(&printed);
    if cleaned == req.source() {
        return Ok(false);
    }
    req.replace_source(cleaned)?;
    Ok(true)
}

/// End of the line containing `pos` plus any blank lines after it
fn skip_blank_lines(code: &str, pos: usize) -> usize {
    let mut end = next_line_start(code, pos);
    while end < code.len() {
        let next = next_line_start(code, end);
        if !code[end..next].trim().is_empty() {
            break;
        }
        end = next;
    }
    end
}
