//! Rendering groups into a single import block
//!
//! Printers are free to drop blank lines inside an import block, which would
//! merge adjacent groups. Each group is therefore preceded by a sentinel
//! import spec that keeps the separation through printing; `clean_sentinel`
//! removes it afterwards.

use super::group::ImportGroup;

/// Placeholder import path under the reserved `.invalid` TLD
pub const IMPORT_GROUP_SENTINEL: &str = "\"gofmtx.invalid/import-group-separator\"";

/// Render non-empty groups as one `import ( ... )` block.
///
/// Groups are sorted in place. Returns an empty string when every group is
/// empty.
pub fn render_import_block(groups: &mut [ImportGroup]) -> String {
    let mut body = String::new();
    for group in groups.iter_mut() {
        group.sort();
        let code = group.render();
        if code.is_empty() {
            continue;
        }
        body.push_str(IMPORT_GROUP_SENTINEL);
        body.push('\n');
        body.push_str(&code);
        body.push('\n');
    }

    let body = body.trim();
    if body.is_empty() {
        return String::new();
    }
    format!("import (\n{body}\n)\n")
}

/// Remove every sentinel line left in printed source
pub fn clean_sentinel(code: &str) -> String {
    let mut out = String::with_capacity(code.len());
    for line in code.split_inclusive('\n') {
        if line.trim() != IMPORT_GROUP_SENTINEL {
            out.push_str(line);
        }
    }
    out
}
