//! Byte-range edits over source text
//!
//! Rewrites are collected as edits against one snapshot of the source and
//! applied back to front so earlier offsets stay valid.

use std::ops::Range;

/// Replace `range` of the source with `text`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub range: Range<usize>,
    pub text: String,
}

impl Edit {
    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::replace(at..at, text)
    }

    pub fn delete(range: Range<usize>) -> Self {
        Self::replace(range, String::new())
    }
}

/// Apply `edits` to `code`.
///
/// Duplicate edits are applied once. An edit overlapping one that starts
/// later in the file is dropped.
pub fn apply_edits(code: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by(|a, b| {
        b.range
            .start
            .cmp(&a.range.start)
            .then(b.range.end.cmp(&a.range.end))
    });
    edits.dedup();

    let mut out = code.to_string();
    let mut floor = usize::MAX;
    for edit in edits {
        if edit.range.end > floor {
            continue;
        }
        out.replace_range(edit.range.clone(), &edit.text);
        floor = edit.range.start;
    }
    out
}

/// Byte offset of the start of the line containing `pos`
pub fn line_start(code: &str, pos: usize) -> usize {
    code[..pos].rfind('\n').map_or(0, |i| i + 1)
}

/// Byte offset just past the newline ending the line containing `pos`,
/// or the end of the source when that line has no newline
pub fn next_line_start(code: &str, pos: usize) -> usize {
    code[pos..].find('\n').map_or(code.len(), |i| pos + i + 1)
}
