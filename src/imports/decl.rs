//! One import line and the comment lines above it
//!
//! `path` is the literal import line as written, alias and trailing comment
//! included. A declaration whose `path` is empty is either a commented-out
//! import (`// "github.com/x/y"`) or a detached comment block.

use regex::Regex;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::sync::LazyLock;

static IMPORT_PATH_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:_\s*)?(?:"[^"\s]+"|`[^`\s]+`)"#).expect("Invalid regex")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid regex"));

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportDecl {
    /// The import line, e.g. `f "fmt" // printing`
    pub path: String,
    /// Comment lines above the import, in source order
    pub docs: Vec<String>,
}

impl ImportDecl {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            docs: Vec::new(),
        }
    }

    /// Append a comment line. Blank input is ignored.
    pub fn add_comment(&mut self, text: &str) {
        let text = text.trim();
        if !text.is_empty() {
            self.docs.push(text.to_string());
        }
    }

    pub fn has_commented_path(&self) -> bool {
        !self.commented_path().is_empty()
    }

    /// The import path carried by a commented-out import line, quotes kept
    fn commented_path(&self) -> &str {
        for doc in &self.docs {
            let Some(rest) = doc.strip_prefix("//") else {
                continue;
            };
            let rest = rest.trim();
            if rest.is_empty() {
                continue;
            }
            if IMPORT_PATH_LINE.is_match(rest) {
                return rest.trim_start_matches(['_', ' ']);
            }
        }
        ""
    }

    /// The import path without alias, quotes or comments.
    ///
    /// `a "a.com/aa"`, `_"a.com/aa"` and `// "a.com/aa"` all give `a.com/aa`.
    pub fn real_path(&self) -> String {
        let mut name = self.path.trim_start_matches(['/', '*', '_', ' ', '\t']);
        if name.is_empty() {
            name = self.commented_path();
        }

        for delim in ['"', '`'] {
            if name.contains(delim) {
                return name.split(delim).nth(1).unwrap_or_default().to_string();
            }
        }
        name.to_string()
    }

    /// Comments only, with nothing to attach to
    pub fn is_detached(&self) -> bool {
        self.path.is_empty() && !self.has_commented_path()
    }

    /// Tab-indented lines as they appear inside `import ( ... )`
    pub fn render(&self) -> String {
        let mut out = String::new();
        for doc in &self.docs {
            out.push('\t');
            out.push_str(&WHITESPACE.replace_all(doc, " "));
            out.push('\n');
        }
        if !self.path.is_empty() {
            out.push('\t');
            out.push_str(&self.path);
            out.push('\n');
        }
        out
    }
}

impl Serialize for ImportDecl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ImportDecl", 3)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("docs", &self.docs)?;
        state.serialize_field("real_path", &self.real_path())?;
        state.end()
    }
}

/// Split the raw text of an import region into declarations.
///
/// Comment lines accumulate until the next import line. A blank line ends
/// the run: comments pending at that point become a path-less declaration.
pub fn parse_decls(raw: &str) -> Vec<ImportDecl> {
    let mut decls = Vec::new();
    let mut current = ImportDecl::default();
    let mut in_block_comment = false;

    for line in raw.lines() {
        let line = line.trim();

        if in_block_comment {
            if let Some(end) = line.find("*/") {
                in_block_comment = false;
                if !line[end + 2..].trim().is_empty() {
                    // Comment closed by the import it annotates
                    current.path = line.to_string();
                    decls.push(std::mem::take(&mut current));
                    continue;
                }
            }
            current.add_comment(line);
            continue;
        }

        if line.is_empty() {
            if !current.docs.is_empty() {
                decls.push(std::mem::take(&mut current));
            }
            continue;
        }

        if line.starts_with("//") {
            current.add_comment(line);
            continue;
        }

        if line.starts_with("/*") {
            match line.find("*/") {
                None => {
                    in_block_comment = true;
                    current.add_comment(line);
                    continue;
                }
                Some(end) if line[end + 2..].trim().is_empty() => {
                    current.add_comment(line);
                    continue;
                }
                // Comment followed by the import itself
                Some(_) => {}
            }
        }

        current.path = line.to_string();
        decls.push(std::mem::take(&mut current));
    }

    if !current.docs.is_empty() {
        decls.push(current);
    }
    decls
}
