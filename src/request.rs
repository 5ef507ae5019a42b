//! Per-file formatting request
//!
//! A `Request` owns the source text of one Go file together with its parsed
//! tree and the options the passes run with. Passes mutate it through
//! `replace_source`, which reparses and refuses text that no longer parses.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tree_sitter::Tree;

use crate::error::FormatResult;
use crate::imports::GroupKind;
use crate::localmodule::GoModule;
use crate::parsing::parse_go;
use crate::printer::{BuiltinPrinter, SourcePrinter};
use crate::rewrite::GoVersion;
use crate::rewrite::version::go_version_from_build_constraint;

/// Options shared by the reorganizer and the rewrite engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Dump import groups as JSON through `tracing`
    pub trace: bool,
    /// Module path prefixes treated as local. Empty means "use go.mod".
    pub local_modules: Vec<String>,
    /// Split imports into groups; when false a single sorted group is emitted
    pub group: bool,
    /// Group emission order; missing kinds follow in default order
    pub group_order: Vec<GroupKind>,
    /// Override for the target Go version of rewrite rules
    pub go_version: Option<GoVersion>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            trace: false,
            local_modules: Vec::new(),
            group: true,
            group_order: GroupKind::default_order().to_vec(),
            go_version: None,
        }
    }
}

pub struct Request {
    path: PathBuf,
    source: String,
    tree: Tree,
    options: Options,
    module_go_version: Option<GoVersion>,
    printer: Arc<dyn SourcePrinter>,
}

impl Request {
    /// Parse `source` and build a request for it.
    ///
    /// Fails with `Syntax` when the source does not parse.
    pub fn new(
        path: impl Into<PathBuf>,
        source: impl Into<String>,
        options: Options,
    ) -> FormatResult<Self> {
        let path = path.into();
        let source = source.into();
        let tree = parse_go(&source, &path)?;
        Ok(Self {
            path,
            source,
            tree,
            options,
            module_go_version: None,
            printer: Arc::new(BuiltinPrinter),
        })
    }

    pub fn with_printer(mut self, printer: Arc<dyn SourcePrinter>) -> Self {
        self.printer = printer;
        self
    }

    /// Attach the enclosing module.
    ///
    /// Its path becomes the local prefix unless local modules were configured
    /// explicitly, and its `go` directive the fallback target version.
    pub fn with_module(mut self, module: Option<&GoModule>) -> Self {
        if let Some(module) = module {
            if self.options.local_modules.is_empty() {
                self.options.local_modules.push(module.path.clone());
            }
            self.module_go_version = module.go_version.clone();
        }
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn printer(&self) -> &dyn SourcePrinter {
        self.printer.as_ref()
    }

    /// Go version the file is compiled with, if known.
    ///
    /// Explicit option first, then a `//go:build go1.N` constraint, then the
    /// module's `go` directive.
    pub fn target_go_version(&self) -> Option<GoVersion> {
        self.options
            .go_version
            .clone()
            .or_else(|| go_version_from_build_constraint(&self.source))
            .or_else(|| self.module_go_version.clone())
    }

    /// Swap in new source text. The request is unchanged if it fails to parse.
    pub fn replace_source(&mut self, source: String) -> FormatResult<()> {
        let tree = parse_go(&source, &self.path)?;
        self.source = source;
        self.tree = tree;
        Ok(())
    }

    pub fn into_source(self) -> String {
        self.source
    }
}

impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Request")
            .field("path", &self.path)
            .field("options", &self.options)
            .field("module_go_version", &self.module_go_version)
            .finish_non_exhaustive()
    }
}
