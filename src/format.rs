//! Formatting pipeline
//!
//! Runs the reorganizer, then the rewrite rules, then the reorganizer again
//! when a rule changed something (rules add and remove imports). Files are
//! processed in parallel; the only shared state is the go.mod lookup cache.

use dashmap::DashMap;
use rayon::prelude::*;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};
use tracing::debug;

use crate::error::{FormatError, FormatResult};
use crate::imports;
use crate::localmodule::{self, GoModule};
use crate::request::{Options, Request};
use crate::rewrite::{self, RuleSet, build_in_rewrite_rules};

static GENERATED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^// Code generated .* DO NOT EDIT\.$").expect("Invalid regex")
});

/// Result of formatting one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub original: String,
    pub formatted: String,
    /// Nodes rewritten by rules
    pub rewrites: usize,
    /// Generated file left untouched
    pub skipped: bool,
}

impl FileOutcome {
    pub fn changed(&self) -> bool {
        self.original != self.formatted
    }
}

/// Enclosing module per directory
#[derive(Debug, Default)]
pub struct ModuleCache {
    modules: DashMap<PathBuf, Option<Arc<GoModule>>>,
}

impl ModuleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, dir: &Path) -> FormatResult<Option<Arc<GoModule>>> {
        if let Some(found) = self.modules.get(dir) {
            return Ok(found.clone());
        }
        let module = localmodule::detect(dir)?.map(Arc::new);
        self.modules.insert(dir.to_path_buf(), module.clone());
        Ok(module)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

pub struct Formatter {
    options: Options,
    rule_sets: Vec<RuleSet>,
    modules: ModuleCache,
    skip_generated: bool,
}

impl Formatter {
    /// A formatter that only reorganizes imports
    pub fn new(options: Options) -> Self {
        Self {
            options,
            rule_sets: Vec::new(),
            modules: ModuleCache::new(),
            skip_generated: true,
        }
    }

    /// Add the built-in modernization rules
    pub fn with_builtin_rules(self) -> FormatResult<Self> {
        self.with_rules(build_in_rewrite_rules())
    }

    /// Add rule texts (inline or rule-file paths).
    ///
    /// Rules are parsed here so an invalid rule fails before any file is read.
    pub fn with_rules<S: AsRef<str>>(mut self, rules: &[S]) -> FormatResult<Self> {
        for text in rules {
            self.rule_sets.push(RuleSet::load(text.as_ref())?);
        }
        Ok(self)
    }

    pub fn skip_generated(mut self, skip: bool) -> Self {
        self.skip_generated = skip;
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Reorganize and rewrite one request. Returns the number of rewrites.
    pub fn format_request(&self, req: &mut Request) -> FormatResult<usize> {
        imports::format(req)?;

        let mut rewritten = 0;
        for rules in &self.rule_sets {
            rewritten += rewrite::apply_rules(req, rules)?;
        }
        if rewritten > 0 {
            imports::format(req)?;
        }
        Ok(rewritten)
    }

    /// Format in-memory source. `path` locates the enclosing module.
    pub fn format_source(&self, path: &Path, source: &str) -> FormatResult<FileOutcome> {
        if self.skip_generated && is_generated(source) {
            debug!(path = %path.display(), "skipping generated file");
            return Ok(FileOutcome {
                path: path.to_path_buf(),
                original: source.to_string(),
                formatted: source.to_string(),
                rewrites: 0,
                skipped: true,
            });
        }

        let dir = path.parent().unwrap_or(Path::new("."));
        let module = self.modules.lookup(dir)?;

        let mut req =
            Request::new(path, source, self.options.clone())?.with_module(module.as_deref());
        let rewrites = self.format_request(&mut req)?;

        Ok(FileOutcome {
            path: path.to_path_buf(),
            original: source.to_string(),
            formatted: req.into_source(),
            rewrites,
            skipped: false,
        })
    }

    pub fn format_file(&self, path: &Path) -> FormatResult<FileOutcome> {
        let source = std::fs::read_to_string(path).map_err(|source| FormatError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        self.format_source(path, &source)
    }

    /// Format files in parallel, results in input order
    pub fn format_files(&self, paths: &[PathBuf]) -> Vec<FormatResult<FileOutcome>> {
        paths.par_iter().map(|path| self.format_file(path)).collect()
    }
}

/// Whether the file carries the standard generated-code marker before its
/// package clause
pub fn is_generated(source: &str) -> bool {
    source
        .lines()
        .take_while(|line| !line.starts_with("package "))
        .any(|line| GENERATED.is_match(line.trim_end()))
}
