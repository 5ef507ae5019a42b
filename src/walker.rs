//! File system walker for discovering Go files to format
//!
//! This module provides directory traversal with support for:
//! - .gitignore rules
//! - `.gofmtxignore` files (gitignore syntax)
//! - Skipping `vendor/` and `testdata/` directories

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::config::FilesConfig;

pub const IGNORE_FILE_NAME: &str = ".gofmtxignore";

const SKIPPED_DIRS: &[&str] = &["vendor", "testdata"];

/// Walks directories to find `.go` files
#[derive(Debug, Clone)]
pub struct FileWalker {
    exclude_vendor: bool,
}

impl FileWalker {
    pub fn new(config: &FilesConfig) -> Self {
        Self {
            exclude_vendor: config.exclude_vendor,
        }
    }

    /// Go files below `root`, or `root` itself when it is a file
    pub fn walk(&self, root: &Path) -> impl Iterator<Item = PathBuf> + use<> {
        let mut builder = WalkBuilder::new(root);

        builder
            .hidden(true) // Skip hidden files and directories
            .git_ignore(true) // Respect .gitignore files
            .git_global(true) // Respect global gitignore
            .git_exclude(true) // Respect .git/info/exclude
            .follow_links(false)
            .require_git(false); // Allow gitignore to work in non-git directories

        builder.add_custom_ignore_filename(IGNORE_FILE_NAME);

        if self.exclude_vendor {
            builder.filter_entry(|entry| {
                let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                // The walk root itself is never filtered
                entry.depth() == 0
                    || !is_dir
                    || !entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| SKIPPED_DIRS.contains(&name))
            });
        }

        builder
            .build()
            .filter_map(Result::ok) // Skip files we can't access
            .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
            .map(|entry| entry.into_path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "go"))
    }

    /// Expand a mix of files and directories into a sorted, deduplicated list
    pub fn collect(&self, roots: &[PathBuf]) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = roots.iter().flat_map(|root| self.walk(root)).collect();
        files.sort();
        files.dedup();
        files
    }
}
