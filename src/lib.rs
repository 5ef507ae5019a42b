//! The main library module for gofmtx

pub mod config;
pub mod error;
pub mod format;
pub mod imports;
pub mod io;
pub mod localmodule;
pub mod parsing;
pub mod printer;
pub mod request;
pub mod rewrite;
pub mod stdlib;
pub mod walker;

// Explicit exports for better API clarity
pub use config::Settings;
pub use error::{FormatError, FormatResult};
pub use format::{FileOutcome, Formatter};
pub use imports::{GroupKind, ImportDecl, ImportGroup};
pub use localmodule::GoModule;
pub use printer::{BuiltinPrinter, SourcePrinter};
pub use request::{Options, Request};
pub use rewrite::{
    GoVersion, Reference, RewriteRule, RuleSet, build_in_rewrite_rules, rewrite, rewrites,
};
pub use walker::FileWalker;
