//! Error types for the import reorganizer and rewrite engine
//!
//! This module provides structured error types using thiserror so callers get
//! actionable messages and stable status codes.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for formatting and rewriting operations
#[derive(Error, Debug)]
pub enum FormatError {
    /// Malformed rule text: missing separator, empty side, bad reference
    #[error("Invalid rewrite rule '{rule}': {reason}")]
    InvalidRule { rule: String, reason: String },

    /// Rule file missing or unreadable
    #[error("Failed to read rule file '{path}': {source}")]
    RuleFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Rule requires a newer Go version than the target file declares.
    /// Used internally to skip a rule; never returned from `rewrites`.
    #[error("Rule requires go{required}, target declares go{found}")]
    UnsupportedVersion { required: String, found: String },

    /// Reserved: a qualifier maps to more than one candidate import
    #[error("Qualifier '{name}' resolves to more than one import")]
    ResolutionAmbiguous { name: String },

    /// Source (or rewritten source) does not parse as Go
    #[error("Failed to parse Go source '{path}': {reason}")]
    Syntax { path: PathBuf, reason: String },

    #[error("Failed to initialize Go parser: {reason}")]
    ParserInit { reason: String },

    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read go.mod '{path}': {source}")]
    GoMod {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid configuration: {reason}")]
    Config { reason: String },
}

impl FormatError {
    pub fn invalid_rule(rule: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRule {
            rule: rule.into(),
            reason: reason.into(),
        }
    }

    /// Get a stable status code for this error type.
    ///
    /// Returns a string identifier that can be used in JSON output
    /// for programmatic error handling.
    pub fn status_code(&self) -> String {
        match self {
            Self::InvalidRule { .. } => "INVALID_RULE",
            Self::RuleFile { .. } => "RULE_FILE_ERROR",
            Self::UnsupportedVersion { .. } => "UNSUPPORTED_VERSION",
            Self::ResolutionAmbiguous { .. } => "RESOLUTION_AMBIGUOUS",
            Self::Syntax { .. } => "SYNTAX_ERROR",
            Self::ParserInit { .. } => "PARSER_INIT_ERROR",
            Self::FileRead { .. } => "FILE_READ_ERROR",
            Self::FileWrite { .. } => "FILE_WRITE_ERROR",
            Self::GoMod { .. } => "GO_MOD_ERROR",
            Self::Config { .. } => "CONFIG_ERROR",
        }
        .to_string()
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::InvalidRule { .. } => vec![
                "Rules look like 'io/#ioutil.WriteFile -> os.WriteFile'",
                "Both sides must name a package, optionally followed by an exported member",
            ],
            Self::RuleFile { .. } => vec![
                "Check that the rule file exists and you have read permissions",
                "Inline rules must contain '->'",
            ],
            Self::Syntax { .. } => vec![
                "Run 'go vet' on the file to locate the syntax error",
                "Files that do not parse are left untouched",
            ],
            Self::FileRead { .. } | Self::GoMod { .. } => {
                vec!["Check that the file exists and you have read permissions"]
            }
            Self::FileWrite { .. } => vec!["Check write permissions and free disk space"],
            Self::Config { .. } => vec!["Run 'gofmtx init --force' to regenerate .gofmtx.toml"],
            _ => vec![],
        }
    }
}

/// Result type alias for formatting operations
pub type FormatResult<T> = Result<T, FormatError>;
