//! Exit codes for CLI operations following Unix conventions.
//!
//! # Exit Code Semantics
//!
//! - `0`: Success - files formatted, or already formatted
//! - `1`: General error - unspecified failure
//! - `3`: Files need formatting (`--list` found some)
//! - `4-7`: Specific errors (parse, I/O, configuration, invalid rule)
//! - `126-255`: Reserved by shell

use crate::error::FormatError;

/// Standard exit codes for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Operation succeeded (code 0)
    Success = 0,

    /// Unspecified error occurred (code 1)
    GeneralError = 1,

    /// At least one file is not formatted (code 3)
    Unformatted = 3,

    /// Failed to parse Go source (code 4)
    ParseError = 4,

    /// File I/O error (code 5)
    IoError = 5,

    /// Configuration error (code 6)
    ConfigError = 6,

    /// Malformed rewrite rule or rule file (code 7)
    InvalidRule = 7,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl ExitCode {
    /// Convert a `FormatError` to the appropriate exit code.
    pub fn from_error(error: &FormatError) -> Self {
        match error {
            FormatError::Syntax { .. } | FormatError::ParserInit { .. } => ExitCode::ParseError,
            FormatError::FileRead { .. }
            | FormatError::FileWrite { .. }
            | FormatError::GoMod { .. } => ExitCode::IoError,
            FormatError::Config { .. } => ExitCode::ConfigError,
            FormatError::InvalidRule { .. } | FormatError::RuleFile { .. } => {
                ExitCode::InvalidRule
            }
            _ => ExitCode::GeneralError,
        }
    }

    /// The more severe of two codes; errors win over "needs formatting"
    #[must_use]
    pub fn worst(self, other: ExitCode) -> ExitCode {
        let rank = |code: ExitCode| match code {
            ExitCode::Success => 0,
            ExitCode::Unformatted => 1,
            _ => 2,
        };
        if rank(other) > rank(self) { other } else { self }
    }

    /// Check if this exit code indicates success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ExitCode::Success)
    }

    /// Get a human-readable description of the exit code.
    pub fn description(&self) -> &str {
        match self {
            ExitCode::Success => "Success",
            ExitCode::GeneralError => "General error",
            ExitCode::Unformatted => "Files need formatting",
            ExitCode::ParseError => "Parse error",
            ExitCode::IoError => "I/O error",
            ExitCode::ConfigError => "Configuration error",
            ExitCode::InvalidRule => "Invalid rewrite rule",
        }
    }
}
