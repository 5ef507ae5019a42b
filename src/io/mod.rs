//! Input/Output handling for the CLI.
//!
//! This module provides:
//! - Printing, listing and diffing formatted files
//! - Consistent error reporting and exit codes

pub mod exit_code;
pub mod output;

pub use exit_code::ExitCode;
pub use output::OutputManager;
