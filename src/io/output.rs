//! Output management for CLI commands.
//!
//! Prints formatted sources, lists files that need formatting and renders
//! unified diffs, writing to injectable writers so commands can be tested.

use similar::{ChangeTag, TextDiff};
use std::io::{self, Write};
use std::path::Path;

use crate::error::FormatError;
use crate::format::FileOutcome;
use crate::io::exit_code::ExitCode;

pub struct OutputManager {
    stdout: Box<dyn Write>,
    stderr: Box<dyn Write>,
}

impl OutputManager {
    pub fn new() -> Self {
        Self {
            stdout: Box::new(io::stdout()),
            stderr: Box::new(io::stderr()),
        }
    }

    /// Create an output manager with custom writers.
    pub fn new_with_writers(stdout: Box<dyn Write>, stderr: Box<dyn Write>) -> Self {
        Self { stdout, stderr }
    }

    /// Print the formatted source
    pub fn source(&mut self, outcome: &FileOutcome) -> io::Result<()> {
        self.stdout.write_all(outcome.formatted.as_bytes())?;
        self.stdout.flush()
    }

    /// Print the path of a file whose formatting differs.
    ///
    /// Returns `Unformatted` when the path was printed.
    pub fn list(&mut self, outcome: &FileOutcome) -> io::Result<ExitCode> {
        if !outcome.changed() {
            return Ok(ExitCode::Success);
        }
        writeln!(self.stdout, "{}", outcome.path.display())?;
        Ok(ExitCode::Unformatted)
    }

    /// Print a unified diff between the original and formatted source
    pub fn diff(&mut self, outcome: &FileOutcome) -> io::Result<()> {
        if !outcome.changed() {
            return Ok(());
        }
        write_diff(
            &mut self.stdout,
            &outcome.path,
            &outcome.original,
            &outcome.formatted,
        )
    }

    /// Output an error with suggestions.
    pub fn error(&mut self, error: &FormatError) -> io::Result<ExitCode> {
        writeln!(self.stderr, "Error: {error}")?;
        for suggestion in error.recovery_suggestions() {
            writeln!(self.stderr, "  Suggestion: {suggestion}")?;
        }
        Ok(ExitCode::from_error(error))
    }

    /// Informational message on stderr, keeping stdout for source and paths
    pub fn info(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.stderr, "{message}")
    }
}

impl Default for OutputManager {
    fn default() -> Self {
        Self::new()
    }
}

fn write_diff(out: &mut dyn Write, path: &Path, old: &str, new: &str) -> io::Result<()> {
    let diff = TextDiff::from_lines(old, new);
    writeln!(out, "--- {}.orig", path.display())?;
    writeln!(out, "+++ {}", path.display())?;
    for hunk in diff.unified_diff().context_radius(3).iter_hunks() {
        writeln!(out, "{}", hunk.header())?;
        for change in hunk.iter_changes() {
            let sign = match change.tag() {
                ChangeTag::Delete => "-",
                ChangeTag::Insert => "+",
                ChangeTag::Equal => " ",
            };
            write!(out, "{sign}{change}")?;
            if change.missing_newline() {
                writeln!(out)?;
            }
        }
    }
    Ok(())
}
