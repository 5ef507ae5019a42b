//! CLI entry point for gofmtx.
//!
//! Formats Go files named on the command line (directories are walked), or
//! standard input when no path is given. Output follows gofmt: the formatted
//! source by default, or a file list (`-l`), a diff (`-d`), or in-place
//! writes (`-w`).

use anyhow::Context;
use clap::{
    Args, Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use gofmtx::io::{ExitCode, OutputManager};
use gofmtx::{FileOutcome, FileWalker, FormatError, Formatter, GoVersion, GroupKind, Settings};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::Level;

const STDIN_LABEL: &str = "<standard input>";

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Go import grouping and reference rewriting
#[derive(Parser)]
#[command(
    name = "gofmtx",
    version,
    about,
    styles = clap_cargo_style(),
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Path to a custom .gofmtx.toml file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    format: FormatArgs,
}

#[derive(Args)]
struct FormatArgs {
    /// Files or directories to format (standard input when empty)
    paths: Vec<PathBuf>,

    /// Write the result back to the source file
    #[arg(short, long)]
    write: bool,

    /// List files whose formatting differs
    #[arg(short, long)]
    list: bool,

    /// Print diffs instead of the formatted source
    #[arg(short, long)]
    diff: bool,

    /// Rewrite rule ("old -> new") or rule-file path, may be repeated
    #[arg(short, long = "rewrite", value_name = "RULE")]
    rewrite: Vec<String>,

    /// Do not apply the built-in rules
    #[arg(long)]
    no_builtin: bool,

    /// Import path prefix treated as local, may be repeated
    #[arg(long = "local", value_name = "PREFIX")]
    local: Vec<String>,

    /// Group order, e.g. "std,third_party,local"
    #[arg(long, value_delimiter = ',')]
    group_order: Vec<GroupKind>,

    /// Keep a single import group
    #[arg(long)]
    no_group: bool,

    /// Target Go version for version-gated rules
    #[arg(long = "go", value_name = "VERSION")]
    go: Option<GoVersion>,

    /// Log skipped rules and dump import groups
    #[arg(long)]
    trace: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default .gofmtx.toml in the current directory
    Init {
        /// Overwrite an existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Display active settings
    Config,
}

fn main() {
    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::GeneralError
        }
    };
    std::process::exit(i32::from(code));
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let loaded = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let mut settings = match loaded {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return Ok(ExitCode::ConfigError);
        }
    };

    match cli.command {
        Some(Commands::Init { force }) => {
            let dir = std::env::current_dir().context("cannot determine current directory")?;
            return match Settings::init_config_file(&dir, force) {
                Ok(path) => {
                    println!("Created configuration file at: {}", path.display());
                    Ok(ExitCode::Success)
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    Ok(ExitCode::ConfigError)
                }
            };
        }
        Some(Commands::Config) => {
            println!("{}", toml::to_string_pretty(&settings)?);
            return Ok(ExitCode::Success);
        }
        None => {}
    }

    let args = cli.format;
    apply_overrides(&mut settings, &args);
    init_tracing(settings.trace);

    let mut output = OutputManager::new();
    let formatter = match build_formatter(&settings) {
        Ok(formatter) => formatter,
        Err(e) => return Ok(output.error(&e)?),
    };

    if args.paths.is_empty() {
        if args.write {
            anyhow::bail!("cannot use -w with standard input");
        }
        return format_stdin(&formatter, &args, &mut output);
    }

    let mut code = ExitCode::Success;
    for path in args.paths.iter().filter(|p| !p.exists()) {
        let err = FormatError::FileRead {
            path: path.clone(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        code = code.worst(output.error(&err)?);
    }

    let files = FileWalker::new(&settings.files).collect(&args.paths);
    tracing::debug!(files = files.len(), "formatting");
    for result in formatter.format_files(&files) {
        let file_code = match result {
            Ok(outcome) => emit(&outcome, &args, &mut output)?,
            Err(e) => output.error(&e)?,
        };
        code = code.worst(file_code);
    }
    Ok(code)
}

/// Command-line flags win over file and environment settings
fn apply_overrides(settings: &mut Settings, args: &FormatArgs) {
    settings.trace |= args.trace;
    if !args.local.is_empty() {
        settings.imports.local_modules = args.local.clone();
    }
    if !args.group_order.is_empty() {
        settings.imports.group_order = args.group_order.clone();
    }
    if args.no_group {
        settings.imports.group = false;
    }
    if let Some(version) = &args.go {
        settings.rewrite.go_version = Some(version.to_string());
    }
    if args.no_builtin {
        settings.rewrite.build_in = false;
    }
    settings.rewrite.rules.extend(args.rewrite.iter().cloned());
}

fn init_tracing(trace: bool) {
    let level = if trace { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn build_formatter(settings: &Settings) -> Result<Formatter, FormatError> {
    let mut formatter =
        Formatter::new(settings.to_options()?).skip_generated(settings.files.skip_generated);
    if settings.rewrite.build_in {
        formatter = formatter.with_builtin_rules()?;
    }
    formatter.with_rules(&settings.rewrite.rules)
}

fn format_stdin(
    formatter: &Formatter,
    args: &FormatArgs,
    output: &mut OutputManager,
) -> anyhow::Result<ExitCode> {
    let mut source = String::new();
    std::io::stdin()
        .read_to_string(&mut source)
        .context("failed to read standard input")?;

    // The working directory locates go.mod for stdin input
    let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    match formatter.format_source(&dir.join(STDIN_LABEL), &source) {
        Ok(mut outcome) => {
            outcome.path = Path::new(STDIN_LABEL).to_path_buf();
            emit(&outcome, args, output)
        }
        Err(e) => Ok(output.error(&e)?),
    }
}

fn emit(
    outcome: &FileOutcome,
    args: &FormatArgs,
    output: &mut OutputManager,
) -> anyhow::Result<ExitCode> {
    let mut code = ExitCode::Success;
    if args.list {
        code = output.list(outcome)?;
    }
    if args.diff {
        output.diff(outcome)?;
    }
    if args.write && outcome.changed() {
        if let Err(source) = std::fs::write(&outcome.path, &outcome.formatted) {
            let err = FormatError::FileWrite {
                path: outcome.path.clone(),
                source,
            };
            return Ok(output.error(&err)?);
        }
    }
    if !args.list && !args.diff && !args.write {
        output.source(outcome)?;
    }
    Ok(code)
}
