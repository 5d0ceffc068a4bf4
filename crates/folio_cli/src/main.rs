//! Folio CLI: the command-line interface to the folio document toolkit.
//!
//! Provides `folio split` and `folio statements` for inspecting how a script
//! is segmented, `folio check` for reporting parse errors, and `folio replay`
//! for driving a list of units through the cached, abortable render pipeline.

#![warn(missing_docs)]

mod check;
mod logging;
mod pipeline;
mod replay;
mod split;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Folio: literate scripts into document segments.
#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "Folio document toolkit")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a `folio.toml` file, or the directory holding one.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the Code, Comment and Escape segments of a script.
    Split(SplitArgs),
    /// Print the top-level statements of a script with their line spans.
    Statements(SplitArgs),
    /// Parse scripts and report errors.
    Check(CheckArgs),
    /// Replay a list of units through the run-control pipeline.
    Replay(ReplayArgs),
}

/// Arguments for `folio split` and `folio statements`.
#[derive(Parser, Debug)]
pub struct SplitArgs {
    /// Script to read.
    pub file: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for `folio check`.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Scripts to parse.
    #[arg(required = true, num_args = 1..)]
    pub files: Vec<String>,
}

/// Arguments for `folio replay`.
#[derive(Parser, Debug)]
pub struct ReplayArgs {
    /// JSON file holding the units, either a list or a notebook with `cells`.
    pub cells: String,

    /// Number of passes over the units.
    #[arg(short, long, default_value_t = 2)]
    pub passes: usize,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a config file or directory.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::env::var_os("NO_COLOR").is_none() && std::env::var("TERM").is_ok(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    let result = pipeline::load_settings(&global).and_then(|config| {
        logging::init(&global, &config.logging)?;
        match cli.command {
            Command::Split(ref args) => split::run_split(args, &global, &config),
            Command::Statements(ref args) => split::run_statements(args, &global),
            Command::Check(ref args) => check::run(args, &global, &config),
            Command::Replay(ref args) => replay::run(args, &global, &config),
        }
    });

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
