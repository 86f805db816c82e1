// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::types::TemplateKind;

/// Command-line arguments for `officedag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "officedag",
    version,
    about = "Schedule office tasks over a dependency graph.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to a graph definition file (TOML).
    ///
    /// When neither this nor `--template` is given, `Officedag.toml` in the
    /// current working directory is used.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Build the graph from a built-in template instead of a file.
    #[arg(long, value_enum, value_name = "KIND", conflicts_with = "config")]
    pub template: Option<TemplateKind>,

    /// Goal text embedded into the template's research task.
    #[arg(long, value_name = "TEXT", requires = "template")]
    pub goal: Option<String>,

    /// Maximum number of tasks handed to the simulated workers at once.
    #[arg(long, value_name = "N", default_value_t = 4)]
    pub workers: usize,

    /// Print offices and parallel levels, but don't dispatch anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the final graph snapshot as JSON on stdout.
    #[arg(long)]
    pub json: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `OFFICEDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
