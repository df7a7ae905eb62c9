use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Resolves forward references across a set of already-parsed YANG module
/// skeletons and reports diagnostics.
#[derive(Parser, Debug)]
#[command(name = "yang-cli", version, about)]
pub struct CliArgs {
    /// Path to a JSON fixture file describing the modules to resolve.
    pub fixture: PathBuf,

    /// Output format for diagnostics.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print resolution statistics (rounds run, items resolved) to stderr.
    #[arg(long)]
    pub stats: bool,

    /// Colorize text-format diagnostics.
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Minimum `tracing` level to emit.
    #[arg(long = "log-level", default_value = "warn")]
    pub log_level: String,

    /// Suppress the non-presence-container auto-prune pass (no effect on
    /// schema-only resolution; reserved for a future data-instance mode).
    #[arg(long = "keep-empty-containers")]
    pub keep_empty_containers: bool,

    /// Treat a false `when` as a hard error instead of auto-deleting.
    #[arg(long = "no-auto-del")]
    pub no_auto_del: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}
