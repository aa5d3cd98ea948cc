//! Flags accepted before or after any subcommand.

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Diagnostics on stderr: -v info, -vv debug, -vvv trace plus SQL
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print nothing but errors (JSON summaries are still written)
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Plain symbols without ANSI colours; also set by NO_COLOR
    #[arg(long = "no-color", global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// TOML settings file to use instead of the per-user one
    #[arg(short = 'c', long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How results are printed; `auto` defers to `output.format` in the config
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output_format: OutputFormat,
}

/// Rendering of command results on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Config value, else `human` on a terminal and `plain` when piped
    #[default]
    Auto,
    /// Coloured symbols and a spinner while the database works
    Human,
    /// One uncoloured line per file or table
    Plain,
    /// A single JSON summary document
    Json,
}
