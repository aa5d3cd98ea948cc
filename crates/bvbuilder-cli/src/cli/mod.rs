//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "bvbuilder",
    bin_name = "bvbuilder",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} CRUD resource scaffolding for Express APIs",
    long_about = "bvbuilder generates model, controller and route files for a \
                  REST resource and creates the backing MySQL table.",
    after_help = "EXAMPLES:\n\
        \x20 bvbuilder crud product\n\
        \x20 bvbuilder all order v2 --auth\n\
        \x20 bvbuilder route customer --no-auth --skip-db\n\
        \x20 bvbuilder init --db-name shop\n\
        \x20 bvbuilder completions bash > /usr/share/bash-completion/completions/bvbuilder",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Full create/read/update/delete model, controller and route.
    #[command(
        about = "Generate a full CRUD model, controller and route",
        after_help = "EXAMPLES:\n\
            \x20 bvbuilder crud product\n\
            \x20 bvbuilder crud order v2 --root ./api"
    )]
    Crud(ResourceArgs),

    /// List + get-by-id model, controller and route.
    #[command(
        about = "Generate model, controller and route (list and get-by-id)",
        after_help = "EXAMPLES:\n\
            \x20 bvbuilder all product\n\
            \x20 bvbuilder all product v2 --auth"
    )]
    All(AuthResourceArgs),

    /// Data-access model only.
    #[command(about = "Generate a model")]
    Model(ResourceArgs),

    /// HTTP controller only.
    #[command(about = "Generate a controller")]
    Controller(ResourceArgs),

    /// Router with OpenAPI annotations only.
    #[command(
        about = "Generate a route",
        after_help = "EXAMPLES:\n\
            \x20 bvbuilder route product --auth\n\
            \x20 bvbuilder route product v2 --no-auth"
    )]
    Route(AuthResourceArgs),

    /// Write `DB_NAME` into `.env` and create the application database.
    #[command(
        about = "Initialise the project database",
        after_help = "EXAMPLES:\n\
            \x20 bvbuilder init\n\
            \x20 bvbuilder init --db-name shop\n\
            \x20 bvbuilder init --db-name shop --sql ./seed.sql"
    )]
    Init(InitArgs),

    /// List skeleton templates and where each one comes from.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 bvbuilder list\n\
            \x20 bvbuilder list --format json"
    )]
    List(ListArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 bvbuilder completions bash > ~/.local/share/bash-completion/completions/bvbuilder\n\
            \x20 bvbuilder completions zsh  > ~/.zfunc/_bvbuilder\n\
            \x20 bvbuilder completions fish > ~/.config/fish/completions/bvbuilder.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the loaded configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 bvbuilder config get database.host\n\
            \x20 bvbuilder config list\n\
            \x20 bvbuilder config path"
    )]
    Config(ConfigCommands),
}

// ── generation ────────────────────────────────────────────────────────────────

/// Arguments shared by every generation command.
#[derive(Debug, Clone, Args)]
pub struct ResourceArgs {
    /// Resource name, e.g. `product`.
    #[arg(value_name = "NAME", help = "Resource name (letters, digits, '_')")]
    pub name: String,

    /// API version path segment.
    #[arg(
        value_name = "VERSION",
        default_value = "v1",
        help = "API version segment"
    )]
    pub version: String,

    /// Project root; files land under `<ROOT>/src/<VERSION>/`.
    #[arg(
        long = "root",
        value_name = "DIR",
        help = "Project root (default: current directory)"
    )]
    pub root: Option<PathBuf>,

    /// Do not create the backing table.
    #[arg(long = "skip-db", help = "Skip database table creation")]
    pub skip_db: bool,
}

/// Non-interactive answers to the auth prompt.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct AuthArgs {
    /// Require `authMiddleware` on every route.
    #[arg(long = "auth", conflicts_with = "no_auth", help = "Protect routes with authMiddleware")]
    pub auth: bool,

    /// Leave routes unauthenticated.
    #[arg(long = "no-auth", help = "Do not protect routes")]
    pub no_auth: bool,
}

impl AuthArgs {
    /// `None` means the user has to be asked.
    pub fn answer(&self) -> Option<bool> {
        match (self.auth, self.no_auth) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// Generation arguments for commands that ask about authentication.
#[derive(Debug, Clone, Args)]
pub struct AuthResourceArgs {
    #[command(flatten)]
    pub resource: ResourceArgs,

    #[command(flatten)]
    pub auth: AuthArgs,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `bvbuilder init`.
#[derive(Debug, Clone, Args)]
pub struct InitArgs {
    /// Database name; asked interactively when omitted.
    #[arg(long = "db-name", value_name = "NAME", help = "Database name")]
    pub db_name: Option<String>,

    /// Bootstrap script run after the database is selected.
    #[arg(
        long = "sql",
        value_name = "FILE",
        help = "SQL script to run instead of the built-in users table"
    )]
    pub sql: Option<PathBuf>,

    /// Directory holding `.env` / `.env.example`.
    #[arg(
        long = "root",
        value_name = "DIR",
        help = "Project root (default: current directory)"
    )]
    pub root: Option<PathBuf>,

    /// Only update `.env`.
    #[arg(long = "skip-db", help = "Skip database creation")]
    pub skip_db: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `bvbuilder list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One id per line.
    List,
    /// JSON array.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `bvbuilder completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `bvbuilder config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `database.host`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
