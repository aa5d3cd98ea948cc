//! # bvbuilder CLI
//!
//! CRUD resource scaffolding for Express-style REST APIs.
//!
//! ## Startup sequence
//!
//! 1. Load `.env` from the working directory into the environment. A
//!    project's own `.env` under `--root` is layered in later by the command.
//! 2. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 3. Initialise the tracing subscriber (logging).
//! 4. Load configuration (defaults + file + env).
//! 5. Build the [`OutputManager`] and the [`Prompter`].
//! 6. Dispatch to the appropriate command handler.
//! 7. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                 |
//! |------|-------------------------|
//! |  0   | Success                 |
//! |  1   | Internal / system error |
//! |  2   | User / input error      |
//! |  3   | Resource not found      |
//! |  4   | Configuration error     |

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use bvbuilder_core::domain::{ArtifactKind, GenerationPlan};

use crate::{
    cli::{AuthArgs, Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
    prompt::{Prompter, default_prompter},
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod prompt;

fn main() -> ExitCode {
    // DB_* settings usually live in the project's .env; a missing file is fine.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version arrive here too and must exit 0.
            let _ = e.print();
            return ExitCode::from(if e.use_stderr() { 2 } else { 0 });
        }
    };
    let verbose = cli.global.verbose > 0;
    let color = !cli.global.no_color;

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    // ── 3. Load configuration ─────────────────────────────────────────────
    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            return handle_error(
                CliError::ConfigError {
                    message: format!("{e:#}"),
                    source: Some(e.into()),
                },
                verbose,
                color,
            );
        }
    };

    // ── 4. Build output manager and prompter ──────────────────────────────
    let output = OutputManager::new(&cli.global, &config);
    let mut prompter = default_prompter();

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    match run(cli.command, &config, &output, prompter.as_mut()) {
        Ok(()) => {
            info!("bvbuilder completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose, output.supports_color()),
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(
    command: Commands,
    config: &AppConfig,
    output: &OutputManager,
    prompter: &mut dyn Prompter,
) -> CliResult<()> {
    use commands::generate;

    match command {
        Commands::Crud(args) => generate::execute(
            GenerationPlan::crud(),
            args,
            AuthArgs::default(),
            config,
            output,
            prompter,
        ),
        Commands::All(args) => generate::execute(
            GenerationPlan::all(),
            args.resource,
            args.auth,
            config,
            output,
            prompter,
        ),
        Commands::Model(args) => generate::execute(
            GenerationPlan::single(ArtifactKind::Model),
            args,
            AuthArgs::default(),
            config,
            output,
            prompter,
        ),
        Commands::Controller(args) => generate::execute(
            GenerationPlan::single(ArtifactKind::Controller),
            args,
            AuthArgs::default(),
            config,
            output,
            prompter,
        ),
        Commands::Route(args) => generate::execute(
            GenerationPlan::single(ArtifactKind::Route),
            args.resource,
            args.auth,
            config,
            output,
            prompter,
        ),
        Commands::Init(args) => commands::init::execute(args, config, output, prompter),
        Commands::List(args) => commands::list::execute(args, config, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(cmd, config, output),
    }
}

/// Translate a `CliError` into a user message and an appropriate exit code.
///
/// This is the single place where structured errors become human-readable
/// output and OS exit codes.
fn handle_error(err: CliError, verbose: bool, color: bool) -> ExitCode {
    err.log();

    // stderr, so the message survives a redirected stdout.
    let msg = if color && std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────
