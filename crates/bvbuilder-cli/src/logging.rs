//! Diagnostics on stderr via `tracing-subscriber`.
//!
//! Only `main` installs the subscriber; the core and adapter crates just emit
//! events. Generated-file and table lines are *output*, not logs, and go
//! through [`crate::output::OutputManager`] instead.
//!
//! | Flag(s)   | bvbuilder crates | SQL statements |
//! |-----------|------------------|----------------|
//! | (none)    | WARN             | off            |
//! | `-v`      | INFO             | off            |
//! | `-vv`     | DEBUG            | off            |
//! | `-vvv`    | TRACE            | DEBUG          |
//! | `--quiet` | ERROR            | off            |
//!
//! A non-empty `RUST_LOG` replaces the table entirely.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

const CRATES: [&str; 3] = ["bvbuilder", "bvbuilder_core", "bvbuilder_adapters"];

/// Install the global subscriber. Call once, before the first event.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(args)));

    let layer = fmt::layer()
        .with_target(args.verbose >= 2)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry().with(filter);
    // Timestamps only help once there is enough output to correlate.
    let installed = if args.verbose >= 2 {
        registry.with(layer).try_init()
    } else {
        registry.with(layer.without_time()).try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))
}

/// Filter directives for the given flags.
fn directives(args: &GlobalArgs) -> String {
    let level = derive_level(args);
    let mut parts: Vec<String> = CRATES.iter().map(|c| format!("{c}={level}")).collect();
    if level == "trace" {
        parts.push("sqlx::query=debug".into());
    }
    parts.join(",")
}

fn derive_level(args: &GlobalArgs) -> &'static str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
