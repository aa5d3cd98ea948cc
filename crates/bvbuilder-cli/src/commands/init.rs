//! `bvbuilder init`: write `DB_NAME` into `.env` and create the database.

use std::path::PathBuf;

use indicatif::ProgressBar;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use bvbuilder_adapters::{ConnectionSettings, LocalFilesystem, MySqlDatabase};
use bvbuilder_core::{
    application::{ApplicationError, BootstrapScript, EnvMergeOutcome, InitEvent, InitRequest},
    prelude::*,
};

use crate::{
    cli::InitArgs,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
    prompt::Prompter,
};

pub const DB_NAME_QUESTION: &str = "Database name";

/// Machine-readable result for `--output-format json`.
#[derive(Debug, Default, Serialize)]
struct InitSummary {
    database: String,
    env_source: Option<PathBuf>,
    env_target: Option<PathBuf>,
    database_ready: bool,
    database_error: Option<String>,
}

/// Run the project initializer.
///
/// Database failures are printed and the command still succeeds; an
/// unreadable `--sql` file or an unwritable `.env` aborts it.
#[instrument(skip_all)]
pub fn execute(
    args: InitArgs,
    config: &AppConfig,
    output: &OutputManager,
    prompter: &mut dyn Prompter,
) -> CliResult<()> {
    let database = match &args.db_name {
        Some(name) => DatabaseName::parse(name.as_str()).with_cli_context(|| "database name")?,
        None => ask_database_name(prompter, output)?,
    };

    let request = InitRequest {
        root: args.root.clone().unwrap_or_else(|| PathBuf::from(".")),
        database,
        script: args
            .sql
            .clone()
            .map(BootstrapScript::File)
            .unwrap_or_default(),
    };

    let bootstrapper = (!args.skip_db).then(|| {
        Box::new(ProjectBootstrapper {
            config: config.clone(),
            root: request.root.clone(),
        }) as Box<dyn DatabaseBootstrapper>
    });
    let service = InitService::new(Box::new(LocalFilesystem::new()), bootstrapper);

    info!(database = %request.database, "Initialisation started");

    let mut summary = InitSummary {
        database: request.database.to_string(),
        ..InitSummary::default()
    };
    let mut spinner: Option<ProgressBar> = None;
    let mut write_error = None;

    let result = service.initialize(&request, |event| {
        if let Some(s) = spinner.take() {
            s.finish_and_clear();
        }
        record(&mut summary, event);
        if output.is_json() {
            return;
        }
        let printed = match event {
            InitEvent::Env(EnvMergeOutcome::Written { source, target }) => output.success(
                &format!(
                    "Wrote {} with DB_NAME from {}",
                    target.display(),
                    source.display()
                ),
            ),
            InitEvent::Env(EnvMergeOutcome::NoSource) => {
                output.info("No .env.example or .env found; skipped DB_NAME update")
            }
            InitEvent::Connecting { database } => {
                spinner = output.spinner(format!("Creating database `{database}`..."));
                Ok(())
            }
            InitEvent::DatabaseReady { database } => {
                output.success(&format!("Database `{database}` is ready"))
            }
            InitEvent::DatabaseFailed { database, reason } => {
                output.error(&format!("Could not initialise database `{database}`: {reason}"))
            }
            InitEvent::DatabaseSkipped { database } => {
                output.info(&format!("Skipped creating database `{database}`"))
            }
        };
        if let Err(e) = printed {
            write_error.get_or_insert(e);
        }
    });

    if let Some(s) = spinner {
        s.finish_and_clear();
    }
    let database_ok = result?;
    if let Some(e) = write_error {
        return Err(e.into());
    }
    if !database_ok {
        warn!("Database step failed; .env was still updated");
    }

    if output.is_json() {
        output.json(&summary)?;
    }
    Ok(())
}

/// MySQL bootstrapper whose settings are read when the database step runs,
/// so `DB_*` values from the `.env` merged a moment earlier apply.
struct ProjectBootstrapper {
    config: AppConfig,
    root: PathBuf,
}

impl ProjectBootstrapper {
    fn settings(&self) -> BvResult<ConnectionSettings> {
        let config = self
            .config
            .with_project_env(&self.root)
            .map_err(|e| ApplicationError::database(format!("{e:#}")))?;
        Ok(config.database.init_settings())
    }
}

impl DatabaseBootstrapper for ProjectBootstrapper {
    fn bootstrap(&self, database: &DatabaseName, script: &str) -> BvResult<()> {
        let settings = self.settings()?;
        debug!(target_db = %settings.describe(), "Resolved init connection");
        MySqlDatabase::new(settings).bootstrap(database, script)
    }
}

/// Ask until the answer is non-empty, then validate it.
fn ask_database_name(
    prompter: &mut dyn Prompter,
    output: &OutputManager,
) -> CliResult<DatabaseName> {
    loop {
        let answer = prompter.input(DB_NAME_QUESTION, DatabaseName::DEFAULT)?;
        if answer.trim().is_empty() {
            output.warning("Database name cannot be empty")?;
            continue;
        }
        return DatabaseName::parse(answer).with_cli_context(|| "database name");
    }
}

fn record(summary: &mut InitSummary, event: &InitEvent) {
    match event {
        InitEvent::Env(EnvMergeOutcome::Written { source, target }) => {
            summary.env_source = Some(source.clone());
            summary.env_target = Some(target.clone());
        }
        InitEvent::DatabaseReady { .. } => summary.database_ready = true,
        InitEvent::DatabaseFailed { reason, .. } => summary.database_error = Some(reason.clone()),
        InitEvent::Env(EnvMergeOutcome::NoSource)
        | InitEvent::Connecting { .. }
        | InitEvent::DatabaseSkipped { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cli::{GlobalArgs, OutputFormat},
        error::CliError,
        prompt::ScriptedPrompter,
    };
    use std::fs;
    use tempfile::TempDir;

    fn quiet_output() -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet: true,
            no_color: true,
            config: None,
            output_format: OutputFormat::Plain,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    fn args(temp: &TempDir, db_name: Option<&str>) -> InitArgs {
        InitArgs {
            db_name: db_name.map(String::from),
            sql: None,
            root: Some(temp.path().to_path_buf()),
            skip_db: true,
        }
    }

    #[test]
    fn flag_skips_the_prompt() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".env.example"), "DB_NAME=x\nPORT=3000\n").unwrap();
        let mut prompter = ScriptedPrompter::default();

        execute(
            args(&temp, Some("shop")),
            &AppConfig::default(),
            &quiet_output(),
            &mut prompter,
        )
        .unwrap();

        assert!(prompter.asked.is_empty());
        assert_eq!(
            fs::read_to_string(temp.path().join(".env")).unwrap(),
            "DB_NAME=shop\nPORT=3000\n"
        );
    }

    #[test]
    fn empty_answer_is_asked_again() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".env"), "PORT=3000\n").unwrap();
        let mut prompter = ScriptedPrompter::answering(["", "  ", "inventory"]);

        execute(
            args(&temp, None),
            &AppConfig::default(),
            &quiet_output(),
            &mut prompter,
        )
        .unwrap();

        assert_eq!(prompter.asked.len(), 3);
        assert_eq!(
            fs::read_to_string(temp.path().join(".env")).unwrap(),
            "PORT=3000\nDB_NAME=inventory\n"
        );
    }

    #[test]
    fn invalid_database_name_exits_2() {
        let temp = TempDir::new().unwrap();
        let err = execute(
            args(&temp, Some("shop;drop")),
            &AppConfig::default(),
            &quiet_output(),
            &mut ScriptedPrompter::default(),
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(!temp.path().join(".env").exists());
    }

    #[test]
    fn missing_sql_file_aborts_before_env() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".env.example"), "DB_NAME=x\n").unwrap();
        let mut init = args(&temp, Some("shop"));
        init.sql = Some(temp.path().join("missing.sql"));

        let err = execute(
            init,
            &AppConfig::default(),
            &quiet_output(),
            &mut ScriptedPrompter::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Core(_)));
        assert!(!temp.path().join(".env").exists());
    }

    #[test]
    fn connection_settings_come_from_the_merged_env() {
        let temp = TempDir::new().unwrap();
        let bootstrapper = ProjectBootstrapper {
            config: AppConfig::default(),
            root: temp.path().to_path_buf(),
        };
        assert_eq!(bootstrapper.settings().unwrap().host, "localhost");

        // Written after construction, as the env merge does.
        fs::write(
            temp.path().join(".env"),
            "DB_HOST=db.project\nDB_PORT=3310\nDB_USER=app\nDB_NAME=shop\n",
        )
        .unwrap();
        let settings = bootstrapper.settings().unwrap();
        assert_eq!(settings.host, "db.project");
        assert_eq!(settings.port, 3310);
        assert_eq!(settings.user, "app");
        assert_eq!(settings.database, None);
    }

    #[test]
    fn no_env_files_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        execute(
            args(&temp, Some("shop")),
            &AppConfig::default(),
            &quiet_output(),
            &mut ScriptedPrompter::default(),
        )
        .unwrap();
        assert!(!temp.path().join(".env").exists());
    }
}
