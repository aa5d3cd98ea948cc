//! Init Service - project initialisation.
//!
//! Merges the database name into `.env`, then creates the database and runs
//! the bootstrap script. Database failures are reported, not returned.

use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::{
    application::ports::{DatabaseBootstrapper, Filesystem},
    domain::{DatabaseName, env_file, schema::BOOTSTRAP_USERS_SQL},
    error::BvResult,
};

pub const ENV_FILE: &str = ".env";
pub const ENV_EXAMPLE_FILE: &str = ".env.example";

/// SQL run after the database is selected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BootstrapScript {
    /// The built-in `users` table.
    #[default]
    Builtin,
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct InitRequest {
    pub root: PathBuf,
    pub database: DatabaseName,
    pub script: BootstrapScript,
}

/// Result of the `.env` step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvMergeOutcome {
    Written { source: PathBuf, target: PathBuf },
    /// Neither `.env.example` nor `.env` exists.
    NoSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitEvent {
    Env(EnvMergeOutcome),
    Connecting { database: String },
    DatabaseReady { database: String },
    DatabaseFailed { database: String, reason: String },
    /// No bootstrapper configured.
    DatabaseSkipped { database: String },
}

pub struct InitService {
    filesystem: Box<dyn Filesystem>,
    bootstrapper: Option<Box<dyn DatabaseBootstrapper>>,
}

impl InitService {
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        bootstrapper: Option<Box<dyn DatabaseBootstrapper>>,
    ) -> Self {
        Self {
            filesystem,
            bootstrapper,
        }
    }

    /// Run all initialisation steps.
    ///
    /// Returns `Ok(true)` when the database step succeeded or was skipped.
    /// Filesystem failures (unreadable `--sql` file, unwritable `.env`)
    /// abort before the database is touched.
    #[instrument(skip_all, fields(database = %request.database, root = %request.root.display()))]
    pub fn initialize(
        &self,
        request: &InitRequest,
        mut on_event: impl FnMut(&InitEvent),
    ) -> BvResult<bool> {
        let script = self.load_script(&request.script)?;

        let outcome = self.merge_env(&request.root, &request.database)?;
        on_event(&InitEvent::Env(outcome));

        let database = request.database.to_string();
        let Some(bootstrapper) = &self.bootstrapper else {
            on_event(&InitEvent::DatabaseSkipped { database });
            return Ok(true);
        };

        on_event(&InitEvent::Connecting {
            database: database.clone(),
        });
        match bootstrapper.bootstrap(&request.database, &script) {
            Ok(()) => {
                info!("Database initialised");
                on_event(&InitEvent::DatabaseReady { database });
                Ok(true)
            }
            Err(e) => {
                warn!(error = %e, "Database initialisation failed");
                on_event(&InitEvent::DatabaseFailed {
                    database,
                    reason: e.to_string(),
                });
                Ok(false)
            }
        }
    }

    /// Write `.env` with `DB_NAME` set, sourcing `.env.example` first.
    pub fn merge_env(&self, root: &Path, database: &DatabaseName) -> BvResult<EnvMergeOutcome> {
        let target = root.join(ENV_FILE);
        let source = [root.join(ENV_EXAMPLE_FILE), target.clone()]
            .into_iter()
            .find(|candidate| self.filesystem.exists(candidate));

        let Some(source) = source else {
            info!("No env file to merge");
            return Ok(EnvMergeOutcome::NoSource);
        };

        let body = self.filesystem.read_to_string(&source)?;
        self.filesystem
            .write_file(&target, &env_file::merge_db_name(&body, database))?;
        info!(source = %source.display(), "Env file written");

        Ok(EnvMergeOutcome::Written { source, target })
    }

    fn load_script(&self, script: &BootstrapScript) -> BvResult<String> {
        match script {
            BootstrapScript::Builtin => Ok(BOOTSTRAP_USERS_SQL.to_string()),
            BootstrapScript::File(path) => self.filesystem.read_to_string(path),
        }
    }
}
