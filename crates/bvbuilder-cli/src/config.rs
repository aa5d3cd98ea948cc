//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by reference.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASS`,
//!    `DB_NAME`, `BVBUILDER_TEMPLATES_DIR` (a `.env` file in the working
//!    directory is loaded into the environment first)
//! 3. The project's own `.env` when `--root` points elsewhere or `init`
//!    has just written it ([`AppConfig::with_project_env`])
//! 4. Config file (`--config FILE`, else [`AppConfig::config_path`])
//! 5. Built-in defaults (always present)

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use config::{Config, ConfigBuilder, File, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};

use bvbuilder_adapters::ConnectionSettings;

/// Password used by `init` when none is configured.
pub const INIT_DEFAULT_PASSWORD: &str = "root";

const MASK: &str = "********";

/// Environment variable → config key.
const ENV_OVERRIDES: [(&str, &str); 6] = [
    ("DB_HOST", "database.host"),
    ("DB_PORT", "database.port"),
    ("DB_USER", "database.user"),
    ("DB_PASS", "database.password"),
    ("DB_NAME", "database.name"),
    ("BVBUILDER_TEMPLATES_DIR", "templates.local_path"),
];

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// MySQL connection used for table and database creation.
    pub database: DatabaseConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Template settings.
    pub templates: TemplateConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Database selected by generation commands.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `false` behaves like `--skip-db` on every generation command.
    pub provision: bool,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`; `--output-format` wins.
    pub format: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory of `<kind>.<flavor>.tmpl` overrides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_path: Option<PathBuf>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        let defaults = ConnectionSettings::default();
        Self {
            host: defaults.host,
            port: defaults.port,
            user: defaults.user,
            password: None,
            name: None,
            provision: true,
            connect_timeout_secs: defaults.connect_timeout.as_secs(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl DatabaseConfig {
    /// Settings for provisioning resource tables.
    pub fn connection_settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            host: self.host.clone(),
            port: self.port,
            user: self.user.clone(),
            password: self.password.clone().unwrap_or_default(),
            database: self.name.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }

    /// Settings for `init`: server level, `root` password unless configured.
    pub fn init_settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            password: self
                .password
                .clone()
                .unwrap_or_else(|| INIT_DEFAULT_PASSWORD.to_string()),
            database: None,
            ..self.connection_settings()
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let env = ENV_OVERRIDES
            .iter()
            .map(|(var, key)| (*key, std::env::var(var).ok()));
        Self::load_with(config_file, env)
    }

    fn load_with<'a>(
        config_file: Option<&PathBuf>,
        env: impl IntoIterator<Item = (&'a str, Option<String>)>,
    ) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to build default configuration")?;

        let file = match config_file {
            Some(path) => File::from(path.as_path())
                .format(FileFormat::Toml)
                .required(true),
            None => File::from(Self::config_path().as_path())
                .format(FileFormat::Toml)
                .required(false),
        };

        let builder = Config::builder().add_source(defaults).add_source(file);
        Self::build(builder, env)
    }

    /// Layer `<root>/.env` under the process environment.
    ///
    /// Variables already set in the process keep their value; a missing file
    /// leaves the configuration unchanged.
    pub fn with_project_env(&self, root: &Path) -> anyhow::Result<Self> {
        self.with_env_file(&root.join(".env"), |var| std::env::var(var).ok())
    }

    fn with_env_file(
        &self,
        path: &Path,
        process_env: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        if !path.is_file() {
            return Ok(self.clone());
        }

        let mut from_file = Vec::new();
        for item in dotenvy::from_path_iter(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
        {
            from_file.push(item.with_context(|| format!("Malformed line in {}", path.display()))?);
        }

        let env = ENV_OVERRIDES
            .iter()
            .filter(|(var, _)| process_env(var).is_none_or(|v| v.is_empty()))
            .map(|(var, key)| {
                let value = from_file
                    .iter()
                    .find(|(name, _)| name.as_str() == *var)
                    .map(|(_, value)| value.clone());
                (*key, value)
            });

        let current = Config::try_from(self).context("Failed to snapshot configuration")?;
        Self::build(Config::builder().add_source(current), env)
    }

    fn build<'a>(
        mut builder: ConfigBuilder<DefaultState>,
        env: impl IntoIterator<Item = (&'a str, Option<String>)>,
    ) -> anyhow::Result<Self> {
        for (key, value) in env {
            builder = builder
                .set_override_option(key, value.filter(|v| !v.is_empty()))
                .with_context(|| format!("Invalid override for '{key}'"))?;
        }

        builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.bvbuilder.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "bvbuilder", "bvbuilder")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".bvbuilder.toml"))
    }

    /// Copy safe to print: the password is replaced by a mask.
    pub fn masked(&self) -> Self {
        let mut copy = self.clone();
        if copy.database.password.is_some() {
            copy.database.password = Some(MASK.to_string());
        }
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn no_env() -> Vec<(&'static str, Option<String>)> {
        Vec::new()
    }

    #[test]
    fn defaults_match_local_mysql() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.database.host, "localhost");
        assert_eq!(cfg.database.port, 3306);
        assert_eq!(cfg.database.user, "root");
        assert!(cfg.database.password.is_none());
        assert!(cfg.database.provision);
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn file_values_override_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bv.toml");
        fs::write(&path, "[database]\nhost = \"db.internal\"\nprovision = false\n").unwrap();

        let cfg = AppConfig::load_with(Some(&path), no_env()).unwrap();
        assert_eq!(cfg.database.host, "db.internal");
        assert!(!cfg.database.provision);
        assert_eq!(cfg.database.port, 3306);
    }

    #[test]
    fn env_overrides_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bv.toml");
        fs::write(&path, "[database]\nhost = \"db.internal\"\n").unwrap();

        let cfg = AppConfig::load_with(
            Some(&path),
            [
                ("database.host", Some("10.0.0.5".to_string())),
                ("database.port", Some("3307".to_string())),
                ("database.name", Some("shop".to_string())),
                ("templates.local_path", Some("/tpl".to_string())),
            ],
        )
        .unwrap();
        assert_eq!(cfg.database.host, "10.0.0.5");
        assert_eq!(cfg.database.port, 3307);
        assert_eq!(cfg.database.name.as_deref(), Some("shop"));
        assert_eq!(cfg.templates.local_path, Some(PathBuf::from("/tpl")));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let missing = PathBuf::from("/definitely/not/here.toml");
        assert!(AppConfig::load_with(Some(&missing), no_env()).is_err());
    }

    #[test]
    fn bad_port_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bv.toml");
        fs::write(&path, "").unwrap();
        let result =
            AppConfig::load_with(Some(&path), [("database.port", Some("abc".to_string()))]);
        assert!(result.is_err());
    }

    #[test]
    fn project_env_file_fills_unset_variables() {
        let temp = TempDir::new().unwrap();
        let env = temp.path().join(".env");
        fs::write(&env, "PORT=3000\nDB_HOST=db.project\nDB_PASS=hunter2\nDB_NAME=shop\n").unwrap();

        let cfg = AppConfig::default().with_env_file(&env, |_| None).unwrap();
        assert_eq!(cfg.database.host, "db.project");
        assert_eq!(cfg.database.password.as_deref(), Some("hunter2"));
        assert_eq!(cfg.database.name.as_deref(), Some("shop"));
        assert_eq!(cfg.database.port, 3306);
    }

    #[test]
    fn process_environment_beats_project_env_file() {
        let temp = TempDir::new().unwrap();
        let env = temp.path().join(".env");
        fs::write(&env, "DB_HOST=db.project\nDB_USER=app\n").unwrap();

        let cfg = AppConfig::default()
            .with_env_file(&env, |var| (var == "DB_HOST").then(|| "10.0.0.5".to_string()))
            .unwrap();
        // The process value is already in the config; the file must not replace it.
        assert_eq!(cfg.database.host, "localhost");
        assert_eq!(cfg.database.user, "app");
    }

    #[test]
    fn missing_project_env_file_changes_nothing() {
        let temp = TempDir::new().unwrap();
        let mut base = AppConfig::default();
        base.database.host = "db.internal".into();
        assert_eq!(base.with_project_env(temp.path()).unwrap(), base);
    }

    #[test]
    fn init_uses_root_password_unless_configured() {
        let mut db = DatabaseConfig::default();
        assert_eq!(db.init_settings().password, "root");
        assert_eq!(db.connection_settings().password, "");

        db.password = Some("s3cret".into());
        db.name = Some("shop".into());
        assert_eq!(db.init_settings().password, "s3cret");
        assert_eq!(db.init_settings().database, None);
        assert_eq!(db.connection_settings().database.as_deref(), Some("shop"));
    }

    #[test]
    fn masked_hides_password() {
        let mut cfg = AppConfig::default();
        cfg.database.password = Some("s3cret".into());
        let masked = cfg.masked();
        assert_eq!(masked.database.password.as_deref(), Some(MASK));
        assert_eq!(cfg.database.password.as_deref(), Some("s3cret"));
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
