//! Implementation of the generation commands: `crud`, `all`, `model`,
//! `controller` and `route`.
//!
//! Responsibility: validate the arguments, settle the auth question, wire the
//! adapters the configuration asks for, and print one line per outcome.  No
//! business logic lives here.

use std::path::PathBuf;

use indicatif::ProgressBar;
use serde::Serialize;
use tracing::{debug, info, instrument};

use bvbuilder_adapters::{InMemoryStore, LocalFilesystem, MySqlDatabase, SimpleRenderer};
use bvbuilder_core::prelude::*;

use crate::{
    cli::{AuthArgs, ResourceArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
    prompt::Prompter,
};

pub const AUTH_QUESTION: &str = "Protect these routes with authMiddleware?";

/// Machine-readable result for `--output-format json`.
#[derive(Debug, Serialize)]
struct GenerationSummary {
    resource: String,
    version: String,
    flavor: String,
    auth: bool,
    files: Vec<PathBuf>,
    tables_ready: Vec<String>,
    table_failures: Vec<String>,
}

/// Execute one generation command.
///
/// Dispatch sequence:
/// 1. Validate the resource name and version segment
/// 2. Answer the auth question (flag, else prompt) when the plan asks it
/// 3. Build the skeleton store, renderer, filesystem and provisioner
/// 4. Generate, printing each written file and each table outcome
#[instrument(skip_all, fields(resource = %args.name, version = %args.version))]
pub fn execute(
    plan: GenerationPlan,
    args: ResourceArgs,
    auth: AuthArgs,
    config: &AppConfig,
    output: &OutputManager,
    prompter: &mut dyn Prompter,
) -> CliResult<()> {
    // 1. Validate before anything touches the disk
    let names = ResourceName::parse(&args.name)
        .with_cli_context(|| "resource name")?
        .derive();
    let version = ApiVersion::parse(&args.version).with_cli_context(|| "version")?;

    // 2. Auth
    let auth = if plan.asks_for_auth() {
        match auth.answer() {
            Some(answer) => answer,
            None => prompter.confirm(AUTH_QUESTION, false)?,
        }
    } else {
        false
    };

    let root = args.root.clone().unwrap_or_else(|| PathBuf::from("."));
    let config = &config
        .with_project_env(&root)
        .map_err(|e| CliError::ConfigError {
            message: format!("{e:#}"),
            source: Some(e.into()),
        })?;
    let provision = !args.skip_db && config.database.provision;
    debug!(auth, provision, root = %root.display(), "Generation settings resolved");

    // 3. Adapters
    let service = ScaffoldService::new(
        Box::new(build_store(config)?),
        Box::new(SimpleRenderer::new()),
        Box::new(LocalFilesystem::new()),
        provision.then(|| {
            Box::new(MySqlDatabase::new(config.database.connection_settings()))
                as Box<dyn SchemaProvisioner>
        }),
    );

    let request = GenerationRequest {
        names,
        version,
        plan,
        auth,
        root,
    };

    // 4. Generate
    info!(resource = %request.names.name, "Generation started");
    let report = run_with_progress(&service, &request, output)?;

    if output.is_json() {
        output.json(&GenerationSummary::new(&request, &report))?;
    } else {
        output.success(&format!(
            "Generated {} file(s) for '{}' ({})",
            report.written.len(),
            request.names.name,
            request.version
        ))?;
    }

    Ok(())
}

/// Built-in skeletons, replaced by overrides when a directory is configured.
pub fn build_store(config: &AppConfig) -> CliResult<InMemoryStore> {
    let store = match &config.templates.local_path {
        Some(dir) => InMemoryStore::with_overrides(dir)?,
        None => InMemoryStore::with_builtin()?,
    };
    Ok(store)
}

/// Drive the service, turning each event into one output line.
fn run_with_progress(
    service: &ScaffoldService,
    request: &GenerationRequest,
    output: &OutputManager,
) -> CliResult<GenerationReport> {
    let mut spinner: Option<ProgressBar> = None;
    let mut write_error = None;

    let result = service.generate(request, |event| {
        if let Some(s) = spinner.take() {
            s.finish_and_clear();
        }
        if output.is_json() {
            return;
        }
        let printed = match event {
            GenerationEvent::Written { path, .. } => {
                output.success(&format!("Created {}", path.display()))
            }
            GenerationEvent::Provisioning { table } => {
                spinner = output.spinner(format!("Creating table `{table}`..."));
                Ok(())
            }
            GenerationEvent::TableReady { table } => {
                output.success(&format!("Table `{table}` is ready"))
            }
            GenerationEvent::TableFailed { table, reason } => {
                output.warning(&format!("Could not create table `{table}`: {reason}"))
            }
            GenerationEvent::ProvisionSkipped { table } => {
                output.info(&format!("Skipped table `{table}` (database disabled)"))
            }
        };
        if let Err(e) = printed {
            write_error.get_or_insert(e);
        }
    });

    if let Some(s) = spinner {
        s.finish_and_clear();
    }
    let report = result?;
    if let Some(e) = write_error {
        return Err(e.into());
    }
    Ok(report)
}

impl GenerationSummary {
    fn new(request: &GenerationRequest, report: &GenerationReport) -> Self {
        Self {
            resource: request.names.name.clone(),
            version: request.version.to_string(),
            flavor: request.plan.flavor.to_string(),
            auth: request.effective_auth(),
            files: report.written.clone(),
            tables_ready: report.tables_ready.clone(),
            table_failures: report.table_failures.clone(),
        }
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
    use std::{fs, path::Path};
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

    fn args(name: &str, root: &Path) -> ResourceArgs {
        ResourceArgs {
            name: name.into(),
            version: "v1".into(),
            root: Some(root.to_path_buf()),
            skip_db: true,
        }
    }

    #[test]
    fn route_prompts_when_no_flag_is_given() {
        let temp = TempDir::new().unwrap();
        let mut prompter = ScriptedPrompter::confirming(true);

        execute(
            GenerationPlan::single(ArtifactKind::Route),
            args("product", temp.path()),
            AuthArgs::default(),
            &AppConfig::default(),
            &quiet_output(),
            &mut prompter,
        )
        .unwrap();

        assert_eq!(prompter.asked, vec![AUTH_QUESTION]);
        let route = fs::read_to_string(temp.path().join("src/v1/routes/productRoutes.js")).unwrap();
        assert!(route.contains("authMiddleware"));
    }

    #[test]
    fn flag_answers_without_prompting() {
        let temp = TempDir::new().unwrap();
        let mut prompter = ScriptedPrompter::default();

        execute(
            GenerationPlan::all(),
            args("product", temp.path()),
            AuthArgs {
                auth: false,
                no_auth: true,
            },
            &AppConfig::default(),
            &quiet_output(),
            &mut prompter,
        )
        .unwrap();

        assert!(prompter.asked.is_empty());
        assert!(temp.path().join("src/v1/models/productModel.js").exists());
        assert!(temp.path().join("src/v1/controllers/productController.js").exists());
    }

    #[test]
    fn crud_never_prompts() {
        let temp = TempDir::new().unwrap();
        let mut prompter = ScriptedPrompter::default();

        execute(
            GenerationPlan::crud(),
            args("order", temp.path()),
            AuthArgs::default(),
            &AppConfig::default(),
            &quiet_output(),
            &mut prompter,
        )
        .unwrap();

        assert!(prompter.asked.is_empty());
        assert!(temp.path().join("src/v1/routes/orderRoutes.js").exists());
    }

    #[test]
    fn invalid_name_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let err = execute(
            GenerationPlan::crud(),
            args("1product", temp.path()),
            AuthArgs::default(),
            &AppConfig::default(),
            &quiet_output(),
            &mut ScriptedPrompter::default(),
        )
        .unwrap_err();

        assert!(matches!(err, CliError::Core(_)));
        assert_eq!(err.exit_code(), 2);
        assert!(!temp.path().join("src").exists());
    }

    #[test]
    fn invalid_version_is_rejected() {
        let temp = TempDir::new().unwrap();
        let mut bad = args("product", temp.path());
        bad.version = "..".into();
        let err = execute(
            GenerationPlan::crud(),
            bad,
            AuthArgs::default(),
            &AppConfig::default(),
            &quiet_output(),
            &mut ScriptedPrompter::default(),
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn missing_override_directory_is_a_configuration_error() {
        let mut config = AppConfig::default();
        config.templates.local_path = Some(PathBuf::from("/definitely/not/here"));
        let err = build_store(&config).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn project_env_under_root_is_honoured() {
        let project = TempDir::new().unwrap();
        let templates = TempDir::new().unwrap();
        fs::write(templates.path().join("route.basic.tmpl"), "// routes for {{NAME}}\n").unwrap();
        fs::write(
            project.path().join(".env"),
            format!("BVBUILDER_TEMPLATES_DIR={}\n", templates.path().display()),
        )
        .unwrap();

        execute(
            GenerationPlan::single(ArtifactKind::Route),
            args("product", project.path()),
            AuthArgs {
                auth: false,
                no_auth: true,
            },
            &AppConfig::default(),
            &quiet_output(),
            &mut ScriptedPrompter::default(),
        )
        .unwrap();

        let route =
            fs::read_to_string(project.path().join("src/v1/routes/productRoutes.js")).unwrap();
        assert_eq!(route, "// routes for product\n");
    }

    #[test]
    fn override_replaces_builtin_skeleton() {
        let templates = TempDir::new().unwrap();
        fs::write(
            templates.path().join("model.basic.tmpl"),
            "// custom model for {{TABLE_NAME}}\n",
        )
        .unwrap();
        let mut config = AppConfig::default();
        config.templates.local_path = Some(templates.path().to_path_buf());

        let project = TempDir::new().unwrap();
        execute(
            GenerationPlan::single(ArtifactKind::Model),
            args("product", project.path()),
            AuthArgs::default(),
            &config,
            &quiet_output(),
            &mut ScriptedPrompter::default(),
        )
        .unwrap();

        let model =
            fs::read_to_string(project.path().join("src/v1/models/productModel.js")).unwrap();
        assert_eq!(model, "// custom model for products\n");
    }
}
