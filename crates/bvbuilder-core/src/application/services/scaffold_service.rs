//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates one generation command:
//! 1. Resolve the skeleton for each planned artifact
//! 2. Render it with the resource's render context
//! 3. Write it under `src/<version>/...`
//! 4. For models, provision the backing table (best-effort)
//!
//! Progress is streamed through a caller-supplied event sink so the CLI can
//! print one line per outcome as it happens; a write failure aborts the run
//! after earlier files were already reported.

use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::{Filesystem, SchemaProvisioner, TemplateRenderer, TemplateStore},
    domain::{
        ApiVersion, ArtifactKind, GeneratedArtifact, GenerationPlan, RenderContext, ResourceNames,
        TableSchema, TemplateId,
    },
    error::BvResult,
};

/// Everything one generation command needs.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub names: ResourceNames,
    pub version: ApiVersion,
    pub plan: GenerationPlan,
    /// Answer to the auth prompt. Ignored for plans that never ask.
    pub auth: bool,
    /// Project root; generated paths are relative to it.
    pub root: PathBuf,
}

impl GenerationRequest {
    /// Auth only applies when the plan asks for it.
    pub fn effective_auth(&self) -> bool {
        self.auth && self.plan.asks_for_auth()
    }
}

/// One observable outcome of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationEvent {
    /// A file was written; the path is relative to the project root.
    Written { kind: ArtifactKind, path: PathBuf },
    /// About to contact the database for `table`.
    Provisioning { table: String },
    TableReady { table: String },
    TableFailed { table: String, reason: String },
    /// Provisioning is disabled for this run.
    ProvisionSkipped { table: String },
}

/// Summary returned after a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub written: Vec<PathBuf>,
    pub tables_ready: Vec<String>,
    pub table_failures: Vec<String>,
}

/// Main generation service.
pub struct ScaffoldService {
    store: Box<dyn TemplateStore>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
    provisioner: Option<Box<dyn SchemaProvisioner>>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// Pass `None` as the provisioner to generate files without touching
    /// the database.
    pub fn new(
        store: Box<dyn TemplateStore>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
        provisioner: Option<Box<dyn SchemaProvisioner>>,
    ) -> Self {
        Self {
            store,
            renderer,
            filesystem,
            provisioner,
        }
    }

    /// Run every step of the plan in order: model, controller, route.
    #[instrument(
        skip_all,
        fields(
            resource = %request.names.name,
            version = %request.version,
            flavor = %request.plan.flavor,
            auth = request.effective_auth()
        )
    )]
    pub fn generate(
        &self,
        request: &GenerationRequest,
        mut on_event: impl FnMut(&GenerationEvent),
    ) -> BvResult<GenerationReport> {
        info!("Generating {} artifact(s)", request.plan.steps.len());

        let context =
            RenderContext::new(&request.names, &request.version).with_auth(request.effective_auth());
        let mut report = GenerationReport::default();

        for &kind in &request.plan.steps {
            let artifact = self.render_artifact(kind, request, &context)?;
            let relative = self.write_artifact(&artifact, &request.root)?;

            report.written.push(relative.clone());
            on_event(&GenerationEvent::Written {
                kind,
                path: relative,
            });

            if kind.needs_table() {
                let schema = TableSchema::for_resource(&request.names);
                match self.provision(&schema, &mut on_event) {
                    Some(true) => report.tables_ready.push(schema.table().to_string()),
                    Some(false) => report.table_failures.push(schema.table().to_string()),
                    None => {}
                }
            }
        }

        info!(files = report.written.len(), "Generation completed");
        Ok(report)
    }

    /// Render one artifact without writing it.
    pub fn render_artifact(
        &self,
        kind: ArtifactKind,
        request: &GenerationRequest,
        context: &RenderContext,
    ) -> BvResult<GeneratedArtifact> {
        let id = TemplateId::new(kind, request.plan.flavor);
        let template = self.store.get(&id)?;
        debug!(template = %id, origin = %template.origin, "Template resolved");

        let content = self.renderer.render(&template, context)?;
        Ok(GeneratedArtifact::new(
            kind,
            &request.names,
            &request.version,
            content,
        ))
    }

    /// Ensure the directory exists and overwrite the file.
    ///
    /// Returns the path relative to the project root.
    fn write_artifact(&self, artifact: &GeneratedArtifact, root: &Path) -> BvResult<PathBuf> {
        let directory = root.join(&artifact.directory);
        self.filesystem.create_dir_all(&directory)?;
        self.filesystem
            .write_file(&directory.join(&artifact.file_name), &artifact.content)?;
        Ok(artifact.relative_path())
    }

    /// `Some(ok)` when provisioning ran, `None` when it is disabled.
    fn provision(
        &self,
        schema: &TableSchema,
        on_event: &mut impl FnMut(&GenerationEvent),
    ) -> Option<bool> {
        let table = schema.table().to_string();
        let Some(provisioner) = &self.provisioner else {
            on_event(&GenerationEvent::ProvisionSkipped { table });
            return None;
        };

        on_event(&GenerationEvent::Provisioning {
            table: table.clone(),
        });
        match provisioner.ensure_table(schema) {
            Ok(()) => {
                info!(table = %table, "Table ready");
                on_event(&GenerationEvent::TableReady { table });
                Some(true)
            }
            Err(e) => {
                warn!(table = %table, error = %e, "Table provisioning failed");
                on_event(&GenerationEvent::TableFailed {
                    table,
                    reason: e.to_string(),
                });
                Some(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        ApplicationError,
        ports::{MockFilesystem, MockSchemaProvisioner, MockTemplateRenderer, MockTemplateStore},
    };
    use crate::domain::{ResourceName, Template};

    fn request(plan: GenerationPlan, auth: bool) -> GenerationRequest {
        GenerationRequest {
            names: ResourceName::parse("product").unwrap().derive(),
            version: ApiVersion::default(),
            plan,
            auth,
            root: PathBuf::from("/project"),
        }
    }

    fn store() -> MockTemplateStore {
        let mut store = MockTemplateStore::new();
        store
            .expect_get()
            .returning(|id| Ok(Template::builtin(*id, "{{TABLE_NAME}} {{AUTH_MIDDLEWARE}}")));
        store
    }

    fn renderer() -> MockTemplateRenderer {
        let mut renderer = MockTemplateRenderer::new();
        renderer
            .expect_render()
            .returning(|template, ctx| Ok(ctx.render(&template.body)));
        renderer
    }

    fn permissive_fs() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));
        fs
    }

    #[test]
    fn crud_writes_three_files_in_order() {
        let mut provisioner = MockSchemaProvisioner::new();
        provisioner
            .expect_ensure_table()
            .withf(|schema| schema.table() == "products")
            .times(1)
            .returning(|_| Ok(()));

        let service = ScaffoldService::new(
            Box::new(store()),
            Box::new(renderer()),
            Box::new(permissive_fs()),
            Some(Box::new(provisioner)),
        );

        let mut events = Vec::new();
        let report = service
            .generate(&request(GenerationPlan::crud(), false), |e| {
                events.push(e.clone())
            })
            .unwrap();

        assert_eq!(
            report.written,
            vec![
                PathBuf::from("src/v1/models/productModel.js"),
                PathBuf::from("src/v1/controllers/productController.js"),
                PathBuf::from("src/v1/routes/productRoutes.js"),
            ]
        );
        assert_eq!(report.tables_ready, vec!["products".to_string()]);
        assert!(matches!(events[1], GenerationEvent::Provisioning { .. }));
        assert!(matches!(events[2], GenerationEvent::TableReady { .. }));
    }

    #[test]
    fn database_failure_does_not_fail_the_run() {
        let mut provisioner = MockSchemaProvisioner::new();
        provisioner
            .expect_ensure_table()
            .returning(|_| Err(ApplicationError::database("connection refused").into()));

        let service = ScaffoldService::new(
            Box::new(store()),
            Box::new(renderer()),
            Box::new(permissive_fs()),
            Some(Box::new(provisioner)),
        );

        let mut failures = Vec::new();
        let report = service
            .generate(&request(GenerationPlan::all(), false), |e| {
                if let GenerationEvent::TableFailed { reason, .. } = e {
                    failures.push(reason.clone());
                }
            })
            .unwrap();

        assert_eq!(report.written.len(), 3);
        assert_eq!(report.table_failures, vec!["products".to_string()]);
        assert!(failures[0].contains("connection refused"));
    }

    #[test]
    fn filesystem_failure_aborts_after_earlier_writes() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|path, _| path.ends_with("models/productModel.js"))
            .returning(|_, _| Ok(()));
        fs.expect_write_file()
            .withf(|path, _| !path.ends_with("models/productModel.js"))
            .returning(|path, _| {
                Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "read-only".into(),
                }
                .into())
            });

        let service =
            ScaffoldService::new(Box::new(store()), Box::new(renderer()), Box::new(fs), None);

        let mut written = Vec::new();
        let result = service.generate(&request(GenerationPlan::crud(), false), |e| {
            if let GenerationEvent::Written { path, .. } = e {
                written.push(path.clone());
            }
        });

        assert!(result.is_err());
        assert_eq!(written, vec![PathBuf::from("src/v1/models/productModel.js")]);
    }

    #[test]
    fn skipped_provisioning_is_reported() {
        let service = ScaffoldService::new(
            Box::new(store()),
            Box::new(renderer()),
            Box::new(permissive_fs()),
            None,
        );

        let mut skipped = false;
        service
            .generate(&request(GenerationPlan::single(ArtifactKind::Model), false), |e| {
                skipped |= matches!(e, GenerationEvent::ProvisionSkipped { .. })
            })
            .unwrap();
        assert!(skipped);
    }

    #[test]
    fn controllers_never_touch_the_database() {
        let mut provisioner = MockSchemaProvisioner::new();
        provisioner.expect_ensure_table().times(0);

        let service = ScaffoldService::new(
            Box::new(store()),
            Box::new(renderer()),
            Box::new(permissive_fs()),
            Some(Box::new(provisioner)),
        );
        let report = service
            .generate(
                &request(GenerationPlan::single(ArtifactKind::Controller), true),
                |_| {},
            )
            .unwrap();
        assert_eq!(report.written.len(), 1);
    }

    #[test]
    fn auth_answer_is_ignored_for_crud() {
        assert!(!request(GenerationPlan::crud(), true).effective_auth());
        assert!(request(GenerationPlan::all(), true).effective_auth());
    }

    #[test]
    fn auth_reaches_the_render_context() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|_, content| content == "products authMiddleware, ")
            .times(1)
            .returning(|_, _| Ok(()));

        let service =
            ScaffoldService::new(Box::new(store()), Box::new(renderer()), Box::new(fs), None);
        service
            .generate(&request(GenerationPlan::single(ArtifactKind::Route), true), |_| {})
            .unwrap();
    }
}
