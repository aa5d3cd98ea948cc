//! Filesystem-based override loader.
//!
//! Discovers `<kind>.<flavor>.tmpl` files in one directory and turns them
//! into [`Template`]s that replace the matching built-ins.
//!
//! # Directory layout expected
//!
//! ```text
//! my-templates/
//! ├── model.crud.tmpl       ← replaces the built-in model.crud
//! ├── route.basic.tmpl      ← replaces the built-in route.basic
//! └── notes.txt             ← ignored (not .tmpl)
//! ```
//!
//! Subdirectories are not searched. A `.tmpl` file whose stem is not a known
//! id (`view.basic.tmpl`, `model.full.tmpl`) is skipped with a `WARN` log.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use bvbuilder_core::{
    application::ApplicationError,
    domain::{Template, TemplateId},
    error::BvResult,
};

pub const OVERRIDE_EXTENSION: &str = "tmpl";

/// Loads override [`Template`]s from a directory.
///
/// # Example
///
/// ```no_run
/// use bvbuilder_adapters::template_loader::FilesystemTemplateLoader;
///
/// let loader = FilesystemTemplateLoader::new("./templates");
/// let overrides = loader.load_all()?;
/// println!("Loaded {} overrides", overrides.len());
/// # Ok::<(), bvbuilder_core::error::BvError>(())
/// ```
pub struct FilesystemTemplateLoader {
    templates_dir: PathBuf,
}

impl FilesystemTemplateLoader {
    /// Create a loader pointed at `templates_dir`.
    ///
    /// The directory does not need to exist yet; [`Self::load_all`] will
    /// return an error if it is missing when called.
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    /// Load every override found directly under the directory.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::TemplateDirectory`] if the directory is
    /// missing, is not a directory, or a `.tmpl` file cannot be read.
    #[instrument(skip(self), fields(dir = %self.templates_dir.display()))]
    pub fn load_all(&self) -> BvResult<Vec<Template>> {
        if !self.templates_dir.is_dir() {
            return Err(self.error("not a directory").into());
        }

        let mut templates = Vec::new();

        for entry in WalkDir::new(&self.templates_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| self.error(format!("directory walk error: {e}")))?;
            let path = entry.path();

            if !entry.file_type().is_file()
                || path.extension().and_then(|ext| ext.to_str()) != Some(OVERRIDE_EXTENSION)
            {
                continue;
            }

            let Some(id) = template_id_for(path) else {
                warn!(
                    file = %path.display(),
                    "skipping override with unknown template id"
                );
                continue;
            };

            let body = fs::read_to_string(path)
                .map_err(|e| self.error(format!("failed to read '{}': {e}", path.display())))?;

            debug!(template = %id, file = %path.display(), "loaded override");
            templates.push(Template::from_override(id, path, body));
        }

        debug!(count = templates.len(), "finished loading overrides");
        Ok(templates)
    }

    fn error(&self, reason: impl Into<String>) -> ApplicationError {
        ApplicationError::TemplateDirectory {
            path: self.templates_dir.clone(),
            reason: reason.into(),
        }
    }
}

/// `route.crud.tmpl` → `route.crud`.
fn template_id_for(path: &Path) -> Option<TemplateId> {
    path.file_stem()?.to_str()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bvbuilder_core::domain::{ArtifactKind, Flavor, TemplateOrigin};
    use tempfile::TempDir;

    fn dir_with(files: &[(&str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(temp.path().join(name), content).unwrap();
        }
        temp
    }

    #[test]
    fn missing_directory_is_an_error() {
        let loader = FilesystemTemplateLoader::new("/definitely/not/here");
        let err = loader.load_all().unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn loads_known_overrides() {
        let temp = dir_with(&[("model.crud.tmpl", "custom {{TABLE_NAME}}")]);
        let templates = FilesystemTemplateLoader::new(temp.path()).load_all().unwrap();

        assert_eq!(templates.len(), 1);
        assert_eq!(
            templates[0].id,
            TemplateId::new(ArtifactKind::Model, Flavor::Crud)
        );
        assert_eq!(templates[0].body, "custom {{TABLE_NAME}}");
        assert!(matches!(templates[0].origin, TemplateOrigin::Override(_)));
    }

    #[test]
    fn unknown_names_and_other_files_are_skipped() {
        let temp = dir_with(&[
            ("view.basic.tmpl", "x"),
            ("model.full.tmpl", "x"),
            ("notes.txt", "x"),
            ("route.basic.tmpl", "r"),
        ]);
        let templates = FilesystemTemplateLoader::new(temp.path()).load_all().unwrap();
        let ids: Vec<_> = templates.iter().map(|t| t.id.to_string()).collect();
        assert_eq!(ids, vec!["route.basic"]);
    }

    #[test]
    fn subdirectories_are_not_searched() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("nested")).unwrap();
        fs::write(temp.path().join("nested/model.basic.tmpl"), "x").unwrap();

        let templates = FilesystemTemplateLoader::new(temp.path()).load_all().unwrap();
        assert!(templates.is_empty());
    }

    #[test]
    fn file_path_is_not_a_directory() {
        let temp = dir_with(&[("model.basic.tmpl", "x")]);
        let loader = FilesystemTemplateLoader::new(temp.path().join("model.basic.tmpl"));
        assert!(loader.load_all().is_err());
    }
}
