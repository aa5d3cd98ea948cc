//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `bvbuilder-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{DatabaseName, RenderContext, Template, TemplateId, TableSchema};
use crate::error::BvResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `bvbuilder_adapters::filesystem::LocalFilesystem` (production)
/// - `bvbuilder_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> BvResult<()>;

    /// Write content to a file, replacing whatever was there.
    fn write_file(&self, path: &Path, content: &str) -> BvResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> BvResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for skeleton lookup.
///
/// Implemented by `bvbuilder_adapters::template_store::InMemoryStore`, which
/// holds the built-ins and any overrides loaded at startup.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateStore: Send + Sync {
    /// Get the skeleton for an id.
    fn get(&self, id: &TemplateId) -> BvResult<Template>;

    /// List every skeleton, ordered by id.
    fn list(&self) -> BvResult<Vec<Template>>;
}

/// Port for template rendering.
///
/// Implemented by `bvbuilder_adapters::renderer::SimpleRenderer`.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Substitute every placeholder in `template`.
    ///
    /// Fails when a placeholder survives substitution.
    fn render(&self, template: &Template, context: &RenderContext) -> BvResult<String>;
}

/// Port for best-effort table provisioning after a model is written.
///
/// Implementations open one connection per call and close it on every path.
#[cfg_attr(test, mockall::automock)]
pub trait SchemaProvisioner: Send + Sync {
    fn ensure_table(&self, schema: &TableSchema) -> BvResult<()>;
}

/// Port used by `init` to create the application database.
#[cfg_attr(test, mockall::automock)]
pub trait DatabaseBootstrapper: Send + Sync {
    /// Create `database` if absent, select it and run `script`.
    fn bootstrap(&self, database: &DatabaseName, script: &str) -> BvResult<()>;
}
