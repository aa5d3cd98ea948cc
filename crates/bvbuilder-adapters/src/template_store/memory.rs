//! In-memory template store with built-in templates.

use std::{
    collections::BTreeMap,
    path::Path,
    sync::{Arc, RwLock},
};

use tracing::info;

use bvbuilder_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{Template, TemplateId},
    error::BvResult,
};

use crate::{builtin_templates, template_loader::FilesystemTemplateLoader};

/// Thread-safe in-memory template store.
///
/// Keyed by [`TemplateId`]; inserting an id that already exists replaces it,
/// which is how overrides shadow built-ins.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    inner: Arc<RwLock<BTreeMap<TemplateId, Template>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Create a store with built-in templates loaded.
    pub fn with_builtin() -> BvResult<Self> {
        let store = Self::new();
        for template in builtin_templates::all_templates() {
            store.insert(template)?;
        }
        Ok(store)
    }

    /// Built-ins, then every override found in `dir`.
    pub fn with_overrides(dir: &Path) -> BvResult<Self> {
        let store = Self::with_builtin()?;
        let overrides = FilesystemTemplateLoader::new(dir).load_all()?;
        info!(count = overrides.len(), dir = %dir.display(), "Applying template overrides");
        for template in overrides {
            store.insert(template)?;
        }
        Ok(store)
    }

    /// Insert or replace a template.
    pub fn insert(&self, template: Template) -> BvResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.insert(template.id, template);
        Ok(())
    }

    /// Get the number of templates.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateStore for InMemoryStore {
    fn get(&self, id: &TemplateId) -> BvResult<Template> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.get(id).cloned().ok_or_else(|| {
            ApplicationError::TemplateResolution {
                reason: format!("Template not found: {}", id),
            }
            .into()
        })
    }

    fn list(&self) -> BvResult<Vec<Template>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        Ok(inner.values().cloned().collect())
    }
}
