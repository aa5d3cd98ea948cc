//! Template Service - skeleton queries.
//!
//! Separated from ScaffoldService for single responsibility: `list` and
//! previews never touch the filesystem or the database.

use serde::Serialize;

use crate::{
    application::ports::TemplateStore,
    domain::{Template, TemplateId, TemplateOrigin},
    error::BvResult,
};

/// Information about a template for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    pub id: String,
    pub kind: String,
    pub flavor: String,
    /// `builtin` or the override file path.
    pub origin: String,
    pub overridden: bool,
}

impl From<&Template> for TemplateInfo {
    fn from(template: &Template) -> Self {
        Self {
            id: template.id.to_string(),
            kind: template.id.kind.to_string(),
            flavor: template.id.flavor.to_string(),
            origin: template.origin.to_string(),
            overridden: matches!(template.origin, TemplateOrigin::Override(_)),
        }
    }
}

/// Service for template operations.
pub struct TemplateService {
    store: Box<dyn TemplateStore>,
}

impl TemplateService {
    /// Create a new template service.
    pub fn new(store: Box<dyn TemplateStore>) -> Self {
        Self { store }
    }

    /// Get a template by ID.
    pub fn get(&self, id: &TemplateId) -> BvResult<Template> {
        self.store.get(id)
    }

    /// List all templates as display records.
    pub fn list(&self) -> BvResult<Vec<TemplateInfo>> {
        Ok(self.store.list()?.iter().map(TemplateInfo::from).collect())
    }
}
