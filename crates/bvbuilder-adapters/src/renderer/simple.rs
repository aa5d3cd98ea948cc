//! Simple variable substitution renderer.

use bvbuilder_core::{
    application::ports::TemplateRenderer,
    domain::{RenderContext, Template},
    error::BvResult,
};
use tracing::instrument;

/// Renderer using plain `{{VARIABLE}}` substitution.
///
/// Output that still contains a placeholder is rejected, so a typo in an
/// override file fails the command instead of landing on disk.
pub struct SimpleRenderer;

impl SimpleRenderer {
    /// Create a new simple renderer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for SimpleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(skip_all, fields(template = %template.id))]
    fn render(&self, template: &Template, context: &RenderContext) -> BvResult<String> {
        Ok(context.render_strict(template)?)
    }
}
