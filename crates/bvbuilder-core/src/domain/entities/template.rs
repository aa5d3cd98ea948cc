//! Templates and the render context.
//!
//! ```text
//! ┌──────────────────────────────┐        ┌───────────────────────────┐
//! │ Template                     │        │ RenderContext             │
//! │  id:     model.crud          │  +     │  NAME        = product    │
//! │  origin: builtin | override  │ ─────▶ │  TABLE_NAME  = products   │
//! │  body:   "... {{TABLE_NAME}}"│ render │  VERSION     = v1 ...     │
//! └──────────────────────────────┘        └───────────────────────────┘
//! ```
//!
//! A template body is a fixed skeleton with `{{UPPER_SNAKE}}` placeholders.
//! There are no conditionals: optional fragments (the auth middleware) are
//! placeholders whose value is empty when the feature is off.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    naming::ResourceNames,
    value_objects::{ApiVersion, ArtifactKind, Flavor},
};

/// Import line emitted at the top of an authenticated router.
pub const AUTH_IMPORT_LINE: &str =
    r#"const authMiddleware = require("../../middlewares/authMiddleware");"#;

/// Handler prefix threaded before every handler of an authenticated router.
pub const AUTH_MIDDLEWARE_ARG: &str = "authMiddleware, ";

// ── TemplateId ───────────────────────────────────────────────────────────────

/// Identifies one skeleton: `<kind>.<flavor>`, e.g. `route.crud`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TemplateId {
    pub kind: ArtifactKind,
    pub flavor: Flavor,
}

impl TemplateId {
    pub const fn new(kind: ArtifactKind, flavor: Flavor) -> Self {
        Self { kind, flavor }
    }

    /// Every id the generator knows about, in generation order.
    pub fn all() -> impl Iterator<Item = TemplateId> {
        Flavor::ALL.into_iter().flat_map(|flavor| {
            ArtifactKind::ALL
                .into_iter()
                .map(move |kind| TemplateId::new(kind, flavor))
        })
    }

    /// File name used for overrides: `model.crud.tmpl`.
    pub fn override_file_name(&self) -> String {
        format!("{self}.tmpl")
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.kind, self.flavor)
    }
}

impl FromStr for TemplateId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, flavor) = s
            .split_once('.')
            .ok_or_else(|| DomainError::UnknownTemplate(s.to_string()))?;
        Ok(Self::new(kind.parse()?, flavor.parse()?))
    }
}

// ── Template ─────────────────────────────────────────────────────────────────

/// Where a template body came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOrigin {
    /// Compiled into the binary.
    Builtin,
    /// Loaded from a user override directory.
    Override(PathBuf),
}

impl fmt::Display for TemplateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin => f.write_str("builtin"),
            Self::Override(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A skeleton ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub id: TemplateId,
    pub origin: TemplateOrigin,
    pub body: String,
}

impl Template {
    pub fn builtin(id: TemplateId, body: impl Into<String>) -> Self {
        Self {
            id,
            origin: TemplateOrigin::Builtin,
            body: body.into(),
        }
    }

    pub fn from_override(id: TemplateId, path: impl Into<PathBuf>, body: impl Into<String>) -> Self {
        Self {
            id,
            origin: TemplateOrigin::Override(path.into()),
            body: body.into(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.body.trim().is_empty() {
            return Err(DomainError::EmptyTemplate {
                template_id: self.id.to_string(),
            });
        }
        Ok(())
    }
}

// ── RenderContext ────────────────────────────────────────────────────────────

/// Context for template rendering.
///
/// ## Built-in Variables
///
/// | Variable          | Example (`product`, `v1`)        |
/// |-------------------|----------------------------------|
/// | `NAME`            | product                          |
/// | `CLASS_NAME`      | Product                          |
/// | `PLURAL_NAME`     | products                         |
/// | `TABLE_NAME`      | products                         |
/// | `CLASS_PLURAL`    | Products                         |
/// | `VERSION`         | v1                               |
/// | `AUTH_IMPORT`     | require line, or empty           |
/// | `AUTH_MIDDLEWARE` | `authMiddleware, `, or empty     |
#[derive(Debug, Clone)]
pub struct RenderContext {
    variables: HashMap<String, String>,
}

impl RenderContext {
    /// Build the context for one resource. Authentication starts disabled.
    pub fn new(names: &ResourceNames, version: &ApiVersion) -> Self {
        let mut vars = HashMap::new();
        vars.insert("NAME".to_string(), names.name.clone());
        vars.insert("CLASS_NAME".to_string(), names.class_name.clone());
        vars.insert("PLURAL_NAME".to_string(), names.plural_name.clone());
        vars.insert("TABLE_NAME".to_string(), names.table_name.clone());
        vars.insert("CLASS_PLURAL".to_string(), names.class_plural.clone());
        vars.insert("VERSION".to_string(), version.to_string());

        Self { variables: vars }.with_auth(false)
    }

    /// Toggle the auth middleware fragments.
    pub fn with_auth(self, auth: bool) -> Self {
        let (import, middleware) = if auth {
            (AUTH_IMPORT_LINE, AUTH_MIDDLEWARE_ARG)
        } else {
            ("", "")
        };
        self.with_variable("AUTH_IMPORT", import)
            .with_variable("AUTH_MIDDLEWARE", middleware)
    }

    /// Add or override a variable.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Replace every known `{{VARIABLE}}`; unknown placeholders stay as-is.
    pub fn render(&self, template: &str) -> String {
        let mut result = template.to_string();
        for (key, value) in &self.variables {
            let placeholder = format!("{{{{{key}}}}}");
            result = result.replace(&placeholder, value);
        }
        result
    }

    /// Render a template and refuse output that still holds a placeholder.
    pub fn render_strict(&self, template: &Template) -> Result<String, DomainError> {
        template.validate()?;
        let rendered = self.render(&template.body);
        match find_placeholder(&rendered) {
            Some(placeholder) => Err(DomainError::UnresolvedPlaceholder {
                template_id: template.id.to_string(),
                placeholder: placeholder.to_string(),
            }),
            None => Ok(rendered),
        }
    }
}

/// First `{{UPPER_SNAKE}}` token in `text`, without the braces.
fn find_placeholder(text: &str) -> Option<&str> {
    let mut rest = text;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        if let Some(end) = after.find("}}") {
            let candidate = &after[..end];
            if !candidate.is_empty()
                && candidate
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
            {
                return Some(candidate);
            }
        }
        rest = after;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::naming::ResourceName;

    fn ctx(name: &str) -> RenderContext {
        let names = ResourceName::parse(name).unwrap().derive();
        RenderContext::new(&names, &ApiVersion::default())
    }

    #[test]
    fn template_id_round_trips_through_display() {
        let id = TemplateId::new(ArtifactKind::Route, Flavor::Crud);
        assert_eq!(id.to_string(), "route.crud");
        assert_eq!("route.crud".parse::<TemplateId>().unwrap(), id);
    }

    #[test]
    fn template_id_rejects_garbage() {
        assert!("route".parse::<TemplateId>().is_err());
        assert!("view.basic".parse::<TemplateId>().is_err());
        assert!("model.full".parse::<TemplateId>().is_err());
    }

    #[test]
    fn all_ids_cover_six_templates() {
        let ids: Vec<_> = TemplateId::all().collect();
        assert_eq!(ids.len(), 6);
        assert_eq!(ids[0].to_string(), "model.basic");
        assert_eq!(ids[5].to_string(), "route.crud");
    }

    #[test]
    fn override_file_name() {
        let id = TemplateId::new(ArtifactKind::Model, Flavor::Basic);
        assert_eq!(id.override_file_name(), "model.basic.tmpl");
    }

    #[test]
    fn render_substitutes_all_variables() {
        let out = ctx("product").render("{{CLASS_NAME}} -> {{TABLE_NAME}} @ /api/{{VERSION}}/{{PLURAL_NAME}}");
        assert_eq!(out, "Product -> products @ /api/v1/products");
    }

    #[test]
    fn render_leaves_unknown_placeholders() {
        assert_eq!(ctx("product").render("{{UNKNOWN}}"), "{{UNKNOWN}}");
    }

    #[test]
    fn render_does_not_touch_js_template_literals() {
        let out = ctx("product").render("params.push(`%${search}%`);");
        assert_eq!(out, "params.push(`%${search}%`);");
    }

    #[test]
    fn auth_fragments_toggle() {
        let off = ctx("product");
        assert_eq!(off.get("AUTH_MIDDLEWARE"), Some(""));
        assert_eq!(off.get("AUTH_IMPORT"), Some(""));

        let on = ctx("product").with_auth(true);
        assert_eq!(on.get("AUTH_MIDDLEWARE"), Some("authMiddleware, "));
        assert!(on.get("AUTH_IMPORT").unwrap().contains("authMiddleware"));
    }

    #[test]
    fn strict_render_rejects_unresolved() {
        let template = Template::builtin(
            TemplateId::new(ArtifactKind::Model, Flavor::Basic),
            "table {{TABLE_NAME}} owner {{OWNER}}",
        );
        let err = ctx("product").render_strict(&template).unwrap_err();
        assert_eq!(
            err,
            DomainError::UnresolvedPlaceholder {
                template_id: "model.basic".into(),
                placeholder: "OWNER".into(),
            }
        );
    }

    #[test]
    fn strict_render_ignores_lowercase_braces() {
        let template = Template::builtin(
            TemplateId::new(ArtifactKind::Model, Flavor::Basic),
            "const x = {{ a: 1 }}; {{TABLE_NAME}}",
        );
        assert_eq!(
            ctx("product").render_strict(&template).unwrap(),
            "const x = {{ a: 1 }}; products"
        );
    }

    #[test]
    fn strict_render_rejects_empty_template() {
        let template = Template::builtin(TemplateId::new(ArtifactKind::Route, Flavor::Basic), "  \n");
        assert!(matches!(
            ctx("product").render_strict(&template),
            Err(DomainError::EmptyTemplate { .. })
        ));
    }

    #[test]
    fn origin_display() {
        assert_eq!(TemplateOrigin::Builtin.to_string(), "builtin");
        assert_eq!(
            TemplateOrigin::Override(PathBuf::from("tpl/model.basic.tmpl")).to_string(),
            "tpl/model.basic.tmpl"
        );
    }
}
