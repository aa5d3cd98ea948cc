// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel through reports and retries)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("invalid resource name '{name}': {reason}")]
    InvalidResourceName { name: String, reason: String },

    #[error("invalid version segment '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    #[error("invalid database name '{name}': {reason}")]
    InvalidDatabaseName { name: String, reason: String },

    #[error("unknown template '{0}'")]
    UnknownTemplate(String),

    #[error("unknown artifact kind '{0}'")]
    UnknownArtifactKind(String),

    #[error("unknown flavor '{0}'")]
    UnknownFlavor(String),

    // ========================================================================
    // Template Errors
    // ========================================================================
    #[error("template '{template_id}' has no content")]
    EmptyTemplate { template_id: String },

    #[error("template '{template_id}' left placeholder {{{{{placeholder}}}}} unresolved")]
    UnresolvedPlaceholder {
        template_id: String,
        placeholder: String,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidResourceName { .. } => vec![
                "Resource names start with a letter".into(),
                "Use only ASCII letters, digits and underscores".into(),
                "Examples: product, orderItem, blog_post".into(),
            ],
            Self::InvalidVersion { .. } => vec![
                "Version segments look like v1, v2 or v2.1".into(),
                "Use only ASCII letters, digits, '.', '_' and '-'".into(),
            ],
            Self::InvalidDatabaseName { .. } => vec![
                "Database names start with a letter".into(),
                "Use only ASCII letters, digits, '_', '-' and '$'".into(),
            ],
            Self::UnknownTemplate(_) | Self::UnknownArtifactKind(_) | Self::UnknownFlavor(_) => {
                vec![
                    "Template files are named <kind>.<flavor>.tmpl".into(),
                    "Kinds: model, controller, route; flavors: basic, crud".into(),
                    "Run 'bvbuilder list' to see the available templates".into(),
                ]
            }
            Self::EmptyTemplate { template_id } => vec![
                format!("Template '{}' is empty", template_id),
                "Fix or remove the override file and try again".into(),
            ],
            Self::UnresolvedPlaceholder { placeholder, .. } => vec![
                format!("'{{{{{}}}}}' is not a known placeholder", placeholder),
                "Known placeholders: NAME, CLASS_NAME, PLURAL_NAME, TABLE_NAME, \
                 CLASS_PLURAL, VERSION, AUTH_IMPORT, AUTH_MIDDLEWARE"
                    .into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidResourceName { .. }
            | Self::InvalidVersion { .. }
            | Self::InvalidDatabaseName { .. } => ErrorCategory::Validation,
            Self::UnknownTemplate(_) | Self::UnknownArtifactKind(_) | Self::UnknownFlavor(_) => {
                ErrorCategory::NotFound
            }
            Self::EmptyTemplate { .. } | Self::UnresolvedPlaceholder { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
