//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not naming
//! rules. Naming and template errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while orchestrating generation or initialisation.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Template lookup failed.
    #[error("Template resolution failed: {reason}")]
    TemplateResolution { reason: String },

    /// Template rendering failed.
    #[error("Template rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Connection or statement failure against the database.
    #[error("Database error: {reason}")]
    DatabaseError { reason: String },

    /// Template override directory could not be read.
    #[error("Template directory {path} is unusable: {reason}")]
    TemplateDirectory { path: PathBuf, reason: String },

    /// In-memory adapter lock poisoned.
    #[error("Store lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    pub fn database(reason: impl Into<String>) -> Self {
        Self::DatabaseError {
            reason: reason.into(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateResolution { reason } => vec![
                format!("Resolution failed: {}", reason),
                "Run 'bvbuilder list' to see available templates".into(),
            ],
            Self::RenderingFailed { reason } => vec![
                format!("Rendering failed: {}", reason),
                "Check your template override files for typos in placeholders".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check available disk space".into(),
            ],
            Self::DatabaseError { .. } => vec![
                "Check DB_HOST, DB_PORT, DB_USER, DB_PASS and DB_NAME in your .env".into(),
                "Ensure the MySQL server is running and reachable".into(),
                "Use --skip-db to generate files without touching the database".into(),
            ],
            Self::TemplateDirectory { path, .. } => vec![
                format!("Cannot read templates from: {}", path.display()),
                "Unset BVBUILDER_TEMPLATES_DIR to use the built-in templates".into(),
            ],
            Self::StoreLockError => vec!["This is a bug, please report it".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateResolution { .. } => ErrorCategory::NotFound,
            Self::RenderingFailed { .. } => ErrorCategory::Internal,
            Self::FilesystemError { .. } => ErrorCategory::Internal,
            Self::DatabaseError { .. } => ErrorCategory::Internal,
            Self::TemplateDirectory { .. } => ErrorCategory::Configuration,
            Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
