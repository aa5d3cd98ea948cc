use std::path::{Path, PathBuf};

use crate::domain::{
    naming::ResourceNames,
    value_objects::{ApiVersion, ArtifactKind},
};

/// Root of every generated tree, relative to the project root.
pub const SOURCE_DIR: &str = "src";

/// A rendered file waiting to be written exactly once.
///
/// `directory` is relative to the project root, e.g. `src/v1/models`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub kind: ArtifactKind,
    pub directory: PathBuf,
    pub file_name: String,
    pub content: String,
}

impl GeneratedArtifact {
    pub fn new(
        kind: ArtifactKind,
        names: &ResourceNames,
        version: &ApiVersion,
        content: String,
    ) -> Self {
        Self {
            kind,
            directory: artifact_directory(kind, version),
            file_name: artifact_file_name(kind, names),
            content,
        }
    }

    /// `src/v1/models/productModel.js`
    pub fn relative_path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    /// Absolute (or cwd-relative) location under `root`.
    pub fn path_under(&self, root: &Path) -> PathBuf {
        root.join(self.relative_path())
    }
}

/// `src/<version>/<kind directory>`
pub fn artifact_directory(kind: ArtifactKind, version: &ApiVersion) -> PathBuf {
    PathBuf::from(SOURCE_DIR)
        .join(version.as_str())
        .join(kind.directory())
}

/// `productModel.js`, `productController.js`, `productRoutes.js`
pub fn artifact_file_name(kind: ArtifactKind, names: &ResourceNames) -> String {
    let stem = match kind {
        ArtifactKind::Model => names.model_file(),
        ArtifactKind::Controller => names.controller_file(),
        ArtifactKind::Route => names.routes_file(),
    };
    format!("{stem}.{}", ArtifactKind::FILE_EXTENSION)
}
