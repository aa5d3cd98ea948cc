//! Domain value objects: ApiVersion, ArtifactKind, Flavor, DatabaseName.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity.
//! Each one owns its string representation and its parser; nothing else
//! in the crate matches on raw strings.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ApiVersion ───────────────────────────────────────────────────────────────

/// Path segment namespacing generated files and documented URLs (`v1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiVersion(String);

impl ApiVersion {
    pub const DEFAULT: &'static str = "v1";

    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        let reject = |reason: &str| DomainError::InvalidVersion {
            version: raw.clone(),
            reason: reason.into(),
        };

        if raw.is_empty() {
            return Err(reject("version cannot be empty"));
        }
        if raw == "." || raw == ".." {
            return Err(reject("version cannot be a relative path component"));
        }
        if let Some(bad) = raw
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
        {
            return Err(reject(&format!("character '{bad}' is not allowed")));
        }

        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ApiVersion {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ApiVersion> for String {
    fn from(value: ApiVersion) -> Self {
        value.0
    }
}

impl FromStr for ApiVersion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ── ArtifactKind ─────────────────────────────────────────────────────────────

/// The three kinds of generated source file.
///
/// Declaration order is generation order: model, controller, route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Model,
    Controller,
    Route,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 3] = [Self::Model, Self::Controller, Self::Route];

    /// Generated sources are plain CommonJS modules.
    pub const FILE_EXTENSION: &'static str = "js";

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Controller => "controller",
            Self::Route => "route",
        }
    }

    /// Directory under `src/<version>/` holding this kind of file.
    pub const fn directory(&self) -> &'static str {
        match self {
            Self::Model => "models",
            Self::Controller => "controllers",
            Self::Route => "routes",
        }
    }

    /// Only models are backed by a table.
    pub const fn needs_table(&self) -> bool {
        matches!(self, Self::Model)
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "model" => Ok(Self::Model),
            "controller" => Ok(Self::Controller),
            "route" | "routes" => Ok(Self::Route),
            other => Err(DomainError::UnknownArtifactKind(other.to_string())),
        }
    }
}

// ── Flavor ───────────────────────────────────────────────────────────────────

/// Which generator lineage a template belongs to.
///
/// - `Basic`: list + get-by-id, the default for single-artifact commands
///   and `all`.
/// - `Crud`: full create/read/update/delete, used by `crud`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    #[default]
    Basic,
    Crud,
}

impl Flavor {
    pub const ALL: [Flavor; 2] = [Self::Basic, Self::Crud];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Crud => "crud",
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Flavor {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "crud" => Ok(Self::Crud),
            other => Err(DomainError::UnknownFlavor(other.to_string())),
        }
    }
}

// ── DatabaseName ─────────────────────────────────────────────────────────────

/// Name of the database created by `init`, interpolated into SQL and `.env`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DatabaseName(String);

impl DatabaseName {
    pub const DEFAULT: &'static str = "bv_express_db";

    /// Parse a user answer. Surrounding whitespace is trimmed first.
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        let reject = |reason: &str| DomainError::InvalidDatabaseName {
            name: raw.clone(),
            reason: reason.into(),
        };

        let Some(first) = trimmed.chars().next() else {
            return Err(reject("name cannot be empty"));
        };
        if !first.is_ascii_alphabetic() {
            return Err(reject("name must start with an ASCII letter"));
        }
        if trimmed.len() > 64 {
            return Err(reject("name is longer than 64 characters"));
        }
        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '$')))
        {
            return Err(reject(&format!("character '{bad}' is not allowed")));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DatabaseName {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for DatabaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DatabaseName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<DatabaseName> for String {
    fn from(value: DatabaseName) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_version_is_v1() {
        assert_eq!(ApiVersion::default().as_str(), "v1");
    }

    #[test]
    fn version_accepts_common_segments() {
        for ok in ["v1", "v2", "v2.1", "beta_1", "2024-01"] {
            assert!(ApiVersion::parse(ok).is_ok(), "rejected {ok}");
        }
    }

    #[test]
    fn version_rejects_path_tricks() {
        for bad in ["", ".", "..", "v1/admin", "v1\\x", "v 1"] {
            assert!(
                matches!(
                    ApiVersion::parse(bad),
                    Err(DomainError::InvalidVersion { .. })
                ),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn artifact_kinds_in_generation_order() {
        assert_eq!(
            ArtifactKind::ALL,
            [
                ArtifactKind::Model,
                ArtifactKind::Controller,
                ArtifactKind::Route
            ]
        );
        assert!(ArtifactKind::Model < ArtifactKind::Route);
    }

    #[test]
    fn artifact_directories() {
        assert_eq!(ArtifactKind::Model.directory(), "models");
        assert_eq!(ArtifactKind::Controller.directory(), "controllers");
        assert_eq!(ArtifactKind::Route.directory(), "routes");
    }

    #[test]
    fn only_models_need_tables() {
        assert!(ArtifactKind::Model.needs_table());
        assert!(!ArtifactKind::Controller.needs_table());
        assert!(!ArtifactKind::Route.needs_table());
    }

    #[test]
    fn artifact_kind_parses() {
        assert_eq!("MODEL".parse::<ArtifactKind>().unwrap(), ArtifactKind::Model);
        assert_eq!("routes".parse::<ArtifactKind>().unwrap(), ArtifactKind::Route);
        assert!("view".parse::<ArtifactKind>().is_err());
    }

    #[test]
    fn flavor_parses_and_displays() {
        assert_eq!("crud".parse::<Flavor>().unwrap(), Flavor::Crud);
        assert_eq!(Flavor::Basic.to_string(), "basic");
        assert!("full".parse::<Flavor>().is_err());
        assert_eq!(Flavor::default(), Flavor::Basic);
    }

    #[test]
    fn database_name_trims_and_validates() {
        assert_eq!(DatabaseName::parse("  shop_db ").unwrap().as_str(), "shop_db");
        assert!(DatabaseName::parse("   ").is_err());
        assert!(DatabaseName::parse("shop`; DROP").is_err());
        assert!(DatabaseName::parse("9shop").is_err());
        assert!(DatabaseName::parse("a".repeat(65)).is_err());
    }

    #[test]
    fn default_database_name() {
        assert_eq!(DatabaseName::default().as_str(), "bv_express_db");
    }
}
