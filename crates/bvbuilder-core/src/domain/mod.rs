// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for bvbuilder.
//!
//! This module contains pure logic with no I/O. Filesystem, database and
//! template storage concerns are reached through ports defined in the
//! application layer.
//!
//! - **No async**: domain logic is synchronous
//! - **No I/O**: no filesystem, network, or external calls
//! - **Validated at the edge**: names and versions are parsed once into
//!   value objects; everything downstream trusts them
pub mod entities;
pub mod env_file;
pub mod error;
pub mod naming;
pub mod schema;
pub mod value_objects;

pub use entities::{
    artifact::{GeneratedArtifact, SOURCE_DIR, artifact_directory, artifact_file_name},
    plan::{AuthPolicy, GenerationPlan},
    template::{RenderContext, Template, TemplateId, TemplateOrigin},
};

pub use error::{DomainError, ErrorCategory};

pub use naming::{ResourceName, ResourceNames, classify, pluralize};

pub use schema::TableSchema;

pub use value_objects::{ApiVersion, ArtifactKind, DatabaseName, Flavor};
