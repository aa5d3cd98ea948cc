//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `bvbuilder-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: directory creation and file writes
//!   - `TemplateStore`: skeleton lookup
//!   - `TemplateRenderer`: placeholder substitution
//!   - `SchemaProvisioner`: per-resource table creation
//!   - `DatabaseBootstrapper`: database creation for `init`
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    DatabaseBootstrapper, Filesystem, SchemaProvisioner, TemplateRenderer, TemplateStore,
};

#[cfg(test)]
pub use output::{
    MockDatabaseBootstrapper, MockFilesystem, MockSchemaProvisioner, MockTemplateRenderer,
    MockTemplateStore,
};
