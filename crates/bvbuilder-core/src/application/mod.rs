//! Application layer for bvbuilder.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService, InitService, TemplateService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! naming or rendering rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    BootstrapScript, EnvMergeOutcome, GenerationEvent, GenerationReport, GenerationRequest,
    InitEvent, InitRequest, InitService, ScaffoldService, TemplateInfo, TemplateService,
};

pub use ports::{
    DatabaseBootstrapper, Filesystem, SchemaProvisioner, TemplateRenderer, TemplateStore,
};

pub use error::ApplicationError;
