//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate a resource" or "initialise a project".

pub mod init_service;
pub mod scaffold_service;
pub mod template_service;

pub use init_service::{BootstrapScript, EnvMergeOutcome, InitEvent, InitRequest, InitService};
pub use scaffold_service::{GenerationEvent, GenerationReport, GenerationRequest, ScaffoldService};
pub use template_service::{TemplateInfo, TemplateService};
