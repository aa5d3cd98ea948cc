//! Infrastructure adapters for bvbuilder.
//!
//! This crate implements the ports defined in `bvbuilder_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_templates;
pub mod database;
pub mod filesystem;
pub mod renderer;
pub mod template_loader;
pub mod template_store;

// Re-export commonly used adapters
pub use database::{ConnectionSettings, MemoryDatabase, MySqlDatabase};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::SimpleRenderer;
pub use template_store::InMemoryStore;
