//! bvbuilder core - domain and application layers.
//!
//! This crate holds everything the `bvbuilder` generator knows about
//! resources, skeletons and project initialisation, behind ports that the
//! `bvbuilder-adapters` crate implements.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          bvbuilder-cli (CLI)            │
//! │   parses commands, prompts, prints      │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (ScaffoldService, InitService, ...)     │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ Filesystem, TemplateStore, Renderer,    │
//! │ SchemaProvisioner, DatabaseBootstrapper │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     bvbuilder-adapters (Infrastructure) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bvbuilder_core::prelude::*;
//! # fn adapters() -> (Box<dyn TemplateStore>, Box<dyn TemplateRenderer>, Box<dyn Filesystem>) { unimplemented!() }
//!
//! let (store, renderer, filesystem) = adapters();
//! let service = ScaffoldService::new(store, renderer, filesystem, None);
//!
//! let request = GenerationRequest {
//!     names: ResourceName::parse("product").unwrap().derive(),
//!     version: ApiVersion::default(),
//!     plan: GenerationPlan::crud(),
//!     auth: false,
//!     root: ".".into(),
//! };
//! service.generate(&request, |event| println!("{event:?}")).unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerationEvent, GenerationReport, GenerationRequest, InitService, ScaffoldService,
        TemplateInfo, TemplateService,
        ports::{DatabaseBootstrapper, Filesystem, SchemaProvisioner, TemplateRenderer, TemplateStore},
    };
    pub use crate::domain::{
        ApiVersion, ArtifactKind, DatabaseName, Flavor, GenerationPlan, RenderContext,
        ResourceName, ResourceNames, TableSchema, Template, TemplateId,
    };
    pub use crate::error::{BvError, BvResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
