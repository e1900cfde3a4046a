//! Splice Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Splice, a
//! generator that renders source stubs and splices each new artifact into
//! the registry file that wires it into the application.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           splice-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (GeneratorService, ValidationGuard)    │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, Renderer, Editor, Schema)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     splice-adapters (Infrastructure)    │
//! │  (Tera, tree-sitter, jsonschema, fs)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (GenerationRequest, RegistryEdit, ...)  │
//! │         No External Dependencies        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use splice_core::{
//!     application::GeneratorService,
//!     domain::{GenerationRequest, ProjectLayout},
//! };
//!
//! // 1. Describe the artifact
//! let request = GenerationRequest::builder()
//!     .file_path("controllers/user.ts")
//!     .file_name_without_ext("user")
//!     .set("controllerName", "UserController")
//!     .build()?;
//!
//! // 2. Use application service (with injected adapters)
//! let service = GeneratorService::new(renderer, filesystem, editor, ProjectLayout::new("."));
//! let outcome = service.generate_controller(&request)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerationOutcome, GeneratorService, RegistrationOutcome, ValidationGuard,
        ports::{Filesystem, RegistryEditor, SchemaValidator, TemplateRenderer},
    };
    pub use crate::domain::{
        ArtifactKind, ExecutionContext, GenerationRequest, InputBag, ProjectLayout,
        RegistryEdit, ValidationOutcome, ValidationRegistry, validated_payload,
    };
    pub use crate::error::{SpliceError, SpliceResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
