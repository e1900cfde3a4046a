//! Application layer for Splice.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GeneratorService, ValidationGuard)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. Request rules and registration planning live in
//! `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    GenerationOutcome, // DTO for what a generation changed
    GenerationPreview,
    GeneratorService,
    PendingRegistration,
    RegistrationOutcome,
    ValidationGuard,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, RegistryEditor, SchemaValidator, TemplateRenderer};

pub use error::ApplicationError;
