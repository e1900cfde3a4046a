//! Infrastructure adapters for Splice.
//!
//! This crate implements the ports defined in `splice-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_stubs;
pub mod filesystem;
pub mod registry;
pub mod renderer;
pub mod validator;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use registry::TypeScriptRegistryEditor;
pub use renderer::TeraRenderer;
pub use validator::JsonSchemaValidator;
