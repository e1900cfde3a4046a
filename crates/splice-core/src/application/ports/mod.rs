//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `splice-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `TemplateRenderer`: Stub rendering
//!   - `RegistryEditor`: Structural registry-source mutation
//!   - `SchemaValidator`: Payload validation
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{Filesystem, RegistryEditor, SchemaValidator, TemplateRenderer};

#[cfg(test)]
pub use output::{MockFilesystem, MockRegistryEditor, MockSchemaValidator, MockTemplateRenderer};
