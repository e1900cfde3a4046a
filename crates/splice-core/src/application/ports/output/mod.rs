//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `splice-adapters` crate provides implementations.

use crate::domain::{InputBag, RegistryEdit, RegistryPatch, ValidationOutcome};
use crate::error::SpliceResult;
use serde_json::Value;
use std::path::Path;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `splice_adapters::filesystem::LocalFilesystem` (production)
/// - `splice_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - Paths arrive already joined onto the source root
/// - `create_new` must refuse to overwrite; it is the second line of
///   collision defence after the existence guard
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> SpliceResult<()>;

    /// Create a new file with `content`. Fails with `FileExists` if the
    /// path is already taken.
    fn create_new(&self, path: &Path, content: &str) -> SpliceResult<()>;

    /// Replace the content of a file.
    fn write_file(&self, path: &Path, content: &str) -> SpliceResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> SpliceResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> SpliceResult<()>;
}

/// Port for stub rendering.
///
/// Implemented by:
/// - `splice_adapters::renderer::TeraRenderer` (Tera stubs, cached)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render the named stub with the given placeholder values.
    ///
    /// The input bag is not validated here; a placeholder the bag does not
    /// provide surfaces as `RenderingFailed`.
    fn render(&self, template: &str, input: &InputBag) -> SpliceResult<String>;
}

/// Port for structural registry mutation.
///
/// Implemented by:
/// - `splice_adapters::registry::TypeScriptRegistryEditor` (tree-sitter)
///
/// Implementations parse `source`, locate the declaration the edit targets,
/// append the element, add the import, and print the tree back. Bytes outside
/// the two insertions must come back unchanged.
#[cfg_attr(test, mockall::automock)]
pub trait RegistryEditor: Send + Sync {
    fn apply(&self, source: &str, edit: &RegistryEdit) -> SpliceResult<RegistryPatch>;
}

/// Port for payload validation against a registered schema.
///
/// Implemented by:
/// - `splice_adapters::validator::JsonSchemaValidator` (JSON Schema)
#[cfg_attr(test, mockall::automock)]
pub trait SchemaValidator: Send + Sync {
    /// Validate `payload` against `schema_id`.
    ///
    /// Violations are an `Ok(ValidationOutcome::Invalid)`; `Err` is reserved
    /// for unknown or uncompilable schemas.
    fn validate(&self, schema_id: &str, payload: &Value) -> SpliceResult<ValidationOutcome>;

    /// Whether a schema with this id is registered.
    fn has_schema(&self, schema_id: &str) -> bool;
}
