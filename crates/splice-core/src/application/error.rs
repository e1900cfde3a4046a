//! Application layer errors.
//!
//! These errors represent failures in orchestration, not request shape.
//! Request-shape errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Target path already exists; nothing was written.
    #[error("File already exists at {path}")]
    FileExists { path: PathBuf },

    /// The registry file does not have the declaration shape the edit needs.
    #[error("Precondition not met in {registry}: {reason}")]
    PreconditionFailed { registry: PathBuf, reason: String },

    /// No stub with this name in the templates directory.
    #[error("Template '{name}' not found in {dir}")]
    TemplateNotFound { name: String, dir: PathBuf },

    /// Template parsing or evaluation failed.
    #[error("Rendering template '{template}' failed: {reason}")]
    RenderingFailed { template: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Shared adapter state unavailable (lock poisoned).
    #[error("Adapter state lock poisoned: {name}")]
    LockPoisoned { name: &'static str },

    /// Payload did not satisfy the handler's schema.
    #[error("Payload for '{handler}' rejected by schema '{schema}': {}", violations.join("; "))]
    PayloadRejected {
        handler: String,
        schema: String,
        violations: Vec<String>,
    },

    /// Handler references a schema id nobody registered.
    #[error("Unknown schema '{schema}'")]
    UnknownSchema { schema: String },

    /// A schema document could not be compiled.
    #[error("Invalid schema '{schema}': {reason}")]
    InvalidSchema { schema: String, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FileExists { path } => vec![
                format!("'{}' already exists and will not be overwritten", path.display()),
                "Choose a different name or --path".into(),
                "Remove the existing file if it is stale".into(),
            ],
            Self::PreconditionFailed { registry, reason } => vec![
                format!("{} does not have the expected shape", registry.display()),
                format!("Missing: {}", reason),
                "Check the module class and decorator names in .splice.toml".into(),
            ],
            Self::TemplateNotFound { name, dir } => vec![
                format!("Expected stub: {}/{}.stub", dir.display(), name),
                "Run 'splice init' to install the default stubs".into(),
            ],
            Self::RenderingFailed { .. } => vec![
                "Check the stub for placeholders missing from the input".into(),
                "Pass extra values with --set KEY=VALUE".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::PayloadRejected { violations, .. } => violations.clone(),
            Self::UnknownSchema { schema } => vec![
                format!("Register schema '{}' before dispatching", schema),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FileExists { .. } => ErrorCategory::Conflict,
            Self::PreconditionFailed { .. } => ErrorCategory::Precondition,
            Self::TemplateNotFound { .. } | Self::UnknownSchema { .. } => ErrorCategory::NotFound,
            Self::PayloadRejected { .. } => ErrorCategory::Validation,
            Self::InvalidSchema { .. } => ErrorCategory::Configuration,
            Self::RenderingFailed { .. }
            | Self::FilesystemError { .. }
            | Self::LockPoisoned { .. } => ErrorCategory::Internal,
        }
    }
}
