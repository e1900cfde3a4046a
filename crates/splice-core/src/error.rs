//! Unified error handling for Splice Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Splice Core operations.
///
/// This enum wraps all possible errors that can occur when using splice-core,
/// providing a unified interface for error handling.
#[derive(Debug, Error, Clone)]
pub enum SpliceError {
    /// Errors from the domain layer (malformed requests).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl SpliceError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Splice".into(),
                "Please report this issue at: https://github.com/cosecruz/splice/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// The target file already existed.
    pub fn is_collision(&self) -> bool {
        matches!(self, Self::Application(ApplicationError::FileExists { .. }))
    }

    /// The registry file lacked the expected declaration shape.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::Application(ApplicationError::PreconditionFailed { .. })
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    Precondition,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type SpliceResult<T> = Result<T, SpliceError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> SpliceResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> SpliceResult<T> {
        self.map_err(|e| SpliceError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}
