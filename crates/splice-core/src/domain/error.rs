// ============================================================================
// domain/error.rs - REQUEST AND PLAN VALIDATION ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (callers may report them more than once)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid generation request: {0}")]
    InvalidRequest(String),

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Input bag is missing '{key}' required by the {kind} generator")]
    MissingInput { key: &'static str, kind: String },

    #[error("'{value}' is not a valid identifier: {reason}")]
    InvalidIdentifier { value: String, reason: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path escapes the source root: {path}")]
    PathEscapesRoot { path: String },

    #[error("Malformed input pair '{pair}': expected KEY=VALUE")]
    MalformedInputPair { pair: String },

    // ========================================================================
    // Not Found Errors (404-level equivalent)
    // ========================================================================
    #[error("Unknown artifact kind: {0}")]
    UnknownArtifactKind(String),

    #[error("Unknown transport: {0}")]
    UnknownTransport(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidRequest(msg) => vec![
                "Check the generation request".into(),
                format!("Details: {}", msg),
            ],
            Self::MissingRequiredField { field } => vec![
                format!("Provide a value for '{}'", field),
            ],
            Self::MissingInput { key, kind } => vec![
                format!("The {} template and registration expect '{}'", kind, key),
                format!("Pass it with --set {}=<value> or --class <value>", key),
            ],
            Self::InvalidIdentifier { value, .. } => vec![
                format!("'{}' cannot be used as a class or binding name", value),
                "Use letters, digits, '_' or '$', not starting with a digit".into(),
                "Examples: WidgetController, widgetConfig".into(),
            ],
            Self::AbsolutePathNotAllowed { path } | Self::PathEscapesRoot { path } => vec![
                format!("'{}' must be relative to the source root", path),
                "Example: controllers/widget.ts".into(),
            ],
            Self::MalformedInputPair { .. } => vec![
                "Input pairs are written as KEY=VALUE".into(),
                "Example: --set route=widgets".into(),
            ],
            Self::UnknownArtifactKind(kind) => vec![
                format!("'{}' is not an artifact kind", kind),
                "Supported kinds: config, controller, service, exception, repository, model"
                    .into(),
                "Try: splice list".into(),
            ],
            Self::UnknownTransport(_) => vec!["Supported transports: http, message".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownArtifactKind(_) | Self::UnknownTransport(_) => ErrorCategory::NotFound,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
}
