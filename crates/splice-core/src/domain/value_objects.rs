//! Domain value objects: ArtifactKind, RegistryArray, Transport.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! This file's only job is to define the types, their string
//! representations, the per-kind conventions, and their `FromStr` parsers.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str`, `template_name` and `FromStr` arms here
//! 3. Decide its registration in `entities::registration`
//! 4. Ship a stub for it in `splice-adapters/stubs`

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ArtifactKind ─────────────────────────────────────────────────────────────

/// A kind of source artifact the generator can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Config,
    Controller,
    Service,
    Exception,
    Repository,
    Model,
}

impl ArtifactKind {
    /// Every kind, in display order.
    pub const ALL: [ArtifactKind; 6] = [
        Self::Config,
        Self::Controller,
        Self::Service,
        Self::Exception,
        Self::Repository,
        Self::Model,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Controller => "controller",
            Self::Service => "service",
            Self::Exception => "exception",
            Self::Repository => "repository",
            Self::Model => "model",
        }
    }

    /// Name of the stub rendered for this kind.
    pub const fn template_name(&self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Controller => "controller",
            Self::Service => "service",
            Self::Exception => "exception",
            Self::Repository => "repositoryDB",
            Self::Model => "model",
        }
    }

    /// Directory (under the source root) where this kind conventionally lives.
    pub const fn default_directory(&self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Controller => "controllers",
            Self::Service => "services",
            Self::Exception => "exceptions",
            Self::Repository => "repositories",
            Self::Model => "models",
        }
    }

    /// Input-bag key holding the generated symbol's name.
    pub const fn symbol_key(&self) -> &'static str {
        match self {
            Self::Controller => "controllerName",
            _ => "className",
        }
    }

    /// Suffix appended to the PascalCase name when deriving a symbol.
    pub const fn symbol_suffix(&self) -> &'static str {
        match self {
            Self::Controller => "Controller",
            Self::Service => "Service",
            Self::Repository => "Repository",
            Self::Exception => "Exception",
            Self::Config | Self::Model => "",
        }
    }

    /// Whether a generated artifact of this kind is wired into a registry file.
    pub const fn requires_registration(&self) -> bool {
        !matches!(self, Self::Exception | Self::Model)
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "config" | "configuration" | "cfg" => Ok(Self::Config),
            "controller" | "co" => Ok(Self::Controller),
            "service" | "s" => Ok(Self::Service),
            "exception" | "e" => Ok(Self::Exception),
            "repository" | "repo" | "repositorydb" => Ok(Self::Repository),
            "model" | "m" => Ok(Self::Model),
            other => Err(DomainError::UnknownArtifactKind(other.to_string())),
        }
    }
}

// ── RegistryArray ─────────────────────────────────────────────────────────────

/// Array property of the module decorator's configuration object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryArray {
    Controllers,
    Providers,
}

impl RegistryArray {
    /// Exact property key in the decorator argument object.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Controllers => "controllers",
            Self::Providers => "providers",
        }
    }
}

impl fmt::Display for RegistryArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ── Transport ─────────────────────────────────────────────────────────────────

/// How a request reached its handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Request/response (HTTP).
    Http,
    /// Message-based (WebSocket, microservice pattern).
    Message,
}

impl Transport {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Transport {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" | "rest" => Ok(Self::Http),
            "message" | "ws" | "rpc" => Ok(Self::Message),
            other => Err(DomainError::UnknownTransport(other.to_string())),
        }
    }
}
