// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Splice.
//!
//! This module contains pure logic with no I/O. Rendering, filesystem access
//! and source-tree parsing are handled via ports (traits) defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Few crates**: std + thiserror + serde/serde_json for input bags
//! - **Immutable entities**: Requests and edit plans are Clone + PartialEq
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod naming;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    common::{Identifier, RelativePath},
    dispatch::{
        ExecutionContext, HttpRequest, MessageEnvelope, Payload, ValidationOutcome,
        ValidationRegistry, validated_payload,
    },
    input::InputBag,
    layout::ProjectLayout,
    registration::{
        ArrayElement, ImportSpec, MissingShapePolicy, RegistryEdit, RegistryPatch,
        RegistryTarget,
    },
    request::{GenerationRequest, GenerationRequestBuilder},
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{ArtifactKind, RegistryArray, Transport};

pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    // ========================================================================
    // Value Object Tests
    // ========================================================================

    #[test]
    fn artifact_kind_parses_aliases() {
        assert_eq!(ArtifactKind::from_str("controller").unwrap(), ArtifactKind::Controller);
        assert_eq!(ArtifactKind::from_str("REPO").unwrap(), ArtifactKind::Repository);
        assert_eq!(
            ArtifactKind::from_str("configuration").unwrap(),
            ArtifactKind::Config
        );
        assert!(matches!(
            ArtifactKind::from_str("widget"),
            Err(DomainError::UnknownArtifactKind(_))
        ));
    }

    #[test]
    fn template_names_match_stub_files() {
        let names: Vec<_> = ArtifactKind::ALL.iter().map(|k| k.template_name()).collect();
        assert_eq!(
            names,
            ["config", "controller", "service", "exception", "repositoryDB", "model"]
        );
    }

    #[test]
    fn only_exception_and_model_skip_registration() {
        for kind in ArtifactKind::ALL {
            let expected = !matches!(kind, ArtifactKind::Exception | ArtifactKind::Model);
            assert_eq!(kind.requires_registration(), expected, "{kind}");
        }
    }

    #[test]
    fn controller_symbol_key_differs() {
        assert_eq!(ArtifactKind::Controller.symbol_key(), "controllerName");
        assert_eq!(ArtifactKind::Service.symbol_key(), "className");
        assert_eq!(ArtifactKind::Repository.symbol_key(), "className");
    }

    #[test]
    fn transport_parses() {
        assert_eq!(Transport::from_str("ws").unwrap(), Transport::Message);
        assert_eq!(Transport::from_str("HTTP").unwrap(), Transport::Http);
        assert!(Transport::from_str("carrier-pigeon").is_err());
    }

    // ========================================================================
    // Validator Tests
    // ========================================================================

    #[test]
    fn validator_rejects_before_planning() {
        let req = GenerationRequest::builder()
            .file_path("services/widget.ts")
            .file_name_without_ext("widget")
            .set("className", "widget-service")
            .build()
            .unwrap();
        let err = DomainValidator::plan_registration(
            ArtifactKind::Service,
            &req,
            &ProjectLayout::new("."),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidIdentifier { .. }));
    }
}
