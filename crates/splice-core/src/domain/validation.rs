use crate::domain::{
    entities::{GenerationRequest, ProjectLayout, RegistryEdit},
    error::DomainError,
    value_objects::ArtifactKind,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across callers.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_request(
        kind: ArtifactKind,
        request: &GenerationRequest,
    ) -> Result<(), DomainError> {
        request.validate_for(kind)
    }

    /// Validate the request and derive its registration plan in one step.
    pub fn plan_registration(
        kind: ArtifactKind,
        request: &GenerationRequest,
        layout: &ProjectLayout,
    ) -> Result<Option<RegistryEdit>, DomainError> {
        Self::validate_request(kind, request)?;
        RegistryEdit::plan(kind, request, layout)
    }
}
