//! Validation guard - schema check before handler dispatch.

use tracing::{debug, instrument, warn};

use crate::{
    application::{ApplicationError, ports::SchemaValidator},
    domain::{ExecutionContext, ValidationOutcome, ValidationRegistry},
    error::SpliceResult,
};

/// Validates a handler's payload against the schema it was tagged with.
///
/// Handlers without a tag pass untouched. On success the validated value is
/// stored on the request (HTTP) or the message (message transports), so the
/// handler reads it through [`crate::domain::validated_payload`].
pub struct ValidationGuard {
    registry: ValidationRegistry,
    validator: Box<dyn SchemaValidator>,
}

impl ValidationGuard {
    pub fn new(registry: ValidationRegistry, validator: Box<dyn SchemaValidator>) -> Self {
        Self {
            registry,
            validator,
        }
    }

    pub fn registry(&self) -> &ValidationRegistry {
        &self.registry
    }

    /// Decide whether the dispatch in `ctx` may proceed.
    ///
    /// Returns `Ok(())` to let it through; any error rejects it and leaves
    /// `ctx` unchanged.
    #[instrument(skip_all, fields(handler = %ctx.handler(), transport = %ctx.transport()))]
    pub fn check(&self, ctx: &mut ExecutionContext) -> SpliceResult<()> {
        let Some(schema) = self.registry.schema_for(ctx.handler()) else {
            debug!("No schema attached, passing through");
            return Ok(());
        };

        if !self.validator.has_schema(schema) {
            return Err(ApplicationError::UnknownSchema {
                schema: schema.to_string(),
            }
            .into());
        }

        match self.validator.validate(schema, ctx.raw_input())? {
            ValidationOutcome::Valid(value) => {
                debug!(schema, "Payload accepted");
                ctx.attach_validated(value);
                Ok(())
            }
            ValidationOutcome::Invalid(violations) => {
                warn!(schema, count = violations.len(), "Payload rejected");
                Err(ApplicationError::PayloadRejected {
                    handler: ctx.handler().to_string(),
                    schema: schema.to_string(),
                    violations,
                }
                .into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockSchemaValidator;
    use crate::domain::{HttpRequest, MessageEnvelope, validated_payload};
    use crate::error::SpliceError;
    use serde_json::json;

    fn guard(validator: MockSchemaValidator) -> ValidationGuard {
        let mut registry = ValidationRegistry::new();
        registry.validate_with("create_widget", "widget");
        ValidationGuard::new(registry, Box::new(validator))
    }

    fn http_ctx(handler: &str, body: serde_json::Value) -> ExecutionContext {
        ExecutionContext::http(handler, HttpRequest::new("POST", "/widgets", body))
    }

    #[test]
    fn untagged_handler_passes_without_validation() {
        let mut validator = MockSchemaValidator::new();
        validator.expect_validate().never();
        validator.expect_has_schema().never();

        let mut ctx = http_ctx("list_widgets", json!(null));
        guard(validator).check(&mut ctx).unwrap();
        assert!(validated_payload(&ctx).is_none());
    }

    #[test]
    fn valid_payload_is_attached_to_request() {
        let mut validator = MockSchemaValidator::new();
        validator.expect_has_schema().returning(|_| true);
        validator
            .expect_validate()
            .withf(|schema, _| schema == "widget")
            .returning(|_, payload| Ok(ValidationOutcome::Valid(payload.clone())));

        let mut ctx = http_ctx("create_widget", json!({"name": "gear"}));
        guard(validator).check(&mut ctx).unwrap();
        assert_eq!(validated_payload(&ctx), Some(&json!({"name": "gear"})));
    }

    #[test]
    fn message_transport_stores_on_envelope() {
        let mut validator = MockSchemaValidator::new();
        validator.expect_has_schema().returning(|_| true);
        validator
            .expect_validate()
            .returning(|_, payload| Ok(ValidationOutcome::Valid(payload.clone())));

        let mut ctx = ExecutionContext::message(
            "create_widget",
            MessageEnvelope::new("widget.create", json!({"name": "gear"})),
        );
        guard(validator).check(&mut ctx).unwrap();
        assert_eq!(validated_payload(&ctx), Some(&json!({"name": "gear"})));
    }

    #[test]
    fn invalid_payload_is_rejected_with_violations() {
        let mut validator = MockSchemaValidator::new();
        validator.expect_has_schema().returning(|_| true);
        validator.expect_validate().returning(|_, _| {
            Ok(ValidationOutcome::Invalid(vec![
                "/name: \"name\" is a required property".into(),
            ]))
        });

        let mut ctx = http_ctx("create_widget", json!({}));
        let err = guard(validator).check(&mut ctx).unwrap_err();

        match err {
            SpliceError::Application(ApplicationError::PayloadRejected {
                handler,
                schema,
                violations,
            }) => {
                assert_eq!(handler, "create_widget");
                assert_eq!(schema, "widget");
                assert_eq!(violations.len(), 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(validated_payload(&ctx).is_none());
    }

    #[test]
    fn unknown_schema_is_an_error_not_a_pass() {
        let mut validator = MockSchemaValidator::new();
        validator.expect_has_schema().returning(|_| false);
        validator.expect_validate().never();

        let mut ctx = http_ctx("create_widget", json!({}));
        let err = guard(validator).check(&mut ctx).unwrap_err();
        assert!(matches!(
            err,
            SpliceError::Application(ApplicationError::UnknownSchema { .. })
        ));
    }
}
