//! Handler dispatch model used by the validation guard.
//!
//! A handler is tagged with a schema id ([`ValidationRegistry::validate_with`]);
//! at dispatch time the guard validates the payload found in the
//! [`ExecutionContext`] and stores the validated value back on the request or
//! message, where [`validated_payload`] picks it up.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::value_objects::Transport;

/// An HTTP request as seen by a handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub body: Value,
    #[serde(skip)]
    validated: Option<Value>,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>, body: Value) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            body,
            validated: None,
        }
    }

    pub fn validated_body(&self) -> Option<&Value> {
        self.validated.as_ref()
    }
}

/// A message delivered over a message-based transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEnvelope {
    pub pattern: String,
    #[serde(default)]
    pub data: Value,
    #[serde(skip)]
    validated: Option<Value>,
}

impl MessageEnvelope {
    pub fn new(pattern: impl Into<String>, data: Value) -> Self {
        Self {
            pattern: pattern.into(),
            data,
            validated: None,
        }
    }

    pub fn validated_data(&self) -> Option<&Value> {
        self.validated.as_ref()
    }
}

/// Transport-specific payload carrier.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Http(HttpRequest),
    Message(MessageEnvelope),
}

/// Everything a guard sees about one dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionContext {
    handler: String,
    payload: Payload,
}

impl ExecutionContext {
    pub fn http(handler: impl Into<String>, request: HttpRequest) -> Self {
        Self {
            handler: handler.into(),
            payload: Payload::Http(request),
        }
    }

    pub fn message(handler: impl Into<String>, envelope: MessageEnvelope) -> Self {
        Self {
            handler: handler.into(),
            payload: Payload::Message(envelope),
        }
    }

    pub fn handler(&self) -> &str {
        &self.handler
    }

    pub fn transport(&self) -> Transport {
        match self.payload {
            Payload::Http(_) => Transport::Http,
            Payload::Message(_) => Transport::Message,
        }
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Raw, unvalidated input: the HTTP body or the message data.
    pub fn raw_input(&self) -> &Value {
        match &self.payload {
            Payload::Http(req) => &req.body,
            Payload::Message(msg) => &msg.data,
        }
    }

    /// Store the validated value where the transport keeps it.
    pub fn attach_validated(&mut self, value: Value) {
        match &mut self.payload {
            Payload::Http(req) => req.validated = Some(value),
            Payload::Message(msg) => msg.validated = Some(value),
        }
    }
}

/// Validated payload of a dispatch, looked up per transport.
pub fn validated_payload(ctx: &ExecutionContext) -> Option<&Value> {
    match ctx.payload() {
        Payload::Http(req) => req.validated_body(),
        Payload::Message(msg) => msg.validated_data(),
    }
}

/// Result of checking one payload against one schema.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// The payload as the handler should see it.
    Valid(Value),
    /// Human-readable violations, each prefixed with its instance path.
    Invalid(Vec<String>),
}

/// Handler → schema id metadata.
#[derive(Debug, Clone, Default)]
pub struct ValidationRegistry {
    schemas: HashMap<String, String>,
}

impl ValidationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag `handler` with `schema_id`. A later tag replaces an earlier one.
    pub fn validate_with(
        &mut self,
        handler: impl Into<String>,
        schema_id: impl Into<String>,
    ) -> &mut Self {
        self.schemas.insert(handler.into(), schema_id.into());
        self
    }

    pub fn schema_for(&self, handler: &str) -> Option<&str> {
        self.schemas.get(handler).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn http_payload_round_trips_through_context() {
        let mut ctx = ExecutionContext::http(
            "create_widget",
            HttpRequest::new("POST", "/widgets", json!({"name": "w"})),
        );
        assert_eq!(ctx.transport(), Transport::Http);
        assert!(validated_payload(&ctx).is_none());

        ctx.attach_validated(json!({"name": "w"}));
        assert_eq!(validated_payload(&ctx), Some(&json!({"name": "w"})));
    }

    #[test]
    fn message_payload_is_stored_on_envelope() {
        let mut ctx = ExecutionContext::message(
            "widget.created",
            MessageEnvelope::new("widget.created", json!([1, 2])),
        );
        ctx.attach_validated(json!([1, 2]));
        match ctx.payload() {
            Payload::Message(msg) => assert_eq!(msg.validated_data(), Some(&json!([1, 2]))),
            Payload::Http(_) => panic!("expected message payload"),
        }
    }

    #[test]
    fn registry_replaces_earlier_tag() {
        let mut registry = ValidationRegistry::new();
        registry
            .validate_with("create", "widget.v1")
            .validate_with("create", "widget.v2");
        assert_eq!(registry.schema_for("create"), Some("widget.v2"));
        assert_eq!(registry.len(), 1);
        assert!(registry.schema_for("delete").is_none());
    }
}
