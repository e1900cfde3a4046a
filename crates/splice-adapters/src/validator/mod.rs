//! Payload schema validators.

mod json_schema;

pub use json_schema::JsonSchemaValidator;
