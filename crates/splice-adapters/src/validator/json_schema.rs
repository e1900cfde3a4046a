//! JSON Schema validator with a compiled-schema cache.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, RwLock},
};

use jsonschema::Validator;
use serde_json::Value;
use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use splice_core::{
    application::{ApplicationError, ports::SchemaValidator},
    domain::ValidationOutcome,
    error::{SpliceError, SpliceResult},
};

/// Validates payloads against JSON Schemas registered by id.
///
/// Schemas are compiled when registered and shared as `Arc<Validator>`, so a
/// validation never holds the lock while it runs.
#[derive(Default)]
pub struct JsonSchemaValidator {
    schemas: RwLock<HashMap<String, Arc<Validator>>>,
}

impl JsonSchemaValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.json` file in `dir`, keyed by file stem.
    #[instrument(skip_all, fields(dir = %dir.display()))]
    pub fn from_dir(dir: &Path) -> SpliceResult<Self> {
        let validator = Self::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| ApplicationError::FilesystemError {
                path: dir.to_path_buf(),
                reason: e.to_string(),
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("json")
            {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let raw = std::fs::read_to_string(path).map_err(|e| ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: format!("Failed to read schema: {e}"),
            })?;
            let schema: Value =
                serde_json::from_str(&raw).map_err(|e| ApplicationError::InvalidSchema {
                    schema: id.to_string(),
                    reason: e.to_string(),
                })?;
            validator.register(id, &schema)?;
        }
        info!(count = validator.len(), "schemas loaded");
        Ok(validator)
    }

    /// Compile `schema` and store it under `id`, replacing any earlier one.
    pub fn register(&self, id: impl Into<String>, schema: &Value) -> SpliceResult<()> {
        let id = id.into();
        let compiled = jsonschema::validator_for(schema).map_err(|e| {
            ApplicationError::InvalidSchema {
                schema: id.clone(),
                reason: e.to_string(),
            }
        })?;

        debug!(schema = %id, "schema compiled");
        self.schemas
            .write()
            .map_err(|_| lock_poisoned())?
            .insert(id, Arc::new(compiled));
        Ok(())
    }

    /// Registered schema ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .schemas
            .read()
            .map(|s| s.keys().cloned().collect())
            .unwrap_or_default();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.schemas.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, id: &str) -> SpliceResult<Option<Arc<Validator>>> {
        Ok(self
            .schemas
            .read()
            .map_err(|_| lock_poisoned())?
            .get(id)
            .cloned())
    }
}

impl SchemaValidator for JsonSchemaValidator {
    fn validate(&self, schema_id: &str, payload: &Value) -> SpliceResult<ValidationOutcome> {
        let validator = self.get(schema_id)?.ok_or_else(|| ApplicationError::UnknownSchema {
            schema: schema_id.to_string(),
        })?;

        let violations: Vec<String> = validator
            .iter_errors(payload)
            .map(|e| format!("{}: {}", e.instance_path, e))
            .collect();

        if violations.is_empty() {
            Ok(ValidationOutcome::Valid(payload.clone()))
        } else {
            Ok(ValidationOutcome::Invalid(violations))
        }
    }

    fn has_schema(&self, schema_id: &str) -> bool {
        self.schemas
            .read()
            .map(|s| s.contains_key(schema_id))
            .unwrap_or(false)
    }
}

fn lock_poisoned() -> SpliceError {
    ApplicationError::LockPoisoned {
        name: "schema cache",
    }
    .into()
}
