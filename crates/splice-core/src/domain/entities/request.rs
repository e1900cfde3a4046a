//! Generation request: everything one generator call consumes.
//!
//! A request is built by the caller (CLI, editor integration, script),
//! consumed once by exactly one generator, and dropped.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::{
        common::{Identifier, RelativePath},
        input::InputBag,
    },
    error::DomainError,
    naming,
    value_objects::ArtifactKind,
};

/// Input to a single generator invocation.
///
/// Field names serialize the way request files spell them
/// (`filePath`, `fileNameWithoutEx`, `input`, `repoToken`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    file_path: RelativePath,
    #[serde(
        rename = "fileNameWithoutEx",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    file_name_without_ext: Option<String>,
    #[serde(default)]
    input: InputBag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    repo_token: Option<String>,
}

impl GenerationRequest {
    pub fn builder() -> GenerationRequestBuilder {
        GenerationRequestBuilder::default()
    }

    /// Target path, relative to the source root.
    pub fn file_path(&self) -> &RelativePath {
        &self.file_path
    }

    pub fn file_name_without_ext(&self) -> Option<&str> {
        self.file_name_without_ext.as_deref()
    }

    pub fn input(&self) -> &InputBag {
        &self.input
    }

    pub fn repo_token(&self) -> Option<&str> {
        self.repo_token.as_deref()
    }

    /// Check that the request carries everything `kind` needs.
    ///
    /// Exception and model requests only need a path; registered kinds
    /// also need a bare file name and a symbol, and repositories a token.
    pub fn validate_for(&self, kind: ArtifactKind) -> Result<(), DomainError> {
        if !kind.requires_registration() {
            return Ok(());
        }

        let stem = self.module_name()?;

        match kind {
            ArtifactKind::Config => {
                Identifier::try_new(naming::to_camel_case(stem))?;
            }
            ArtifactKind::Repository => {
                self.symbol(kind)?;
                match self.repo_token.as_deref() {
                    Some(token) if !token.trim().is_empty() => {}
                    _ => return Err(DomainError::MissingRequiredField { field: "repoToken" }),
                }
            }
            _ => {
                self.symbol(kind)?;
            }
        }
        Ok(())
    }

    /// Bare module name used in import specifiers.
    pub fn module_name(&self) -> Result<&str, DomainError> {
        let stem = self
            .file_name_without_ext
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(DomainError::MissingRequiredField {
                field: "fileNameWithoutEx",
            })?;

        if stem.contains(['/', '\\']) || stem.starts_with('.') {
            return Err(DomainError::InvalidRequest(format!(
                "fileNameWithoutEx must be a bare file name, got '{stem}'"
            )));
        }
        Ok(stem)
    }

    /// Symbol the generator registers for `kind`, read from the input bag.
    pub fn symbol(&self, kind: ArtifactKind) -> Result<Identifier, DomainError> {
        let key = kind.symbol_key();
        let raw = self
            .input
            .get_str(key)
            .ok_or_else(|| DomainError::MissingInput {
                key,
                kind: kind.to_string(),
            })?;
        Identifier::try_new(raw)
    }
}

/// Builder for [`GenerationRequest`].
#[derive(Debug, Default)]
pub struct GenerationRequestBuilder {
    file_path: Option<PathBuf>,
    file_name_without_ext: Option<String>,
    input: InputBag,
    repo_token: Option<String>,
}

impl GenerationRequestBuilder {
    pub fn file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    pub fn file_name_without_ext(mut self, name: impl Into<String>) -> Self {
        self.file_name_without_ext = Some(name.into());
        self
    }

    pub fn input(mut self, input: InputBag) -> Self {
        self.input = input;
        self
    }

    /// Add a single input value.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.input.insert(key, value);
        self
    }

    pub fn repo_token(mut self, token: impl Into<String>) -> Self {
        self.repo_token = Some(token.into());
        self
    }

    pub fn build(self) -> Result<GenerationRequest, DomainError> {
        let file_path = self
            .file_path
            .ok_or(DomainError::MissingRequiredField { field: "filePath" })?;

        Ok(GenerationRequest {
            file_path: RelativePath::try_new(file_path)?,
            file_name_without_ext: self.file_name_without_ext,
            input: self.input,
            repo_token: self.repo_token,
        })
    }
}
