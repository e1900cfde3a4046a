use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::common::{Identifier, RelativePath},
    error::DomainError,
};

/// Where things live in the target project.
///
/// Generated files and registry files are addressed relative to the source
/// root (`<root>/<source_dir>`); stubs relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLayout {
    root: PathBuf,
    source_dir: PathBuf,
    stubs_dir: PathBuf,
    app_module: RelativePath,
    module_class: Identifier,
    module_decorator: Identifier,
    config_barrel: RelativePath,
}

impl ProjectLayout {
    pub const DEFAULT_SOURCE_DIR: &'static str = "src";
    pub const DEFAULT_STUBS_DIR: &'static str = "stubs";
    pub const DEFAULT_APP_MODULE: &'static str = "app.module.ts";
    pub const DEFAULT_MODULE_CLASS: &'static str = "AppModule";
    pub const DEFAULT_MODULE_DECORATOR: &'static str = "Module";
    pub const DEFAULT_CONFIG_BARREL: &'static str = "config/index.ts";

    /// Conventional layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            source_dir: PathBuf::from(Self::DEFAULT_SOURCE_DIR),
            stubs_dir: PathBuf::from(Self::DEFAULT_STUBS_DIR),
            app_module: RelativePath(Self::DEFAULT_APP_MODULE.into()),
            module_class: Identifier(Self::DEFAULT_MODULE_CLASS.into()),
            module_decorator: Identifier(Self::DEFAULT_MODULE_DECORATOR.into()),
            config_barrel: RelativePath(Self::DEFAULT_CONFIG_BARREL.into()),
        }
    }

    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    pub fn with_stubs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.stubs_dir = dir.into();
        self
    }

    pub fn with_app_module(mut self, path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        self.app_module = RelativePath::try_new(path)?;
        Ok(self)
    }

    pub fn with_module_class(mut self, name: impl Into<String>) -> Result<Self, DomainError> {
        self.module_class = Identifier::try_new(name)?;
        Ok(self)
    }

    pub fn with_module_decorator(mut self, name: impl Into<String>) -> Result<Self, DomainError> {
        self.module_decorator = Identifier::try_new(name)?;
        Ok(self)
    }

    pub fn with_config_barrel(mut self, path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        self.config_barrel = RelativePath::try_new(path)?;
        Ok(self)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Base directory every generated path is joined onto.
    pub fn source_root(&self) -> PathBuf {
        self.root.join(&self.source_dir)
    }

    pub fn stubs_root(&self) -> PathBuf {
        self.root.join(&self.stubs_dir)
    }

    /// Absolute (or root-anchored) location of a source-relative path.
    pub fn resolve(&self, path: &RelativePath) -> PathBuf {
        self.source_root().join(path.as_path())
    }

    pub fn app_module(&self) -> &RelativePath {
        &self.app_module
    }

    pub fn module_class(&self) -> &Identifier {
        &self.module_class
    }

    pub fn module_decorator(&self) -> &Identifier {
        &self.module_decorator
    }

    pub fn config_barrel(&self) -> &RelativePath {
        &self.config_barrel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_follows_conventions() {
        let layout = ProjectLayout::new("/work/app");
        assert_eq!(layout.source_root(), PathBuf::from("/work/app/src"));
        assert_eq!(layout.stubs_root(), PathBuf::from("/work/app/stubs"));
        assert_eq!(layout.module_class().as_str(), "AppModule");
        assert_eq!(
            layout.resolve(layout.app_module()),
            PathBuf::from("/work/app/src/app.module.ts")
        );
    }

    #[test]
    fn overrides_are_validated() {
        let layout = ProjectLayout::new(".");
        assert!(layout.clone().with_module_class("Root Module").is_err());
        assert!(layout.with_config_barrel("/abs/index.ts").is_err());
    }
}
