//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees the
//! [`ProjectLayout`] built from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables `SPLICE_<SECTION>__<KEY>`
//! 3. Project file: `--config FILE`, else `<project>/.splice.toml`
//! 4. Global file in the platform config directory
//! 5. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use splice_core::domain::{DomainError, ProjectLayout};

/// Name of the per-project configuration file.
pub const PROJECT_CONFIG_FILE: &str = ".splice.toml";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where things live in the target project.
    pub project: ProjectConfig,
    /// Generation behaviour.
    pub generate: GenerateConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Source root, relative to the project root.
    pub source_dir: PathBuf,
    /// Stubs directory, relative to the project root.
    pub stubs_dir: PathBuf,
    /// Application module, relative to the source root.
    pub app_module: PathBuf,
    /// Class that carries the module decorator.
    pub module_class: String,
    /// Decorator name on that class, without `@`.
    pub module_decorator: String,
    /// Configuration barrel, relative to the source root.
    pub config_barrel: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Render the embedded stub when the project has none for a kind.
    pub builtin_fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            project: ProjectConfig {
                source_dir: ProjectLayout::DEFAULT_SOURCE_DIR.into(),
                stubs_dir: ProjectLayout::DEFAULT_STUBS_DIR.into(),
                app_module: ProjectLayout::DEFAULT_APP_MODULE.into(),
                module_class: ProjectLayout::DEFAULT_MODULE_CLASS.into(),
                module_decorator: ProjectLayout::DEFAULT_MODULE_DECORATOR.into(),
                config_barrel: ProjectLayout::DEFAULT_CONFIG_BARREL.into(),
            },
            generate: GenerateConfig {
                builtin_fallback: false,
            },
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration for the project rooted at `root`.
    ///
    /// `config_file` is the path the user passed via `--config`; when given
    /// it replaces the project's `.splice.toml` and must exist.
    pub fn load(config_file: Option<&Path>, root: &Path) -> anyhow::Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(global) = Self::global_config_path() {
            builder = builder.add_source(File::from(global).format(FileFormat::Toml).required(false));
        }

        builder = match config_file {
            Some(path) => builder.add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(true),
            ),
            None => builder.add_source(
                File::from(Self::project_config_path(root))
                    .format(FileFormat::Toml)
                    .required(false),
            ),
        };

        let config = builder
            .add_source(
                Environment::with_prefix("SPLICE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// The project layout this configuration describes.
    pub fn to_layout(&self, root: &Path) -> Result<ProjectLayout, DomainError> {
        let project = &self.project;
        ProjectLayout::new(root)
            .with_source_dir(&project.source_dir)
            .with_stubs_dir(&project.stubs_dir)
            .with_app_module(&project.app_module)?
            .with_module_class(&project.module_class)?
            .with_module_decorator(&project.module_decorator)?
            .with_config_barrel(&project.config_barrel)
    }

    /// `<root>/.splice.toml`
    pub fn project_config_path(root: &Path) -> PathBuf {
        root.join(PROJECT_CONFIG_FILE)
    }

    /// Path to the global configuration file, if the platform has a config
    /// directory.
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "splice", "splice")
            .map(|d| d.config_dir().join("config.toml"))
    }
}

/// Absolute project root: `--project` if given, else the working directory.
pub fn resolve_project_root(project: Option<&Path>) -> anyhow::Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    let root = match project {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => cwd.join(dir),
        None => cwd,
    };
    if !root.is_dir() {
        anyhow::bail!("project directory '{}' does not exist", root.display());
    }
    Ok(root)
}
