//! Tera-backed stub renderer.

use std::{
    error::Error as _,
    path::{Path, PathBuf},
    sync::RwLock,
};

use tera::{Context, Tera};
use tracing::{debug, instrument};
use walkdir::WalkDir;

use splice_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::InputBag,
    error::{SpliceError, SpliceResult},
};

use crate::builtin_stubs::{self, STUB_EXTENSION};

/// Renders `<stubs_dir>/<name>.stub` with Tera.
///
/// Each stub is parsed on first use and kept for the renderer's lifetime.
/// Undefined placeholders are errors, not empty strings.
#[derive(Debug)]
pub struct TeraRenderer {
    stubs_dir: PathBuf,
    builtin_fallback: bool,
    tera: RwLock<Tera>,
}

impl TeraRenderer {
    pub fn new(stubs_dir: impl Into<PathBuf>) -> Self {
        Self {
            stubs_dir: stubs_dir.into(),
            builtin_fallback: false,
            tera: RwLock::new(Tera::default()),
        }
    }

    /// Fall back to the embedded stub when a stub file is absent.
    pub fn with_builtin(mut self) -> Self {
        self.builtin_fallback = true;
        self
    }

    pub fn stubs_dir(&self) -> &Path {
        &self.stubs_dir
    }

    /// Stub names present in the stubs directory, sorted.
    pub fn available(&self) -> Vec<String> {
        let mut names: Vec<String> = WalkDir::new(&self.stubs_dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry.path().extension().and_then(|e| e.to_str()) == Some(STUB_EXTENSION)
            })
            .filter_map(|entry| {
                entry
                    .path()
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .map(str::to_string)
            })
            .collect();
        names.sort();
        names
    }

    /// Number of parsed stubs held in the cache.
    pub fn cached(&self) -> usize {
        self.tera
            .read()
            .map(|tera| tera.get_template_names().count())
            .unwrap_or(0)
    }

    fn is_cached(&self, name: &str) -> SpliceResult<bool> {
        let tera = self.tera.read().map_err(|_| lock_poisoned())?;
        Ok(tera.get_template_names().any(|n| n == name))
    }

    /// Parse and cache `name` if it is not cached yet.
    fn load(&self, name: &str) -> SpliceResult<()> {
        if self.is_cached(name)? {
            return Ok(());
        }

        let path = builtin_stubs::stub_path(&self.stubs_dir, name);
        let source = match std::fs::read_to_string(&path) {
            Ok(source) => source,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                match builtin_stubs::builtin(name).filter(|_| self.builtin_fallback) {
                    Some(source) => {
                        debug!(template = name, "using built-in stub");
                        source.to_string()
                    }
                    None => {
                        return Err(ApplicationError::TemplateNotFound {
                            name: name.to_string(),
                            dir: self.stubs_dir.clone(),
                        }
                        .into());
                    }
                }
            }
            Err(e) => {
                return Err(ApplicationError::FilesystemError {
                    path,
                    reason: format!("Failed to read stub: {e}"),
                }
                .into());
            }
        };

        let mut tera = self.tera.write().map_err(|_| lock_poisoned())?;
        tera.add_raw_template(name, &source)
            .map_err(|e| rendering_failed(name, &e))?;
        debug!(template = name, path = %path.display(), "stub parsed and cached");
        Ok(())
    }
}

impl TemplateRenderer for TeraRenderer {
    #[instrument(skip(self, input), fields(keys = input.len()))]
    fn render(&self, template: &str, input: &InputBag) -> SpliceResult<String> {
        self.load(template)?;

        let context = Context::from_serialize(input).map_err(|e| rendering_failed(template, &e))?;
        let tera = self.tera.read().map_err(|_| lock_poisoned())?;
        tera.render(template, &context)
            .map_err(|e| rendering_failed(template, &e))
    }
}

fn lock_poisoned() -> SpliceError {
    ApplicationError::LockPoisoned {
        name: "template cache",
    }
    .into()
}

/// Flatten Tera's error chain; the top-level message alone rarely names the
/// missing variable.
fn rendering_failed(template: &str, err: &tera::Error) -> SpliceError {
    let mut reason = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        reason.push_str(": ");
        reason.push_str(&cause.to_string());
        source = cause.source();
    }
    ApplicationError::RenderingFailed {
        template: template.to_string(),
        reason,
    }
    .into()
}
