//! Built-in stubs.
//!
//! Splice ships one stub per artifact kind, embedded in the binary. They are
//! the source for `splice init`, which copies them into the project's stubs
//! directory, and the fallback for [`TeraRenderer::with_builtin`].
//!
//! # Stubs directory resolution
//!
//! 1. **`$SPLICE_STUBS_DIR`**: environment variable override.
//! 2. **`<project>/<stubs_dir>`**: from the project layout (`stubs` by default).
//!
//! [`TeraRenderer::with_builtin`]: crate::renderer::TeraRenderer::with_builtin

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use splice_core::{
    application::ports::Filesystem,
    domain::{ArtifactKind, ProjectLayout},
    error::SpliceResult,
};

/// Environment variable that overrides the stubs directory.
pub const STUBS_DIR_ENV: &str = "SPLICE_STUBS_DIR";

/// File extension of stub files.
pub const STUB_EXTENSION: &str = "stub";

const CONFIG: &str = include_str!("../stubs/config.stub");
const CONTROLLER: &str = include_str!("../stubs/controller.stub");
const SERVICE: &str = include_str!("../stubs/service.stub");
const EXCEPTION: &str = include_str!("../stubs/exception.stub");
const REPOSITORY: &str = include_str!("../stubs/repositoryDB.stub");
const MODEL: &str = include_str!("../stubs/model.stub");

/// Embedded stub source for a template name, if Splice ships one.
pub fn builtin(name: &str) -> Option<&'static str> {
    let kind = ArtifactKind::ALL
        .into_iter()
        .find(|k| k.template_name() == name)?;
    Some(match kind {
        ArtifactKind::Config => CONFIG,
        ArtifactKind::Controller => CONTROLLER,
        ArtifactKind::Service => SERVICE,
        ArtifactKind::Exception => EXCEPTION,
        ArtifactKind::Repository => REPOSITORY,
        ArtifactKind::Model => MODEL,
    })
}

/// `<dir>/<name>.stub`
pub fn stub_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.{STUB_EXTENSION}"))
}

/// Stubs directory for `layout`, honouring `$SPLICE_STUBS_DIR`.
pub fn resolve_stubs_dir(layout: &ProjectLayout) -> PathBuf {
    match std::env::var(STUBS_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => {
            let dir = PathBuf::from(dir);
            debug!(path = %dir.display(), "stubs directory from ${}", STUBS_DIR_ENV);
            if dir.is_relative() {
                layout.root().join(dir)
            } else {
                dir
            }
        }
        _ => layout.stubs_root(),
    }
}

/// What `install` did with one stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubInstall {
    Written(PathBuf),
    Overwritten(PathBuf),
    Kept(PathBuf),
}

impl StubInstall {
    pub fn path(&self) -> &Path {
        match self {
            Self::Written(p) | Self::Overwritten(p) | Self::Kept(p) => p,
        }
    }
}

/// Copy every built-in stub into `dir`.
///
/// Existing stubs are kept unless `force` is set.
#[instrument(skip(fs), fields(dir = %dir.display()))]
pub fn install(fs: &dyn Filesystem, dir: &Path, force: bool) -> SpliceResult<Vec<StubInstall>> {
    fs.create_dir_all(dir)?;

    let mut report = Vec::with_capacity(ArtifactKind::ALL.len());
    for kind in ArtifactKind::ALL {
        let name = kind.template_name();
        let path = stub_path(dir, name);
        let Some(source) = builtin(name) else {
            continue;
        };

        let entry = if !fs.exists(&path) {
            fs.create_new(&path, source)?;
            StubInstall::Written(path)
        } else if force {
            fs.write_file(&path, source)?;
            StubInstall::Overwritten(path)
        } else {
            debug!(path = %path.display(), "stub exists, keeping");
            StubInstall::Kept(path)
        };
        report.push(entry);
    }

    info!(count = report.len(), "built-in stubs installed");
    Ok(report)
}
