//! Generator Service - main application orchestrator.
//!
//! Each generation runs the same workflow:
//! 1. Validate the request for its kind and plan the registration
//! 2. Guard against overwriting an existing file
//! 3. Render the kind's stub
//! 4. Prepare the registry patch in memory (read, parse, mutate, print)
//! 5. Create the new file
//! 6. Write the patched registry
//!
//! Preparing the patch before step 5 means a registry without the expected
//! shape aborts the call with nothing on disk. A failure in step 6 removes
//! the file created in step 5 (best effort).

use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, RegistryEditor, TemplateRenderer},
    },
    domain::{
        ArtifactKind, DomainValidator, GenerationRequest, ProjectLayout,
        RegistryEdit, RegistryPatch, RelativePath,
    },
    error::{SpliceError, SpliceResult},
};

/// What a successful generation changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    pub kind: ArtifactKind,
    /// Path of the newly created file.
    pub created: PathBuf,
    /// `None` for kinds that are never registered.
    pub registration: Option<RegistrationOutcome>,
}

/// What a registration changed in its registry file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationOutcome {
    pub registry: PathBuf,
    pub element: String,
    pub import: String,
    /// `false` when the registry lacked the array and the kind tolerates it.
    pub element_appended: bool,
}

/// Everything a generation would write, computed without writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPreview {
    pub kind: ArtifactKind,
    pub target: PathBuf,
    pub content: String,
    pub registration: Option<PendingRegistration>,
}

/// A registry patch computed in memory and not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRegistration {
    pub path: PathBuf,
    pub edit: RegistryEdit,
    pub patch: RegistryPatch,
}

impl PendingRegistration {
    fn outcome(&self) -> RegistrationOutcome {
        RegistrationOutcome {
            registry: self.path.clone(),
            element: self.edit.element().to_source(),
            import: self.edit.import().to_statement(),
            element_appended: self.patch.element_appended,
        }
    }
}

/// Artifact generation service.
///
/// Owns its adapters; the renderer's template cache lives as long as the
/// service does.
pub struct GeneratorService {
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
    editor: Box<dyn RegistryEditor>,
    layout: ProjectLayout,
}

impl GeneratorService {
    /// Create a new generator service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use splice_core::application::GeneratorService;
    ///
    /// let service = GeneratorService::new(
    ///     renderer,   // impl TemplateRenderer
    ///     filesystem, // impl Filesystem
    ///     editor,     // impl RegistryEditor
    ///     layout,     // ProjectLayout
    /// );
    /// ```
    pub fn new(
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
        editor: Box<dyn RegistryEditor>,
        layout: ProjectLayout,
    ) -> Self {
        Self {
            renderer,
            filesystem,
            editor,
            layout,
        }
    }

    /// Generate a configuration module and add it to the config barrel.
    pub fn generate_config(&self, request: &GenerationRequest) -> SpliceResult<GenerationOutcome> {
        self.generate(ArtifactKind::Config, request)
    }

    /// Generate a controller and add it to the module's `controllers`.
    pub fn generate_controller(
        &self,
        request: &GenerationRequest,
    ) -> SpliceResult<GenerationOutcome> {
        self.generate(ArtifactKind::Controller, request)
    }

    /// Generate a service and add it to the module's `providers`.
    pub fn generate_service(&self, request: &GenerationRequest) -> SpliceResult<GenerationOutcome> {
        self.generate(ArtifactKind::Service, request)
    }

    /// Generate an exception class. Not registered.
    pub fn generate_exception(
        &self,
        request: &GenerationRequest,
    ) -> SpliceResult<GenerationOutcome> {
        self.generate(ArtifactKind::Exception, request)
    }

    /// Generate a repository and bind it to its token in `providers`.
    pub fn generate_repository(
        &self,
        request: &GenerationRequest,
    ) -> SpliceResult<GenerationOutcome> {
        self.generate(ArtifactKind::Repository, request)
    }

    /// Generate a data model. Not registered.
    pub fn generate_model(&self, request: &GenerationRequest) -> SpliceResult<GenerationOutcome> {
        self.generate(ArtifactKind::Model, request)
    }

    /// Generate one artifact of `kind`.
    #[instrument(
        skip_all,
        fields(kind = %kind, path = %request.file_path())
    )]
    pub fn generate(
        &self,
        kind: ArtifactKind,
        request: &GenerationRequest,
    ) -> SpliceResult<GenerationOutcome> {
        let preview = self.preview(kind, request)?;

        self.create_file(&preview.target, &preview.content)?;
        info!(path = %preview.target.display(), "File created");

        let registration = match preview.registration {
            Some(pending) => Some(self.commit(&pending, &preview.target)?),
            None => None,
        };

        info!("Generation completed successfully");
        Ok(GenerationOutcome {
            kind,
            created: preview.target,
            registration,
        })
    }

    /// Run every step of a generation except the writes.
    ///
    /// Fails exactly where [`generate`](Self::generate) would fail before
    /// touching the disk.
    pub fn preview(
        &self,
        kind: ArtifactKind,
        request: &GenerationRequest,
    ) -> SpliceResult<GenerationPreview> {
        // 1. Guard
        let target = self.ensure_absent(request.file_path())?;

        // 2. Validate and plan
        let plan = DomainValidator::plan_registration(kind, request, &self.layout)
            .map_err(SpliceError::Domain)?;

        // 3. Render
        let content = self.renderer.render(kind.template_name(), request.input())?;
        debug!(template = kind.template_name(), bytes = content.len(), "Stub rendered");

        // 4. Prepare registration
        let registration = match plan {
            Some(edit) => Some(self.prepare_registration(edit)?),
            None => None,
        };

        Ok(GenerationPreview {
            kind,
            target,
            content,
            registration,
        })
    }

    /// Resolve `path` against the source root and fail if it already exists.
    pub fn ensure_absent(&self, path: &RelativePath) -> SpliceResult<PathBuf> {
        let absolute = self.layout.resolve(path);
        if self.filesystem.exists(&absolute) {
            return Err(ApplicationError::FileExists { path: absolute }.into());
        }
        Ok(absolute)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn create_file(&self, path: &Path, content: &str) -> SpliceResult<()> {
        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.create_new(path, content)
    }

    /// Read the registry, apply the edit in memory, and keep the result.
    fn prepare_registration(&self, edit: RegistryEdit) -> SpliceResult<PendingRegistration> {
        let path = self.layout.resolve(edit.registry());

        if !self.filesystem.exists(&path) {
            return Err(ApplicationError::PreconditionFailed {
                registry: path,
                reason: "registry file does not exist".into(),
            }
            .into());
        }

        let source = self.filesystem.read_to_string(&path)?;
        let patch = self
            .editor
            .apply(&source, &edit)
            .map_err(|e| anchor_precondition(e, &path))?;

        if !patch.element_appended {
            warn!(
                registry = %path.display(),
                target = %edit.target(),
                "Registry has no array to extend; only the import was added"
            );
        }

        Ok(PendingRegistration { path, edit, patch })
    }

    /// Persist a prepared registry patch, undoing the new file on failure.
    fn commit(
        &self,
        pending: &PendingRegistration,
        created: &Path,
    ) -> SpliceResult<RegistrationOutcome> {
        match self
            .filesystem
            .write_file(&pending.path, &pending.patch.source)
        {
            Ok(()) => {
                info!(
                    registry = %pending.path.display(),
                    element = %pending.edit.element().to_source(),
                    "Registry updated"
                );
                Ok(pending.outcome())
            }
            Err(e) => {
                warn!("Registry write failed, attempting rollback");
                self.rollback(created);
                Err(e)
            }
        }
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, created: &Path) {
        if let Err(e) = self.filesystem.remove_file(created) {
            warn!(
                error = %e,
                path = %created.display(),
                "Rollback failed"
            );
        } else {
            info!("Rollback successful");
        }
    }
}

/// Editors report preconditions against the registry's relative path; point
/// them at the file actually read.
fn anchor_precondition(err: SpliceError, path: &Path) -> SpliceError {
    match err {
        SpliceError::Application(ApplicationError::PreconditionFailed { reason, .. }) => {
            ApplicationError::PreconditionFailed {
                registry: path.to_path_buf(),
                reason,
            }
            .into()
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockFilesystem, MockRegistryEditor, MockTemplateRenderer};

    const MODULE: &str = "@Module({ controllers: [] })\nexport class AppModule {}\n";

    fn controller_request() -> GenerationRequest {
        GenerationRequest::builder()
            .file_path("controllers/widget.ts")
            .file_name_without_ext("widget")
            .set("controllerName", "WidgetController")
            .build()
            .unwrap()
    }

    fn service(
        renderer: MockTemplateRenderer,
        fs: MockFilesystem,
        editor: MockRegistryEditor,
    ) -> GeneratorService {
        GeneratorService::new(
            Box::new(renderer),
            Box::new(fs),
            Box::new(editor),
            ProjectLayout::new("/project"),
        )
    }

    fn rendering_renderer() -> MockTemplateRenderer {
        let mut renderer = MockTemplateRenderer::new();
        renderer
            .expect_render()
            .returning(|name, _| Ok(format!("// {name}\n")));
        renderer
    }

    fn patching_editor() -> MockRegistryEditor {
        let mut editor = MockRegistryEditor::new();
        editor.expect_apply().returning(|source, edit| {
            Ok(RegistryPatch {
                source: format!("{}\n{source}", edit.import().to_statement()),
                element_appended: true,
            })
        });
        editor
    }

    #[test]
    fn existing_target_is_a_collision_and_writes_nothing() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().never();

        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_create_new().never();
        fs.expect_write_file().never();

        let err = service(renderer, fs, MockRegistryEditor::new())
            .generate_controller(&controller_request())
            .unwrap_err();

        assert!(err.is_collision());
        match err {
            SpliceError::Application(ApplicationError::FileExists { path }) => {
                assert_eq!(path, PathBuf::from("/project/src/controllers/widget.ts"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn controller_creates_file_then_writes_registry() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .returning(|p| p.ends_with("app.module.ts"));
        fs.expect_read_to_string()
            .returning(|_| Ok(MODULE.to_string()));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_create_new()
            .withf(|p, c| p.ends_with("src/controllers/widget.ts") && c == "// controller\n")
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_write_file()
            .withf(|p, c| {
                p.ends_with("src/app.module.ts")
                    && c.starts_with("import { WidgetController } from './controllers/widget';")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let outcome = service(rendering_renderer(), fs, patching_editor())
            .generate_controller(&controller_request())
            .unwrap();

        assert_eq!(outcome.kind, ArtifactKind::Controller);
        let registration = outcome.registration.unwrap();
        assert_eq!(registration.element, "WidgetController");
        assert!(registration.element_appended);
    }

    #[test]
    fn precondition_failure_happens_before_any_write() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .returning(|p| p.ends_with("app.module.ts"));
        fs.expect_read_to_string()
            .returning(|_| Ok("export class Other {}\n".to_string()));
        fs.expect_create_new().never();
        fs.expect_write_file().never();

        let mut editor = MockRegistryEditor::new();
        editor.expect_apply().returning(|_, edit| {
            Err(ApplicationError::PreconditionFailed {
                registry: edit.registry().as_path().to_path_buf(),
                reason: "class AppModule not found".into(),
            }
            .into())
        });

        let err = service(rendering_renderer(), fs, editor)
            .generate_controller(&controller_request())
            .unwrap_err();

        assert!(err.is_precondition());
        match err {
            SpliceError::Application(ApplicationError::PreconditionFailed { registry, .. }) => {
                assert_eq!(registry, PathBuf::from("/project/src/app.module.ts"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_registry_file_is_a_precondition_failure() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_new().never();

        let err = service(rendering_renderer(), fs, MockRegistryEditor::new())
            .generate_controller(&controller_request())
            .unwrap_err();
        assert!(err.is_precondition());
    }

    #[test]
    fn registry_write_failure_rolls_back_new_file() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .returning(|p| p.ends_with("app.module.ts"));
        fs.expect_read_to_string()
            .returning(|_| Ok(MODULE.to_string()));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_create_new().returning(|_, _| Ok(()));
        fs.expect_write_file().returning(|p, _| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "read-only".into(),
            }
            .into())
        });
        fs.expect_remove_file()
            .withf(|p| p.ends_with("src/controllers/widget.ts"))
            .times(1)
            .returning(|_| Ok(()));

        let err = service(rendering_renderer(), fs, patching_editor())
            .generate_controller(&controller_request())
            .unwrap_err();
        assert!(matches!(
            err,
            SpliceError::Application(ApplicationError::FilesystemError { .. })
        ));
    }

    #[test]
    fn model_never_touches_a_registry() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_create_new().times(1).returning(|_, _| Ok(()));
        fs.expect_read_to_string().never();
        fs.expect_write_file().never();

        let mut editor = MockRegistryEditor::new();
        editor.expect_apply().never();

        let request = GenerationRequest::builder()
            .file_path("models/widget.ts")
            .set("className", "Widget")
            .build()
            .unwrap();
        let outcome = service(rendering_renderer(), fs, editor)
            .generate_model(&request)
            .unwrap();
        assert!(outcome.registration.is_none());
    }

    #[test]
    fn invalid_request_fails_before_render() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().never();
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_new().never();

        let request = GenerationRequest::builder()
            .file_path("services/widget.ts")
            .build()
            .unwrap();
        let err = service(renderer, fs, MockRegistryEditor::new())
            .generate_service(&request)
            .unwrap_err();
        assert!(matches!(err, SpliceError::Domain(_)));
    }

    #[test]
    fn collision_wins_over_incomplete_input() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_create_new().never();

        let request = GenerationRequest::builder()
            .file_path("controllers/widget.ts")
            .file_name_without_ext("widget")
            .build()
            .unwrap();
        let err = service(MockTemplateRenderer::new(), fs, MockRegistryEditor::new())
            .generate_controller(&request)
            .unwrap_err();
        assert!(err.is_collision(), "{err:?}");
    }

    #[test]
    fn render_error_propagates_unchanged() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().returning(|name, _| {
            Err(ApplicationError::TemplateNotFound {
                name: name.to_string(),
                dir: PathBuf::from("/project/stubs"),
            }
            .into())
        });
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_new().never();

        let request = GenerationRequest::builder()
            .file_path("exceptions/widget.ts")
            .build()
            .unwrap();
        let err = service(renderer, fs, MockRegistryEditor::new())
            .generate_exception(&request)
            .unwrap_err();
        assert!(matches!(
            err,
            SpliceError::Application(ApplicationError::TemplateNotFound { ref name, .. })
                if name == "exception"
        ));
    }
}
