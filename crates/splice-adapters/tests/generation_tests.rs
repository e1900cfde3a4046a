//! End-to-end generation against a real project tree.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use splice_adapters::{
    LocalFilesystem, MemoryFilesystem, TeraRenderer, TypeScriptRegistryEditor, builtin_stubs,
};
use splice_core::{
    application::{ApplicationError, GeneratorService, ports::Filesystem},
    domain::{ArtifactKind, GenerationRequest, InputBag, ProjectLayout},
    error::SpliceError,
    prelude::TemplateRenderer,
};

const APP_MODULE: &str = "\
import { Module } from '@nestjs/common';
import { AppController } from './controllers/app';

@Module({
  imports: [],
  controllers: [AppController],
  providers: [
    // services
  ],
})
export class AppModule {}
";

const CONFIG_BARREL: &str = "import database from './database';\n\nexport default [database];\n";

struct Project {
    dir: TempDir,
}

impl Project {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src/config")).unwrap();
        fs::write(dir.path().join("src/app.module.ts"), APP_MODULE).unwrap();
        fs::write(dir.path().join("src/config/index.ts"), CONFIG_BARREL).unwrap();
        builtin_stubs::install(&LocalFilesystem::new(), &dir.path().join("stubs"), false).unwrap();
        Self { dir }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.root().join(rel)).unwrap()
    }

    fn service(&self) -> GeneratorService {
        let layout = ProjectLayout::new(self.root());
        GeneratorService::new(
            Box::new(TeraRenderer::new(layout.stubs_root())),
            Box::new(LocalFilesystem::new()),
            Box::new(TypeScriptRegistryEditor::new()),
            layout,
        )
    }

    fn render(&self, kind: ArtifactKind, input: &InputBag) -> String {
        TeraRenderer::new(self.root().join("stubs"))
            .render(kind.template_name(), input)
            .unwrap()
    }
}

fn request(kind: ArtifactKind, name: &str, symbol: &str) -> GenerationRequest {
    GenerationRequest::builder()
        .file_path(format!("{}/{name}.ts", kind.default_directory()))
        .file_name_without_ext(name)
        .set("name", name)
        .set(kind.symbol_key(), symbol)
        .build()
        .unwrap()
}

#[test]
fn controller_scenario() {
    let project = Project::new();
    let req = request(ArtifactKind::Controller, "widget", "WidgetController");

    let outcome = project.service().generate_controller(&req).unwrap();

    assert_eq!(outcome.created, project.root().join("src/controllers/widget.ts"));
    assert_eq!(
        project.read("src/controllers/widget.ts"),
        project.render(ArtifactKind::Controller, req.input())
    );
    assert_eq!(
        project.read("src/app.module.ts"),
        APP_MODULE
            .replace(
                "import { AppController } from './controllers/app';\n",
                "import { AppController } from './controllers/app';\n\
                 import { WidgetController } from './controllers/widget';\n",
            )
            .replace(
                "controllers: [AppController]",
                "controllers: [AppController, WidgetController]",
            )
    );
}

#[test]
fn repository_scenario_binds_token() {
    let project = Project::new();
    let req = GenerationRequest::builder()
        .file_path("repositories/widget.ts")
        .file_name_without_ext("widget")
        .set("className", "WidgetRepository")
        .repo_token("WIDGET_REPO")
        .build()
        .unwrap();

    project.service().generate_repository(&req).unwrap();

    let module = project.read("src/app.module.ts");
    assert!(module.contains(
        "  providers: [\n    // services\n    { provide: 'WIDGET_REPO', useClass: WidgetRepository }\n  ],"
    ));
    assert!(module.contains("import { WidgetRepository } from './repositories/widget';"));
}

#[test]
fn config_registers_in_barrel() {
    let project = Project::new();
    let req = request(ArtifactKind::Config, "cache", "cache");

    let outcome = project.service().generate_config(&req).unwrap();

    assert!(outcome.registration.unwrap().element_appended);
    assert_eq!(
        project.read("src/config/index.ts"),
        "import database from './database';\nimport cache from './cache';\n\nexport default [database, cache];\n"
    );
}

#[test]
fn every_kind_refuses_existing_target_and_touches_nothing() {
    for kind in ArtifactKind::ALL {
        let project = Project::new();
        let target = project
            .root()
            .join("src")
            .join(kind.default_directory())
            .join("widget.ts");
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::write(&target, "// hand written\n").unwrap();

        let mut req = GenerationRequest::builder()
            .file_path(format!("{}/widget.ts", kind.default_directory()))
            .file_name_without_ext("widget")
            .set("name", "widget")
            .set(kind.symbol_key(), "Widget");
        if kind == ArtifactKind::Repository {
            req = req.repo_token("WIDGET");
        }

        let err = project.service().generate(kind, &req.build().unwrap()).unwrap_err();

        assert!(err.is_collision(), "{kind}: {err:?}");
        assert_eq!(fs::read_to_string(&target).unwrap(), "// hand written\n");
        assert_eq!(project.read("src/app.module.ts"), APP_MODULE);
        assert_eq!(project.read("src/config/index.ts"), CONFIG_BARREL);
    }
}

#[test]
fn unregistered_kinds_leave_registries_alone() {
    let project = Project::new();
    let service = project.service();

    let exception = service
        .generate_exception(&request(ArtifactKind::Exception, "widget", "WidgetException"))
        .unwrap();
    let model = service
        .generate_model(&request(ArtifactKind::Model, "widget", "Widget"))
        .unwrap();

    assert!(exception.registration.is_none());
    assert!(model.registration.is_none());
    assert!(project.root().join("src/exceptions/widget.ts").exists());
    assert!(project.root().join("src/models/widget.ts").exists());
    assert_eq!(project.read("src/app.module.ts"), APP_MODULE);
    assert_eq!(project.read("src/config/index.ts"), CONFIG_BARREL);
}

#[test]
fn second_identical_request_collides() {
    let project = Project::new();
    let service = project.service();
    let req = request(ArtifactKind::Service, "widget", "WidgetService");

    service.generate_service(&req).unwrap();
    let after_first = project.read("src/app.module.ts");

    let err = service.generate_service(&req).unwrap_err();
    assert!(err.is_collision());
    assert_eq!(project.read("src/app.module.ts"), after_first);
}

#[test]
fn registrations_append_in_invocation_order() {
    let project = Project::new();
    let service = project.service();

    for (name, symbol) in [("alpha", "AlphaController"), ("beta", "BetaController"), ("gamma", "GammaController")] {
        service
            .generate_controller(&request(ArtifactKind::Controller, name, symbol))
            .unwrap();
    }

    let module = project.read("src/app.module.ts");
    assert!(module.contains(
        "controllers: [AppController, AlphaController, BetaController, GammaController]"
    ));
    let alpha = module.find("from './controllers/alpha'").unwrap();
    let gamma = module.find("from './controllers/gamma'").unwrap();
    assert!(alpha < gamma);
}

#[test]
fn precondition_failure_leaves_no_new_file() {
    let project = Project::new();
    fs::write(
        project.root().join("src/app.module.ts"),
        "export class AppModule {}\n",
    )
    .unwrap();

    let err = project
        .service()
        .generate_controller(&request(ArtifactKind::Controller, "widget", "WidgetController"))
        .unwrap_err();

    assert!(err.is_precondition(), "{err:?}");
    assert!(!project.root().join("src/controllers/widget.ts").exists());
    assert_eq!(project.read("src/app.module.ts"), "export class AppModule {}\n");
}

#[test]
fn config_without_default_array_adds_import_only() {
    let project = Project::new();
    fs::write(
        project.root().join("src/config/index.ts"),
        "export const configs = {};\n",
    )
    .unwrap();

    let outcome = project
        .service()
        .generate_config(&request(ArtifactKind::Config, "cache", "cache"))
        .unwrap();

    assert!(!outcome.registration.unwrap().element_appended);
    assert!(project.root().join("src/config/cache.ts").exists());
    assert_eq!(
        project.read("src/config/index.ts"),
        "import cache from './cache';\nexport const configs = {};\n"
    );
}

#[test]
fn missing_stub_writes_nothing() {
    let project = Project::new();
    fs::remove_file(project.root().join("stubs/service.stub")).unwrap();

    let err = project
        .service()
        .generate_service(&request(ArtifactKind::Service, "widget", "WidgetService"))
        .unwrap_err();

    assert!(matches!(
        err,
        SpliceError::Application(ApplicationError::TemplateNotFound { .. })
    ));
    assert!(!project.root().join("src/services/widget.ts").exists());
    assert_eq!(project.read("src/app.module.ts"), APP_MODULE);
}

#[test]
fn registry_write_failure_rolls_back() {
    let memory = MemoryFilesystem::new().with_file("/p/src/app.module.ts", APP_MODULE);
    memory.mark_read_only("/p/src/app.module.ts");

    let layout = ProjectLayout::new("/p");
    let service = GeneratorService::new(
        Box::new(TeraRenderer::new(layout.stubs_root()).with_builtin()),
        Box::new(memory.clone()),
        Box::new(TypeScriptRegistryEditor::new()),
        layout,
    );

    let err = service
        .generate_service(&request(ArtifactKind::Service, "widget", "WidgetService"))
        .unwrap_err();

    assert!(matches!(
        err,
        SpliceError::Application(ApplicationError::FilesystemError { .. })
    ));
    assert!(!memory.exists(Path::new("/p/src/services/widget.ts")));
    assert_eq!(
        memory.read_file(Path::new("/p/src/app.module.ts")).as_deref(),
        Some(APP_MODULE)
    );
}

#[test]
fn preview_computes_everything_and_writes_nothing() {
    let project = Project::new();
    let req = request(ArtifactKind::Service, "widget", "WidgetService");

    let preview = project.service().preview(ArtifactKind::Service, &req).unwrap();

    assert!(preview.content.contains("export class WidgetService"));
    let pending = preview.registration.unwrap();
    assert!(pending.patch.source.contains("providers: ["));
    assert!(pending.patch.source.contains("WidgetService"));
    assert!(!project.root().join("src/services/widget.ts").exists());
    assert_eq!(project.read("src/app.module.ts"), APP_MODULE);
}
