//! Registration plans: how a generated artifact is wired into a registry file.
//!
//! The domain decides *what* changes (which file, which array, which element,
//! which import); a [`RegistryEditor`](crate::application::ports::RegistryEditor)
//! decides *where* in the source tree that lands.
//!
//! ```text
//! controller  ──► app.module.ts   @Module({ controllers: [..., X] })   import { X } from './controllers/x';
//! service     ──► app.module.ts   @Module({ providers:   [..., X] })   import { X } from './services/x';
//! repository  ──► app.module.ts   @Module({ providers:   [..., { provide: 'T', useClass: X }] })
//! config      ──► config/index.ts export default [..., x]              import x from './x';
//! ```

use std::fmt;

use serde::Serialize;

use crate::domain::{
    entities::{
        common::{Identifier, RelativePath},
        layout::ProjectLayout,
        request::GenerationRequest,
    },
    error::DomainError,
    naming,
    value_objects::{ArtifactKind, RegistryArray},
};

/// Which declaration in the registry receives the new element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RegistryTarget {
    /// `export default [ ... ];`
    DefaultExportArray,
    /// `@<decorator>({ <property>: [ ... ] }) class <class> {}`
    DecoratedClassArray {
        class: Identifier,
        decorator: Identifier,
        property: RegistryArray,
    },
}

impl fmt::Display for RegistryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DefaultExportArray => f.write_str("default export array"),
            Self::DecoratedClassArray {
                class,
                decorator,
                property,
            } => write!(f, "@{decorator}({{ {property} }}) on class {class}"),
        }
    }
}

/// Expression appended to the registry array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ArrayElement {
    Identifier(Identifier),
    /// Binds an injection token to its implementing class.
    ProviderBinding { token: String, class: Identifier },
}

impl ArrayElement {
    /// Source text of the element.
    pub fn to_source(&self) -> String {
        match self {
            Self::Identifier(id) => id.to_string(),
            Self::ProviderBinding { token, class } => format!(
                "{{ provide: {}, useClass: {} }}",
                quote_single(token),
                class
            ),
        }
    }
}

/// Import statement added alongside the element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ImportSpec {
    /// `import <local> from '<module>';`
    Default { local: Identifier, module: String },
    /// `import { <name> } from '<module>';`
    Named { name: Identifier, module: String },
}

impl ImportSpec {
    pub fn module(&self) -> &str {
        match self {
            Self::Default { module, .. } | Self::Named { module, .. } => module,
        }
    }

    pub fn to_statement(&self) -> String {
        match self {
            Self::Default { local, module } => {
                format!("import {} from {};", local, quote_single(module))
            }
            Self::Named { name, module } => {
                format!("import {{ {} }} from {};", name, quote_single(module))
            }
        }
    }
}

/// What to do when the registry lacks the expected array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MissingShapePolicy {
    /// Abort the generation with a precondition error.
    Fail,
    /// Add the import, skip the append, and carry on.
    SkipAppend,
}

/// One registration: a single import and a single array element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryEdit {
    registry: RelativePath,
    target: RegistryTarget,
    element: ArrayElement,
    import: ImportSpec,
    on_missing: MissingShapePolicy,
}

impl RegistryEdit {
    pub fn new(
        registry: RelativePath,
        target: RegistryTarget,
        element: ArrayElement,
        import: ImportSpec,
        on_missing: MissingShapePolicy,
    ) -> Self {
        Self {
            registry,
            target,
            element,
            import,
            on_missing,
        }
    }

    /// Plan the registration for `kind`, or `None` for kinds that are never
    /// registered (exception, model).
    pub fn plan(
        kind: ArtifactKind,
        request: &GenerationRequest,
        layout: &ProjectLayout,
    ) -> Result<Option<Self>, DomainError> {
        if !kind.requires_registration() {
            return Ok(None);
        }

        let module_name = request.module_name()?;

        let edit = match kind {
            ArtifactKind::Config => {
                let local = Identifier::try_new(naming::to_camel_case(module_name))?;
                Self::new(
                    layout.config_barrel().clone(),
                    RegistryTarget::DefaultExportArray,
                    ArrayElement::Identifier(local.clone()),
                    ImportSpec::Default {
                        local,
                        module: format!("./{module_name}"),
                    },
                    MissingShapePolicy::SkipAppend,
                )
            }
            ArtifactKind::Controller | ArtifactKind::Service | ArtifactKind::Repository => {
                let symbol = request.symbol(kind)?;
                let property = match kind {
                    ArtifactKind::Controller => RegistryArray::Controllers,
                    _ => RegistryArray::Providers,
                };
                let element = match kind {
                    ArtifactKind::Repository => ArrayElement::ProviderBinding {
                        token: request
                            .repo_token()
                            .ok_or(DomainError::MissingRequiredField { field: "repoToken" })?
                            .to_string(),
                        class: symbol.clone(),
                    },
                    _ => ArrayElement::Identifier(symbol.clone()),
                };
                Self::new(
                    layout.app_module().clone(),
                    RegistryTarget::DecoratedClassArray {
                        class: layout.module_class().clone(),
                        decorator: layout.module_decorator().clone(),
                        property,
                    },
                    element,
                    ImportSpec::Named {
                        name: symbol,
                        module: format!("./{}/{}", kind.default_directory(), module_name),
                    },
                    MissingShapePolicy::Fail,
                )
            }
            ArtifactKind::Exception | ArtifactKind::Model => return Ok(None),
        };

        Ok(Some(edit))
    }

    /// Registry file, relative to the source root.
    pub fn registry(&self) -> &RelativePath {
        &self.registry
    }

    pub fn target(&self) -> &RegistryTarget {
        &self.target
    }

    pub fn element(&self) -> &ArrayElement {
        &self.element
    }

    pub fn import(&self) -> &ImportSpec {
        &self.import
    }

    pub fn on_missing(&self) -> MissingShapePolicy {
        self.on_missing
    }
}

/// Printed result of applying a [`RegistryEdit`] to a registry source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryPatch {
    pub source: String,
    /// `false` only when the array was missing and the edit's policy was
    /// [`MissingShapePolicy::SkipAppend`].
    pub element_appended: bool,
}

fn quote_single(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ProjectLayout {
        ProjectLayout::new("/project")
    }

    #[test]
    fn controller_plan_targets_controllers_array() {
        let req = GenerationRequest::builder()
            .file_path("controllers/widget.ts")
            .file_name_without_ext("widget")
            .set("controllerName", "WidgetController")
            .build()
            .unwrap();
        let edit = RegistryEdit::plan(ArtifactKind::Controller, &req, &layout())
            .unwrap()
            .unwrap();

        assert_eq!(edit.registry().as_str(), "app.module.ts");
        assert_eq!(edit.element().to_source(), "WidgetController");
        assert_eq!(
            edit.import().to_statement(),
            "import { WidgetController } from './controllers/widget';"
        );
        assert!(matches!(
            edit.target(),
            RegistryTarget::DecoratedClassArray {
                property: RegistryArray::Controllers,
                ..
            }
        ));
        assert_eq!(edit.on_missing(), MissingShapePolicy::Fail);
    }

    #[test]
    fn repository_plan_binds_token() {
        let req = GenerationRequest::builder()
            .file_path("repositories/widget.ts")
            .file_name_without_ext("widget")
            .set("className", "WidgetRepository")
            .repo_token("WIDGET_REPO")
            .build()
            .unwrap();
        let edit = RegistryEdit::plan(ArtifactKind::Repository, &req, &layout())
            .unwrap()
            .unwrap();

        assert_eq!(
            edit.element().to_source(),
            "{ provide: 'WIDGET_REPO', useClass: WidgetRepository }"
        );
        assert_eq!(edit.import().module(), "./repositories/widget");
    }

    #[test]
    fn config_plan_uses_default_import_and_skips_on_missing() {
        let req = GenerationRequest::builder()
            .file_path("config/app-config.ts")
            .file_name_without_ext("app-config")
            .build()
            .unwrap();
        let edit = RegistryEdit::plan(ArtifactKind::Config, &req, &layout())
            .unwrap()
            .unwrap();

        assert_eq!(edit.registry().as_str(), "config/index.ts");
        assert_eq!(
            edit.import().to_statement(),
            "import appConfig from './app-config';"
        );
        assert_eq!(edit.on_missing(), MissingShapePolicy::SkipAppend);
    }

    #[test]
    fn unregistered_kinds_have_no_plan() {
        let req = GenerationRequest::builder()
            .file_path("models/widget.ts")
            .build()
            .unwrap();
        assert!(RegistryEdit::plan(ArtifactKind::Model, &req, &layout())
            .unwrap()
            .is_none());
        assert!(RegistryEdit::plan(ArtifactKind::Exception, &req, &layout())
            .unwrap()
            .is_none());
    }

    #[test]
    fn token_quotes_are_escaped() {
        let element = ArrayElement::ProviderBinding {
            token: "it's".into(),
            class: Identifier::try_new("Repo").unwrap(),
        };
        assert_eq!(
            element.to_source(),
            "{ provide: 'it\\'s', useClass: Repo }"
        );
    }
}
