//! Implementation of the `splice list` command.

use std::path::Path;

use serde::Serialize;

use splice_adapters::{TeraRenderer, builtin_stubs};
use splice_core::domain::{ArtifactKind, ProjectLayout, RegistryArray};

use crate::{
    cli::{ListArgs, ListFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// One row of the listing.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct KindRow {
    kind: ArtifactKind,
    template: &'static str,
    stub: StubSource,
    registry: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum StubSource {
    /// Present in the project's stubs directory.
    Project,
    /// Missing, rendered from the embedded copy.
    Builtin,
    Missing,
}

impl StubSource {
    fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Builtin => "builtin",
            Self::Missing => "missing",
        }
    }
}

pub fn execute(
    args: ListArgs,
    root: &Path,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let layout = config.to_layout(root)?;
    let renderer = TeraRenderer::new(builtin_stubs::resolve_stubs_dir(&layout));
    let rows = rows(&layout, &renderer.available(), config.generate.builtin_fallback);

    match args.format {
        ListFormat::Table => {
            output.header(&format!("Artifact kinds (stubs: {}):", renderer.stubs_dir().display()))?;
            output.print(&format!(
                "  {:<12} {:<14} {:<9} {}",
                "KIND", "TEMPLATE", "STUB", "REGISTERED IN"
            ))?;
            for row in &rows {
                output.print(&format!(
                    "  {:<12} {:<14} {:<9} {}",
                    row.kind.as_str(),
                    row.template,
                    row.stub.as_str(),
                    row.registry.as_deref().unwrap_or("-")
                ))?;
            }
            if rows.iter().any(|r| r.stub == StubSource::Missing) {
                output.print("")?;
                output.warning("Some stubs are missing; run 'splice init' to install them")?;
            }
        }

        // JSON must stay parseable in pipes, so it bypasses quiet mode.
        ListFormat::Json => output.json(&rows)?,

        ListFormat::List => {
            for row in &rows {
                println!("{}", row.kind);
            }
        }
    }

    Ok(())
}

fn rows(layout: &ProjectLayout, available: &[String], builtin_fallback: bool) -> Vec<KindRow> {
    ArtifactKind::ALL
        .into_iter()
        .map(|kind| {
            let template = kind.template_name();
            let stub = if available.iter().any(|name| name == template) {
                StubSource::Project
            } else if builtin_fallback {
                StubSource::Builtin
            } else {
                StubSource::Missing
            };
            KindRow {
                kind,
                template,
                stub,
                registry: registry_target(kind, layout),
            }
        })
        .collect()
}

fn registry_target(kind: ArtifactKind, layout: &ProjectLayout) -> Option<String> {
    let array = match kind {
        ArtifactKind::Config => {
            return Some(format!("{} (export default)", layout.config_barrel()));
        }
        ArtifactKind::Controller => RegistryArray::Controllers,
        ArtifactKind::Service | ArtifactKind::Repository => RegistryArray::Providers,
        ArtifactKind::Exception | ArtifactKind::Model => return None,
    };
    Some(format!(
        "{} (@{} {})",
        layout.app_module(),
        layout.module_decorator(),
        array
    ))
}
