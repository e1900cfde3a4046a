//! Implementation of the `splice generate` command.
//!
//! Responsibility: derive a `GenerationRequest` from the command line, call
//! the core generator service, and display results. No business logic lives
//! here.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use splice_adapters::{LocalFilesystem, TeraRenderer, TypeScriptRegistryEditor, builtin_stubs};
use splice_core::{
    application::{GenerationOutcome, GenerationPreview, GeneratorService},
    domain::{ArtifactKind, GenerationRequest, naming},
};

use crate::{
    cli::GenerateArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `splice generate` command.
///
/// Dispatch sequence:
/// 1. Derive path, symbol, token and input bag from the arguments
/// 2. Build the adapters for the project layout
/// 3. Preview (`--dry-run`) or generate
/// 4. Report what changed
#[instrument(skip_all, fields(kind = ?args.kind, name = %args.name))]
pub fn execute(
    args: GenerateArgs,
    root: &Path,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let kind = ArtifactKind::from(args.kind);

    if args.token.is_some() && kind != ArtifactKind::Repository {
        output.warning(&format!("--token is only used by repositories, ignoring it for {kind}"))?;
    }

    // 1. Request
    let request = build_request(kind, &args)?;
    debug!(path = %request.file_path(), "Request built");

    // 2. Adapters
    let service = build_service(root, &config)?;

    // 3 + 4.
    if args.dry_run {
        let preview = service.preview(kind, &request)?;
        return show_preview(&preview, &output);
    }

    info!(%kind, "Generation started");
    let outcome = service.generate(kind, &request)?;
    info!(created = %outcome.created.display(), "Generation completed");

    show_outcome(&outcome, root, &output)
}

// ── Request derivation ────────────────────────────────────────────────────────

/// Turn `splice generate <kind> <name> ...` into a request.
///
/// Defaults: `<kind dir>/<name>.ts`, a PascalCase symbol with the kind's
/// suffix (camelCase for config), and `<NAME>_REPOSITORY` as the token.
/// `--set` pairs are applied last and may override derived values.
pub(crate) fn build_request(kind: ArtifactKind, args: &GenerateArgs) -> CliResult<GenerationRequest> {
    let name = args.name.trim();
    if name.is_empty() || naming::to_pascal_case(name).is_empty() {
        return Err(CliError::InvalidInput {
            message: format!("'{}' has no letters or digits to name an artifact", args.name),
            source: None,
        });
    }

    let path = args
        .path
        .clone()
        .unwrap_or_else(|| Path::new(kind.default_directory()).join(format!("{name}.ts")));
    let file_name = file_stem(&path).unwrap_or(name).to_string();

    let symbol = args.class.clone().unwrap_or_else(|| derive_symbol(kind, name));

    let mut builder = GenerationRequest::builder()
        .file_path(path)
        .file_name_without_ext(file_name.clone())
        .set("name", name)
        .set("fileName", file_name)
        .set(kind.symbol_key(), symbol);

    if kind == ArtifactKind::Repository {
        let token = args
            .token
            .clone()
            .unwrap_or_else(|| format!("{}_REPOSITORY", naming::to_screaming_snake_case(name)));
        builder = builder.repo_token(token.clone()).set("repoToken", token);
    }

    for (key, value) in &args.set {
        builder = builder.set(key.clone(), value.clone());
    }

    let request = builder.build()?;
    request.validate_for(kind)?;
    Ok(request)
}

fn derive_symbol(kind: ArtifactKind, name: &str) -> String {
    match kind {
        ArtifactKind::Config => naming::to_camel_case(name),
        _ => format!("{}{}", naming::to_pascal_case(name), kind.symbol_suffix()),
    }
}

fn file_stem(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|s| s.to_str())
}

// ── Adapter wiring ────────────────────────────────────────────────────────────

fn build_service(root: &Path, config: &AppConfig) -> CliResult<GeneratorService> {
    let layout = config.to_layout(root)?;

    let mut renderer = TeraRenderer::new(builtin_stubs::resolve_stubs_dir(&layout));
    if config.generate.builtin_fallback {
        renderer = renderer.with_builtin();
    }

    Ok(GeneratorService::new(
        Box::new(renderer),
        Box::new(LocalFilesystem::new()),
        Box::new(TypeScriptRegistryEditor::new()),
        layout,
    ))
}

// ── Reporting ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct Report {
    kind: ArtifactKind,
    dry_run: bool,
    file: PathBuf,
    registry: Option<PathBuf>,
    element: Option<String>,
    import: Option<String>,
    element_appended: Option<bool>,
}

fn show_outcome(outcome: &GenerationOutcome, root: &Path, output: &OutputManager) -> CliResult<()> {
    let registration = outcome.registration.as_ref();

    if output.is_json() {
        output.json(&Report {
            kind: outcome.kind,
            dry_run: false,
            file: outcome.created.clone(),
            registry: registration.map(|r| r.registry.clone()),
            element: registration.map(|r| r.element.clone()),
            import: registration.map(|r| r.import.clone()),
            element_appended: registration.map(|r| r.element_appended),
        })?;
        return Ok(());
    }

    output.success(&format!(
        "Created {} {}",
        outcome.kind,
        display_relative(&outcome.created, root)
    ))?;

    if let Some(reg) = registration {
        let registry = display_relative(&reg.registry, root);
        output.print(&format!("  + {}", reg.import))?;
        if reg.element_appended {
            output.print(&format!("  + {} in {}", reg.element, registry))?;
        } else {
            output.warning(&format!(
                "{registry} has no default export array; added the import only"
            ))?;
        }
    }
    Ok(())
}

fn show_preview(preview: &GenerationPreview, output: &OutputManager) -> CliResult<()> {
    let registration = preview.registration.as_ref();

    if output.is_json() {
        output.json(&Report {
            kind: preview.kind,
            dry_run: true,
            file: preview.target.clone(),
            registry: registration.map(|r| r.path.clone()),
            element: registration.map(|r| r.edit.element().to_source()),
            import: registration.map(|r| r.edit.import().to_statement()),
            element_appended: registration.map(|r| r.patch.element_appended),
        })?;
        return Ok(());
    }

    output.info(&format!(
        "Dry run: would create {}",
        preview.target.display()
    ))?;
    output.print("")?;
    output.print(&preview.content)?;

    if let Some(pending) = registration {
        output.header(&format!("Would update {}", pending.path.display()))?;
        output.print(&format!("  + {}", pending.edit.import().to_statement()))?;
        if pending.patch.element_appended {
            output.print(&format!(
                "  + {} in {}",
                pending.edit.element().to_source(),
                pending.edit.target()
            ))?;
        } else {
            output.warning("no default export array; only the import would be added")?;
        }
    }
    Ok(())
}

fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
