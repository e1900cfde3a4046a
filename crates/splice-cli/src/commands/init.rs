//! `splice init`: write `.splice.toml` and install the built-in stubs.

use std::path::Path;

use tracing::instrument;

use splice_adapters::{LocalFilesystem, builtin_stubs::{self, StubInstall}};

use crate::{
    cli::InitArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Initialise the project rooted at `root`.
///
/// Existing files are kept unless `--force` is given.
#[instrument(skip_all, fields(root = %root.display(), force = args.force))]
pub fn execute(
    args: InitArgs,
    root: &Path,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    output.info("Initialising project...")?;

    write_project_config(root, args.force, &output)?;

    let layout = config.to_layout(root)?;
    let stubs_dir = builtin_stubs::resolve_stubs_dir(&layout);
    let report = builtin_stubs::install(&LocalFilesystem::new(), &stubs_dir, args.force)?;

    let mut kept = 0;
    for entry in &report {
        let path = entry.path().strip_prefix(root).unwrap_or(entry.path());
        match entry {
            StubInstall::Written(_) => output.success(&format!("Created {}", path.display()))?,
            StubInstall::Overwritten(_) => {
                output.warning(&format!("Overwrote {}", path.display()))?
            }
            StubInstall::Kept(_) => kept += 1,
        }
    }
    if kept > 0 {
        output.info(&format!(
            "Kept {kept} existing stub(s) in {} (use --force to overwrite)",
            stubs_dir.display()
        ))?;
    }

    Ok(())
}

fn write_project_config(root: &Path, force: bool, output: &OutputManager) -> CliResult<()> {
    let config_path = AppConfig::project_config_path(root);

    if config_path.exists() && !force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display(),
        ))?;
        return Ok(());
    }

    let toml = toml::to_string_pretty(&AppConfig::default()).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise default config: {e}"),
        source: Some(Box::new(e)),
    })?;

    std::fs::write(&config_path, toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", config_path.display()))?;

    output.success(&format!("Configuration created at {}", config_path.display()))?;
    Ok(())
}
