//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use splice_core::domain::ArtifactKind;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "splice",
    bin_name = "splice",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate artifacts from stubs and wire them into the app module",
    long_about = "Splice renders a stub for a controller, service, repository, \
                  config, exception or model, writes it into the source tree, \
                  and registers it in the application module or config barrel.",
    after_help = "EXAMPLES:\n\
        \x20 splice init\n\
        \x20 splice generate controller widget\n\
        \x20 splice g repository widget --token WIDGET_REPO\n\
        \x20 splice g service billing --path billing/billing.service.ts --dry-run\n\
        \x20 splice completions bash > /usr/share/bash-completion/completions/splice",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate an artifact and register it.
    #[command(
        visible_alias = "g",
        about = "Generate an artifact",
        after_help = "EXAMPLES:\n\
            \x20 splice generate controller widget\n\
            \x20 splice generate config cache\n\
            \x20 splice g repository widget --class WidgetStore --token WIDGET_STORE\n\
            \x20 splice g model widget --set table=widgets"
    )]
    Generate(GenerateArgs),

    /// List artifact kinds and their stubs.
    #[command(
        visible_alias = "ls",
        about = "List artifact kinds",
        after_help = "EXAMPLES:\n\
            \x20 splice list\n\
            \x20 splice list --format json"
    )]
    List(ListArgs),

    /// Write `.splice.toml` and install the built-in stubs.
    #[command(
        about = "Initialise a project",
        after_help = "EXAMPLES:\n\
            \x20 splice init            # keep existing stubs\n\
            \x20 splice init --force    # overwrite stubs with the built-ins\n\
            \x20 splice -C ../api init"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 splice completions bash > ~/.local/share/bash-completion/completions/splice\n\
            \x20 splice completions zsh  > ~/.zfunc/_splice\n\
            \x20 splice completions fish > ~/.config/fish/completions/splice.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Splice configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 splice config get project.app_module\n\
            \x20 splice config list\n\
            \x20 splice config path"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `splice generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Artifact kind.
    #[arg(value_enum, value_name = "KIND", help = "Kind of artifact")]
    pub kind: KindArg,

    /// Base name, e.g. `widget` or `user-profile`.  Symbols and the default
    /// path are derived from it.
    #[arg(value_name = "NAME", help = "Artifact name")]
    pub name: String,

    /// Target file relative to the source root.
    #[arg(
        short = 'p',
        long = "path",
        value_name = "FILE",
        help = "Target file relative to the source root (default: <kind dir>/<NAME>.ts)"
    )]
    pub path: Option<PathBuf>,

    /// Override the derived class / controller name.
    #[arg(long = "class", value_name = "NAME", help = "Symbol name to generate")]
    pub class: Option<String>,

    /// Injection token for repositories.
    #[arg(
        long = "token",
        value_name = "TOKEN",
        help = "Repository injection token (default: <NAME>_REPOSITORY)"
    )]
    pub token: Option<String>,

    /// Extra template variables.
    #[arg(
        long = "set",
        value_name = "KEY=VALUE",
        value_parser = parse_key_value,
        help = "Extra template variable (repeatable)"
    )]
    pub set: Vec<(String, String)>,

    /// Print the plan without writing anything.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Artifact kinds accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum KindArg {
    #[value(alias = "configuration")]
    Config,
    Controller,
    Service,
    Exception,
    #[value(alias = "repo")]
    Repository,
    Model,
}

impl From<KindArg> for ArtifactKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Config => Self::Config,
            KindArg::Controller => Self::Controller,
            KindArg::Service => Self::Service,
            KindArg::Exception => Self::Exception,
            KindArg::Repository => Self::Repository,
            KindArg::Model => Self::Model,
        }
    }
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `splice list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One kind per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `splice init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite existing stubs and config file.
    #[arg(
        short = 'f',
        long = "force",
        help = "Overwrite existing stubs and .splice.toml"
    )]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `splice completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `splice config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `project.app_module`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the configuration files that were consulted.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_generate_command() {
        let cli = Cli::parse_from(["splice", "generate", "controller", "widget"]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(args.kind, KindArg::Controller);
        assert_eq!(args.name, "widget");
        assert!(args.path.is_none());
        assert!(!args.dry_run);
    }

    #[test]
    fn generate_alias_and_kind_alias() {
        let cli = Cli::parse_from(["splice", "g", "repo", "widget", "--token", "W"]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(ArtifactKind::from(args.kind), ArtifactKind::Repository);
        assert_eq!(args.token.as_deref(), Some("W"));
    }

    #[test]
    fn set_pairs_are_split_on_first_equals() {
        let cli = Cli::parse_from([
            "splice", "g", "model", "widget", "--set", "table=widgets", "--set", "q=a=b",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(
            args.set,
            vec![
                ("table".to_string(), "widgets".to_string()),
                ("q".to_string(), "a=b".to_string())
            ]
        );
    }

    #[test]
    fn set_without_equals_is_rejected() {
        let result = Cli::try_parse_from(["splice", "g", "model", "widget", "--set", "table"]);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result = Cli::try_parse_from(["splice", "g", "gizmo", "widget"]);
        assert!(result.is_err());
    }

    #[test]
    fn project_flag_is_global() {
        let cli = Cli::parse_from(["splice", "list", "-C", "../api"]);
        assert_eq!(cli.global.project, Some(PathBuf::from("../api")));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["splice", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }
}
