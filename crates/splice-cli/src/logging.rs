//! Tracing subscriber initialisation.
//!
//! Only the binary installs a subscriber. `splice-core` and `splice-adapters`
//! emit spans and events and never touch subscribers.
//!
//! # Filter
//!
//! | Flag(s)   | `splice`, `splice_core` | `splice_adapters` |
//! |-----------|-------------------------|-------------------|
//! | `--quiet` | ERROR                   | ERROR             |
//! | (none)    | WARN                    | WARN              |
//! | `-v`      | INFO                    | WARN              |
//! | `-vv`     | DEBUG                   | DEBUG             |
//! | `-vvv`    | TRACE                   | TRACE             |
//!
//! Adapter events at INFO are per-file chatter (stub installs, schema
//! loads) already reported on stdout, so `-v` leaves them out.
//!
//! `SPLICE_LOG` replaces the table, then `RUST_LOG`. Both take the usual
//! `EnvFilter` directives, e.g. `SPLICE_LOG=splice_adapters::registry=trace`.
//!
//! With `--output-format json` events are written to stderr as JSON lines so
//! the JSON report on stdout stays machine-readable end to end.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{GlobalArgs, OutputFormat};

/// Environment variable holding filter directives for `splice` only.
pub const LOG_ENV: &str = "SPLICE_LOG";

/// Initialise the global tracing subscriber.
///
/// Must be called once, before any tracing macros fire.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let level = derive_level(args);
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    let registry = tracing_subscriber::registry().with(filter);

    let installed = if args.output_format == OutputFormat::Json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        let detail = Detail::for_level(level);
        registry
            .with(
                fmt::layer()
                    .with_target(detail.targets)
                    .with_file(detail.locations)
                    .with_line_number(detail.locations)
                    .with_ansi(!args.no_color && std::io::stderr().is_terminal())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    installed.map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))
}

/// Translate the verbosity counter + quiet flag to a level string.
fn derive_level(args: &GlobalArgs) -> &'static str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Directives used when neither `SPLICE_LOG` nor `RUST_LOG` is set.
fn default_directives(level: &str) -> String {
    let adapters = match level {
        "info" => "warn",
        other => other,
    };
    format!("splice={level},splice_core={level},splice_adapters={adapters}")
}

/// How much of each event's origin to print.
#[derive(Debug, PartialEq, Eq)]
struct Detail {
    /// `splice_core::application::services::generator_service: ...`
    targets: bool,
    /// `generator_service.rs:142`
    locations: bool,
}

impl Detail {
    fn for_level(level: &str) -> Self {
        Self {
            targets: matches!(level, "debug" | "trace"),
            locations: level == "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_with(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: true,
            config: None,
            project: None,
            output_format: OutputFormat::Auto,
        }
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(derive_level(&args_with(0, false)), "warn");
        assert_eq!(derive_level(&args_with(1, false)), "info");
        assert_eq!(derive_level(&args_with(2, false)), "debug");
        assert_eq!(derive_level(&args_with(3, false)), "trace");
        assert_eq!(derive_level(&args_with(10, false)), "trace");
    }

    #[test]
    fn quiet_overrides_verbose() {
        assert_eq!(derive_level(&args_with(0, true)), "error");
        assert_eq!(derive_level(&args_with(3, true)), "error");
    }

    #[test]
    fn adapters_stay_at_warn_for_single_v() {
        assert_eq!(
            default_directives("info"),
            "splice=info,splice_core=info,splice_adapters=warn"
        );
    }

    #[test]
    fn adapters_follow_debug_and_quiet() {
        assert_eq!(
            default_directives("debug"),
            "splice=debug,splice_core=debug,splice_adapters=debug"
        );
        assert_eq!(
            default_directives("error"),
            "splice=error,splice_core=error,splice_adapters=error"
        );
    }

    #[test]
    fn default_directives_parse() {
        for level in ["error", "warn", "info", "debug", "trace"] {
            assert!(EnvFilter::try_new(default_directives(level)).is_ok());
        }
    }

    #[test]
    fn origin_detail_grows_with_verbosity() {
        assert_eq!(
            Detail::for_level("info"),
            Detail { targets: false, locations: false }
        );
        assert_eq!(
            Detail::for_level("debug"),
            Detail { targets: true, locations: false }
        );
        assert_eq!(
            Detail::for_level("trace"),
            Detail { targets: true, locations: true }
        );
    }
}
