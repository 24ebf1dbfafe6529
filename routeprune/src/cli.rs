//! This file defines the command-line interface (CLI) for the routeprune application.
//!
//! Invoked with no arguments, routeprune rewrites the default target with the
//! built-in rules. Every flag is optional.
//! License: MIT OR Apache-2.0

use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

use routeprune_core::WriteMode;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "routeprune",
    version = env!("CARGO_PKG_VERSION"),
    about = "Remove a fixed set of routes and imports from one source file",
    long_about = "routeprune applies an ordered list of regular-expression rewrite rules to a single source file, collapses the blank-line runs left behind, and writes the file back in place. With no arguments it strips the storyboard routes, imports and storage from server/routes/scenes.ts.",
)]
pub struct Cli {
    /// File to rewrite.
    #[arg(
        value_name = "FILE",
        env = "ROUTEPRUNE_TARGET",
        help = "File to rewrite (defaults to the config's target, then server/routes/scenes.ts)."
    )]
    pub target: Option<PathBuf>,

    /// Path to a YAML rule file merged over the built-in rules.
    #[arg(long = "config", value_name = "FILE", help = "Path to a YAML rule file merged over the built-in rules.")]
    pub config: Option<PathBuf>,

    /// Explicitly enable these rule names (comma-separated).
    #[arg(long, short = 'e', value_delimiter = ',', help = "Enable these rule names, including opt-in rules (comma-separated).")]
    pub enable: Vec<String>,

    /// Explicitly disable these rule names (comma-separated).
    #[arg(long, short = 'x', value_delimiter = ',', help = "Disable these rule names (comma-separated).")]
    pub disable: Vec<String>,

    /// Compute the rewrite without touching the file.
    #[arg(long = "dry-run", help = "Compute the rewrite but do not write the file.")]
    pub dry_run: bool,

    /// Show a unified diff of the rewrite.
    #[arg(long, short = 'D', help = "Print a unified diff of the rewrite to stdout.")]
    pub diff: bool,

    /// Write through a temporary file and rename it over the target.
    #[arg(long, help = "Write through a temporary file in the same directory and rename it over the target.")]
    pub atomic: bool,

    /// Fail if any rule matched nothing.
    #[arg(long = "fail-on-unmatched", help = "Exit with an error, without writing, if any rule matched nothing.")]
    pub fail_on_unmatched: bool,

    /// Export the per-rule summary as JSON.
    #[arg(long = "json-file", value_name = "FILE", help = "Export the per-rule summary to a JSON file.")]
    pub json_file: Option<PathBuf>,

    /// Print the active rules and exit.
    #[arg(long = "list-rules", help = "Print the active rules in application order and exit.")]
    pub list_rules: bool,

    /// Suppress the rewrite summary.
    #[arg(long = "no-summary", help = "Suppress the per-rule summary on stderr.")]
    pub no_summary: bool,

    /// Disable informational messages
    #[arg(long, short = 'q', help = "Suppress all log output and the summary.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', conflicts_with = "quiet", help = "Enable debug logging.")]
    pub debug: bool,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,
}

impl Cli {
    /// Log level forced by flags, or `None` to defer to `RUST_LOG`.
    pub fn log_level(&self) -> Option<LevelFilter> {
        if self.quiet {
            Some(LevelFilter::Off)
        } else if self.debug {
            Some(LevelFilter::Debug)
        } else {
            None
        }
    }

    pub fn write_mode(&self) -> WriteMode {
        if self.atomic {
            WriteMode::Atomic
        } else {
            WriteMode::InPlace
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_is_a_valid_invocation() {
        let cli = Cli::try_parse_from(["routeprune"]).unwrap();
        assert!(!cli.dry_run);
        assert_eq!(cli.write_mode(), WriteMode::InPlace);
        assert!(cli.enable.is_empty());
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::try_parse_from([
            "routeprune", "src/app.ts", "--atomic", "-x", "a,b", "--dry-run", "-d",
        ])
        .unwrap();
        assert_eq!(cli.target, Some(PathBuf::from("src/app.ts")));
        assert_eq!(cli.disable, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(cli.write_mode(), WriteMode::Atomic);
        assert_eq!(cli.log_level(), Some(LevelFilter::Debug));
    }

    #[test]
    fn quiet_and_debug_conflict() {
        assert!(Cli::try_parse_from(["routeprune", "-q", "-d"]).is_err());
    }
}
