// routeprune/src/main.rs
//! routeprune entry point.
//!
//! Builds the rule set, then either lists it or runs the rewrite. Errors are
//! printed in the theme's error style and exit with status 1.

use anyhow::{Context, Result};
use clap::Parser;
use is_terminal::IsTerminal;
use log::{debug, info};
use std::io;
use std::process::ExitCode;

use routeprune::cli::Cli;
use routeprune::commands::rewrite::{error_msg, load_rule_config, run_rewrite, warn_msg, RewriteOptions};
use routeprune::logger;
use routeprune::ui::summary::print_rules;
use routeprune::ui::theme::{build_theme_map, ThemeMap};
use routeprune_core::RegexRewriter;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logger::init_logger(cli.log_level());
    info!("routeprune started. Version: {}", env!("CARGO_PKG_VERSION"));

    let theme_map = build_theme_map(cli.theme.as_ref()).context("Theme error")?;

    match run(&cli, &theme_map) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            debug!("routeprune failed: {e:?}");
            error_msg(format!("{e:#}"), &theme_map);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run(cli: &Cli, theme_map: &ThemeMap) -> Result<()> {
    let config = load_rule_config(cli.config.as_deref(), &cli.enable, &cli.disable)?;

    if cli.list_rules {
        let stdout = io::stdout();
        let supports_color = stdout.is_terminal();
        print_rules(&config, &mut stdout.lock(), theme_map, supports_color)?;
        return Ok(());
    }

    if config.rules.is_empty() && !cli.quiet {
        warn_msg("No active rules; only blank-line normalization will run.", theme_map);
    }

    let opts = RewriteOptions {
        target: config.resolve_target(cli.target.as_deref()),
        write_mode: cli.write_mode(),
        dry_run: cli.dry_run,
        diff: cli.diff,
        fail_on_unmatched: cli.fail_on_unmatched,
        json_file: cli.json_file.clone(),
        no_summary: cli.no_summary,
        quiet: cli.quiet,
    };

    let engine = RegexRewriter::new(config)?;
    run_rewrite(&engine, &opts, theme_map)?;

    Ok(())
}
