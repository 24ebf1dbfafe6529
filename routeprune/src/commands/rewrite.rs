//! The rewrite command: load → rewrite → (diff) → report → save.

use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use routeprune_core::{
    document, merge_rules, RewriteConfig, RewriteEngine, RewriteOutcome, RewriteSummaryItem,
    WriteMode,
};

use crate::ui::diff_viewer;
use crate::ui::output_format;
use crate::ui::summary;
use crate::ui::theme::ThemeMap;

/// Printed on stdout once the rewritten file has been written.
pub const SUCCESS_MESSAGE: &str = "Storyboard routes removed successfully";

/// Options for a single rewrite run.
#[derive(Debug, Clone)]
pub struct RewriteOptions {
    pub target: PathBuf,
    pub write_mode: WriteMode,
    pub dry_run: bool,
    pub diff: bool,
    pub fail_on_unmatched: bool,
    pub json_file: Option<PathBuf>,
    pub no_summary: bool,
    pub quiet: bool,
}

/// JSON shape of `--json-file`.
#[derive(Debug, Serialize)]
struct RewriteReport<'a> {
    target: &'a Path,
    dry_run: bool,
    changed: bool,
    normalized: bool,
    total_occurrences: usize,
    rules: &'a [RewriteSummaryItem],
}

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), theme, supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), theme, supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), theme, supports_color);
}

/// Builds the rule set: built-in defaults, then the optional user file, then enable/disable filtering.
pub fn load_rule_config(
    config_path: Option<&Path>,
    enable: &[String],
    disable: &[String],
) -> Result<RewriteConfig> {
    let defaults = RewriteConfig::load_default_rules()?;
    let user = match config_path {
        Some(path) => Some(
            RewriteConfig::load_from_file(path)
                .with_context(|| format!("Failed to load rule config {}", path.display()))?,
        ),
        None => None,
    };
    let mut config = merge_rules(defaults, user);
    config.set_active_rules(enable, disable);
    Ok(config)
}

/// Runs the full rewrite against `opts.target`.
///
/// I/O failures abort the run. Nothing is written if loading fails, or if
/// `fail_on_unmatched` is set and some rule matched nothing. The JSON report is
/// written before the target, so a report failure leaves the target untouched.
pub fn run_rewrite(
    engine: &dyn RewriteEngine,
    opts: &RewriteOptions,
    theme_map: &ThemeMap,
) -> Result<RewriteOutcome> {
    info!("Starting routeprune operation on {}.", opts.target.display());

    let original = document::load(&opts.target)
        .with_context(|| format!("Failed to read target file {}", opts.target.display()))?;
    let outcome = engine.rewrite(&original).context("Rewrite failed")?;

    debug!(
        "Content rewritten. Original length: {}, rewritten length: {}",
        original.len(),
        outcome.content.len()
    );

    if opts.fail_on_unmatched {
        let unmatched = outcome.unmatched_rules();
        if !unmatched.is_empty() {
            bail!(
                "{} rule(s) matched nothing in {}: {}",
                unmatched.len(),
                opts.target.display(),
                unmatched.join(", ")
            );
        }
    }

    if opts.diff {
        let stdout = io::stdout();
        let supports_color = stdout.is_terminal();
        let label = opts.target.display().to_string();
        diff_viewer::print_diff(&label, &original, &outcome.content, &mut stdout.lock(), theme_map, supports_color)?;
    }

    if let Some(path) = &opts.json_file {
        write_json_report(path, opts, &original, &outcome)?;
    }

    if opts.dry_run {
        info_msg(
            format!("Dry run: {} was not modified.", opts.target.display()),
            theme_map,
        );
    } else {
        document::save_with(&opts.target, &outcome.content, opts.write_mode)
            .with_context(|| format!("Failed to write target file {}", opts.target.display()))?;
        debug!("Wrote {} bytes to {}.", outcome.content.len(), opts.target.display());
    }

    if !opts.no_summary && !opts.quiet {
        let supports_color = io::stderr().is_terminal();
        summary::print_summary(&outcome.summary, &mut io::stderr(), theme_map, supports_color)?;
    }

    if !opts.dry_run {
        let stdout = io::stdout();
        let supports_color = stdout.is_terminal();
        output_format::print_success_message(&mut stdout.lock(), SUCCESS_MESSAGE, theme_map, supports_color)?;
    }

    info!("routeprune operation completed.");
    Ok(outcome)
}

fn write_json_report(
    path: &Path,
    opts: &RewriteOptions,
    original: &str,
    outcome: &RewriteOutcome,
) -> Result<()> {
    let report = RewriteReport {
        target: &opts.target,
        dry_run: opts.dry_run,
        changed: outcome.changed(original),
        normalized: outcome.normalized,
        total_occurrences: outcome.total_occurrences(),
        rules: &outcome.summary,
    };
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize summary")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write JSON summary to {}", path.display()))?;
    debug!("Wrote JSON summary to {}.", path.display());
    Ok(())
}
