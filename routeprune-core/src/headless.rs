// routeprune-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for running a rewrite without the CLI.
//! Provides one-shot helpers for strings and for the full load → rewrite → save cycle.

use anyhow::{Context, Result};
use log::info;
use std::path::Path;

use crate::config::RewriteConfig;
use crate::document::{self, WriteMode};
use crate::engine::{RewriteEngine, RewriteOutcome};
use crate::engines::regex_engine::RegexRewriter;
use crate::normalize::normalize_line_endings;

/// Rewrites `content` with the given rule set and returns the new text.
///
/// `content` is treated like freshly loaded file text, so CRLF endings are
/// converted to LF first.
pub fn headless_rewrite_string(config: RewriteConfig, content: &str) -> Result<String> {
    let engine = RegexRewriter::new(config)?;
    Ok(engine.rewrite(&normalize_line_endings(content))?.content)
}

/// Loads `path`, rewrites it and writes the result back.
///
/// Any read or write error aborts the run. Nothing is written when loading or
/// rewriting fails.
pub fn headless_rewrite_file(
    config: RewriteConfig,
    path: &Path,
    mode: WriteMode,
) -> Result<RewriteOutcome> {
    let engine = RegexRewriter::new(config)?;
    rewrite_file_with(&engine, path, mode)
}

/// Same as [`headless_rewrite_file`] but with a caller-supplied engine.
pub fn rewrite_file_with(
    engine: &dyn RewriteEngine,
    path: &Path,
    mode: WriteMode,
) -> Result<RewriteOutcome> {
    let original = document::load(path)
        .with_context(|| format!("Failed to load target file {}", path.display()))?;
    let outcome = engine.rewrite(&original)?;
    document::save_with(path, &outcome.content, mode)
        .with_context(|| format!("Failed to write target file {}", path.display()))?;
    info!("Rewrote {} ({:?}).", path.display(), mode);
    Ok(outcome)
}
