// routeprune-core/src/engine.rs
//! Defines the core `RewriteEngine` trait and the result of a rewrite pass.
//!
//! The trait decouples the command layer from how rules are matched, so the
//! CLI and the headless helpers only ever talk to a `dyn RewriteEngine`.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;

use crate::compiler::CompiledRules;
use crate::config::{RewriteConfig, RewriteSummaryItem};

/// Text produced by a rewrite pass plus a per-rule account of what happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// The rewritten document.
    pub content: String,
    /// One entry per applied rule, in application order, including rules with zero matches.
    pub summary: Vec<RewriteSummaryItem>,
    /// Whether blank-run normalization changed anything.
    pub normalized: bool,
}

impl RewriteOutcome {
    pub fn total_occurrences(&self) -> usize {
        self.summary.iter().map(|s| s.occurrences).sum()
    }

    /// Names of rules whose pattern matched nothing.
    pub fn unmatched_rules(&self) -> Vec<&str> {
        self.summary
            .iter()
            .filter(|s| s.occurrences == 0)
            .map(|s| s.rule_name.as_str())
            .collect()
    }

    /// True when the output differs from `original`.
    pub fn changed(&self, original: &str) -> bool {
        self.content != original
    }
}

/// A pluggable rewrite engine.
pub trait RewriteEngine: Send + Sync {
    /// Applies every rule in order, then normalizes blank runs when configured.
    ///
    /// A rule matching nothing is not an error.
    fn rewrite(&self, content: &str) -> Result<RewriteOutcome>;

    /// Returns a reference to the `CompiledRules` used by the engine.
    fn compiled_rules(&self) -> &CompiledRules;

    /// Returns a reference to the engine's configuration.
    fn config(&self) -> &RewriteConfig;
}
