//! compiler.rs - Turns `RewriteRule`s into ready-to-apply regexes.
//!
//! Compilation keeps the input order. Rules that are explicitly disabled or have
//! no pattern are skipped; every other failure is collected and reported at once.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, warn};
use regex::{Regex, RegexBuilder};

use crate::config::{RewriteRule, MAX_PATTERN_LENGTH};
use crate::errors::PruneError;

/// Represents a single compiled rewrite rule.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    /// The compiled regular expression used for matching.
    pub regex: Regex,
    /// The string to replace matches of this rule's pattern with.
    pub replace_with: String,
    /// The unique name of the rewrite rule.
    pub name: String,
}

/// Ordered collection of compiled rules.
#[derive(Debug, Clone, Default)]
pub struct CompiledRules {
    pub rules: Vec<CompiledRule>,
}

impl CompiledRules {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name.as_str())
    }
}

/// Builds a single regex the way every rule is built.
pub(crate) fn build_regex(
    pattern: &str,
    multiline: bool,
    dot_matches_new_line: bool,
) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .multi_line(multiline)
        .dot_matches_new_line(dot_matches_new_line)
        .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
        .build()
}

/// Compiles a list of `RewriteRule`s into `CompiledRules`, preserving order.
pub fn compile_rules(rules_to_compile: Vec<RewriteRule>) -> Result<CompiledRules, PruneError> {
    debug!("Starting compilation of {} rules.", rules_to_compile.len());

    let mut compiled_rules = Vec::with_capacity(rules_to_compile.len());
    let mut compilation_errors = Vec::new();

    for rule in rules_to_compile {
        if rule.enabled == Some(false) {
            debug!("Skipping rule '{}' because it is disabled.", &rule.name);
            continue;
        }

        let Some(pattern) = rule.pattern.as_ref() else {
            warn!("Skipping rule '{}' because its pattern is missing.", &rule.name);
            continue;
        };

        debug!(
            "Attempting to compile rule: '{}' with pattern '{:?}'",
            &rule.name, pattern
        );

        if pattern.len() > MAX_PATTERN_LENGTH {
            compilation_errors.push(PruneError::PatternLengthExceeded(
                rule.name,
                pattern.len(),
                MAX_PATTERN_LENGTH,
            ));
            continue;
        }

        match build_regex(pattern, rule.multiline, rule.dot_matches_new_line) {
            Ok(regex) => {
                debug!(
                    target: "routeprune_core::compiler",
                    "Rule '{}' compiled successfully.",
                    &rule.name
                );
                compiled_rules.push(CompiledRule {
                    regex,
                    replace_with: rule.replace_with,
                    name: rule.name,
                });
            }
            Err(e) => {
                compilation_errors.push(PruneError::RuleCompilationError(rule.name, e));
            }
        }
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        return Err(PruneError::Fatal(format!(
            "Failed to compile {} rule(s):\n{}",
            compilation_errors.len(),
            error_message
        )));
    }

    debug!(
        "Finished compiling rules. Total compiled: {}.",
        compiled_rules.len()
    );
    Ok(CompiledRules { rules: compiled_rules })
}
