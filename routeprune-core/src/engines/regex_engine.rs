// routeprune-core/src/engines/regex_engine.rs
//! A `RewriteEngine` implementation that applies ordered regex substitutions.
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use log::{debug, info};
use std::borrow::Cow;

use crate::compiler::{build_regex, compile_rules, CompiledRule, CompiledRules};
use crate::config::{RewriteConfig, RewriteSummaryItem};
use crate::engine::{RewriteEngine, RewriteOutcome};
use crate::errors::PruneError;
use crate::normalize::normalize_blank_runs;

/// Replaces every non-overlapping match of `rule` in `text`.
///
/// Returns the new text and the number of matches replaced.
pub fn apply_rule(text: &str, rule: &CompiledRule) -> (String, usize) {
    let occurrences = rule.regex.find_iter(text).count();
    if occurrences == 0 {
        return (text.to_string(), 0);
    }
    let replaced = rule.regex.replace_all(text, rule.replace_with.as_str());
    (replaced.into_owned(), occurrences)
}

/// Compiles `pattern` and replaces every match in `text` with `replacement`.
///
/// With `dot_matches_new_line`, `.` also matches `\n`, which lets a non-greedy
/// `start.*?end` pattern remove a whole block up to its first closing marker.
pub fn apply_pattern(
    text: &str,
    pattern: &str,
    replacement: &str,
    dot_matches_new_line: bool,
) -> Result<String, PruneError> {
    let regex = build_regex(pattern, false, dot_matches_new_line)
        .map_err(PruneError::InvalidPattern)?;
    Ok(regex.replace_all(text, replacement).into_owned())
}

#[derive(Debug)]
pub struct RegexRewriter {
    compiled_rules: CompiledRules,
    config: RewriteConfig,
}

impl RegexRewriter {
    pub fn new(config: RewriteConfig) -> Result<Self> {
        let compiled_rules = compile_rules(config.rules.clone())
            .context("Failed to compile rewrite rules for RegexRewriter")?;

        Ok(Self {
            compiled_rules,
            config,
        })
    }
}

impl RewriteEngine for RegexRewriter {
    fn rewrite(&self, content: &str) -> Result<RewriteOutcome> {
        let mut buffer = content.to_string();
        let mut summary = Vec::with_capacity(self.compiled_rules.len());

        for rule in &self.compiled_rules.rules {
            let before = buffer.len();
            let (next, occurrences) = apply_rule(&buffer, rule);
            if occurrences == 0 {
                debug!("Rule '{}' matched nothing; leaving text unchanged.", rule.name);
            } else {
                debug!("Rule '{}' replaced {} occurrence(s).", rule.name, occurrences);
            }
            let removed_bytes = before.saturating_sub(next.len());
            buffer = next;
            summary.push(RewriteSummaryItem {
                rule_name: rule.name.clone(),
                occurrences,
                removed_bytes,
            });
        }

        let mut normalized = false;
        if self.config.normalize_blank_lines {
            if let Cow::Owned(collapsed) = normalize_blank_runs(&buffer) {
                debug!("Collapsed blank-line runs.");
                normalized = true;
                buffer = collapsed;
            }
        }

        let outcome = RewriteOutcome {
            content: buffer,
            summary,
            normalized,
        };
        info!(
            "Applied {} rules, {} total occurrence(s) replaced.",
            self.compiled_rules.len(),
            outcome.total_occurrences()
        );
        Ok(outcome)
    }

    fn compiled_rules(&self) -> &CompiledRules {
        &self.compiled_rules
    }

    fn config(&self) -> &RewriteConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RewriteRule;

    const GENERATOR_IMPORT: &str =
        "import { generateStoryboards } from '../services/imageGenerator';\n";
    const BATCH_IMPORT: &str =
        "import { generateStoryboardBatch } from '../services/robustImageGenerator';\n";

    fn default_engine() -> RegexRewriter {
        RegexRewriter::new(RewriteConfig::load_default_rules().unwrap()).unwrap()
    }

    #[test]
    fn apply_pattern_non_greedy_block() {
        let text = "keep\n/* start */\nbody\n});\nmiddle\n});\ntail\n";
        let out = apply_pattern(text, r"/\* start \*/.*?\}\);\n", "", true).unwrap();
        assert_eq!(out, "keep\nmiddle\n});\ntail\n");
    }

    #[test]
    fn apply_pattern_without_dot_all_stays_on_one_line() {
        let text = "/* start */\nbody\n});\n";
        let out = apply_pattern(text, r"/\* start \*/.*?\}\);\n", "", false).unwrap();
        assert_eq!(out, text);
    }

    #[test]
    fn apply_pattern_rejects_invalid_regex() {
        let err = apply_pattern("x", "(", "", false).unwrap_err();
        assert!(matches!(err, PruneError::InvalidPattern(_)));
        let msg = err.to_string();
        assert!(msg.starts_with("Invalid regex pattern: "));
        assert!(!msg.contains("rewrite rule"));
    }

    #[test]
    fn apply_rule_counts_and_expands_captures() {
        let rules = compile_rules(vec![RewriteRule {
            name: "swap".into(),
            pattern: Some(r"(\w+)=(\w+)".into()),
            replace_with: "$2=$1".into(),
            ..Default::default()
        }])
        .unwrap();
        let (out, n) = apply_rule("a=b c=d", &rules.rules[0]);
        assert_eq!(out, "b=a d=c");
        assert_eq!(n, 2);
    }

    #[test]
    fn removes_imports_and_generate_block() {
        let input = format!(
            "import express from 'express';\n{GENERATOR_IMPORT}{BATCH_IMPORT}\nconst router = express.Router();\n\n\
/**\n * POST /api/storyboards/generate/:jobId/:sceneIndex\n * Generate storyboards\n */\n\
router.post('/storyboards/generate', async (req, res) => {{\n  res.json(result);\n}});\n\n\
export default router;\n"
        );
        let outcome = default_engine().rewrite(&input).unwrap();
        assert!(!outcome.content.contains("generateStoryboards"));
        assert!(!outcome.content.contains("generateStoryboardBatch"));
        assert!(!outcome.content.contains("/api/storyboards/generate"));
        assert!(!outcome.content.contains("\n\n\n"));
        assert_eq!(
            outcome.content,
            "import express from 'express';\n\nconst router = express.Router();\n\nexport default router;\n"
        );

        let by_name = |n: &str| outcome.summary.iter().find(|s| s.rule_name == n).unwrap().occurrences;
        assert_eq!(by_name("storyboard_generator_import"), 1);
        assert_eq!(by_name("storyboard_batch_import"), 1);
        assert_eq!(by_name("storyboard_generate_route"), 1);
        assert_eq!(by_name("storyboard_recover_route"), 0);
    }

    #[test]
    fn block_removal_stops_at_first_closing_marker() {
        let input = "/**\n * GET /api/storyboards/:jobId\n */\nrouter.get('/x', h);\n});\n\
router.get('/keep', (req, res) => {\n  res.send('ok');\n});\n";
        let outcome = default_engine().rewrite(input).unwrap();
        assert_eq!(
            outcome.content,
            "router.get('/keep', (req, res) => {\n  res.send('ok');\n});\n"
        );
    }

    #[test]
    fn text_without_markers_only_gets_normalized() {
        let input = "const a = 1;\n\n\n\nconst b = 2;\n\nconst c = 3;\n";
        let outcome = default_engine().rewrite(input).unwrap();
        assert_eq!(outcome.content, "const a = 1;\n\nconst b = 2;\n\nconst c = 3;\n");
        assert_eq!(outcome.total_occurrences(), 0);
        assert_eq!(outcome.unmatched_rules().len(), outcome.summary.len());
        assert!(outcome.normalized);
    }

    #[test]
    fn normalization_can_be_turned_off() {
        let mut config = RewriteConfig::load_default_rules().unwrap();
        config.normalize_blank_lines = false;
        let engine = RegexRewriter::new(config).unwrap();
        let input = "a\n\n\n\nb\n";
        let outcome = engine.rewrite(input).unwrap();
        assert_eq!(outcome.content, input);
        assert!(!outcome.changed(input));
    }

    #[test]
    fn rewriting_twice_is_idempotent() {
        let input = format!(
            "{GENERATOR_IMPORT}const storyboardsStorage = new Map<string, any[]>();\n\n\n\
// Debug endpoint to test storyboard access\nrouter.get('/debug/storyboard-access/:userId', async (req, res) => {{\n  res.json([]);\n}});\n\nmodule.exports = router;\n"
        );
        let engine = default_engine();
        let once = engine.rewrite(&input).unwrap();
        let twice = engine.rewrite(&once.content).unwrap();
        assert_eq!(once.content, "\n\nmodule.exports = router;\n");
        assert_eq!(twice.content, once.content);
        assert_eq!(twice.total_occurrences(), 0);
    }
}
