//! Configuration management for `routeprune-core`.
//!
//! This module defines the core data structures for rewrite rules and the rule set
//! that drives a rewrite run. It handles deserialization of YAML configurations and
//! provides utilities for loading, merging, filtering and validating them.
//!
//! Rule order is significant everywhere in this module: rules run in the order
//! they appear, and every operation here preserves that order.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// Path rewritten when neither the CLI nor the config names one.
pub const DEFAULT_TARGET: &str = "server/routes/scenes.ts";

/// A single (pattern, replacement) pair applied once to the evolving text buffer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RewriteRule {
    /// Unique identifier for the rule (e.g., "storyboard_storage").
    pub name: String,
    /// Human-readable description of what the rule removes.
    pub description: Option<String>,
    /// The regex pattern string.
    pub pattern: Option<String>,
    /// Replacement text. Supports `$1` / `${name}` capture expansion.
    pub replace_with: String,
    /// If true, `^` and `$` match at line boundaries.
    pub multiline: bool,
    /// If true, the dot character `.` in regex will match newlines.
    pub dot_matches_new_line: bool,
    /// If true, the rule is skipped unless explicitly enabled.
    pub opt_in: bool,
    /// Explicit override for enabling/disabling the rule.
    pub enabled: Option<bool>,
    /// Metadata tags for categorization.
    pub tags: Option<Vec<String>>,
}

impl Default for RewriteRule {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            pattern: None,
            replace_with: String::new(),
            multiline: false,
            dot_matches_new_line: false,
            opt_in: false,
            enabled: None,
            tags: None,
        }
    }
}

fn default_normalize() -> bool {
    true
}

/// Represents the top-level configuration for a rewrite run.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RewriteConfig {
    /// Ordered rewrite rules.
    #[serde(default)]
    pub rules: Vec<RewriteRule>,
    /// Collapse runs of three or more newlines after all rules have run.
    #[serde(default = "default_normalize")]
    pub normalize_blank_lines: bool,
    /// File to rewrite when the caller does not supply one.
    #[serde(default)]
    pub target: Option<PathBuf>,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            normalize_blank_lines: true,
            target: None,
        }
    }
}

/// Per-rule result of a rewrite run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewriteSummaryItem {
    pub rule_name: String,
    pub occurrences: usize,
    /// Net bytes removed by this rule (original match length minus replacement length).
    pub removed_bytes: usize,
}

/// Error type for missing rule configurations.
#[derive(Debug)]
pub struct RuleConfigNotFoundError {
    pub config_name: String,
}

impl fmt::Display for RuleConfigNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Rule configuration '{}' not found.", self.config_name)
    }
}

impl std::error::Error for RuleConfigNotFoundError {}

impl RewriteConfig {
    /// Loads rewrite rules from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RuleConfigNotFoundError {
                config_name: path.display().to_string(),
            }
            .into());
        }
        info!("Loading custom rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: RewriteConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        validate_rules(&config.rules)?;
        info!("Loaded {} rules from file {}.", config.rules.len(), path.display());

        Ok(config)
    }

    /// Loads the built-in storyboard removal rules.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default rules from embedded string...");
        let default_yaml = include_str!("../config/default_rules.yaml");
        let config: RewriteConfig =
            serde_yml::from_str(default_yaml).context("Failed to parse default rules")?;

        debug!("Loaded {} default rules.", config.rules.len());
        Ok(config)
    }

    /// Resolves the file to rewrite: explicit argument, then config, then the built-in default.
    pub fn resolve_target(&self, explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.target.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TARGET))
    }

    /// Filters active rules based on enable/disable lists provided via CLI.
    ///
    /// Disabled rules are dropped. Opt-in rules survive only when enabled.
    /// Relative order of the surviving rules is unchanged.
    pub fn set_active_rules(&mut self, enable_rules: &[String], disable_rules: &[String]) {
        let enable_set: HashSet<&str> = enable_rules.iter().map(String::as_str).collect();
        let disable_set: HashSet<&str> = disable_rules.iter().map(String::as_str).collect();

        debug!("Initial rules count before filtering: {}", self.rules.len());

        let all_rule_names: HashSet<&str> = self.rules.iter().map(|r| r.name.as_str()).collect();

        for rule_name in enable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `enable_rules` list does not exist.", rule_name);
        }

        for rule_name in disable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `disable_rules` list does not exist.", rule_name);
        }

        self.rules.retain(|rule| {
            let rule_name_str = rule.name.as_str();
            !disable_set.contains(rule_name_str)
                && (!rule.opt_in || enable_set.contains(rule_name_str))
        });

        debug!("Final active rules count after filtering: {}", self.rules.len());
    }
}

/// Merges user-defined rules over the defaults.
///
/// A user rule whose name matches a default replaces it at the default's position;
/// any other user rule is appended in file order.
pub fn merge_rules(default_config: RewriteConfig, user_config: Option<RewriteConfig>) -> RewriteConfig {
    debug!(
        "merge_rules called. Initial default rules count: {}",
        default_config.rules.len()
    );

    let Some(user_cfg) = user_config else {
        return default_config;
    };

    debug!("User config provided. Merging {} user rules.", user_cfg.rules.len());
    let mut final_rules = default_config.rules;
    for user_rule in user_cfg.rules {
        match final_rules.iter_mut().find(|r| r.name == user_rule.name) {
            Some(existing) => {
                debug!("User rule '{}' overrides default.", user_rule.name);
                *existing = user_rule;
            }
            None => final_rules.push(user_rule),
        }
    }

    let target = user_cfg.target.or(default_config.target);
    debug!("Final total rules after merge: {}", final_rules.len());

    RewriteConfig {
        rules: final_rules,
        normalize_blank_lines: user_cfg.normalize_blank_lines,
        target,
    }
}

/// Validates rule integrity (names, regex compilation, capture group references).
fn validate_rules(rules: &[RewriteRule]) -> Result<()> {
    let mut rule_names = HashSet::new();
    let mut errors = Vec::new();

    for rule in rules {
        if rule.name.is_empty() {
            errors.push("A rule has an empty `name` field.".to_string());
        } else if !rule_names.insert(rule.name.clone()) {
            errors.push(format!("Duplicate rule name found: '{}'.", rule.name));
        }

        let pattern = match &rule.pattern {
            Some(p) => p,
            None => {
                errors.push(format!("Rule '{}' is missing the `pattern` field.", rule.name));
                continue;
            }
        };

        if pattern.is_empty() {
            errors.push(format!("Rule '{}' has an empty `pattern` field.", rule.name));
            continue;
        }

        let regex = match RegexBuilder::new(pattern)
            .multi_line(rule.multiline)
            .dot_matches_new_line(rule.dot_matches_new_line)
            .build()
        {
            Ok(r) => r,
            Err(e) => {
                errors.push(format!("Rule '{}' has an invalid regex pattern: {}", rule.name, e));
                continue;
            }
        };

        // captures_len() counts the implicit whole-match group 0.
        let group_count = regex.captures_len() - 1;
        for group_num in numbered_references(&rule.replace_with) {
            if group_num > group_count {
                errors.push(format!(
                    "Rule '{}': replacement references non-existent capture group '${}'.",
                    rule.name, group_num
                ));
            }
        }
    }

    if !errors.is_empty() {
        let full_error_message = format!("Rule validation failed:\n{}", errors.join("\n"));
        Err(anyhow!(full_error_message))
    } else {
        Ok(())
    }
}

/// Numbered capture references (`$1`, `${2}`) in a replacement string. `$$` is a literal dollar.
fn numbered_references(replacement: &str) -> Vec<usize> {
    let bytes = replacement.as_bytes();
    let mut refs = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'$' {
            i += 1;
            continue;
        }
        if bytes.get(i + 1) == Some(&b'$') {
            i += 2;
            continue;
        }
        let (start, braced) = if bytes.get(i + 1) == Some(&b'{') {
            (i + 2, true)
        } else {
            (i + 1, false)
        };
        let digits_end = bytes[start..]
            .iter()
            .position(|b| !b.is_ascii_digit())
            .map_or(bytes.len(), |p| start + p);
        let closed = !braced || bytes.get(digits_end) == Some(&b'}');
        // `$1abc` is the named group "1abc" in regex replacement syntax, not a numbered one.
        let terminated = braced
            || bytes
                .get(digits_end)
                .map_or(true, |b| !(b.is_ascii_alphanumeric() || *b == b'_'));
        if digits_end > start && closed && terminated {
            if let Ok(n) = replacement[start..digits_end].parse::<usize>() {
                refs.push(n);
            }
        }
        i = digits_end.max(i + 1);
    }
    refs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str, pattern: &str) -> RewriteRule {
        RewriteRule {
            name: name.to_string(),
            pattern: Some(pattern.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn default_rules_are_ordered_and_valid() {
        let config = RewriteConfig::load_default_rules().unwrap();
        let names: Vec<&str> = config.rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "storyboard_generator_import",
                "storyboard_batch_import",
                "character_memory_import",
                "storyboard_storage",
                "debug_storyboard_access_route",
                "storyboard_generate_route",
                "storyboard_get_route",
                "storyboard_recover_route",
                "storyboard_regenerate_route",
            ]
        );
        assert!(validate_rules(&config.rules).is_ok());
        assert!(config.normalize_blank_lines);
        assert_eq!(config.target, Some(PathBuf::from(DEFAULT_TARGET)));
    }

    #[test]
    fn route_rules_match_across_lines() {
        let config = RewriteConfig::load_default_rules().unwrap();
        for r in config.rules.iter().filter(|r| r.name.ends_with("_route")) {
            assert!(r.dot_matches_new_line, "rule '{}' must span lines", r.name);
        }
        for r in config.rules.iter().filter(|r| r.name.ends_with("_import")) {
            assert!(!r.dot_matches_new_line, "rule '{}' must stay on its lines", r.name);
        }
    }

    #[test]
    fn merge_preserves_default_positions() {
        let defaults = RewriteConfig {
            rules: vec![rule("a", "a"), rule("b", "b"), rule("c", "c")],
            ..Default::default()
        };
        let user = RewriteConfig {
            rules: vec![rule("d", "d"), rule("b", "bee")],
            normalize_blank_lines: false,
            target: Some(PathBuf::from("src/other.ts")),
        };
        let merged = merge_rules(defaults, Some(user));
        let names: Vec<&str> = merged.rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
        assert_eq!(merged.rules[1].pattern.as_deref(), Some("bee"));
        assert!(!merged.normalize_blank_lines);
        assert_eq!(merged.target, Some(PathBuf::from("src/other.ts")));
    }

    #[test]
    fn merge_without_user_config_is_identity() {
        let defaults = RewriteConfig::load_default_rules().unwrap();
        assert_eq!(merge_rules(defaults.clone(), None), defaults);
    }

    #[test]
    fn set_active_rules_respects_opt_in_and_disable() {
        let mut opt = rule("opt", "o");
        opt.opt_in = true;
        let mut config = RewriteConfig {
            rules: vec![rule("a", "a"), opt, rule("b", "b")],
            ..Default::default()
        };
        config.set_active_rules(&[], &["b".to_string(), "missing".to_string()]);
        let names: Vec<&str> = config.rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a"]);

        let mut opt = rule("opt", "o");
        opt.opt_in = true;
        let mut config = RewriteConfig {
            rules: vec![opt, rule("a", "a")],
            ..Default::default()
        };
        config.set_active_rules(&["opt".to_string()], &[]);
        assert_eq!(config.rules.len(), 2);
        assert_eq!(config.rules[0].name, "opt");
    }

    #[test]
    fn resolve_target_precedence() {
        let mut config = RewriteConfig::default();
        assert_eq!(config.resolve_target(None), PathBuf::from(DEFAULT_TARGET));
        config.target = Some(PathBuf::from("cfg.ts"));
        assert_eq!(config.resolve_target(None), PathBuf::from("cfg.ts"));
        assert_eq!(
            config.resolve_target(Some(Path::new("cli.ts"))),
            PathBuf::from("cli.ts")
        );
    }

    #[test]
    fn validation_collects_every_problem() {
        let mut bad_ref = rule("refs", "(a)");
        bad_ref.replace_with = "$2".to_string();
        let rules = vec![
            rule("", "x"),
            rule("dup", "x"),
            rule("dup", "y"),
            RewriteRule { name: "nopat".into(), ..Default::default() },
            rule("badre", "(unclosed"),
            bad_ref,
        ];
        let err = validate_rules(&rules).unwrap_err().to_string();
        assert!(err.contains("empty `name`"));
        assert!(err.contains("Duplicate rule name found: 'dup'"));
        assert!(err.contains("'nopat' is missing the `pattern`"));
        assert!(err.contains("'badre' has an invalid regex"));
        assert!(err.contains("non-existent capture group '$2'"));
    }

    #[test]
    fn numbered_references_parsing() {
        assert_eq!(numbered_references("$1 and ${2}"), vec![1, 2]);
        assert_eq!(numbered_references("$$1"), Vec::<usize>::new());
        assert_eq!(numbered_references("$1abc ${name}"), Vec::<usize>::new());
        assert_eq!(numbered_references("plain"), Vec::<usize>::new());
    }
}
