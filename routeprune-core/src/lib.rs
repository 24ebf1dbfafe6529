// routeprune-core/src/lib.rs
//! # routeprune Core Library
//!
//! `routeprune-core` holds the platform-independent logic for one-shot source
//! cleanups: an ordered list of regex rewrite rules is applied to a single text
//! document, blank-line runs are collapsed, and the result is written back.
//!
//! The library treats the target file as an opaque string. It never parses the
//! source language and never checks that the rewritten file is well-formed.
//!
//! ## Modules
//!
//! * `config`: `RewriteRule`s and `RewriteConfig`, YAML loading, merging and filtering.
//! * `compiler`: turns rules into ordered `CompiledRules`.
//! * `engine`: the `RewriteEngine` trait and `RewriteOutcome`.
//! * `engines`: concrete engines (`RegexRewriter`).
//! * `normalize`: line-ending and blank-run normalization.
//! * `document`: reading and writing the target file.
//! * `headless`: one-shot helpers for strings and files.
//! * `errors`: the `PruneError` type.
//!
//! ## Usage Example
//!
//! ```rust
//! use routeprune_core::{headless_rewrite_string, RewriteConfig};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let config = RewriteConfig::load_default_rules()?;
//!     let input = "import { generateStoryboards } from '../services/imageGenerator';\nconst x = 1;\n";
//!     let output = headless_rewrite_string(config, input)?;
//!     assert_eq!(output, "const x = 1;\n");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return `anyhow::Result` or `PruneError`. A rule whose
//! pattern matches nothing is never an error.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod compiler;
pub mod config;
pub mod document;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod normalize;

/// Re-exports the public configuration types and functions for managing rewrite rules.
pub use config::{
    merge_rules,
    RewriteConfig,
    RewriteRule,
    RewriteSummaryItem,
    RuleConfigNotFoundError,
    DEFAULT_TARGET,
    MAX_PATTERN_LENGTH,
};

pub use errors::PruneError;

pub use engine::{RewriteEngine, RewriteOutcome};
pub use engines::regex_engine::{apply_pattern, apply_rule, RegexRewriter};

pub use compiler::{compile_rules, CompiledRule, CompiledRules};
pub use document::{load, save, save_atomic, save_with, WriteMode};
pub use normalize::{normalize_blank_runs, normalize_line_endings};

/// Re-exports types and functions for one-shot, non-interactive use.
pub use headless::{headless_rewrite_file, headless_rewrite_string, rewrite_file_with};
