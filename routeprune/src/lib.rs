// routeprune/src/lib.rs
//! # routeprune CLI Application
//!
//! Command-line front end for `routeprune-core`: argument parsing, logging
//! setup, the rewrite command and its console output.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;

pub use commands::rewrite::{load_rule_config, run_rewrite, RewriteOptions, SUCCESS_MESSAGE};
