// routeprune-core/src/engines/mod.rs
//! Concrete `RewriteEngine` implementations.
//!
//! Each engine lives in its own file and is declared here.

pub mod regex_engine;
