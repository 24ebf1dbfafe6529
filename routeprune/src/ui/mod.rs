//! Console presentation: theme, themed messages, diff preview and tables.

pub mod diff_viewer;
pub mod output_format;
pub mod summary;
pub mod theme;
