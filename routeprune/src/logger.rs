//! Logger setup for the routeprune binary and its tests.
//!
//! Log lines go to stderr as `[LEVEL target] message` so stdout stays free for
//! the diff preview and the completion message.

use log::LevelFilter;
use std::io::Write;

/// Initializes `env_logger`.
///
/// With `Some(level)` that level is forced. With `None` the `RUST_LOG` environment
/// variable decides, defaulting to warnings only. Calling this more than once is a no-op.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = env_logger::Builder::new();
    match level_override {
        Some(level) => {
            builder.filter_level(level);
        }
        None => {
            builder.filter_level(LevelFilter::Warn);
            builder.parse_default_env();
        }
    }
    builder
        .format(|buf, record| {
            writeln!(buf, "[{} {}] {}", record.level(), record.target(), record.args())
        })
        .target(env_logger::Target::Stderr);

    let _ = builder.try_init();
}
