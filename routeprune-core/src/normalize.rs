//! Text normalization: line endings on load, blank runs after all rewrite rules.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static BLANK_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\n\n+").expect("blank-run pattern is a valid regex"));

/// Converts `\r\n` and lone `\r` line endings to `\n`.
///
/// Rule patterns are written against `\n`, so text is brought to this form
/// before any rule runs. Rewritten files are saved with `\n` endings.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Collapses every run of three or more `\n` into exactly two.
///
/// Runs of one or two newlines are left alone.
pub fn normalize_blank_runs(text: &str) -> Cow<'_, str> {
    BLANK_RUN.replace_all(text, "\n\n")
}
