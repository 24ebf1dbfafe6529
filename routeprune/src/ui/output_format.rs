//! Themed one-line messages for stdout/stderr.

use owo_colors::OwoColorize;
use std::io::{self, Write};

use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};

/// Writes `text` followed by a newline, colored for `entry` when `supports_color` is set.
pub fn print_styled<W: Write>(
    writer: &mut W,
    text: &str,
    entry: ThemeEntry,
    theme_map: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    match color_for(entry, theme_map) {
        Some(color) if supports_color => writeln!(writer, "{}", text.color(color)),
        _ => writeln!(writer, "{}", text),
    }
}

pub fn print_success_message<W: Write>(
    writer: &mut W,
    msg: &str,
    theme_map: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    print_styled(writer, msg, ThemeEntry::Success, theme_map, supports_color)
}

pub fn print_info_message<W: Write>(
    writer: &mut W,
    msg: &str,
    theme_map: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    print_styled(writer, msg, ThemeEntry::Info, theme_map, supports_color)
}

pub fn print_warn_message<W: Write>(
    writer: &mut W,
    msg: &str,
    theme_map: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    print_styled(writer, &format!("Warning: {msg}"), ThemeEntry::Warn, theme_map, supports_color)
}

pub fn print_error_message<W: Write>(
    writer: &mut W,
    msg: &str,
    theme_map: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    print_styled(writer, &format!("Error: {msg}"), ThemeEntry::Error, theme_map, supports_color)
}
