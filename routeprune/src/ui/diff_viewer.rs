//! Unified diff preview of a rewrite.
//!
//! Removed lines are drawn with the `DiffRemoved` style, added lines with `DiffAdded`.

use diffy::{create_patch, Line as DiffLine};
use std::io::{self, Write};

use crate::ui::output_format::print_styled;
use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Writes a unified diff of `original` → `rewritten` for `label`.
///
/// Returns `false` and prints a single notice when the two texts are identical.
pub fn print_diff<W: Write>(
    label: &str,
    original: &str,
    rewritten: &str,
    writer: &mut W,
    theme_map: &ThemeMap,
    supports_color: bool,
) -> io::Result<bool> {
    if original == rewritten {
        writeln!(writer, "No changes for {label}.")?;
        return Ok(false);
    }

    let patch = create_patch(original, rewritten);
    let header = |w: &mut W, text: &str| print_styled(w, text, ThemeEntry::DiffHeader, theme_map, supports_color);

    header(writer, &format!("--- a/{label}"))?;
    header(writer, &format!("+++ b/{label}"))?;

    for hunk in patch.hunks() {
        let old = hunk.old_range();
        let new = hunk.new_range();
        header(
            writer,
            &format!("@@ -{},{} +{},{} @@", old.start(), old.len(), new.start(), new.len()),
        )?;
        for line in hunk.lines() {
            let (prefix, body, entry) = match line {
                DiffLine::Delete(s) => ("-", *s, Some(ThemeEntry::DiffRemoved)),
                DiffLine::Insert(s) => ("+", *s, Some(ThemeEntry::DiffAdded)),
                DiffLine::Context(s) => (" ", *s, None),
            };
            let text = format!("{prefix}{}", body.strip_suffix('\n').unwrap_or(body));
            match entry {
                Some(entry) => print_styled(writer, &text, entry, theme_map, supports_color)?,
                None => writeln!(writer, "{text}")?,
            }
        }
    }
    Ok(true)
}
