//! Tables for the per-rule rewrite summary and the active rule list.

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use owo_colors::OwoColorize;
use std::io::{self, Write};

use routeprune_core::{RewriteConfig, RewriteSummaryItem};

use crate::ui::output_format::print_styled;
use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};

fn styled_cell(text: String, entry: ThemeEntry, theme_map: &ThemeMap, supports_color: bool) -> Cell {
    match color_for(entry, theme_map) {
        Some(color) if supports_color => Cell::new(text.color(color).to_string()),
        _ => Cell::new(text),
    }
}

/// Prints one row per applied rule, in application order.
pub fn print_summary<W: Write>(
    summary: &[RewriteSummaryItem],
    writer: &mut W,
    theme_map: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    print_styled(writer, "Rewrite Summary:", ThemeEntry::Header, theme_map, supports_color)?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Rule", "Occurrences", "Bytes removed"]);

    for item in summary {
        table.add_row(vec![
            styled_cell(item.rule_name.clone(), ThemeEntry::SummaryRuleName, theme_map, supports_color),
            styled_cell(item.occurrences.to_string(), ThemeEntry::SummaryOccurrences, theme_map, supports_color)
                .set_alignment(CellAlignment::Right),
            Cell::new(item.removed_bytes).set_alignment(CellAlignment::Right),
        ]);
    }
    writeln!(writer, "{table}")?;

    let unmatched = summary.iter().filter(|s| s.occurrences == 0).count();
    if unmatched > 0 {
        writeln!(writer, "{unmatched} rule(s) matched nothing.")?;
    }
    Ok(())
}

/// Prints the rules that would run, in order.
pub fn print_rules<W: Write>(
    config: &RewriteConfig,
    writer: &mut W,
    theme_map: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Rule", "Spans lines", "Description"]);

    for (idx, rule) in config.rules.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1).set_alignment(CellAlignment::Right),
            styled_cell(rule.name.clone(), ThemeEntry::SummaryRuleName, theme_map, supports_color),
            Cell::new(if rule.dot_matches_new_line { "yes" } else { "no" }),
            Cell::new(rule.description.as_deref().unwrap_or("")),
        ]);
    }
    writeln!(writer, "{table}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;

    #[test]
    fn summary_lists_rules_and_unmatched_count() {
        let theme = ThemeStyle::default_theme_map();
        let summary = vec![
            RewriteSummaryItem { rule_name: "first".into(), occurrences: 2, removed_bytes: 40 },
            RewriteSummaryItem { rule_name: "second".into(), occurrences: 0, removed_bytes: 0 },
        ];
        let mut out = Vec::new();
        print_summary(&summary, &mut out, &theme, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Rewrite Summary:\n"));
        assert!(text.contains("first"));
        assert!(text.contains("second"));
        assert!(text.contains("1 rule(s) matched nothing."));
    }

    #[test]
    fn rule_list_is_numbered_in_order() {
        let theme = ThemeStyle::default_theme_map();
        let config = RewriteConfig::load_default_rules().unwrap();
        let mut out = Vec::new();
        print_rules(&config, &mut out, &theme, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        let first = text.find("storyboard_generator_import").unwrap();
        let last = text.find("storyboard_regenerate_route").unwrap();
        assert!(first < last);
    }
}
