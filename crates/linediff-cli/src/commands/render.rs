//! Output rendering for the diff command

use linediff_core::{DiffStats, EditScript, EntryKind};
use serde::Serialize;

fn marker(kind: EntryKind) -> char {
    match kind {
        EntryKind::Equal => ' ',
        EntryKind::Change => '~',
        EntryKind::Insert => '+',
        EntryKind::Delete => '-',
        EntryKind::Skip => ' ',
    }
}

/// Side-by-side table: before label and text on the left, after on the right.
pub fn render_text(script: &EditScript<'_>) -> String {
    let label_width = script
        .iter()
        .flat_map(|e| [e.before_label.chars().count(), e.after_label.chars().count()])
        .max()
        .unwrap_or(0);
    let text_width = script
        .iter()
        .map(|e| e.before_text.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for entry in script.iter() {
        let row = format!(
            "{:>lw$} {:<tw$} {} {:>lw$} {}",
            entry.before_label,
            entry.before_text,
            marker(entry.kind),
            entry.after_label,
            entry.after_text,
            lw = label_width,
            tw = text_width,
        );
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out.push_str(&script.stats().to_string());
    out.push('\n');
    out
}

#[derive(Serialize)]
struct JsonReport<'s, 'a> {
    stats: DiffStats,
    entries: &'s EditScript<'a>,
}

/// JSON document with the script's stats and its entries.
pub fn render_json(script: &EditScript<'_>) -> serde_json::Result<String> {
    let report = JsonReport {
        stats: script.stats(),
        entries: script,
    };
    let mut text = serde_json::to_string_pretty(&report)?;
    text.push('\n');
    Ok(text)
}
