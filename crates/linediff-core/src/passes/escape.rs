//! Optional HTML escaping of entry texts.
//!
//! When highlighting is on, the highlighter escapes each segment itself
//! while splicing in its markup, so markers never land inside an entity.
//! This pass covers pipelines without highlighting.

use super::Pass;
use crate::diff::model::EditScript;
use std::borrow::Cow;

fn needs_escape(c: char) -> bool {
    matches!(c, '&' | '<' | '>' | '"' | '\'')
}

/// Escape `& < > " '`. Borrowed when nothing needs escaping.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.chars().any(needs_escape) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Escape an entry text, reusing its allocation when nothing changes.
pub(crate) fn escape_text(text: Cow<'_, str>) -> Cow<'_, str> {
    match text {
        Cow::Borrowed(s) => escape_html(s),
        Cow::Owned(s) if s.chars().any(needs_escape) => Cow::Owned(escape_html(&s).into_owned()),
        owned => owned,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlEscaper;

impl Pass for HtmlEscaper {
    fn name(&self) -> &str {
        "escape_html"
    }

    fn apply<'a>(&self, script: EditScript<'a>) -> EditScript<'a> {
        script.map_entries(|entry| entry.map_texts(escape_text))
    }
}
