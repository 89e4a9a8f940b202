//! Inline highlighting of the differing spans inside changed line pairs.
//!
//! Both texts are tokenized, the tokens are aligned with the line aligner,
//! and every maximal run of non-matching tokens is wrapped in markup.
//! Markers are spliced in at byte offsets, so the highlighted text minus the
//! markers is exactly the input text. With `escape_html` set, spans are still
//! computed on the raw text and each segment is escaped as it is spliced.

use super::escape::{escape_html, escape_text};
use super::Pass;
use crate::diff::align::{align, ChangePairing, EditOp};
use crate::diff::comparator::Exact;
use crate::diff::model::{DiffEntry, EditScript, EntryKind};
use crate::errors::{LineDiffError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Unit of inline comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Every char is a token
    Char,
    /// Runs of alphanumerics and `_` are one token; any other char is a
    /// token of its own
    #[default]
    Word,
}

/// Opening and closing markers wrapped around a highlighted span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup {
    open: String,
    close: String,
}

impl Markup {
    /// Build markup from a tag name or an opening tag.
    ///
    /// `"b"` and `"<b>"` both give `<b>`/`</b>`; `<span class="d">` closes
    /// with `</span>`.
    ///
    /// # Errors
    ///
    /// `EmptyMarkupTag` if no tag name is left after trimming.
    pub fn from_tag(tag: &str) -> Result<Self> {
        let tag = tag.trim();
        let inner = tag.strip_prefix('<').unwrap_or(tag);
        let inner = inner.strip_suffix('>').unwrap_or(inner).trim();
        let name = inner.split_whitespace().next().unwrap_or("");
        if name.is_empty() {
            return Err(LineDiffError::EmptyMarkupTag);
        }
        Ok(Self {
            open: format!("<{}>", inner),
            close: format!("</{}>", name),
        })
    }

    /// Markup from arbitrary literal markers
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    pub fn open(&self) -> &str {
        &self.open
    }

    pub fn close(&self) -> &str {
        &self.close
    }
}

#[derive(Debug, Clone)]
pub struct HighlightOptions {
    pub markup: Markup,
    pub granularity: Granularity,
    /// Hunks separated by fewer than this many equal tokens merge
    pub token_radius: usize,
    /// More spans than this collapse into one first-to-last span
    pub max_spans: Option<usize>,
    /// Also wrap the whole text of unpaired inserts and deletes
    pub mark_unpaired: bool,
    /// HTML-escape every entry text, leaving only the markup raw
    pub escape_html: bool,
}

impl HighlightOptions {
    pub fn new(markup: Markup) -> Self {
        Self {
            markup,
            granularity: Granularity::default(),
            token_radius: 0,
            max_spans: None,
            mark_unpaired: false,
            escape_html: false,
        }
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn with_token_radius(mut self, token_radius: usize) -> Self {
        self.token_radius = token_radius;
        self
    }

    pub fn with_max_spans(mut self, max_spans: Option<usize>) -> Self {
        self.max_spans = max_spans;
        self
    }

    pub fn with_mark_unpaired(mut self, mark_unpaired: bool) -> Self {
        self.mark_unpaired = mark_unpaired;
        self
    }

    pub fn with_escape_html(mut self, escape_html: bool) -> Self {
        self.escape_html = escape_html;
        self
    }
}

/// Tokens of `text` plus their byte boundaries; `bounds[i]` is where token
/// `i` starts and `bounds[len]` is `text.len()`.
struct Tokens<'t> {
    tokens: Vec<&'t str>,
    bounds: Vec<usize>,
}

fn tokenize(text: &str, granularity: Granularity) -> Tokens<'_> {
    let mut bounds = Vec::with_capacity(text.len() + 1);
    let mut start = None;

    for (i, ch) in text.char_indices() {
        match granularity {
            Granularity::Char => bounds.push(i),
            Granularity::Word => {
                if ch.is_alphanumeric() || ch == '_' {
                    if start.is_none() {
                        start = Some(i);
                        bounds.push(i);
                    }
                } else {
                    start = None;
                    bounds.push(i);
                }
            }
        }
    }
    bounds.push(text.len());

    let tokens = bounds.windows(2).map(|w| &text[w[0]..w[1]]).collect();
    Tokens { tokens, bounds }
}

/// A run of differing tokens, as token ranges on each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Hunk {
    before: (usize, usize),
    after: (usize, usize),
}

fn hunks(ops: &[EditOp]) -> Vec<Hunk> {
    let mut out = Vec::new();
    let mut open: Option<Hunk> = None;
    let (mut b, mut a) = (0usize, 0usize);

    for op in ops {
        match op {
            EditOp::Equal { .. } => {
                if let Some(h) = open.take() {
                    out.push(h);
                }
                b += 1;
                a += 1;
            }
            EditOp::Delete { .. } | EditOp::Insert { .. } | EditOp::Change { .. } => {
                let h = open.get_or_insert(Hunk {
                    before: (b, b),
                    after: (a, a),
                });
                if !matches!(op, EditOp::Insert { .. }) {
                    b += 1;
                    h.before.1 = b;
                }
                if !matches!(op, EditOp::Delete { .. }) {
                    a += 1;
                    h.after.1 = a;
                }
            }
        }
    }
    out.extend(open);
    out
}

fn merge_close(hunks: Vec<Hunk>, token_radius: usize) -> Vec<Hunk> {
    let mut merged: Vec<Hunk> = Vec::with_capacity(hunks.len());
    for h in hunks {
        match merged.last_mut() {
            // Between hunks only equal tokens, so the before-side gap is the
            // equal-run length.
            Some(prev) if h.before.0 - prev.before.1 < token_radius => {
                prev.before.1 = h.before.1;
                prev.after.1 = h.after.1;
            }
            _ => merged.push(h),
        }
    }
    merged
}

/// Splice `markup` around each non-empty byte range. Ranges are sorted and
/// disjoint and lie on token boundaries of the raw text.
fn wrap_spans(text: &str, spans: &[(usize, usize)], markup: &Markup, escape: bool) -> String {
    let mut out = String::with_capacity(
        text.len() + spans.len() * (markup.open.len() + markup.close.len()),
    );
    let push = |out: &mut String, segment: &str| {
        if escape {
            out.push_str(&escape_html(segment));
        } else {
            out.push_str(segment);
        }
    };

    let mut cursor = 0;
    for &(start, end) in spans.iter().filter(|(s, e)| s < e) {
        push(&mut out, &text[cursor..start]);
        out.push_str(&markup.open);
        push(&mut out, &text[start..end]);
        out.push_str(&markup.close);
        cursor = end;
    }
    push(&mut out, &text[cursor..]);
    out
}

/// Inline highlighter pass.
#[derive(Debug, Clone)]
pub struct Highlighter {
    options: HighlightOptions,
}

impl Highlighter {
    pub fn new(options: HighlightOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &HighlightOptions {
        &self.options
    }

    /// Highlight the differences between one line pair.
    ///
    /// Returns `None` when the two texts tokenize identically.
    pub fn highlight_pair(&self, before: &str, after: &str) -> Option<(String, String)> {
        let left = tokenize(before, self.options.granularity);
        let right = tokenize(after, self.options.granularity);
        let ops = align(&left.tokens, &right.tokens, &Exact, ChangePairing::Never);

        let mut found = merge_close(hunks(&ops), self.options.token_radius);
        if found.is_empty() {
            return None;
        }

        let limit = self.options.max_spans.map(|m| m.max(1));
        if limit.is_some_and(|limit| found.len() > limit) {
            let first = found[0];
            let last = found[found.len() - 1];
            found = vec![Hunk {
                before: (first.before.0, last.before.1),
                after: (first.after.0, last.after.1),
            }];
        }

        let byte_spans = |tokens: &Tokens<'_>, side: fn(&Hunk) -> (usize, usize)| {
            found
                .iter()
                .map(|h| {
                    let (s, e) = side(h);
                    (tokens.bounds[s], tokens.bounds[e])
                })
                .collect::<Vec<_>>()
        };
        let before_spans = byte_spans(&left, |h| h.before);
        let after_spans = byte_spans(&right, |h| h.after);

        let escape = self.options.escape_html;
        Some((
            wrap_spans(before, &before_spans, &self.options.markup, escape),
            wrap_spans(after, &after_spans, &self.options.markup, escape),
        ))
    }

    fn wrap_whole<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        if text.is_empty() {
            return text;
        }
        let text = if self.options.escape_html {
            escape_text(text)
        } else {
            text
        };
        let markup = &self.options.markup;
        Cow::Owned(format!("{}{}{}", markup.open, text, markup.close))
    }

    fn escape_plain<'a>(&self, entry: DiffEntry<'a>) -> DiffEntry<'a> {
        if self.options.escape_html {
            entry.map_texts(escape_text)
        } else {
            entry
        }
    }
}

impl Pass for Highlighter {
    fn name(&self) -> &str {
        "highlight"
    }

    fn apply<'a>(&self, script: EditScript<'a>) -> EditScript<'a> {
        script.map_entries(|mut entry| match entry.kind {
            EntryKind::Change => {
                match self.highlight_pair(&entry.before_text, &entry.after_text) {
                    Some((before, after)) => {
                        entry.before_text = Cow::Owned(before);
                        entry.after_text = Cow::Owned(after);
                        entry
                    }
                    None => self.escape_plain(entry),
                }
            }
            EntryKind::Insert if self.options.mark_unpaired => {
                entry.after_text = self.wrap_whole(entry.after_text);
                entry
            }
            EntryKind::Delete if self.options.mark_unpaired => {
                entry.before_text = self.wrap_whole(entry.before_text);
                entry
            }
            _ => self.escape_plain(entry),
        })
    }
}
