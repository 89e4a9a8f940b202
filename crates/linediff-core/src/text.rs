//! Input helpers for callers that hold whole documents.

/// Split a document into lines on `\n` or `\r\n`.
///
/// A final line terminator does not start an extra empty line, and absent
/// input yields no lines.
pub fn split_lines<'t>(text: impl Into<Option<&'t str>>) -> Vec<&'t str> {
    text.into().map(|t| t.lines().collect()).unwrap_or_default()
}
