//! Tab expansion to a fixed column width.

use super::Pass;
use crate::diff::model::EditScript;
use crate::errors::{LineDiffError, Result};
use std::borrow::Cow;

/// Replace every tab with spaces up to the next multiple of `width`.
///
/// Columns count chars from the start of the line and restart after each
/// `\n`. Text without tabs is returned borrowed. A `width` of 0 is treated
/// as 1; [`TabExpander::new`] rejects it outright.
pub fn expand_tabs(text: &str, width: usize) -> Cow<'_, str> {
    if !text.contains('\t') {
        return Cow::Borrowed(text);
    }
    let width = width.max(1);

    let mut out = String::with_capacity(text.len() + width * 2);
    let mut column = 0usize;
    for c in text.chars() {
        match c {
            '\t' => {
                let pad = width - column % width;
                for _ in 0..pad {
                    out.push(' ');
                }
                column += pad;
            }
            '\n' => {
                out.push(c);
                column = 0;
            }
            _ => {
                out.push(c);
                column += 1;
            }
        }
    }
    Cow::Owned(out)
}

/// Pass applying [`expand_tabs`] to both texts of every line entry.
#[derive(Debug, Clone, Copy)]
pub struct TabExpander {
    width: usize,
}

impl TabExpander {
    /// # Errors
    ///
    /// `InvalidTabWidth` if `width` is not strictly positive.
    pub fn new(width: i64) -> Result<Self> {
        if width <= 0 {
            return Err(LineDiffError::InvalidTabWidth { value: width });
        }
        let width =
            usize::try_from(width).map_err(|_| LineDiffError::InvalidTabWidth { value: width })?;
        Ok(Self { width })
    }

    pub fn width(&self) -> usize {
        self.width
    }
}

fn expand_owned(text: Cow<'_, str>, width: usize) -> Cow<'_, str> {
    match text {
        Cow::Borrowed(s) => expand_tabs(s, width),
        Cow::Owned(s) if s.contains('\t') => Cow::Owned(expand_tabs(&s, width).into_owned()),
        owned => owned,
    }
}

impl Pass for TabExpander {
    fn name(&self) -> &str {
        "expand_tabs"
    }

    fn apply<'a>(&self, script: EditScript<'a>) -> EditScript<'a> {
        let width = self.width;
        script.map_entries(|entry| entry.map_texts(|text| expand_owned(text, width)))
    }
}
