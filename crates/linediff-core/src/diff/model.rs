//! Edit script output types.
//!
//! Entry texts are `Cow<'a, str>`: they borrow the caller's line storage until
//! a pass rewrites them, at which point the entry owns the new text.

use crate::errors::{LineDiffError, Result};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// Kind of a single edit script entry.
///
/// Serialized lowercase so renderers can use it directly as a row class.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Line present on both sides (equal under the comparator)
    Equal,
    /// Line present only in `after`
    Insert,
    /// Line present only in `before`
    Delete,
    /// A before line paired with an unequal after line, rendered side by side
    Change,
    /// Placeholder standing for a run of elided `Equal` entries
    Skip,
}

impl EntryKind {
    /// Lowercase name, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Equal => "equal",
            EntryKind::Insert => "insert",
            EntryKind::Delete => "delete",
            EntryKind::Change => "change",
            EntryKind::Skip => "skip",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the edit script.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DiffEntry<'a> {
    pub kind: EntryKind,
    /// 0-based index into the before sequence
    pub before_index: Option<usize>,
    /// 0-based index into the after sequence
    pub after_index: Option<usize>,
    pub before_text: Cow<'a, str>,
    pub after_text: Cow<'a, str>,
    /// Human-facing before label (1-based line number, placeholder, or empty)
    pub before_label: String,
    /// Human-facing after label (1-based line number, placeholder, or empty)
    pub after_label: String,
    /// Number of `Equal` entries a `Skip` placeholder stands for
    #[serde(skip_serializing_if = "is_zero")]
    pub elided: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

fn line_label(index: Option<usize>) -> String {
    index.map(|i| (i + 1).to_string()).unwrap_or_default()
}

impl<'a> DiffEntry<'a> {
    fn line(
        kind: EntryKind,
        before: Option<(usize, &'a str)>,
        after: Option<(usize, &'a str)>,
    ) -> Self {
        let before_index = before.map(|(i, _)| i);
        let after_index = after.map(|(i, _)| i);
        Self {
            kind,
            before_index,
            after_index,
            before_text: Cow::Borrowed(before.map(|(_, t)| t).unwrap_or("")),
            after_text: Cow::Borrowed(after.map(|(_, t)| t).unwrap_or("")),
            before_label: line_label(before_index),
            after_label: line_label(after_index),
            elided: 0,
        }
    }

    /// Matched line pair
    pub fn equal(before_index: usize, before: &'a str, after_index: usize, after: &'a str) -> Self {
        Self::line(
            EntryKind::Equal,
            Some((before_index, before)),
            Some((after_index, after)),
        )
    }

    /// Paired unequal line pair
    pub fn change(
        before_index: usize,
        before: &'a str,
        after_index: usize,
        after: &'a str,
    ) -> Self {
        Self::line(
            EntryKind::Change,
            Some((before_index, before)),
            Some((after_index, after)),
        )
    }

    /// Line only in `after`
    pub fn insert(after_index: usize, after: &'a str) -> Self {
        Self::line(EntryKind::Insert, None, Some((after_index, after)))
    }

    /// Line only in `before`
    pub fn delete(before_index: usize, before: &'a str) -> Self {
        Self::line(EntryKind::Delete, Some((before_index, before)), None)
    }

    /// Placeholder for `elided` collapsed `Equal` entries
    pub fn skip(label: &str, elided: usize) -> Self {
        Self {
            kind: EntryKind::Skip,
            before_index: None,
            after_index: None,
            before_text: Cow::Borrowed(""),
            after_text: Cow::Borrowed(""),
            before_label: label.to_string(),
            after_label: label.to_string(),
            elided,
        }
    }

    /// True for entries that reference at least one input line
    pub fn is_line(&self) -> bool {
        self.kind != EntryKind::Skip
    }

    /// Rewrite both texts with `f`, leaving placeholders untouched.
    pub fn map_texts<F>(mut self, f: F) -> Self
    where
        F: Fn(Cow<'a, str>) -> Cow<'a, str>,
    {
        if self.is_line() {
            self.before_text = f(self.before_text);
            self.after_text = f(self.after_text);
        }
        self
    }
}

/// Entry counts of an edit script.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct DiffStats {
    pub equal: usize,
    pub inserted: usize,
    pub deleted: usize,
    pub changed: usize,
    /// Equal lines hidden behind placeholders
    pub elided: usize,
}

impl DiffStats {
    /// True if any entry differs between the two sides
    pub fn has_changes(&self) -> bool {
        self.inserted + self.deleted + self.changed > 0
    }
}

impl fmt::Display for DiffStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} changed, {} inserted, {} deleted, {} unchanged",
            self.changed,
            self.inserted,
            self.deleted,
            self.equal + self.elided
        )
    }
}

/// Ordered sequence of diff entries describing how `before` becomes `after`.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct EditScript<'a> {
    entries: Vec<DiffEntry<'a>>,
}

impl<'a> EditScript<'a> {
    pub fn new(entries: Vec<DiffEntry<'a>>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[DiffEntry<'a>] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<DiffEntry<'a>> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiffEntry<'a>> {
        self.entries.iter()
    }

    /// Apply `f` to every entry, keeping entry order.
    pub fn map_entries<F>(self, f: F) -> Self
    where
        F: FnMut(DiffEntry<'a>) -> DiffEntry<'a>,
    {
        Self::new(self.entries.into_iter().map(f).collect())
    }

    pub fn stats(&self) -> DiffStats {
        let mut stats = DiffStats::default();
        for entry in &self.entries {
            match entry.kind {
                EntryKind::Equal => stats.equal += 1,
                EntryKind::Insert => stats.inserted += 1,
                EntryKind::Delete => stats.deleted += 1,
                EntryKind::Change => stats.changed += 1,
                EntryKind::Skip => stats.elided += entry.elided,
            }
        }
        stats
    }

    pub fn has_changes(&self) -> bool {
        self.stats().has_changes()
    }

    /// Check that present indices strictly increase on both sides and that
    /// every entry carries the indices its kind requires.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` describing the first offending entry. The `pass`
    /// field is left empty; the pipeline fills it in.
    pub fn check_order(&self) -> Result<()> {
        let mut last_before: Option<usize> = None;
        let mut last_after: Option<usize> = None;

        for (pos, entry) in self.entries.iter().enumerate() {
            let shape_ok = match entry.kind {
                EntryKind::Equal | EntryKind::Change => {
                    entry.before_index.is_some() && entry.after_index.is_some()
                }
                EntryKind::Insert => entry.before_index.is_none() && entry.after_index.is_some(),
                EntryKind::Delete => entry.before_index.is_some() && entry.after_index.is_none(),
                EntryKind::Skip => entry.before_index.is_none() && entry.after_index.is_none(),
            };
            if !shape_ok {
                return Err(violation(format!(
                    "entry {} of kind {} has indices ({:?}, {:?})",
                    pos, entry.kind, entry.before_index, entry.after_index
                )));
            }

            if let Some(b) = entry.before_index {
                if last_before.is_some_and(|prev| b <= prev) {
                    return Err(violation(format!(
                        "entry {} before_index {} does not follow {:?}",
                        pos, b, last_before
                    )));
                }
                last_before = Some(b);
            }
            if let Some(a) = entry.after_index {
                if last_after.is_some_and(|prev| a <= prev) {
                    return Err(violation(format!(
                        "entry {} after_index {} does not follow {:?}",
                        pos, a, last_after
                    )));
                }
                last_after = Some(a);
            }
        }
        Ok(())
    }

    /// Check ordering plus full coverage: every before index `0..before_len`
    /// and every after index `0..after_len` appears exactly once.
    ///
    /// Only meaningful before compaction.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` naming the first missing index.
    pub fn check_coverage(&self, before_len: usize, after_len: usize) -> Result<()> {
        self.check_order()?;

        let before: Vec<usize> = self.entries.iter().filter_map(|e| e.before_index).collect();
        let after: Vec<usize> = self.entries.iter().filter_map(|e| e.after_index).collect();

        // Strictly increasing, so coverage means exactly 0..len.
        if let Some(missing) = (0..before_len).find(|i| before.get(*i) != Some(i)) {
            return Err(violation(format!("before index {} is not covered", missing)));
        }
        if before.len() != before_len {
            return Err(violation(format!(
                "{} before indices for {} lines",
                before.len(),
                before_len
            )));
        }
        if let Some(missing) = (0..after_len).find(|i| after.get(*i) != Some(i)) {
            return Err(violation(format!("after index {} is not covered", missing)));
        }
        if after.len() != after_len {
            return Err(violation(format!(
                "{} after indices for {} lines",
                after.len(),
                after_len
            )));
        }
        Ok(())
    }
}

fn violation(detail: String) -> LineDiffError {
    LineDiffError::InvariantViolation {
        pass: String::new(),
        detail,
    }
}

impl<'a> From<Vec<DiffEntry<'a>>> for EditScript<'a> {
    fn from(entries: Vec<DiffEntry<'a>>) -> Self {
        Self::new(entries)
    }
}

impl<'a> IntoIterator for EditScript<'a> {
    type Item = DiffEntry<'a>;
    type IntoIter = std::vec::IntoIter<DiffEntry<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'s, 'a> IntoIterator for &'s EditScript<'a> {
    type Item = &'s DiffEntry<'a>;
    type IntoIter = std::slice::Iter<'s, DiffEntry<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
