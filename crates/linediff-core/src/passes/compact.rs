//! Compaction of long unchanged runs.

use super::Pass;
use crate::diff::model::{DiffEntry, EditScript, EntryKind};
use crate::errors::{LineDiffError, Result};

/// Collapses maximal runs of `Equal` entries into context windows around a
/// placeholder entry.
///
/// A run longer than `2 * radius` keeps its first and last `radius` entries
/// with one `Skip` between them. A radius of 0 disables compaction.
#[derive(Debug, Clone)]
pub struct Compactor {
    radius: usize,
    label: String,
    trim_edges: bool,
}

impl Compactor {
    /// # Errors
    ///
    /// `InvalidContextRadius` if `radius` is negative.
    pub fn new(radius: i64, label: impl Into<String>) -> Result<Self> {
        let radius = usize::try_from(radius)
            .map_err(|_| LineDiffError::InvalidContextRadius { value: radius })?;
        Ok(Self {
            radius,
            label: label.into(),
            trim_edges: false,
        })
    }

    /// Also shorten runs at the very start or end of a script that contains
    /// changes, keeping only the `radius` entries next to the change.
    pub fn with_trim_edges(mut self, trim_edges: bool) -> Self {
        self.trim_edges = trim_edges;
        self
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    fn flush<'a>(
        &self,
        out: &mut Vec<DiffEntry<'a>>,
        run: &mut Vec<DiffEntry<'a>>,
        leading: bool,
        trailing: bool,
    ) {
        let r = self.radius;
        let len = run.len();
        let (keep_head, keep_tail) = match (leading, trailing) {
            (true, false) => (0, r),
            (false, true) => (r, 0),
            _ => (r, r),
        };

        if len <= keep_head + keep_tail {
            out.append(run);
            return;
        }

        let mut drained = run.drain(..);
        out.extend(drained.by_ref().take(keep_head));
        let elided = len - keep_head - keep_tail;
        out.push(DiffEntry::skip(&self.label, elided));
        out.extend(drained.skip(elided));
    }
}

impl Pass for Compactor {
    fn name(&self) -> &str {
        "compact"
    }

    fn apply<'a>(&self, script: EditScript<'a>) -> EditScript<'a> {
        if self.radius == 0 {
            return script;
        }

        let trim = self.trim_edges && script.has_changes();
        let entries = script.into_entries();
        let mut out = Vec::with_capacity(entries.len());
        let mut run: Vec<DiffEntry<'a>> = Vec::new();
        // True while nothing but equal/skip entries have been emitted
        let mut at_start = true;

        for entry in entries {
            match entry.kind {
                EntryKind::Equal => run.push(entry),
                _ => {
                    if !run.is_empty() {
                        self.flush(&mut out, &mut run, trim && at_start, false);
                    }
                    if entry.kind != EntryKind::Skip {
                        at_start = false;
                    }
                    out.push(entry);
                }
            }
        }
        if !run.is_empty() {
            self.flush(&mut out, &mut run, false, trim && !at_start);
        }

        EditScript::new(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equal_lines(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("L{}", i)).collect()
    }

    fn script_of<'a>(kinds: &[EntryKind], lines: &'a [String]) -> EditScript<'a> {
        let mut b = 0;
        let mut a = 0;
        let mut entries = Vec::new();
        for kind in kinds {
            match kind {
                EntryKind::Equal => {
                    entries.push(DiffEntry::equal(b, &lines[b], a, &lines[a]));
                    b += 1;
                    a += 1;
                }
                EntryKind::Change => {
                    entries.push(DiffEntry::change(b, &lines[b], a, "changed"));
                    b += 1;
                    a += 1;
                }
                _ => unreachable!("not used in these tests"),
            }
        }
        EditScript::new(entries)
    }

    #[test]
    fn test_long_run_keeps_context_around_skip() {
        use EntryKind::*;
        let lines = equal_lines(10);
        let script = script_of(&[Equal; 10], &lines);
        let out = Compactor::new(2, "…").unwrap().apply(script);

        let kinds: Vec<_> = out.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![Equal, Equal, Skip, Equal, Equal]);
        assert_eq!(out.entries()[2].elided, 6);
        assert_eq!(out.entries()[2].before_label, "…");
        assert_eq!(out.entries()[3].before_index, Some(8));
    }

    #[test]
    fn test_short_run_untouched() {
        let lines = equal_lines(4);
        let script = script_of(&[EntryKind::Equal; 4], &lines);
        let out = Compactor::new(2, "…").unwrap().apply(script.clone());
        assert_eq!(out, script);
    }

    #[test]
    fn test_zero_radius_is_noop() {
        let lines = equal_lines(20);
        let script = script_of(&[EntryKind::Equal; 20], &lines);
        let out = Compactor::new(0, "…").unwrap().apply(script.clone());
        assert_eq!(out, script);
    }

    #[test]
    fn test_negative_radius_rejected() {
        assert_eq!(
            Compactor::new(-1, "…").unwrap_err(),
            LineDiffError::InvalidContextRadius { value: -1 }
        );
    }

    #[test]
    fn test_idempotent() {
        use EntryKind::*;
        let lines = equal_lines(16);
        let mut kinds = vec![Equal; 7];
        kinds.push(Change);
        kinds.extend([Equal; 8]);
        let compactor = Compactor::new(2, "…").unwrap();
        let once = compactor.apply(script_of(&kinds, &lines));
        let twice = compactor.apply(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_trim_edges_shortens_outer_runs() {
        use EntryKind::*;
        let lines = equal_lines(11);
        let mut kinds = vec![Equal; 5];
        kinds.push(Change);
        kinds.extend([Equal; 5]);
        let compactor = Compactor::new(2, "…").unwrap().with_trim_edges(true);
        let once = compactor.apply(script_of(&kinds, &lines));

        let shape: Vec<_> = once.iter().map(|e| e.kind).collect();
        assert_eq!(shape, vec![Skip, Equal, Equal, Change, Equal, Equal, Skip]);
        assert_eq!(once.entries()[0].elided, 3);
        assert_eq!(once.entries()[1].before_index, Some(3));

        let twice = compactor.apply(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_trim_edges_without_changes_uses_window() {
        use EntryKind::*;
        let lines = equal_lines(10);
        let compactor = Compactor::new(2, "…").unwrap().with_trim_edges(true);
        let out = compactor.apply(script_of(&[Equal; 10], &lines));
        let shape: Vec<_> = out.iter().map(|e| e.kind).collect();
        assert_eq!(shape, vec![Equal, Equal, Skip, Equal, Equal]);
    }
}
