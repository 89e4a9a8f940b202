//! Sequence alignment.
//!
//! Myers' greedy edit-graph search (O((N+M)·D)) with a recorded trace that is
//! backtracked into equal/delete/insert moves. Diagonals are followed eagerly
//! from the start, so when several minimal alignments exist the earliest
//! common elements are the ones matched.
//!
//! A shared prefix is matched before searching, and the trace keeps only
//! periodic checkpoints of the frontier. Each stretch between checkpoints is
//! replayed during the backtrack.
//!
//! The same routine aligns lines and inline tokens.

use super::comparator::{Comparator, FnComparator};
use super::model::{DiffEntry, EditScript};
use serde::{Deserialize, Serialize};

/// One aligned position. Indices are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    Equal { before: usize, after: usize },
    Delete { before: usize },
    Insert { after: usize },
    Change { before: usize, after: usize },
}

/// How the deletions and insertions sharing one gap between equal runs are
/// turned into `Change` pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangePairing {
    /// Pair the shorter block element-wise with the longer one; the rest of
    /// the longer block follows as plain deletions or insertions.
    #[default]
    Pairwise,
    /// Pair only blocks of equal length.
    EqualLength,
    /// Never pair: deletions, then insertions.
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Move {
    /// Consume an element of `after`
    Down,
    /// Consume an element of `before`
    Right,
}

/// Pick the move that reaches diagonal `k` furthest in the current round.
///
/// `reach(k)` is the furthest x on diagonal `k` after the previous round,
/// `None` if the diagonal was not reached. Moves that would leave the edit
/// grid are never taken.
fn predecessor(
    reach: impl Fn(isize) -> Option<isize>,
    k: isize,
    n: isize,
    m: isize,
) -> Option<Move> {
    let down = reach(k + 1).filter(|&x| x - (k + 1) < m);
    let right = reach(k - 1).filter(|&x| x < n);

    match (down, right) {
        (Some(below), Some(left)) if left < below => Some(Move::Down),
        (Some(_), Some(_)) => Some(Move::Right),
        (Some(_), None) => Some(Move::Down),
        (None, Some(_)) => Some(Move::Right),
        (None, None) => None,
    }
}

/// Marks a diagonal the search has not reached.
const UNREACHED: isize = -1;

/// Furthest x reached on each diagonal `k = x - y`.
struct Frontier {
    v: Vec<isize>,
    offset: isize,
}

impl Frontier {
    fn new(max: isize) -> Self {
        let offset = max + 1;
        let mut v = vec![UNREACHED; (2 * max + 3) as usize];
        v[(1 + offset) as usize] = 0;
        Self { v, offset }
    }

    fn slot(&self, k: isize) -> usize {
        (k + self.offset) as usize
    }

    fn get(&self, k: isize) -> Option<isize> {
        let x = self.v[self.slot(k)];
        (x != UNREACHED).then_some(x)
    }

    /// Diagonals `-d-1..=d+1`, the only ones round `d` reads. Everything
    /// outside that window is still unreached before round `d`.
    fn row(&self, d: isize) -> Vec<isize> {
        self.v[self.slot(-d - 1)..=self.slot(d + 1)].to_vec()
    }

    /// Return to the state captured by `row(d)`.
    fn restore(&mut self, d: isize, row: &[isize]) {
        self.v.fill(UNREACHED);
        let start = self.slot(-d - 1);
        self.v[start..start + row.len()].copy_from_slice(row);
    }
}

/// Run search round `d`. Returns true once the far corner is reached.
fn extend<T, C>(frontier: &mut Frontier, d: isize, before: &[T], after: &[T], cmp: &C) -> bool
where
    C: Comparator<T> + ?Sized,
{
    let n = before.len() as isize;
    let m = after.len() as isize;

    let mut k = -d;
    while k <= d {
        let slot = frontier.slot(k);
        let Some(mv) = predecessor(|j| frontier.get(j), k, n, m) else {
            frontier.v[slot] = UNREACHED;
            k += 2;
            continue;
        };
        let mut x = match mv {
            Move::Down => frontier.get(k + 1).unwrap_or(0),
            Move::Right => frontier.get(k - 1).unwrap_or(0) + 1,
        };
        let mut y = x - k;
        while x < n && y < m && cmp.equal(&before[x as usize], &after[y as usize]) {
            x += 1;
            y += 1;
        }
        frontier.v[slot] = x;
        if x >= n && y >= m {
            return true;
        }
        k += 2;
    }
    false
}

/// Myers search plus backtrack over inputs with no common prefix handling.
///
/// Only every `interval`-th frontier is kept during the forward search.
/// The backtrack replays one segment of rounds at a time from its
/// checkpoint, so memory stays near `O(D^1.5)` instead of `O(D^2)`.
fn search<T, C>(before: &[T], after: &[T], cmp: &C) -> Vec<EditOp>
where
    C: Comparator<T> + ?Sized,
{
    let n = before.len() as isize;
    let m = after.len() as isize;
    let max = n + m;
    let interval = ((max as f64).sqrt() as isize).max(1);

    let mut frontier = Frontier::new(max);
    let mut checkpoints: Vec<Vec<isize>> = Vec::new();
    let mut last = max;
    for d in 0..=max {
        if d % interval == 0 {
            checkpoints.push(frontier.row(d));
        }
        if extend(&mut frontier, d, before, after, cmp) {
            last = d;
            break;
        }
    }

    let mut ops = Vec::with_capacity(n.max(m) as usize);
    let (mut x, mut y) = (n, m);

    'backtrack: for (i, checkpoint) in checkpoints.iter().enumerate().rev() {
        let first = i as isize * interval;
        let end = (first + interval - 1).min(last);

        frontier.restore(first, checkpoint);
        let mut rows = Vec::with_capacity((end - first + 1) as usize);
        for d in first..=end {
            rows.push(frontier.row(d));
            if d < end {
                extend(&mut frontier, d, before, after, cmp);
            }
        }

        for (j, row) in rows.iter().enumerate().rev() {
            let d = first + j as isize;
            let k = x - y;
            let reach = |j: isize| {
                row.get((j + d + 1) as usize)
                    .copied()
                    .filter(|&x| x != UNREACHED)
            };
            let Some(mv) = predecessor(reach, k, n, m) else {
                break 'backtrack;
            };
            let (prev_k, prev_x) = match mv {
                Move::Down => (k + 1, reach(k + 1).unwrap_or(0)),
                Move::Right => (k - 1, reach(k - 1).unwrap_or(0)),
            };
            let prev_y = prev_x - prev_k;

            while x > prev_x && y > prev_y {
                x -= 1;
                y -= 1;
                ops.push(EditOp::Equal {
                    before: x as usize,
                    after: y as usize,
                });
            }
            if d > 0 {
                match mv {
                    Move::Down => ops.push(EditOp::Insert {
                        after: (y - 1) as usize,
                    }),
                    Move::Right => ops.push(EditOp::Delete {
                        before: (x - 1) as usize,
                    }),
                }
            }
            x = prev_x;
            y = prev_y;
        }
    }

    // Only reachable if the trace was cut short; keeps every index covered.
    while y > 0 {
        y -= 1;
        ops.push(EditOp::Insert { after: y as usize });
    }
    while x > 0 {
        x -= 1;
        ops.push(EditOp::Delete { before: x as usize });
    }

    ops.reverse();
    ops
}

fn shifted(op: EditOp, by: usize) -> EditOp {
    match op {
        EditOp::Equal { before, after } => EditOp::Equal {
            before: before + by,
            after: after + by,
        },
        EditOp::Change { before, after } => EditOp::Change {
            before: before + by,
            after: after + by,
        },
        EditOp::Delete { before } => EditOp::Delete { before: before + by },
        EditOp::Insert { after } => EditOp::Insert { after: after + by },
    }
}

/// Raw shortest edit script: `Equal`, `Delete` and `Insert` only, in order.
fn shortest_edit<T, C>(before: &[T], after: &[T], cmp: &C) -> Vec<EditOp>
where
    C: Comparator<T> + ?Sized,
{
    // The first round's snake would match exactly this prefix.
    let prefix = before
        .iter()
        .zip(after)
        .take_while(|&(b, a)| cmp.equal(b, a))
        .count();

    let mut ops: Vec<EditOp> = (0..prefix)
        .map(|i| EditOp::Equal {
            before: i,
            after: i,
        })
        .collect();
    ops.extend(
        search(&before[prefix..], &after[prefix..], cmp)
            .into_iter()
            .map(|op| shifted(op, prefix)),
    );
    ops
}

fn flush_gap(
    out: &mut Vec<EditOp>,
    deleted: &mut Vec<usize>,
    inserted: &mut Vec<usize>,
    pairing: ChangePairing,
) {
    let pairs = match pairing {
        ChangePairing::Pairwise => deleted.len().min(inserted.len()),
        ChangePairing::EqualLength if deleted.len() == inserted.len() => deleted.len(),
        ChangePairing::EqualLength | ChangePairing::Never => 0,
    };

    out.extend(
        deleted
            .iter()
            .zip(inserted.iter())
            .take(pairs)
            .map(|(&before, &after)| EditOp::Change { before, after }),
    );
    out.extend(
        deleted[pairs..]
            .iter()
            .map(|&before| EditOp::Delete { before }),
    );
    out.extend(
        inserted[pairs..]
            .iter()
            .map(|&after| EditOp::Insert { after }),
    );
    deleted.clear();
    inserted.clear();
}

/// Align two sequences under `cmp`.
///
/// The result covers every index of both inputs exactly once, in strictly
/// increasing order on each side, with a minimal number of non-equal
/// references (`N + M - 2·LCS`).
pub fn align<T, C>(before: &[T], after: &[T], cmp: &C, pairing: ChangePairing) -> Vec<EditOp>
where
    C: Comparator<T> + ?Sized,
{
    let raw = shortest_edit(before, after, cmp);

    let mut out = Vec::with_capacity(raw.len());
    let mut deleted = Vec::new();
    let mut inserted = Vec::new();

    for op in raw {
        match op {
            EditOp::Delete { before } => deleted.push(before),
            EditOp::Insert { after } => inserted.push(after),
            equal => {
                flush_gap(&mut out, &mut deleted, &mut inserted, pairing);
                out.push(equal);
            }
        }
    }
    flush_gap(&mut out, &mut deleted, &mut inserted, pairing);
    out
}

/// Align two line sequences and lift the result into an edit script whose
/// texts borrow from the inputs.
pub fn diff_lines<'a, S, C>(
    before: &'a [S],
    after: &'a [S],
    cmp: &C,
    pairing: ChangePairing,
) -> EditScript<'a>
where
    S: AsRef<str>,
    C: Comparator<str> + ?Sized,
{
    let by_text = FnComparator(|a: &S, b: &S| cmp.equal(a.as_ref(), b.as_ref()));
    let line_before = |i: usize| before[i].as_ref();
    let line_after = |i: usize| after[i].as_ref();

    align(before, after, &by_text, pairing)
        .into_iter()
        .map(|op| match op {
            EditOp::Equal { before, after } => {
                DiffEntry::equal(before, line_before(before), after, line_after(after))
            }
            EditOp::Change { before, after } => {
                DiffEntry::change(before, line_before(before), after, line_after(after))
            }
            EditOp::Delete { before } => DiffEntry::delete(before, line_before(before)),
            EditOp::Insert { after } => DiffEntry::insert(after, line_after(after)),
        })
        .collect::<Vec<_>>()
        .into()
}
