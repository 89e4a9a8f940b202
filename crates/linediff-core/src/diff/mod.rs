//! Line diff engine.
//!
//! ## Entry point
//!
//! ```
//! use linediff_core::{DiffConfig, Differ};
//!
//! let differ = Differ::new(DiffConfig::default()).unwrap();
//! let script = differ.diff(&["a", "foo bar"], &["a", "foo baz"]).unwrap();
//! assert_eq!(script.entries()[1].after_text, "foo <b>baz</b>");
//! ```
//!
//! ## Guarantees
//!
//! - **Coverage**: before any compaction every input line is referenced by
//!   exactly one entry.
//! - **Order**: present indices strictly increase on both sides, after every pass.
//! - **Minimality**: the number of non-equal line references is
//!   `before.len() + after.len() - 2 * LCS`.
//! - **Determinism**: identical inputs produce identical scripts.

pub mod align;
pub mod comparator;
pub mod engine;
pub mod model;

pub use align::{align, diff_lines, ChangePairing, EditOp};
pub use comparator::{Comparator, Exact, FnComparator, LineComparator};
pub use engine::Differ;
pub use model::{DiffEntry, DiffStats, EditScript, EntryKind};
