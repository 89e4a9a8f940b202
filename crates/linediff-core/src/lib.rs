//! linediff core - line-oriented sequence diff engine
//!
//! This crate computes a minimal edit script between two sequences of lines
//! and post-processes it for rendering:
//! - Pluggable line comparators (exact, whitespace-collapsing, whitespace-ignoring)
//! - Myers alignment, reused at line and inline-token granularity
//! - Compaction of long unchanged runs into context windows
//! - Inline highlighting of the differing spans of changed line pairs
//! - Tab expansion and optional HTML escaping
//! - An ordered, invariant-checked pass pipeline
//!
//! The engine is pure and synchronous; it performs no I/O.

pub mod config;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod passes;
pub mod text;

pub use linediff_core_types as core_types;

// Re-export commonly used types
pub use config::{DiffConfig, HighlightConfig};
pub use diff::{
    align, diff_lines, ChangePairing, Comparator, DiffEntry, DiffStats, Differ, EditOp,
    EditScript, EntryKind, Exact, FnComparator, LineComparator,
};
pub use errors::{ExError, ExErrorKind, LineDiffError, Result};
pub use passes::{
    compose, expand_tabs, Compactor, FnPass, Granularity, HighlightOptions, Highlighter,
    HtmlEscaper, Markup, Pass, Pipeline, TabExpander,
};
pub use text::split_lines;
