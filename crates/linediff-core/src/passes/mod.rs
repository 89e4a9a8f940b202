//! Post-processing passes over an edit script.
//!
//! A pass consumes a whole script and returns a new one. Passes are applied
//! strictly in the order given; none of them may reorder entries relative to
//! index order, which `Pipeline::run` enforces after every pass.

pub mod compact;
pub mod escape;
pub mod highlight;
pub mod tabs;

pub use compact::Compactor;
pub use escape::HtmlEscaper;
pub use highlight::{Granularity, HighlightOptions, Highlighter, Markup};
pub use tabs::{expand_tabs, TabExpander};

use crate::diff::model::EditScript;
use crate::errors::{LineDiffError, Result};
use std::fmt;
use std::time::Instant;

/// A transformation `EditScript -> EditScript`.
///
/// Implementations hold read-only configuration only.
pub trait Pass: Send + Sync {
    /// Stable name used in logs and invariant errors
    fn name(&self) -> &str;

    fn apply<'a>(&self, script: EditScript<'a>) -> EditScript<'a>;
}

impl<P: Pass + ?Sized> Pass for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn apply<'a>(&self, script: EditScript<'a>) -> EditScript<'a> {
        (**self).apply(script)
    }
}

/// Adapts a named closure into a pass.
pub struct FnPass<F> {
    name: String,
    f: F,
}

impl<F> FnPass<F>
where
    F: for<'a> Fn(EditScript<'a>) -> EditScript<'a> + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> Pass for FnPass<F>
where
    F: for<'a> Fn(EditScript<'a>) -> EditScript<'a> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply<'a>(&self, script: EditScript<'a>) -> EditScript<'a> {
        (self.f)(script)
    }
}

/// Ordered chain of passes.
#[derive(Default)]
pub struct Pipeline {
    passes: Vec<Box<dyn Pass>>,
}

impl Pipeline {
    /// Create an empty pipeline (the identity transformation)
    pub fn new() -> Self {
        Self { passes: Vec::new() }
    }

    /// Append a pass
    pub fn add_pass(mut self, pass: Box<dyn Pass>) -> Self {
        self.passes.push(pass);
        self
    }

    /// Append several passes, keeping their order
    pub fn add_passes(mut self, passes: Vec<Box<dyn Pass>>) -> Self {
        self.passes.extend(passes);
        self
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Names of all passes, in application order
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Apply every pass in order, checking the index-order invariant after
    /// each one.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` naming the first pass whose output is out of
    /// order. No partial script is returned.
    pub fn run<'a>(&self, script: EditScript<'a>) -> Result<EditScript<'a>> {
        let mut script = script;
        for pass in &self.passes {
            let start = Instant::now();
            script = pass.apply(script);

            if let Err(err) = script.check_order() {
                let err = match err {
                    LineDiffError::InvariantViolation { detail, .. } => {
                        LineDiffError::InvariantViolation {
                            pass: pass.name().to_string(),
                            detail,
                        }
                    }
                    other => other,
                };
                tracing::debug!(op = "run_pass", pass = pass.name(), error = %err);
                return Err(err);
            }

            tracing::debug!(
                op = "run_pass",
                pass = pass.name(),
                entries = script.len(),
                duration_ms = start.elapsed().as_millis() as u64,
            );
        }
        Ok(script)
    }
}

impl Pass for Pipeline {
    fn name(&self) -> &str {
        "pipeline"
    }

    /// Applies the passes without invariant checks; use [`Pipeline::run`]
    /// to have them enforced.
    fn apply<'a>(&self, script: EditScript<'a>) -> EditScript<'a> {
        self.passes.iter().fold(script, |s, pass| pass.apply(s))
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("passes", &self.pass_names())
            .finish()
    }
}

/// Chain `passes` into one pipeline applied in the given order.
pub fn compose(passes: Vec<Box<dyn Pass>>) -> Pipeline {
    Pipeline::new().add_passes(passes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::model::{DiffEntry, EntryKind};
    use std::borrow::Cow;

    fn sample() -> EditScript<'static> {
        EditScript::new(vec![
            DiffEntry::equal(0, "a", 0, "a"),
            DiffEntry::change(1, "b", 1, "x"),
        ])
    }

    fn upper(script: EditScript<'_>) -> EditScript<'_> {
        script.map_entries(|e| e.map_texts(|t| Cow::Owned(t.to_uppercase())))
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let out = Pipeline::new().run(sample()).unwrap();
        assert_eq!(out, sample());
    }

    #[test]
    fn test_passes_apply_in_order() {
        let pipeline = compose(vec![
            Box::new(FnPass::new("upper", upper)),
            Box::new(FnPass::new("suffix", |s: EditScript<'_>| {
                s.map_entries(|e| e.map_texts(|t| Cow::Owned(format!("{}!", t))))
            })),
        ]);
        assert_eq!(pipeline.pass_names(), vec!["upper", "suffix"]);

        let out = pipeline.run(sample()).unwrap();
        assert_eq!(out.entries()[1].before_text, "B!");
        assert_eq!(out.entries()[1].after_text, "X!");
    }

    #[test]
    fn test_reordering_pass_is_rejected_by_name() {
        let pipeline = compose(vec![Box::new(FnPass::new("reverse", |s: EditScript<'_>| {
            let mut entries = s.into_entries();
            entries.reverse();
            EditScript::new(entries)
        }))]);

        match pipeline.run(sample()) {
            Err(LineDiffError::InvariantViolation { pass, .. }) => assert_eq!(pass, "reverse"),
            other => panic!("expected invariant violation, got {:?}", other),
        }
    }

    #[test]
    fn test_pipeline_nests_as_pass() {
        let inner = compose(vec![Box::new(FnPass::new("upper", upper))]);
        let outer = Pipeline::new().add_pass(Box::new(inner));
        let out = outer.run(sample()).unwrap();
        assert_eq!(out.entries()[0].kind, EntryKind::Equal);
        assert_eq!(out.entries()[0].before_text, "A");
    }
}
