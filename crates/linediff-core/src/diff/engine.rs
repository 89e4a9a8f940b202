//! Engine entry point.
//!
//! ## Logging Ownership
//!
//! `Differ` owns lifecycle logging for a diff request:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! The aligner and passes log at `debug` only.

use super::align::diff_lines;
use super::model::EditScript;
use crate::config::DiffConfig;
use crate::core_types::RequestContext;
use crate::errors::Result;
use crate::passes::Pipeline;
use crate::{log_op_end, log_op_error, log_op_start};
use std::time::Instant;

/// A validated configuration with its pipeline built once.
///
/// `Differ` holds no mutable state; share it by reference across threads.
#[derive(Debug)]
pub struct Differ {
    config: DiffConfig,
    pipeline: Pipeline,
}

impl Differ {
    /// Validate `config` and build its pipeline.
    ///
    /// # Errors
    ///
    /// The first invalid configuration field. Nothing is diffed.
    pub fn new(config: DiffConfig) -> Result<Self> {
        log_op_start!("build_differ");
        let start = Instant::now();

        let pipeline = config.build_pipeline().map_err(|e| {
            log_op_error!(
                "build_differ",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            "build_differ",
            duration_ms = start.elapsed().as_millis() as u64,
            passes = ?pipeline.pass_names()
        );
        Ok(Self { config, pipeline })
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Diff two line sequences with a fresh request id.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if a pass breaks index order.
    pub fn diff<'a, S: AsRef<str>>(
        &self,
        before: &'a [S],
        after: &'a [S],
    ) -> Result<EditScript<'a>> {
        self.diff_with_context(before, after, &RequestContext::new())
    }

    /// Diff two line sequences, correlating log events with `ctx`.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if a pass breaks index order.
    pub fn diff_with_context<'a, S: AsRef<str>>(
        &self,
        before: &'a [S],
        after: &'a [S],
        ctx: &RequestContext,
    ) -> Result<EditScript<'a>> {
        log_op_start!(
            "diff_lines",
            request_id = %ctx.request_id,
            before_len = before.len(),
            after_len = after.len()
        );
        let start = Instant::now();

        let script = diff_lines(before, after, &self.config.comparator, self.config.pairing);
        tracing::debug!(op = "align", entries = script.len(), stats = %script.stats());

        let script = self.pipeline.run(script).map_err(|e| {
            log_op_error!(
                "diff_lines",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = %ctx.request_id
            );
            e
        })?;

        log_op_end!(
            "diff_lines",
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = %ctx.request_id,
            entries = script.len()
        );
        Ok(script)
    }
}
