//! Lifecycle logging macros
//!
//! Each macro stamps `component` (the calling module), `op` and `event`.
//! Extra `tracing` fields may follow the required arguments.

/// Log the start of an operation
///
/// ```
/// # use linediff_core::log_op_start;
/// log_op_start!("diff_lines");
/// log_op_start!("diff_lines", before_len = 10, after_len = 12);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)+)?) => {
        ::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($($field)+)?
        )
    };
}

/// Log the successful end of an operation with its duration
///
/// ```
/// # use linediff_core::log_op_end;
/// log_op_end!("diff_lines", duration_ms = 42);
/// log_op_end!("diff_lines", duration_ms = 42, entries = 7);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {
        ::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)+)?
        )
    };
}

/// Log a failed operation. `$err` is anything convertible into `ExError`;
/// its kind and stable code become `err.kind` and `err.code`.
///
/// ```
/// # use linediff_core::{log_op_error, errors::LineDiffError};
/// let err = LineDiffError::InvalidTabWidth { value: 0 };
/// log_op_error!("build_pipeline", err, duration_ms = 0);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {{
        let err: $crate::errors::ExError = ::core::convert::Into::into($err);
        ::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?err.kind(),
            err.code = err.code(),
            $($($field)+)?
        )
    }};
}
