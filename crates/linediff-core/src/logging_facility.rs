//! Structured logging for linediff
//!
//! - `init(profile)` installs a stderr subscriber; only applications call it
//! - `log_op_start!`, `log_op_end!` and `log_op_error!` emit lifecycle events
//! - `test_capture` records events in memory for assertions
//!
//! ```rust
//! use linediff_core::logging_facility::{init, Profile};
//!
//! let _ = init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, InitError, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
