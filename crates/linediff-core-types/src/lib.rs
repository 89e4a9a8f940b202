//! Core types shared across linediff facilities
//!
//! This crate provides foundational types used by both the error facility
//! and the logging facility:
//!
//! - **Correlation types**: RequestId, RequestContext
//! - **Schema constants**: Canonical lifecycle event names

pub mod correlation;
pub mod schema;

pub use correlation::{RequestContext, RequestId};
