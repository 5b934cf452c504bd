//! Diagnostic system for formula type-checking.
//!
//! Every phase reports problems through the same building blocks:
//! - Error codes for searchability (`E3107`, `W3001`)
//! - A clear message (what went wrong)
//! - A primary span (where it went wrong)
//! - Notes (why it's wrong, how to fix it)
//!
//! Diagnostics are collected in a [`DiagnosticQueue`] and rendered by the
//! caller; this crate never prints.

mod diagnostic;
mod error_code;
pub mod queue;
mod span;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use queue::DiagnosticQueue;
pub use span::{Span, SpanError};
