//! Type checking for the pattern-matching functions of the formula
//! library: `IsMatch`, `Match` and `MatchAll`.
//!
//! Each function is a [`BuiltinFunction`] registered in the
//! [`FunctionRegistry`]. Checking a call validates its arguments, runs the
//! pattern through [`fx_regex`], and reports problems to a
//! [`DiagnosticQueue`](fx_diagnostic::DiagnosticQueue) at the span of the
//! offending argument.
//!
//! # Adding a function
//!
//! Implement [`BuiltinFunction`] and add a static instance to the
//! registry's lookup table.

mod args;
mod error;
mod function;
mod matching;
pub mod options;
mod registry;

pub use args::Arg;
pub use error::LibraryError;
pub use function::{BuiltinFunction, CheckedCall};
pub use matching::MatchFunction;
pub use registry::FunctionRegistry;
