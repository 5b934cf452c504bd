//! The interface every library function implements.

use fx_diagnostic::{DiagnosticQueue, Span};
use fx_regex::Normalized;
use fx_types::DType;

use crate::{Arg, LibraryError};

/// Outcome of checking one call.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CheckedCall {
    /// `DType::Error` if the call has errors.
    pub return_type: DType,
    /// The pattern to hand to the runtime engine, for pattern functions
    /// whose pattern was accepted.
    pub normalized: Option<Normalized>,
}

impl CheckedCall {
    pub fn error() -> Self {
        CheckedCall {
            return_type: DType::Error,
            normalized: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.return_type.is_error()
    }
}

/// A function of the formula library.
///
/// Implementations are stateless and shared between checking threads.
pub trait BuiltinFunction: Sync {
    /// Name as written in formulas (case-sensitive).
    fn name(&self) -> &'static str;

    /// Parameter names, required parameters first.
    fn params(&self) -> &'static [&'static str];

    /// Number of leading parameters that must be supplied.
    fn required_params(&self) -> usize;

    /// Type-check a call, reporting problems to `queue`.
    fn check(&self, args: &[Arg], queue: &mut DiagnosticQueue) -> CheckedCall;

    /// Check the argument count of a call.
    fn check_arity(&self, found: usize) -> Result<(), LibraryError> {
        let (min, max) = (self.required_params(), self.params().len());
        if (min..=max).contains(&found) {
            Ok(())
        } else {
            Err(LibraryError::ArityMismatch {
                name: self.name(),
                min,
                max,
                found,
            })
        }
    }

    /// Span to blame for a missing argument: the last argument present.
    fn missing_arg_span(&self, args: &[Arg]) -> Span {
        args.last().map_or(Span::DUMMY, |arg| arg.span)
    }
}
