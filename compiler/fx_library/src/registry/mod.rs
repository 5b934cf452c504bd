//! Function registry.
//!
//! Maps function names to their implementations. Every function is a
//! static, stateless value, so lookups hand out `&'static` references and
//! the registry itself holds no state.

use fx_diagnostic::{DiagnosticQueue, Span};
use fx_regex::ResultShape;

use crate::{Arg, BuiltinFunction, CheckedCall, LibraryError, MatchFunction};

static IS_MATCH: MatchFunction = MatchFunction::new("IsMatch", ResultShape::Boolean);
static MATCH: MatchFunction = MatchFunction::new("Match", ResultShape::Record);
static MATCH_ALL: MatchFunction = MatchFunction::new("MatchAll", ResultShape::Table);

const NAMES: &[&str] = &["IsMatch", "Match", "MatchAll"];

/// Registry of library functions.
///
/// # Usage
///
/// ```
/// use fx_library::{BuiltinFunction, FunctionRegistry};
///
/// let registry = FunctionRegistry::new();
/// let function = registry.get("MatchAll").unwrap();
/// assert_eq!(function.required_params(), 2);
/// assert!(registry.get("matchall").is_none());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct FunctionRegistry {
    _private: (),
}

impl FunctionRegistry {
    pub fn new() -> Self {
        FunctionRegistry { _private: () }
    }

    /// Look up a function by its exact name.
    pub fn get(&self, name: &str) -> Option<&'static dyn BuiltinFunction> {
        match name {
            "IsMatch" => Some(&IS_MATCH),
            "Match" => Some(&MATCH),
            "MatchAll" => Some(&MATCH_ALL),
            _ => None,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        NAMES.iter().copied()
    }

    pub fn len(&self) -> usize {
        NAMES.len()
    }

    pub fn is_empty(&self) -> bool {
        NAMES.is_empty()
    }

    /// Resolve and check the call `name(args)`.
    ///
    /// Unknown names are reported at `call_span`.
    pub fn check_call(
        &self,
        name: &str,
        args: &[Arg],
        call_span: Span,
        queue: &mut DiagnosticQueue,
    ) -> CheckedCall {
        let Some(function) = self.get(name) else {
            tracing::debug!(name, "unknown function");
            queue.push(LibraryError::UnknownFunction(name.to_string()).to_diagnostic(call_span));
            return CheckedCall::error();
        };
        function.check(args, queue)
    }
}
