//! `IsMatch`, `Match` and `MatchAll`.
//!
//! All three take `(text, pattern [, options])` and differ only in the
//! shape of their result. The pattern and options must be constants so the
//! pattern can be validated, and its result type synthesized, when the
//! formula is checked.

use fx_diagnostic::{Diagnostic, DiagnosticQueue, Span};
use fx_regex::{PatternOptions, ResultShape, ValidationError};
use fx_types::DType;

use crate::options::{parse_options, DEFAULT_OPTIONS};
use crate::{Arg, BuiltinFunction, CheckedCall, LibraryError};

const PARAMS: &[&str] = &["text", "pattern", "options"];

/// One member of the pattern-matching family.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct MatchFunction {
    pub name: &'static str,
    pub shape: ResultShape,
}

impl MatchFunction {
    pub const fn new(name: &'static str, shape: ResultShape) -> Self {
        MatchFunction { name, shape }
    }

    /// Resolve the options argument, if it is present.
    fn options(&self, arg: Option<&Arg>) -> Result<PatternOptions, (LibraryError, Span)> {
        let Some(arg) = arg else {
            return parse_options(DEFAULT_OPTIONS).map_err(|e| (e, Span::DUMMY));
        };
        let Some(letters) = arg.constant.as_deref() else {
            return Err((
                LibraryError::NonConstant {
                    name: self.name,
                    param: PARAMS[2],
                },
                arg.span,
            ));
        };
        parse_options(letters).map_err(|e| (e, arg.span))
    }
}

impl BuiltinFunction for MatchFunction {
    fn name(&self) -> &'static str {
        self.name
    }

    fn params(&self) -> &'static [&'static str] {
        PARAMS
    }

    fn required_params(&self) -> usize {
        2
    }

    #[tracing::instrument(level = "debug", skip_all, fields(function = self.name))]
    fn check(&self, args: &[Arg], queue: &mut DiagnosticQueue) -> CheckedCall {
        if let Err(error) = self.check_arity(args.len()) {
            queue.push(error.to_diagnostic(self.missing_arg_span(args)));
            return CheckedCall::error();
        }
        let [text, pattern, rest @ ..] = args else {
            return CheckedCall::error();
        };

        let mut failed = false;
        if !text.ty.coerces_to(&DType::Text) {
            let error = LibraryError::TypeMismatch {
                name: self.name,
                param: PARAMS[0],
                expected: DType::Text,
                found: text.ty.clone(),
            };
            queue.push(error.to_diagnostic(text.span));
            failed = true;
        }

        let options = match self.options(rest.first()) {
            Ok(options) => Some(options),
            Err((error, span)) => {
                queue.push(error.to_diagnostic(span));
                None
            }
        };
        let Some(source) = pattern.constant.as_deref() else {
            let error = LibraryError::NonConstant {
                name: self.name,
                param: PARAMS[1],
            };
            queue.push(error.to_diagnostic(pattern.span));
            return CheckedCall::error();
        };
        let Some(options) = options else {
            return CheckedCall::error();
        };

        match fx_regex::validate(source, options, self.shape) {
            Ok(validated) => {
                if let Some(suggestion) = &validated.suggestion {
                    queue.push(suggestion_diagnostic(suggestion, pattern.span));
                }
                if failed {
                    return CheckedCall::error();
                }
                CheckedCall {
                    return_type: validated.ty,
                    normalized: fx_regex::normalize(source, options).ok(),
                }
            }
            Err(error) => {
                tracing::debug!(kind = ?error.kind, "pattern rejected");
                queue.push(pattern_diagnostic(&error, pattern.span));
                CheckedCall::error()
            }
        }
    }
}

/// Error diagnostic for a rejected pattern.
#[cold]
fn pattern_diagnostic(error: &ValidationError, span: Span) -> Diagnostic {
    let label = if error.context.is_empty() {
        "in this pattern".to_string()
    } else {
        format!("near `{}`", error.context)
    };
    Diagnostic::error(error.kind.code())
        .with_message(error.kind.to_string())
        .with_label(span, label)
}

fn suggestion_diagnostic(error: &ValidationError, span: Span) -> Diagnostic {
    Diagnostic::warning(error.kind.code())
        .with_message(error.kind.to_string())
        .with_label(span, "capture shadows a result field")
        .with_note("rename the capture to keep the built-in field")
}

#[cfg(test)]
mod tests;
