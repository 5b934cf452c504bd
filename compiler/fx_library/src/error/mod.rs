//! Call-level errors: everything wrong with a call other than its pattern.

use fx_diagnostic::{Diagnostic, ErrorCode, Span};
use fx_types::DType;

#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("unknown function `{0}`")]
    UnknownFunction(String),

    #[error("`{name}` expects {min} to {max} arguments, found {found}")]
    ArityMismatch {
        name: &'static str,
        min: usize,
        max: usize,
        found: usize,
    },

    #[error("argument `{param}` of `{name}` expects type {expected}, found {found}")]
    TypeMismatch {
        name: &'static str,
        param: &'static str,
        expected: DType,
        found: DType,
    },

    #[error("argument `{param}` of `{name}` must be a constant")]
    NonConstant {
        name: &'static str,
        param: &'static str,
    },

    #[error("unrecognized match option `{0}`")]
    UnknownOption(char),
}

impl LibraryError {
    pub fn code(&self) -> ErrorCode {
        match self {
            LibraryError::TypeMismatch { .. } => ErrorCode::E2001,
            LibraryError::ArityMismatch { .. } => ErrorCode::E2002,
            LibraryError::UnknownFunction(_) => ErrorCode::E2003,
            LibraryError::NonConstant { .. } => ErrorCode::E2004,
            LibraryError::UnknownOption(_) => ErrorCode::E2005,
        }
    }

    /// Error diagnostic labelled at `span`.
    #[cold]
    pub fn to_diagnostic(&self, span: Span) -> Diagnostic {
        let label = match self {
            LibraryError::UnknownFunction(_) => "not a known function",
            LibraryError::ArityMismatch { .. } => "wrong number of arguments",
            LibraryError::TypeMismatch { .. } => "wrong type",
            LibraryError::NonConstant { .. } => "not a constant",
            LibraryError::UnknownOption(_) => "unknown option",
        };
        let diagnostic = Diagnostic::error(self.code())
            .with_message(self.to_string())
            .with_label(span, label);
        match self {
            LibraryError::UnknownOption(_) => {
                diagnostic.with_note("valid options are i, m, s, x, N, ^, $ and c")
            }
            LibraryError::NonConstant { .. } => {
                diagnostic.with_note("patterns are checked when the formula is compiled")
            }
            _ => diagnostic,
        }
    }
}
