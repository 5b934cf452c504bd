//! Call arguments as the checker sees them.

use fx_diagnostic::Span;
use fx_types::DType;

/// One bound argument of a call.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Arg {
    pub ty: DType,
    /// The value, when the argument is a Text constant.
    pub constant: Option<String>,
    pub span: Span,
}

impl Arg {
    /// A Text literal.
    pub fn text(value: impl Into<String>, span: Span) -> Self {
        Arg {
            ty: DType::Text,
            constant: Some(value.into()),
            span,
        }
    }

    /// Any non-constant expression of type `ty`.
    pub fn expr(ty: DType, span: Span) -> Self {
        Arg {
            ty,
            constant: None,
            span,
        }
    }
}
