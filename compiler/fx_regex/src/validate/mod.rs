//! The validation pipeline: classifier, class scanner and group tracker,
//! then schema synthesis.

use fx_types::DType;

use crate::class::check_class;
use crate::classify::{leading_inline_options, Classifier};
use crate::error::{RegexErrorKind as K, ValidationError};
use crate::schema::synthesize;
use crate::token::{Bounds, Spanned, Token};
use crate::tracker::{Captures, GroupTracker};
use crate::{cache, PatternOptions, ResultShape};

/// A valid pattern's result type.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Validated {
    pub ty: DType,
    /// Advisory accompanying the type, if any.
    pub suggestion: Option<ValidationError>,
}

/// Validate `pattern` and synthesize the type `shape` produces for it.
///
/// Results are memoized in the process-wide cache.
pub fn validate(
    pattern: &str,
    options: PatternOptions,
    shape: ResultShape,
) -> Result<Validated, ValidationError> {
    cache::shared().validate(pattern, options, shape)
}

/// [`validate`] without the cache.
#[tracing::instrument(level = "debug", skip_all, fields(pattern_len = pattern.len(), ?shape))]
pub fn validate_uncached(
    pattern: &str,
    options: PatternOptions,
    shape: ResultShape,
) -> Result<Validated, ValidationError> {
    let captures = scan(pattern, options).inspect_err(|error| {
        tracing::debug!(kind = ?error.kind, offset = error.offset, "pattern rejected");
    })?;
    let schema = synthesize(shape, &captures);
    let suggestion = if schema.hidden.is_empty() {
        None
    } else {
        tracing::debug!(hidden = ?schema.hidden, "reserved fields hidden");
        Some(ValidationError::suggestion(K::HiddenReservedNames(schema.hidden)))
    };
    Ok(Validated {
        ty: schema.ty,
        suggestion,
    })
}

/// Scan the whole pattern, stopping at the first error.
fn scan(pattern: &str, options: PatternOptions) -> Result<Captures, ValidationError> {
    let (options, start) = leading_inline_options(pattern, options);
    let mut tracker = GroupTracker::new(pattern, options);
    for spanned in Classifier::new(pattern, start, options) {
        let Spanned { token, offset, len } = spanned?;
        match token {
            Token::Trivia => {}
            Token::InlineOptions(_) => {
                return Err(ValidationError::at(
                    K::MisplacedInlineOptions,
                    pattern,
                    offset,
                    len,
                ));
            }
            Token::Escape(escape) => tracker.atom(escape.size()),
            Token::Anchor => tracker.zero_width(),
            Token::Backref(backref) => tracker.backref(&backref, offset, len)?,
            Token::Quantifier(q) => tracker.quantify(q, offset, len)?,
            Token::Open(kind) => tracker.open(&kind, offset, len)?,
            Token::Close => tracker.close(offset, len)?,
            Token::Alternation => tracker.alternate(),
            Token::Class { negated, body } => {
                check_class(pattern, offset..offset + len, body, negated, options)?;
                tracker.atom(Bounds::exact(1));
            }
            Token::Dot => tracker.atom(Bounds::exact(1)),
            Token::Literal(c) => tracker.atom(Bounds::of_char(c)),
        }
    }
    tracker.finish()
}
