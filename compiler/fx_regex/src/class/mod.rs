//! Character-class sub-scanner.
//!
//! Runs over the body of a `[...]` token once the classifier has found its
//! closing bracket. Classes have their own, smaller token catalogue and a
//! handful of structural rules about ranges and hyphens.

use std::ops::Range;

use crate::classify::{parse_escape, EscapeSite, Escaped, Matched, Reject};
use crate::error::{RegexErrorKind as K, ValidationError};
use crate::token::Escape;
use crate::PatternOptions;

/// Punctuation that is reserved when doubled inside a class (set
/// operations in other engines).
const RESERVED_DOUBLES: &str = "&!#$%*+,.:;<=>?@^`~|-";

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Item {
    /// Stands for exactly one code point.
    Point(char),
    /// A shorthand or Unicode category.
    Set { negated: bool },
    /// An unescaped `-`.
    Hyphen,
}

#[derive(Copy, Clone, Debug)]
struct ClassToken {
    item: Item,
    offset: usize,
    len: usize,
}

impl ClassToken {
    fn end(self) -> usize {
        self.offset + self.len
    }
}

type ClassMatcher = fn(&str, PatternOptions) -> Matched<Item>;

/// Class-level categories, highest priority first.
const CLASS_CATEGORIES: &[(&str, ClassMatcher)] = &[
    ("escape", escape),
    ("reserved double", reserved_double),
    ("nested bracket", nested_bracket),
    ("free-spacing trivia", free_spacing),
    ("hyphen", hyphen),
    ("literal", literal),
];

/// Check a character class.
///
/// `class` is the byte range of the whole `[...]` token and `body` the
/// range between the brackets, after any leading `^`.
pub(crate) fn check_class(
    pattern: &str,
    class: Range<usize>,
    body: Range<usize>,
    negated: bool,
    options: PatternOptions,
) -> Result<(), ValidationError> {
    let tokens = scan(pattern, body, options)?;
    if tokens.is_empty() {
        return Err(ValidationError::at(
            K::EmptyClass,
            pattern,
            class.start,
            class.len(),
        ));
    }

    let error = |kind: K, from: ClassToken, to: ClassToken| {
        Err(ValidationError::at(
            kind,
            pattern,
            from.offset,
            to.end() - from.offset,
        ))
    };

    let mut i = 0;
    while let Some(&token) = tokens.get(i) {
        match token.item {
            Item::Hyphen => return error(K::LiteralHyphenInClass, token, token),
            Item::Set { negated: true } if negated => {
                return error(K::NegatedClassRestriction, token, token);
            }
            _ => {}
        }
        let range = match (tokens.get(i + 1), tokens.get(i + 2)) {
            (Some(sep), Some(&high)) if sep.item == Item::Hyphen => high,
            _ => {
                i += 1;
                continue;
            }
        };
        match (token.item, range.item) {
            (Item::Point(lo), Item::Point(hi)) => {
                if lo > hi {
                    return error(K::ReversedClassRange, token, range);
                }
            }
            // `--` is rejected while scanning, so `range` is never a hyphen.
            _ => return error(K::BadClassRange, token, range),
        }
        i += 3;
    }
    Ok(())
}

/// Split a class body into items.
fn scan(
    pattern: &str,
    body: Range<usize>,
    options: PatternOptions,
) -> Result<Vec<ClassToken>, ValidationError> {
    let text = pattern.get(body.clone()).unwrap_or_default();
    let mut tokens = Vec::new();
    let mut pos = 0;
    while pos < text.len() {
        let rest = &text[pos..];
        let offset = body.start + pos;
        let Some((category, result)) = CLASS_CATEGORIES
            .iter()
            .find_map(|(name, matcher)| matcher(rest, options).map(|r| (*name, r)))
        else {
            break;
        };
        match result {
            Ok((item, len)) => {
                tracing::trace!(category, offset, len, "class item");
                tokens.push(ClassToken { item, offset, len });
                pos += len;
            }
            Err(reject) => {
                return Err(ValidationError::at(reject.kind, pattern, offset, reject.len));
            }
        }
    }
    Ok(tokens)
}

fn escape(rest: &str, options: PatternOptions) -> Matched<Item> {
    if !rest.starts_with('\\') {
        return None;
    }
    Some(
        parse_escape(rest, EscapeSite::Class, options).and_then(|(escaped, len)| match escaped {
            Escaped::Escape(Escape::Char(c)) => Ok((Item::Point(c), len)),
            Escaped::Escape(e) => Ok((
                Item::Set {
                    negated: e.is_negated_set(),
                },
                len,
            )),
            Escaped::Anchor | Escaped::Backref(_) => Err(Reject::new(K::BadEscape, len)),
        }),
    )
}

fn reserved_double(rest: &str, _: PatternOptions) -> Matched<Item> {
    match rest.as_bytes() {
        [a, b, ..] if a == b && RESERVED_DOUBLES.as_bytes().contains(a) => {
            Some(Err(Reject::new(K::ReservedClassPunctuation, 2)))
        }
        _ => None,
    }
}

fn nested_bracket(rest: &str, _: PatternOptions) -> Matched<Item> {
    rest.starts_with('[')
        .then(|| Err(Reject::new(K::UnescapedCharInClass('['), 1)))
}

fn free_spacing(rest: &str, options: PatternOptions) -> Matched<Item> {
    if !options.free_spacing() {
        return None;
    }
    match rest.chars().next()? {
        c @ (' ' | '\t' | '\n' | '\r' | '\u{0B}' | '\u{0C}' | '#') => {
            Some(Err(Reject::new(K::UnescapedCharInClass(c), 1)))
        }
        _ => None,
    }
}

fn hyphen(rest: &str, _: PatternOptions) -> Matched<Item> {
    rest.starts_with('-').then_some(Ok((Item::Hyphen, 1)))
}

fn literal(rest: &str, _: PatternOptions) -> Matched<Item> {
    let c = rest.chars().next()?;
    Some(Ok((Item::Point(c), c.len_utf8())))
}
