//! Token categories produced by the classifier.
//!
//! Rejected constructs never become tokens: the classifier reports them
//! as errors the moment it recognizes them.

use std::ops::Range;

use crate::PatternOptions;

/// Minimum and maximum match length in UTF-16 code units.
///
/// `max == None` means unbounded.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub(crate) struct Bounds {
    pub min: u32,
    pub max: Option<u32>,
}

impl Bounds {
    pub const ZERO: Bounds = Bounds::exact(0);

    pub const fn exact(n: u32) -> Self {
        Bounds { min: n, max: Some(n) }
    }

    /// Length of one code point.
    pub fn of_char(c: char) -> Self {
        Bounds::exact(if u32::from(c) > 0xFFFF { 2 } else { 1 })
    }

    /// `self` followed by `next`.
    #[must_use]
    pub fn then(self, next: Bounds) -> Self {
        Bounds {
            min: self.min.saturating_add(next.min),
            max: match (self.max, next.max) {
                (Some(a), Some(b)) => Some(a.saturating_add(b)),
                _ => None,
            },
        }
    }

    /// `self` or `other`.
    #[must_use]
    pub fn either(self, other: Bounds) -> Self {
        Bounds {
            min: self.min.min(other.min),
            max: match (self.max, other.max) {
                (Some(a), Some(b)) => Some(a.max(b)),
                _ => None,
            },
        }
    }

    /// `self` repeated between `low` and `high` times.
    #[must_use]
    pub fn repeat(self, low: u32, high: Option<u32>) -> Self {
        Bounds {
            min: self.min.saturating_mul(low),
            max: match (self.max, high) {
                (Some(0), _) | (_, Some(0)) => Some(0),
                (Some(a), Some(b)) => Some(a.saturating_mul(b)),
                _ => None,
            },
        }
    }
}

/// A successfully decoded escape sequence.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum Escape {
    /// `\d \w \s` (`negated` for `\D \W \S`).
    Shorthand { negated: bool },
    /// `\p{..}` (`negated` for `\P{..}`).
    Category { negated: bool },
    /// Anything standing for exactly one code point: `\xHH`, `\uHHHH`,
    /// `\u{..}`, control escapes and escaped punctuation.
    Char(char),
}

impl Escape {
    pub fn size(self) -> Bounds {
        match self {
            Escape::Shorthand { .. } | Escape::Category { .. } => Bounds::exact(1),
            Escape::Char(c) => Bounds::of_char(c),
        }
    }

    /// Shorthands and categories that match the complement of a set.
    pub fn is_negated_set(self) -> bool {
        matches!(
            self,
            Escape::Shorthand { negated: true } | Escape::Category { negated: true }
        )
    }
}

/// A backreference by position (`\1`, `\k<1>`) or by name (`\k<name>`).
#[derive(Clone, Eq, PartialEq, Debug)]
pub(crate) struct Backref {
    pub name: String,
    pub numeric: bool,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) struct Quantifier {
    pub min: u32,
    pub max: Option<u32>,
}

/// What an opening parenthesis starts.
#[derive(Clone, Eq, PartialEq, Debug)]
pub(crate) enum GroupKind {
    /// `(`: captures positionally in numbered mode, otherwise groups only.
    Plain,
    /// `(?<name>`
    Named(String),
    /// `(?:`
    NonCapture,
    /// `(?=` and `(?!`
    Lookahead,
    /// `(?<=` and `(?<!`
    Lookbehind,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub(crate) enum Token {
    /// Free-spacing whitespace, `#` comments, and `(?#...)` comments.
    Trivia,
    /// `(?imsx)`: only valid before anything else.
    InlineOptions(PatternOptions),
    Escape(Escape),
    /// `^ $ \b \B`
    Anchor,
    Backref(Backref),
    Quantifier(Quantifier),
    Open(GroupKind),
    Close,
    Alternation,
    /// `[...]`; `body` is the byte range between the brackets, after any
    /// leading `^`.
    Class { negated: bool, body: Range<usize> },
    Dot,
    Literal(char),
}

/// A token with its location in the pattern.
#[derive(Clone, Eq, PartialEq, Debug)]
pub(crate) struct Spanned {
    pub token: Token,
    pub offset: usize,
    pub len: usize,
}
