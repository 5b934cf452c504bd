//! Token classifier.
//!
//! Splits a pattern into non-overlapping tokens, left to right. At each
//! position the categories in [`CATEGORIES`] are tried in order and the
//! first one that recognizes the input wins, either producing a token or
//! rejecting the construct outright. The order is part of the contract:
//! it decides which error an ambiguous input reports.
//!
//! Character class bodies are only delimited here; their interior is
//! checked by [`crate::class`].

use crate::error::{RegexErrorKind as K, ValidationError};
use crate::token::{Backref, Escape, GroupKind, Quantifier, Spanned, Token};
use crate::PatternOptions;

/// Punctuation that may be escaped anywhere.
const SYNTAX_CHARS: &str = "\\^$.|?*+()[]{}/";

/// Punctuation that may only be escaped inside a character class.
const CLASS_ONLY_CHARS: &str = "-&!#%,:;<=>@`~'";

/// Unicode general categories with identical meaning in every supported
/// engine.
const UNICODE_CATEGORIES: &[&str] = &[
    "L", "Lu", "Ll", "Lt", "Lm", "Lo", "M", "Mn", "Mc", "Me", "N", "Nd", "Nl", "No", "P", "Pc",
    "Pd", "Ps", "Pe", "Pi", "Pf", "Po", "S", "Sm", "Sc", "Sk", "So", "Z", "Zs", "Zl", "Zp", "Cc",
    "Cf", "Co",
];

/// A construct that was recognized and rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Reject {
    pub kind: K,
    /// Length in bytes of the rejected construct.
    pub len: usize,
}

impl Reject {
    #[cold]
    pub fn new(kind: K, len: usize) -> Self {
        Reject { kind, len }
    }
}

/// Outcome of one category matcher: `None` if the category does not apply
/// at this position, otherwise the item and its length in bytes.
pub(crate) type Matched<T> = Option<Result<(T, usize), Reject>>;

/// The input visible to a category matcher.
#[derive(Copy, Clone)]
pub(crate) struct Scan<'p> {
    pub pattern: &'p str,
    pub offset: usize,
    pub options: PatternOptions,
}

impl<'p> Scan<'p> {
    #[inline]
    pub fn rest(&self) -> &'p str {
        self.pattern.get(self.offset..).unwrap_or_default()
    }
}

type Matcher = fn(&Scan<'_>) -> Matched<Token>;

/// Pattern-level categories, highest priority first.
const CATEGORIES: &[(&str, Matcher)] = &[
    ("free-spacing trivia", free_spacing_trivia),
    ("inline comment", inline_comment),
    ("escape", escape),
    ("quantifier", quantifier),
    ("group open", group_open),
    ("group close", group_close),
    ("alternation", alternation),
    ("anchor", anchor),
    ("character class", class_span),
    ("literal", literal),
];

/// Iterator over the tokens of a pattern.
///
/// Yields at most one error, after which it is exhausted.
pub(crate) struct Classifier<'p> {
    pattern: &'p str,
    pos: usize,
    options: PatternOptions,
    failed: bool,
}

impl<'p> Classifier<'p> {
    /// Classify `pattern` from byte offset `start`.
    pub fn new(pattern: &'p str, start: usize, options: PatternOptions) -> Self {
        Classifier {
            pattern,
            pos: start,
            options,
            failed: false,
        }
    }
}

impl Iterator for Classifier<'_> {
    type Item = Result<Spanned, ValidationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.pattern.len() {
            return None;
        }
        let scan = Scan {
            pattern: self.pattern,
            offset: self.pos,
            options: self.options,
        };
        // `literal` accepts any character, so some category always applies.
        let (category, result) = CATEGORIES
            .iter()
            .find_map(|(name, matcher)| matcher(&scan).map(|r| (*name, r)))?;
        match result {
            Ok((token, len)) => {
                tracing::trace!(category, offset = self.pos, len, "classified");
                let spanned = Spanned {
                    token,
                    offset: self.pos,
                    len,
                };
                self.pos += len;
                Some(Ok(spanned))
            }
            Err(reject) => {
                tracing::debug!(category, offset = self.pos, kind = ?reject.kind, "rejected");
                self.failed = true;
                Some(Err(ValidationError::at(
                    reject.kind,
                    self.pattern,
                    self.pos,
                    reject.len,
                )))
            }
        }
    }
}

/// Fold `(?imsx)` groups at the very start of `pattern` into `options`.
///
/// Comments and free-spacing whitespace before or between the groups are
/// skipped. Returns the folded options and the byte offset where scanning
/// starts. Anything that is not a well-formed leading option group is left
/// for the classifier to report.
pub(crate) fn leading_inline_options(
    pattern: &str,
    mut options: PatternOptions,
) -> (PatternOptions, usize) {
    let mut pos = 0;
    loop {
        let scan = Scan {
            pattern,
            offset: pos,
            options,
        };
        let trivia = free_spacing_trivia(&scan).or_else(|| inline_comment(&scan));
        match trivia.or_else(|| group_open(&scan)) {
            Some(Ok((Token::Trivia, len))) => pos += len,
            Some(Ok((Token::InlineOptions(flags), len))) => {
                options |= flags;
                pos += len;
            }
            _ => return (options, pos),
        }
    }
}

// Shared helpers

/// Length in bytes of the leading run of ASCII bytes satisfying `pred`.
#[inline]
fn ascii_run(s: &str, pred: fn(&u8) -> bool) -> usize {
    s.bytes().take_while(pred).count()
}

/// Saturating decimal parse of an all-digit string.
fn parse_count(digits: &str) -> u32 {
    digits.bytes().fold(0u32, |acc, b| {
        acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
    })
}

/// `[A-Za-z][A-Za-z0-9]*`
pub(crate) fn is_capture_name(name: &str) -> bool {
    let mut bytes = name.bytes();
    bytes.next().is_some_and(|b| b.is_ascii_alphabetic()) && bytes.all(|b| b.is_ascii_alphanumeric())
}

/// `[1-9][0-9]*`
fn is_group_number(name: &str) -> bool {
    let mut bytes = name.bytes();
    bytes.next().is_some_and(|b| matches!(b, b'1'..=b'9')) && bytes.all(|b| b.is_ascii_digit())
}

/// Where an escape appears; some escapes are valid on one side only.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum EscapeSite {
    Pattern,
    Class,
}

/// A decoded escape sequence.
#[derive(Clone, Eq, PartialEq, Debug)]
pub(crate) enum Escaped {
    Escape(Escape),
    /// `\b \B`
    Anchor,
    Backref(Backref),
}

/// Decode the escape sequence at the start of `rest` (which begins with a
/// backslash).
pub(crate) fn parse_escape(
    rest: &str,
    site: EscapeSite,
    options: PatternOptions,
) -> Result<(Escaped, usize), Reject> {
    let tail = rest.get(1..).unwrap_or_default();
    let Some(c) = tail.chars().next() else {
        return Err(Reject::new(K::BadEscape, 1));
    };
    let head = 1 + c.len_utf8();
    let after = rest.get(head..).unwrap_or_default();
    let in_class = site == EscapeSite::Class;
    let char_escape = |ch: char| -> Result<(Escaped, usize), Reject> {
        Ok((Escaped::Escape(Escape::Char(ch)), head))
    };

    match c {
        '0' => Err(Reject::new(
            K::BadOctal,
            head + ascii_run(after, |b| matches!(b, b'0'..=b'7')),
        )),
        '1'..='9' | 'k' | 'b' | 'B' if in_class => Err(Reject::new(K::BadEscape, head)),
        '1'..='9' => {
            let len = head + ascii_run(after, u8::is_ascii_digit);
            Ok((
                Escaped::Backref(Backref {
                    name: rest[1..len].to_string(),
                    numeric: true,
                }),
                len,
            ))
        }
        'k' => named_backref(after),
        'u' => unicode_escape(after),
        'x' => hex_escape(after),
        'p' | 'P' => category_escape(after, c == 'P'),
        'd' | 'w' | 's' => Ok((Escaped::Escape(Escape::Shorthand { negated: false }), head)),
        'D' | 'W' | 'S' => Ok((Escaped::Escape(Escape::Shorthand { negated: true }), head)),
        'b' | 'B' => Ok((Escaped::Anchor, head)),
        'f' => char_escape('\u{0C}'),
        'n' => char_escape('\n'),
        'r' => char_escape('\r'),
        't' => char_escape('\t'),
        'v' => char_escape('\u{0B}'),
        c if SYNTAX_CHARS.contains(c) => char_escape(c),
        ' ' | '#' if options.free_spacing() => char_escape(c),
        c if CLASS_ONLY_CHARS.contains(c) => {
            if in_class {
                char_escape(c)
            } else {
                Err(Reject::new(K::ClassOnlyEscape, head))
            }
        }
        _ => Err(Reject::new(K::BadEscape, head)),
    }
}

/// `\k<name>` or `\k<1>`; `after` follows the `\k`.
fn named_backref(after: &str) -> Result<(Escaped, usize), Reject> {
    let Some(body) = after.strip_prefix('<') else {
        return Err(Reject::new(K::BadBackrefSyntax, 2));
    };
    let Some(end) = body.find('>') else {
        return Err(Reject::new(K::BadBackrefSyntax, 3));
    };
    let name = &body[..end];
    let len = 3 + end + 1;
    let numeric = is_group_number(name);
    if !numeric && !is_capture_name(name) {
        return Err(Reject::new(K::BadBackrefSyntax, len));
    }
    Ok((
        Escaped::Backref(Backref {
            name: name.to_string(),
            numeric,
        }),
        len,
    ))
}

/// `\uHHHH` or `\u{H..}`; `after` follows the `\u`.
fn unicode_escape(after: &str) -> Result<(Escaped, usize), Reject> {
    let (digits, len) = if let Some(body) = after.strip_prefix('{') {
        let n = ascii_run(body, u8::is_ascii_hexdigit);
        if n == 0 || n > 6 || !body[n..].starts_with('}') {
            return Err(Reject::new(K::BadUnicodeEscape, 3 + n));
        }
        (&body[..n], 3 + n + 1)
    } else {
        let n = ascii_run(after, u8::is_ascii_hexdigit).min(4);
        if n < 4 {
            return Err(Reject::new(K::BadUnicodeEscape, 2 + n));
        }
        (&after[..4], 2 + 4)
    };
    let value = u32::from_str_radix(digits, 16)
        .map_err(|_| Reject::new(K::BadUnicodeEscape, len))?;
    // Rejects surrogates and values above U+10FFFF.
    let c = char::from_u32(value).ok_or_else(|| Reject::new(K::UnicodeOutOfRange, len))?;
    Ok((Escaped::Escape(Escape::Char(c)), len))
}

/// `\xHH`; `after` follows the `\x`.
fn hex_escape(after: &str) -> Result<(Escaped, usize), Reject> {
    let n = ascii_run(after, u8::is_ascii_hexdigit).min(2);
    if n < 2 {
        return Err(Reject::new(K::BadHexEscape, 2 + n));
    }
    let c = u32::from_str_radix(&after[..2], 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| Reject::new(K::BadHexEscape, 4))?;
    Ok((Escaped::Escape(Escape::Char(c)), 4))
}

/// `\p{Cat}` / `\P{Cat}`; `after` follows the `\p`.
fn category_escape(after: &str, negated: bool) -> Result<(Escaped, usize), Reject> {
    let Some(body) = after.strip_prefix('{') else {
        return Err(Reject::new(K::BadUnicodeCategory, 2));
    };
    let Some(end) = body.find('}') else {
        return Err(Reject::new(K::BadUnicodeCategory, 3));
    };
    let len = 3 + end + 1;
    if UNICODE_CATEGORIES.contains(&&body[..end]) {
        Ok((Escaped::Escape(Escape::Category { negated }), len))
    } else {
        Err(Reject::new(K::BadUnicodeCategory, len))
    }
}

// Categories

fn free_spacing_trivia(scan: &Scan<'_>) -> Matched<Token> {
    if !scan.options.free_spacing() {
        return None;
    }
    let rest = scan.rest();
    let spaces = ascii_run(rest, |b| matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C));
    if spaces > 0 {
        return Some(Ok((Token::Trivia, spaces)));
    }
    if rest.starts_with('#') {
        let len = rest.find('\n').map_or(rest.len(), |i| i + 1);
        return Some(Ok((Token::Trivia, len)));
    }
    None
}

fn inline_comment(scan: &Scan<'_>) -> Matched<Token> {
    let rest = scan.rest();
    if !rest.starts_with("(?#") {
        return None;
    }
    Some(match rest.find(')') {
        Some(end) => Ok((Token::Trivia, end + 1)),
        None => Err(Reject::new(K::UnterminatedComment, rest.len())),
    })
}

fn escape(scan: &Scan<'_>) -> Matched<Token> {
    let rest = scan.rest();
    if !rest.starts_with('\\') {
        return None;
    }
    Some(
        parse_escape(rest, EscapeSite::Pattern, scan.options).map(|(escaped, len)| {
            let token = match escaped {
                Escaped::Escape(e) => Token::Escape(e),
                Escaped::Anchor => Token::Anchor,
                Escaped::Backref(b) => Token::Backref(b),
            };
            (token, len)
        }),
    )
}

/// `{m}`, `{m,}`, `{m,n}`. `None` if the brace does not start a quantifier
/// at all (it is then an unescaped literal).
fn braces(rest: &str) -> Matched<Quantifier> {
    let body = rest.strip_prefix('{')?;
    let first = *body.as_bytes().first()?;
    if first == b',' {
        return Some(Err(Reject::new(K::BadQuantifier, 2)));
    }
    if !first.is_ascii_digit() {
        return None;
    }
    let low = ascii_run(body, u8::is_ascii_digit);
    let min = parse_count(&body[..low]);
    let tail = &body[low..];
    let (max, used) = match tail.strip_prefix(',') {
        Some(upper) => match ascii_run(upper, u8::is_ascii_digit) {
            0 => (None, 1),
            high => (Some(parse_count(&upper[..high])), 1 + high),
        },
        None => (Some(min), 0),
    };
    let consumed = 1 + low + used;
    if !tail[used..].starts_with('}') {
        return Some(Err(Reject::new(K::BadQuantifier, consumed)));
    }
    Some(Ok((Quantifier { min, max }, consumed + 1)))
}

/// Does `s` start with something that would be read as a quantifier?
fn starts_quantifier(s: &str) -> bool {
    matches!(
        s.as_bytes(),
        [b'*' | b'+' | b'?', ..] | [b'{', b'0'..=b'9' | b',', ..]
    )
}

fn quantifier(scan: &Scan<'_>) -> Matched<Token> {
    let rest = scan.rest();
    let (q, mut len) = match rest.as_bytes().first()? {
        b'*' => (Quantifier { min: 0, max: None }, 1),
        b'+' => (Quantifier { min: 1, max: None }, 1),
        b'?' => (Quantifier { min: 0, max: Some(1) }, 1),
        b'{' => match braces(rest)? {
            Ok(found) => found,
            Err(reject) => return Some(Err(reject)),
        },
        _ => return None,
    };
    let lazy = rest[len..].starts_with('?');
    if lazy {
        len += 1;
    }
    let after = &rest[len..];
    if !lazy && after.starts_with('+') {
        return Some(Err(Reject::new(K::PossessiveQuantifier, len + 1)));
    }
    if starts_quantifier(after) {
        return Some(Err(Reject::new(K::DoubleQuantifier, len + 1)));
    }
    Some(Ok((Token::Quantifier(q), len)))
}

fn group_open(scan: &Scan<'_>) -> Matched<Token> {
    let after = scan.rest().strip_prefix('(')?;
    let Some(ext) = after.strip_prefix('?') else {
        return Some(Ok((Token::Open(GroupKind::Plain), 1)));
    };
    let open = |kind: GroupKind, len: usize| -> Matched<Token> { Some(Ok((Token::Open(kind), len))) };
    let reject = |kind: K, len: usize| -> Matched<Token> { Some(Err(Reject::new(kind, len))) };
    match ext.as_bytes() {
        [b'<', b'=' | b'!', ..] => open(GroupKind::Lookbehind, 4),
        [b'=' | b'!', ..] => open(GroupKind::Lookahead, 3),
        [b':', ..] => open(GroupKind::NonCapture, 3),
        [b'<', ..] => named_group(&ext[1..]),
        [b'\'', ..] => reject(K::BadSingleQuotedName, 3),
        [b'>', ..] => reject(K::BadAtomicGroup, 3),
        [b'(', ..] => reject(K::BadConditional, 3),
        [b'R' | b'&' | b'0'..=b'9', ..] | [b'+' | b'-', b'0'..=b'9', ..] => {
            reject(K::BadRecursion, 3)
        }
        [b'P' | b'|', ..] => reject(K::BadGroupSyntax, 3),
        [c, ..] if c.is_ascii_alphabetic() || *c == b'-' => inline_options(ext),
        _ => reject(K::BadGroupSyntax, 2),
    }
}

/// `(?<name>`; `body` follows the `(?<`.
fn named_group(body: &str) -> Matched<Token> {
    let Some(end) = body.find('>') else {
        return Some(Err(Reject::new(K::BadCaptureName, 3)));
    };
    let name = &body[..end];
    let len = 3 + end + 1;
    Some(if name.contains('-') {
        Err(Reject::new(K::BadBalancingGroup, len))
    } else if is_capture_name(name) {
        Ok((Token::Open(GroupKind::Named(name.to_string())), len))
    } else {
        Err(Reject::new(K::BadCaptureName, len))
    })
}

/// `(?imsx)`; `ext` follows the `(?`.
fn inline_options(ext: &str) -> Matched<Token> {
    let letters = ascii_run(ext, |b| b.is_ascii_alphabetic() || *b == b'-');
    let len = 2 + letters;
    match ext.as_bytes().get(letters) {
        Some(b')') => {
            let mut flags = PatternOptions::empty();
            for letter in ext[..letters].chars() {
                match PatternOptions::from_inline_letter(letter) {
                    Some(flag) => flags |= flag,
                    None => return Some(Err(Reject::new(K::BadInlineModifiers, len + 1))),
                }
            }
            Some(Ok((Token::InlineOptions(flags), len + 1)))
        }
        Some(b':') => Some(Err(Reject::new(K::BadInlineModifiers, len + 1))),
        _ => Some(Err(Reject::new(K::BadGroupSyntax, len))),
    }
}

fn group_close(scan: &Scan<'_>) -> Matched<Token> {
    scan.rest().starts_with(')').then_some(Ok((Token::Close, 1)))
}

fn alternation(scan: &Scan<'_>) -> Matched<Token> {
    scan.rest().starts_with('|').then_some(Ok((Token::Alternation, 1)))
}

fn anchor(scan: &Scan<'_>) -> Matched<Token> {
    matches!(scan.rest().as_bytes().first(), Some(b'^' | b'$')).then_some(Ok((Token::Anchor, 1)))
}

/// `[...]` up to the first unescaped `]`.
fn class_span(scan: &Scan<'_>) -> Matched<Token> {
    let rest = scan.rest();
    let inner = rest.strip_prefix('[')?;
    let negated = inner.starts_with('^');
    let body_start = 1 + usize::from(negated);
    let mut chars = rest[body_start..].char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            ']' => {
                let start = scan.offset + body_start;
                return Some(Ok((
                    Token::Class {
                        negated,
                        body: start..start + i,
                    },
                    body_start + i + 1,
                )));
            }
            _ => {}
        }
    }
    Some(Err(Reject::new(K::UnterminatedClass, rest.len())))
}

fn literal(scan: &Scan<'_>) -> Matched<Token> {
    let c = scan.rest().chars().next()?;
    Some(match c {
        '.' => Ok((Token::Dot, 1)),
        ']' | '{' | '}' => Err(Reject::new(K::UnescapedLiteral(c), 1)),
        _ => Ok((Token::Literal(c), c.len_utf8())),
    })
}

#[cfg(test)]
mod tests;
