//! Validation errors and their user-facing context excerpts.
//!
//! Validation stops at the first problem: every scan produces at most one
//! `Severe` error. The only `Suggestion` is [`RegexErrorKind::HiddenReservedNames`],
//! which accompanies a successful result.

use fx_diagnostic::ErrorCode;

/// Maximum number of pattern characters shown in an error excerpt.
pub const CONTEXT_EXCERPT_CHARS: usize = 12;

const ELLIPSIS: &str = "...";

/// How a validation problem affects compilation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorSeverity {
    /// Blocks compilation of the containing formula.
    Severe,
    /// Advisory; compilation proceeds.
    Suggestion,
}

/// Everything the validator can reject.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
pub enum RegexErrorKind {
    // Escapes
    #[error("unsupported escape sequence")]
    BadEscape,
    #[error("escape is only valid inside a character class")]
    ClassOnlyEscape,
    #[error("octal escapes are not supported; use \\x or \\u")]
    BadOctal,
    #[error("malformed backreference; use \\k<name>")]
    BadBackrefSyntax,
    #[error("malformed hexadecimal escape; use \\xHH")]
    BadHexEscape,

    // Unicode
    #[error("malformed Unicode escape; use \\uHHHH or \\u{{H..}}")]
    BadUnicodeEscape,
    #[error("Unicode code point is out of range or a surrogate")]
    UnicodeOutOfRange,
    #[error("unsupported Unicode category")]
    BadUnicodeCategory,

    // Group syntax
    #[error("single-quoted group names are not supported; use (?<name>...)")]
    BadSingleQuotedName,
    #[error("balancing groups are not supported")]
    BadBalancingGroup,
    #[error("conditional groups are not supported")]
    BadConditional,
    #[error("atomic groups are not supported")]
    BadAtomicGroup,
    #[error("recursion and subroutine calls are not supported")]
    BadRecursion,
    #[error("unsupported group syntax")]
    BadGroupSyntax,
    #[error("scoped inline options are not supported")]
    BadInlineModifiers,
    #[error("inline options are only allowed at the start of the pattern")]
    MisplacedInlineOptions,
    #[error("inline comment is not closed")]
    UnterminatedComment,

    // Balance
    #[error("group is not closed")]
    UnterminatedGroup,
    #[error("closing parenthesis without a matching open parenthesis")]
    UnopenedGroup,
    #[error("groups are nested more than {0} levels deep")]
    GroupDepthOverflow(usize),

    // Captures
    #[error("capture names must start with a letter and contain only letters and digits")]
    BadCaptureName,
    #[error("capture name `{0}` is defined more than once")]
    DuplicateCaptureName(String),
    #[error("named and numbered captures cannot be mixed")]
    MixedCaptures,

    // Quantifiers
    #[error("quantifier has nothing to repeat")]
    QuantifierOnNothing,
    #[error("quantifier upper bound is below its lower bound")]
    ReversedQuantifier,
    #[error("possessive quantifiers are not supported")]
    PossessiveQuantifier,
    #[error("quantifiers cannot be stacked")]
    DoubleQuantifier,
    #[error("malformed quantifier")]
    BadQuantifier,
    #[error("a group that can capture an empty match cannot be quantified")]
    QuantifiedPossiblyEmptyCapture,

    // Lookarounds
    #[error("lookahead and lookbehind cannot be quantified")]
    QuantifiedLookaround,
    #[error("unlimited quantifiers are not allowed inside lookahead or lookbehind")]
    UnlimitedQuantifierInLookaround,
    #[error("captures are not allowed inside lookahead or lookbehind")]
    CaptureInLookaround,
    #[error("lookbehind can match more than {0} characters")]
    LookbehindTooLong(u32),

    // Backreferences
    #[error("backreference to undefined capture `{0}`")]
    UndefinedBackref(String),
    #[error("backreference to capture `{0}` from inside that capture")]
    SelfReferencingBackref(String),
    #[error("backreference in lookbehind to capture `{0}` of unlimited length")]
    UnboundedBackrefInLookbehind(String),
    #[error("backreference to capture `{0}` which may be empty or not participate")]
    BlockedBackref(String),

    // Character classes
    #[error("character class is not closed")]
    UnterminatedClass,
    #[error("empty character class")]
    EmptyClass,
    #[error("character class range is reversed")]
    ReversedClassRange,
    #[error("character class shorthand cannot be a range endpoint")]
    BadClassRange,
    #[error("literal hyphen in character class must be escaped")]
    LiteralHyphenInClass,
    #[error("doubled punctuation in character class is reserved; escape one of them")]
    ReservedClassPunctuation,
    #[error("character `{0}` must be escaped inside a character class")]
    UnescapedCharInClass(char),
    #[error("negated shorthand is not allowed inside a negated character class")]
    NegatedClassRestriction,

    // Literals
    #[error("character `{0}` must be escaped")]
    UnescapedLiteral(char),

    // Suggestions
    #[error("capture names hide reserved fields: {}", .0.join(", "))]
    HiddenReservedNames(Vec<String>),
}

impl RegexErrorKind {
    /// The diagnostic code this problem is reported under.
    pub fn code(&self) -> ErrorCode {
        use RegexErrorKind as K;
        match self {
            K::BadEscape | K::ClassOnlyEscape | K::BadOctal | K::BadBackrefSyntax | K::BadHexEscape => {
                ErrorCode::E3101
            }
            K::BadUnicodeEscape | K::UnicodeOutOfRange | K::BadUnicodeCategory => ErrorCode::E3102,
            K::BadSingleQuotedName
            | K::BadBalancingGroup
            | K::BadConditional
            | K::BadAtomicGroup
            | K::BadRecursion
            | K::BadGroupSyntax
            | K::BadInlineModifiers
            | K::MisplacedInlineOptions
            | K::UnterminatedComment => ErrorCode::E3103,
            K::UnterminatedGroup | K::UnopenedGroup => ErrorCode::E3104,
            K::GroupDepthOverflow(_) => ErrorCode::E3105,
            K::BadCaptureName | K::DuplicateCaptureName(_) | K::MixedCaptures => ErrorCode::E3106,
            K::QuantifierOnNothing
            | K::ReversedQuantifier
            | K::PossessiveQuantifier
            | K::DoubleQuantifier
            | K::BadQuantifier
            | K::QuantifiedPossiblyEmptyCapture => ErrorCode::E3107,
            K::QuantifiedLookaround
            | K::UnlimitedQuantifierInLookaround
            | K::CaptureInLookaround
            | K::LookbehindTooLong(_) => ErrorCode::E3108,
            K::UndefinedBackref(_)
            | K::SelfReferencingBackref(_)
            | K::UnboundedBackrefInLookbehind(_)
            | K::BlockedBackref(_) => ErrorCode::E3109,
            K::UnterminatedClass
            | K::EmptyClass
            | K::ReversedClassRange
            | K::BadClassRange
            | K::LiteralHyphenInClass
            | K::ReservedClassPunctuation
            | K::UnescapedCharInClass(_)
            | K::NegatedClassRestriction => ErrorCode::E3110,
            K::UnescapedLiteral(_) => ErrorCode::E3111,
            K::HiddenReservedNames(_) => ErrorCode::W3001,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RegexErrorKind::HiddenReservedNames(_) => ErrorSeverity::Suggestion,
            _ => ErrorSeverity::Severe,
        }
    }
}

/// A problem found in a pattern, ready to surface in a diagnostic.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[error("{kind}{}", near(.context))]
pub struct ValidationError {
    pub kind: RegexErrorKind,
    pub severity: ErrorSeverity,
    /// Bounded, printable excerpt of the offending pattern region.
    pub context: String,
    /// Byte offset of the offending region in the pattern.
    pub offset: usize,
}

impl ValidationError {
    /// Error for the pattern region `offset..offset + len`.
    #[cold]
    pub fn at(kind: RegexErrorKind, pattern: &str, offset: usize, len: usize) -> Self {
        ValidationError {
            severity: kind.severity(),
            context: excerpt(pattern, offset, len),
            offset,
            kind,
        }
    }

    /// Error detected only once the whole pattern was read.
    #[cold]
    pub fn at_end(kind: RegexErrorKind, pattern: &str) -> Self {
        ValidationError {
            severity: kind.severity(),
            context: tail_excerpt(pattern),
            offset: pattern.len(),
            kind,
        }
    }

    /// Advisory that does not point at one place in the pattern.
    pub fn suggestion(kind: RegexErrorKind) -> Self {
        ValidationError {
            severity: ErrorSeverity::Suggestion,
            context: String::new(),
            offset: 0,
            kind,
        }
    }

    pub fn is_severe(&self) -> bool {
        self.severity == ErrorSeverity::Severe
    }
}

/// Message suffix quoting the excerpt, if there is one.
fn near(context: &str) -> String {
    if context.is_empty() {
        String::new()
    } else {
        format!(" near `{context}`")
    }
}

/// Control and invisible formatting characters would garble a diagnostic.
fn is_printable(c: char) -> bool {
    !c.is_control()
        && !matches!(
            c,
            '\u{00AD}'
                | '\u{061C}'
                | '\u{180E}'
                | '\u{200B}'..='\u{200F}'
                | '\u{202A}'..='\u{202E}'
                | '\u{2060}'..='\u{2064}'
                | '\u{2066}'..='\u{206F}'
                | '\u{FEFF}'
                | '\u{FFF9}'..='\u{FFFB}'
        )
}

/// Excerpt of `pattern[offset..offset + len]`, cut to
/// [`CONTEXT_EXCERPT_CHARS`] with a trailing marker when longer.
pub(crate) fn excerpt(pattern: &str, offset: usize, len: usize) -> String {
    let end = (offset + len).min(pattern.len());
    let region = pattern.get(offset..end).unwrap_or_default();
    let mut chars = region.chars().filter(|c| is_printable(*c));
    let mut out: String = chars.by_ref().take(CONTEXT_EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        out.push_str(ELLIPSIS);
    }
    out
}

/// The last [`CONTEXT_EXCERPT_CHARS`] characters of `pattern`, with a
/// leading marker when the pattern is longer.
pub(crate) fn tail_excerpt(pattern: &str) -> String {
    let printable: Vec<char> = pattern.chars().filter(|c| is_printable(*c)).collect();
    let skip = printable.len().saturating_sub(CONTEXT_EXCERPT_CHARS);
    let tail: String = printable[skip..].iter().collect();
    if skip > 0 {
        format!("{ELLIPSIS}{tail}")
    } else {
        tail
    }
}
