#![allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]

use pretty_assertions::assert_eq;

use super::*;

fn tokens(pattern: &str, options: PatternOptions) -> Result<Vec<Token>, K> {
    Classifier::new(pattern, 0, options)
        .map(|r| r.map(|s| s.token).map_err(|e| e.kind))
        .collect()
}

fn tokens_default(pattern: &str) -> Result<Vec<Token>, K> {
    tokens(pattern, PatternOptions::empty())
}

fn rejected(pattern: &str) -> K {
    tokens_default(pattern).unwrap_err()
}

#[test]
fn test_simple_sequence() {
    assert_eq!(
        tokens_default("a.b*").unwrap(),
        vec![
            Token::Literal('a'),
            Token::Dot,
            Token::Literal('b'),
            Token::Quantifier(Quantifier { min: 0, max: None }),
        ]
    );
}

#[test]
fn test_spans_are_contiguous() {
    let spans: Vec<Spanned> = Classifier::new(r"(?<x>\d{2,3})|é", 0, PatternOptions::empty())
        .collect::<Result<_, _>>()
        .unwrap();
    let mut pos = 0;
    for s in &spans {
        assert_eq!(s.offset, pos);
        pos += s.len;
    }
    assert_eq!(pos, r"(?<x>\d{2,3})|é".len());
}

#[test]
fn test_group_kinds() {
    let opens: Vec<Token> = tokens_default("(?<=a)(?<!a)(?=a)(?!a)(?:a)(?<Name1>a)(a)")
        .unwrap()
        .into_iter()
        .filter(|t| matches!(t, Token::Open(_)))
        .collect();
    assert_eq!(
        opens,
        vec![
            Token::Open(GroupKind::Lookbehind),
            Token::Open(GroupKind::Lookbehind),
            Token::Open(GroupKind::Lookahead),
            Token::Open(GroupKind::Lookahead),
            Token::Open(GroupKind::NonCapture),
            Token::Open(GroupKind::Named("Name1".to_string())),
            Token::Open(GroupKind::Plain),
        ]
    );
}

#[test]
fn test_rejected_group_syntax() {
    assert_eq!(rejected("(?'a'x)"), K::BadSingleQuotedName);
    assert_eq!(rejected("(?<a-b>x)"), K::BadBalancingGroup);
    assert_eq!(rejected("(?(a)x)"), K::BadConditional);
    assert_eq!(rejected("(?>x)"), K::BadAtomicGroup);
    assert_eq!(rejected("(?R)"), K::BadRecursion);
    assert_eq!(rejected("(?1)"), K::BadRecursion);
    assert_eq!(rejected("(?-1)"), K::BadRecursion);
    assert_eq!(rejected("(?&a)"), K::BadRecursion);
    assert_eq!(rejected("(?P<a>x)"), K::BadGroupSyntax);
    assert_eq!(rejected("(?|a)"), K::BadGroupSyntax);
    assert_eq!(rejected("(?i:a)"), K::BadInlineModifiers);
    assert_eq!(rejected("(?-i)"), K::BadInlineModifiers);
    assert_eq!(rejected("(?n)"), K::BadInlineModifiers);
    assert_eq!(rejected("(?<1a>x)"), K::BadCaptureName);
    assert_eq!(rejected("(?<a_b>x)"), K::BadCaptureName);
    assert_eq!(rejected("(?~)"), K::BadGroupSyntax);
}

#[test]
fn test_inline_options_token() {
    assert_eq!(
        tokens_default("(?ix)").unwrap(),
        vec![Token::InlineOptions(
            PatternOptions::IGNORE_CASE | PatternOptions::FREE_SPACING
        )]
    );
}

#[test]
fn test_leading_inline_options_fold() {
    let (opts, start) = leading_inline_options("(?i)(?x)a b", PatternOptions::NUMBERED_CAPTURES);
    assert_eq!(start, 8);
    assert_eq!(
        opts,
        PatternOptions::NUMBERED_CAPTURES | PatternOptions::IGNORE_CASE | PatternOptions::FREE_SPACING
    );
    assert_eq!(leading_inline_options("a(?i)", PatternOptions::empty()), (PatternOptions::empty(), 0));
    assert_eq!(
        leading_inline_options("(?#c)(?i)a", PatternOptions::empty()),
        (PatternOptions::IGNORE_CASE, 9)
    );
}

#[test]
fn test_leading_fold_skips_free_spacing() {
    let spaced = PatternOptions::FREE_SPACING;
    assert_eq!(
        leading_inline_options(" (?i)a", spaced),
        (spaced | PatternOptions::IGNORE_CASE, 5)
    );
    assert_eq!(
        leading_inline_options("# note\n(?m) (?s)a", spaced),
        (spaced | PatternOptions::MULTILINE | PatternOptions::DOT_ALL, 16)
    );
    // Without free-spacing, a space is content.
    assert_eq!(leading_inline_options(" (?i)a", PatternOptions::empty()), (PatternOptions::empty(), 0));
    assert_eq!(leading_inline_options("(?x) (?i)a", PatternOptions::empty()).1, 9);
}

#[test]
fn test_escapes() {
    assert_eq!(
        tokens_default(r"\d\W\p{Lu}\P{Nd}\x41B\u{1F600}\n\.").unwrap(),
        vec![
            Token::Escape(Escape::Shorthand { negated: false }),
            Token::Escape(Escape::Shorthand { negated: true }),
            Token::Escape(Escape::Category { negated: false }),
            Token::Escape(Escape::Category { negated: true }),
            Token::Escape(Escape::Char('A')),
            Token::Literal('B'),
            Token::Escape(Escape::Char('\u{1F600}')),
            Token::Escape(Escape::Char('\n')),
            Token::Escape(Escape::Char('.')),
        ]
    );
    assert_eq!(tokens_default(r"\b\B").unwrap(), vec![Token::Anchor, Token::Anchor]);
}

#[test]
fn test_rejected_escapes() {
    assert_eq!(rejected(r"\0"), K::BadOctal);
    assert_eq!(rejected(r"\012"), K::BadOctal);
    assert_eq!(rejected(r"\q"), K::BadEscape);
    assert_eq!(rejected(r"\a"), K::BadEscape);
    assert_eq!(rejected(r"\-"), K::ClassOnlyEscape);
    assert_eq!(rejected(r"\#"), K::ClassOnlyEscape);
    assert_eq!(rejected(r"\ "), K::BadEscape);
    assert_eq!(rejected(r"\x4"), K::BadHexEscape);
    assert_eq!(rejected(r"\u12"), K::BadUnicodeEscape);
    assert_eq!(rejected(r"\u{}"), K::BadUnicodeEscape);
    assert_eq!(rejected(r"\u{1234567}"), K::BadUnicodeEscape);
    assert_eq!(rejected(r"\u{110000}"), K::UnicodeOutOfRange);
    assert_eq!(rejected(r"\uD800"), K::UnicodeOutOfRange);
    assert_eq!(rejected(r"\p{Greek}"), K::BadUnicodeCategory);
    assert_eq!(rejected(r"\pL"), K::BadUnicodeCategory);
    assert_eq!(rejected(r"\k"), K::BadBackrefSyntax);
    assert_eq!(rejected(r"\k<a b>"), K::BadBackrefSyntax);
    assert_eq!(rejected("\\"), K::BadEscape);
}

#[test]
fn test_backrefs() {
    assert_eq!(
        tokens_default(r"\12\k<name>\k<3>").unwrap(),
        vec![
            Token::Backref(Backref { name: "12".to_string(), numeric: true }),
            Token::Backref(Backref { name: "name".to_string(), numeric: false }),
            Token::Backref(Backref { name: "3".to_string(), numeric: true }),
        ]
    );
}

#[test]
fn test_quantifiers() {
    assert_eq!(
        tokens_default("a{2}a{2,}a{2,5}a+?").unwrap(),
        vec![
            Token::Literal('a'),
            Token::Quantifier(Quantifier { min: 2, max: Some(2) }),
            Token::Literal('a'),
            Token::Quantifier(Quantifier { min: 2, max: None }),
            Token::Literal('a'),
            Token::Quantifier(Quantifier { min: 2, max: Some(5) }),
            Token::Literal('a'),
            Token::Quantifier(Quantifier { min: 1, max: None }),
        ]
    );
    assert_eq!(
        tokens_default("a{99999999999}").unwrap()[1],
        Token::Quantifier(Quantifier { min: u32::MAX, max: Some(u32::MAX) })
    );
}

#[test]
fn test_rejected_quantifiers() {
    assert_eq!(rejected("a{,3}"), K::BadQuantifier);
    assert_eq!(rejected("a{2,3"), K::BadQuantifier);
    assert_eq!(rejected("a{2x}"), K::BadQuantifier);
    assert_eq!(rejected("a*+"), K::PossessiveQuantifier);
    assert_eq!(rejected("a{2}+"), K::PossessiveQuantifier);
    assert_eq!(rejected("a**"), K::DoubleQuantifier);
    assert_eq!(rejected("a+?+"), K::DoubleQuantifier);
    assert_eq!(rejected("a{2}{3}"), K::DoubleQuantifier);
}

#[test]
fn test_unescaped_literals() {
    assert_eq!(rejected("a{b"), K::UnescapedLiteral('{'));
    assert_eq!(rejected("a}"), K::UnescapedLiteral('}'));
    assert_eq!(rejected("a]"), K::UnescapedLiteral(']'));
}

#[test]
fn test_class_span() {
    assert_eq!(
        tokens_default(r"x[^a\]b]y").unwrap(),
        vec![
            Token::Literal('x'),
            Token::Class { negated: true, body: 3..7 },
            Token::Literal('y'),
        ]
    );
    assert_eq!(rejected("[abc"), K::UnterminatedClass);
    assert_eq!(rejected(r"[abc\]"), K::UnterminatedClass);
}

#[test]
fn test_comments_and_free_spacing() {
    assert_eq!(
        tokens_default("a(?#note)b").unwrap(),
        vec![Token::Literal('a'), Token::Trivia, Token::Literal('b')]
    );
    assert_eq!(rejected("a(?#note"), K::UnterminatedComment);

    assert_eq!(
        tokens(" a # c\nb", PatternOptions::FREE_SPACING).unwrap(),
        vec![
            Token::Trivia,
            Token::Literal('a'),
            Token::Trivia,
            Token::Trivia,
            Token::Literal('b'),
        ]
    );
    assert_eq!(
        tokens(r"\ \#", PatternOptions::FREE_SPACING).unwrap(),
        vec![Token::Escape(Escape::Char(' ')), Token::Escape(Escape::Char('#'))]
    );
    assert_eq!(
        tokens_default(" #").unwrap(),
        vec![Token::Literal(' '), Token::Literal('#')]
    );
}

#[test]
fn test_stops_after_first_error() {
    let results: Vec<_> = Classifier::new("a\\qb\\qc", 0, PatternOptions::empty()).collect();
    assert_eq!(results.len(), 2);
    let err = results[1].as_ref().unwrap_err();
    assert_eq!(err.kind, K::BadEscape);
    assert_eq!(err.offset, 1);
    assert_eq!(err.context, r"\q");
}

#[test]
fn test_starts_at_offset() {
    assert_eq!(
        Classifier::new("(?i)ab", 4, PatternOptions::empty())
            .map(|r| r.unwrap().offset)
            .collect::<Vec<_>>(),
        vec![4, 5]
    );
}

#[test]
fn test_escape_sites() {
    let opts = PatternOptions::empty();
    assert_eq!(
        parse_escape(r"\-", EscapeSite::Class, opts),
        Ok((Escaped::Escape(Escape::Char('-')), 2))
    );
    assert_eq!(
        parse_escape(r"\b", EscapeSite::Class, opts),
        Err(Reject::new(K::BadEscape, 2))
    );
    assert_eq!(
        parse_escape(r"\1", EscapeSite::Class, opts),
        Err(Reject::new(K::BadEscape, 2))
    );
    assert_eq!(
        parse_escape(r"\k<a>", EscapeSite::Class, opts),
        Err(Reject::new(K::BadEscape, 2))
    );
}

#[test]
fn test_capture_name_shape() {
    assert!(is_capture_name("a"));
    assert!(is_capture_name("Abc123"));
    assert!(!is_capture_name(""));
    assert!(!is_capture_name("1a"));
    assert!(!is_capture_name("a_b"));
    assert!(!is_capture_name("é"));
}
