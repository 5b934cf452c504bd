#![allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]

use fx_diagnostic::{ErrorCode, Severity};
use fx_regex::{FULL_MATCH, START_MATCH};
use fx_types::Field;
use pretty_assertions::assert_eq;

use super::*;

const MATCH: MatchFunction = MatchFunction::new("Match", ResultShape::Record);
const IS_MATCH: MatchFunction = MatchFunction::new("IsMatch", ResultShape::Boolean);

fn text_arg() -> Arg {
    Arg::expr(DType::Text, Span::new(6, 10))
}

fn pattern_arg(pattern: &str) -> Arg {
    Arg::text(pattern, Span::new(12, 14 + u32::try_from(pattern.len()).unwrap()))
}

fn check(function: &MatchFunction, args: &[Arg]) -> (CheckedCall, Vec<fx_diagnostic::Diagnostic>) {
    let mut queue = DiagnosticQueue::new();
    let call = function.check(args, &mut queue);
    (call, queue.flush())
}

#[test]
fn test_signature() {
    assert_eq!(MATCH.name(), "Match");
    assert_eq!(MATCH.params(), &["text", "pattern", "options"]);
    assert_eq!(MATCH.required_params(), 2);
}

#[test]
fn test_boolean_result() {
    let (call, diagnostics) = check(&IS_MATCH, &[text_arg(), pattern_arg("a+b")]);
    assert_eq!(call.return_type, DType::Boolean);
    assert!(diagnostics.is_empty());
}

#[test]
fn test_record_result() {
    let (call, diagnostics) = check(&MATCH, &[text_arg(), pattern_arg("(?<year>\\d{4})")]);
    assert!(diagnostics.is_empty());
    assert_eq!(
        call.return_type,
        DType::Record(vec![
            Field::new("year", DType::Text),
            Field::new(FULL_MATCH, DType::Text),
            Field::new(START_MATCH, DType::Number),
        ])
    );
}

#[test]
fn test_normalized_pattern_is_returned() {
    let args = [text_arg(), pattern_arg("a b # note"), Arg::text("x^", Span::new(20, 24))];
    let (call, diagnostics) = check(&IS_MATCH, &args);
    assert!(diagnostics.is_empty());
    let normalized = call.normalized.unwrap();
    assert_eq!(normalized.pattern, "^(?:ab)");
    assert_eq!(normalized.options, PatternOptions::empty());
}

#[test]
fn test_number_text_coerces() {
    let args = [Arg::expr(DType::Number, Span::new(6, 8)), pattern_arg("\\d")];
    let (call, diagnostics) = check(&IS_MATCH, &args);
    assert_eq!(call.return_type, DType::Boolean);
    assert!(diagnostics.is_empty());
}

#[test]
fn test_text_type_mismatch() {
    let args = [Arg::expr(DType::empty_table(), Span::new(6, 8)), pattern_arg("a")];
    let (call, diagnostics) = check(&MATCH, &args);
    assert!(call.is_error());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E2001);
    assert_eq!(diagnostics[0].primary_span(), Some(Span::new(6, 8)));
}

#[test]
fn test_non_constant_pattern() {
    let args = [text_arg(), Arg::expr(DType::Text, Span::new(12, 20))];
    let (call, diagnostics) = check(&MATCH, &args);
    assert!(call.is_error());
    assert_eq!(diagnostics[0].code, ErrorCode::E2004);
    assert_eq!(diagnostics[0].primary_span(), Some(Span::new(12, 20)));
}

#[test]
fn test_non_constant_options() {
    let args = [text_arg(), pattern_arg("a"), Arg::expr(DType::Text, Span::new(20, 25))];
    let (call, diagnostics) = check(&MATCH, &args);
    assert!(call.is_error());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E2004);
}

#[test]
fn test_unknown_option_letter() {
    let args = [text_arg(), pattern_arg("a"), Arg::text("iq", Span::new(20, 24))];
    let (call, diagnostics) = check(&MATCH, &args);
    assert!(call.is_error());
    assert_eq!(diagnostics[0].code, ErrorCode::E2005);
    assert_eq!(diagnostics[0].primary_span(), Some(Span::new(20, 24)));
}

#[test]
fn test_pattern_error_is_reported_at_pattern() {
    let pattern = pattern_arg("(a");
    let span = pattern.span;
    let (call, diagnostics) = check(&MATCH, &[text_arg(), pattern]);
    assert!(call.is_error());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert_eq!(diagnostics[0].code, ErrorCode::E3104);
    assert_eq!(diagnostics[0].primary_span(), Some(span));
    assert_eq!(diagnostics[0].labels[0].message, "near `(a`");
}

#[test]
fn test_hidden_name_is_a_warning() {
    let (call, diagnostics) = check(&MATCH, &[text_arg(), pattern_arg("(?<FullMatch>a)")]);
    assert!(!call.is_error());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert_eq!(diagnostics[0].code, ErrorCode::W3001);
    assert_eq!(
        call.return_type.fields().iter().filter(|f| f.name == FULL_MATCH).count(),
        1
    );
}

#[test]
fn test_arity() {
    let (call, diagnostics) = check(&MATCH, &[text_arg()]);
    assert!(call.is_error());
    assert_eq!(diagnostics[0].code, ErrorCode::E2002);
    assert_eq!(diagnostics[0].primary_span(), Some(Span::new(6, 10)));

    let args = [text_arg(), pattern_arg("a"), Arg::text("c", Span::DUMMY), text_arg()];
    let (call, diagnostics) = check(&MATCH, &args);
    assert!(call.is_error());
    assert_eq!(diagnostics[0].code, ErrorCode::E2002);
}

#[test]
fn test_type_mismatch_still_reports_pattern_errors() {
    let args = [Arg::expr(DType::empty_record(), Span::new(6, 8)), pattern_arg("a{2,1}")];
    let (call, diagnostics) = check(&MATCH, &args);
    assert!(call.is_error());
    let codes: Vec<_> = diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E2001, ErrorCode::E3107]);
}
