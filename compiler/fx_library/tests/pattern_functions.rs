//! End-to-end checks of calls to the pattern-matching functions, going
//! through the registry the way a formula checker does.

#![allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]

use fx_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode, Severity, Span};
use fx_library::options::parse_options;
use fx_library::{Arg, CheckedCall, FunctionRegistry};
use fx_regex::{FULL_MATCH, START_MATCH, SUB_MATCHES, SUB_MATCH_VALUE};
use fx_types::{DType, Field};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// Check `name(Text, "pattern", "options")`.
fn call(name: &str, pattern: &str, options: Option<&str>) -> (CheckedCall, Vec<Diagnostic>) {
    let mut args = vec![
        Arg::expr(DType::Text, Span::new(0, 4)),
        Arg::text(pattern, Span::new(6, 8)),
    ];
    if let Some(options) = options {
        args.push(Arg::text(options, Span::new(10, 12)));
    }
    let mut queue = DiagnosticQueue::new();
    let checked = FunctionRegistry::new().check_call(name, &args, Span::new(0, 13), &mut queue);
    (checked, queue.flush())
}

fn codes(diagnostics: &[Diagnostic]) -> Vec<ErrorCode> {
    diagnostics.iter().map(|d| d.code).collect()
}

fn text(name: &str) -> Field {
    Field::new(name, DType::Text)
}

#[test]
fn match_all_with_numbered_captures() {
    let (checked, diagnostics) = call("MatchAll", "(\\w+)@(\\w+)", Some("N"));
    assert!(diagnostics.is_empty());
    assert_eq!(
        checked.return_type,
        DType::Table(vec![
            text(FULL_MATCH),
            Field::new(SUB_MATCHES, DType::Table(vec![text(SUB_MATCH_VALUE)])),
            Field::new(START_MATCH, DType::Number),
        ])
    );
}

#[test]
fn named_captures_in_source_order() {
    let (ab, _) = call("Match", "(?<b>x)(?<a>y)", None);
    let names: Vec<_> = ab.return_type.fields().iter().map(|f| f.name.clone()).collect();
    assert_eq!(names, vec!["b", "a", FULL_MATCH, START_MATCH]);
}

#[test]
fn plain_groups_do_not_capture_by_default() {
    let (checked, diagnostics) = call("Match", "(a)(b)", None);
    assert!(diagnostics.is_empty());
    assert_eq!(
        checked.return_type,
        DType::Record(vec![text(FULL_MATCH), Field::new(START_MATCH, DType::Number)])
    );
}

#[test]
fn mixing_capture_modes_is_an_error() {
    let (checked, diagnostics) = call("Match", "(?<name>a)(b)", Some("N"));
    assert!(checked.is_error());
    assert_eq!(codes(&diagnostics), vec![ErrorCode::E3106]);
}

#[test]
fn explicit_contains_option_matches_default() {
    let (implicit, _) = call("Match", "(?<a>x)", None);
    let (explicit, _) = call("Match", "(?<a>x)", Some("c"));
    assert_eq!(implicit.return_type, explicit.return_type);
    assert_eq!(implicit.normalized, explicit.normalized);
}

#[test]
fn anchors_change_only_the_normalized_pattern() {
    let (contains, _) = call("Match", "(?<a>x)", Some("c"));
    let (complete, _) = call("Match", "(?<a>x)", Some("^c$"));
    assert_eq!(contains.return_type, complete.return_type);
    assert_eq!(complete.normalized.unwrap().pattern, "^(?:(?<a>x))$");
}

#[test]
fn inline_options_fold_only_at_the_start() {
    let (checked, diagnostics) = call("IsMatch", "(?i)abc", None);
    assert!(diagnostics.is_empty());
    assert_eq!(checked.return_type, DType::Boolean);

    let (checked, diagnostics) = call("IsMatch", "a(?i)b", None);
    assert!(checked.is_error());
    assert_eq!(codes(&diagnostics), vec![ErrorCode::E3103]);
}

#[test]
fn lookbehind_limits() {
    let (_, diagnostics) = call("IsMatch", "(?<=a{300})b", None);
    assert_eq!(codes(&diagnostics), vec![ErrorCode::E3108]);
    let (_, diagnostics) = call("IsMatch", "(?<=a{2,250})b", None);
    assert!(diagnostics.is_empty());
    let (_, diagnostics) = call("IsMatch", "(?<=a+)b", None);
    assert_eq!(codes(&diagnostics), vec![ErrorCode::E3108]);
}

#[test]
fn backreference_through_alternation() {
    let (_, diagnostics) = call("IsMatch", "(?:(?<a>x)|y)\\k<a>", None);
    assert_eq!(codes(&diagnostics), vec![ErrorCode::E3109]);
    let (_, diagnostics) = call("IsMatch", "(?:(?<a>x)\\k<a>|y)", None);
    assert!(diagnostics.is_empty());
}

#[test]
fn hidden_reserved_name_warns_but_checks() {
    let (checked, diagnostics) = call("Match", "(?<StartMatch>\\d+)", None);
    assert!(!checked.is_error());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert_eq!(
        checked.return_type.field(START_MATCH),
        Some(&DType::Text)
    );
}

#[test]
fn repeated_checks_agree() {
    let first = call("MatchAll", "(?<d>\\d)+x", Some("ix"));
    let second = call("MatchAll", "(?<d>\\d)+x", Some("ix"));
    assert_eq!(first, second);
}

proptest! {
    #[test]
    fn prop_checking_never_panics(pattern in "\\PC{0,24}", options in "[imsxNc^$]{0,4}") {
        let (checked, diagnostics) = call("MatchAll", &pattern, Some(&options));
        prop_assert_eq!(checked.is_error(), diagnostics.iter().any(Diagnostic::is_error));
    }

    #[test]
    fn prop_option_letters_commute(letters in "[imsxNc^$]{0,6}") {
        let reversed: String = letters.chars().rev().collect();
        prop_assert_eq!(parse_options(&letters), parse_options(&reversed));
    }
}
