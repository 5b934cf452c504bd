use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_diagnostic_builder() {
    let diag = Diagnostic::error(ErrorCode::E3107)
        .with_message("quantifier has nothing to repeat")
        .with_label(Span::new(5, 6), "this quantifier")
        .with_note("near `*`");

    assert_eq!(diag.code, ErrorCode::E3107);
    assert!(diag.is_error());
    assert_eq!(diag.primary_span(), Some(Span::new(5, 6)));
    assert_eq!(diag.notes, vec!["near `*`".to_string()]);
}

#[test]
fn test_warning_is_not_error() {
    let diag = Diagnostic::warning(ErrorCode::W3001).with_message("hidden");
    assert!(!diag.is_error());
    assert_eq!(diag.primary_span(), None);
}

#[test]
fn test_secondary_label_is_not_primary() {
    let diag = Diagnostic::error(ErrorCode::E2001)
        .with_secondary_label(Span::new(0, 3), "declared here")
        .with_label(Span::new(7, 9), "used here");
    assert_eq!(diag.primary_span(), Some(Span::new(7, 9)));
    assert_eq!(diag.labels.len(), 2);
}

#[test]
fn test_display_format() {
    let diag = Diagnostic::error(ErrorCode::E3104)
        .with_message("unclosed group")
        .with_label(Span::new(1, 4), "pattern")
        .with_note("near `(ab`");
    assert_eq!(
        diag.to_string(),
        "error[E3104]: unclosed group\n  --> 1..4: pattern\n   = note: near `(ab`"
    );
}
