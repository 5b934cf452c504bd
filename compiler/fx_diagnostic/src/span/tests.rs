use super::*;

#[test]
fn test_span_from_range() {
    let span = Span::try_from_range(3..9);
    assert_eq!(span, Ok(Span::new(3, 9)));
    assert_eq!(Span::new(3, 9).len(), 6);
}

#[test]
fn test_span_too_large() {
    let big = usize::try_from(u64::from(u32::MAX) + 1).unwrap_or(usize::MAX);
    assert_eq!(
        Span::try_from_range(big..big),
        Err(SpanError::StartTooLarge(big))
    );
}

#[test]
fn test_span_merge() {
    let merged = Span::new(4, 6).merge(Span::new(1, 5));
    assert_eq!(merged, Span::new(1, 6));
    assert_eq!(merged.to_range(), 1..6);
    assert!(Span::DUMMY.is_empty());
}
