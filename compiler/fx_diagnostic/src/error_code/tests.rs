use super::*;

#[test]
fn test_error_code_display() {
    assert_eq!(ErrorCode::E3107.to_string(), "E3107");
    assert_eq!(ErrorCode::E2001.as_str(), "E2001");
}

#[test]
fn test_parse_round_trips_every_code() {
    for code in ErrorCode::ALL {
        assert_eq!(ErrorCode::parse(code.as_str()), Some(*code));
    }
    assert_eq!(ErrorCode::parse("E9999"), None);
}

#[test]
fn test_all_variants_classified() {
    for code in ErrorCode::ALL {
        let classes = [
            code.is_signature_error(),
            code.is_regex_error(),
            code.is_warning(),
        ];
        assert_eq!(
            classes.iter().filter(|c| **c).count(),
            1,
            "{code} must belong to exactly one class"
        );
    }
}

#[test]
fn test_descriptions_are_nonempty() {
    for code in ErrorCode::ALL {
        assert!(!code.description().is_empty());
    }
}
