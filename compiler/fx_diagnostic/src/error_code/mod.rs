//! Error codes for all type-checking diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E3107`) with the first digit
//! indicating the area. Used for `fxc explain` lookups.

use std::fmt;

/// Error codes for all type-checking diagnostics.
///
/// Format: E#### / W#### where the first digit indicates the area:
/// - E2xxx: Function signature and argument errors
/// - E3xxx: Regular expression errors
/// - W3xxx: Regular expression warnings
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Signature Errors (E2xxx)
    /// Argument type mismatch
    E2001,
    /// Argument count mismatch
    E2002,
    /// Unknown function
    E2003,
    /// Argument must be a constant
    E2004,
    /// Unrecognized match option
    E2005,

    // Regular Expression Errors (E3xxx)
    /// Unsupported or malformed escape
    E3101,
    /// Malformed Unicode escape or category
    E3102,
    /// Unsupported group syntax
    E3103,
    /// Unbalanced parentheses
    E3104,
    /// Groups nested too deeply
    E3105,
    /// Invalid or conflicting capture name
    E3106,
    /// Invalid quantifier
    E3107,
    /// Invalid lookahead or lookbehind
    E3108,
    /// Invalid backreference
    E3109,
    /// Invalid character class
    E3110,
    /// Character must be escaped
    E3111,

    // Regular Expression Warnings (W3xxx)
    /// Capture name hides a reserved result field
    W3001,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    ///
    /// Kept in sync with `as_str()` which is exhaustive.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E3101,
        ErrorCode::E3102,
        ErrorCode::E3103,
        ErrorCode::E3104,
        ErrorCode::E3105,
        ErrorCode::E3106,
        ErrorCode::E3107,
        ErrorCode::E3108,
        ErrorCode::E3109,
        ErrorCode::E3110,
        ErrorCode::E3111,
        ErrorCode::W3001,
    ];

    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E3101 => "E3101",
            ErrorCode::E3102 => "E3102",
            ErrorCode::E3103 => "E3103",
            ErrorCode::E3104 => "E3104",
            ErrorCode::E3105 => "E3105",
            ErrorCode::E3106 => "E3106",
            ErrorCode::E3107 => "E3107",
            ErrorCode::E3108 => "E3108",
            ErrorCode::E3109 => "E3109",
            ErrorCode::E3110 => "E3110",
            ErrorCode::E3111 => "E3111",
            ErrorCode::W3001 => "W3001",
        }
    }

    /// One-line description, used by `fxc explain`.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "argument type mismatch",
            ErrorCode::E2002 => "wrong number of arguments",
            ErrorCode::E2003 => "unknown function",
            ErrorCode::E2004 => "argument must be a constant text value",
            ErrorCode::E2005 => "unrecognized match option",
            ErrorCode::E3101 => "unsupported or malformed escape in regular expression",
            ErrorCode::E3102 => "malformed Unicode escape or category in regular expression",
            ErrorCode::E3103 => "unsupported group syntax in regular expression",
            ErrorCode::E3104 => "unbalanced parentheses in regular expression",
            ErrorCode::E3105 => "groups nested too deeply in regular expression",
            ErrorCode::E3106 => "invalid or conflicting capture name in regular expression",
            ErrorCode::E3107 => "invalid quantifier in regular expression",
            ErrorCode::E3108 => "invalid lookahead or lookbehind in regular expression",
            ErrorCode::E3109 => "invalid backreference in regular expression",
            ErrorCode::E3110 => "invalid character class in regular expression",
            ErrorCode::E3111 => "character must be escaped in regular expression",
            ErrorCode::W3001 => "capture name hides a reserved result field",
        }
    }

    /// Look up a code by its string form (`"E3107"`).
    pub fn parse(code: &str) -> Option<ErrorCode> {
        Self::ALL.iter().copied().find(|c| c.as_str() == code)
    }

    /// Check if this is a signature error (E2xxx range).
    pub fn is_signature_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E2001
                | ErrorCode::E2002
                | ErrorCode::E2003
                | ErrorCode::E2004
                | ErrorCode::E2005
        )
    }

    /// Check if this is a regular expression error (E3xxx range).
    pub fn is_regex_error(&self) -> bool {
        self.as_str().starts_with("E3")
    }

    /// Check if this is a warning code (Wxxxx range).
    pub fn is_warning(&self) -> bool {
        matches!(self, ErrorCode::W3001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests;
