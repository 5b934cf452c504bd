//! The match option string.
//!
//! The optional third argument of the pattern functions is a string of
//! single-character options, case-sensitive:
//!
//! | Letter | Meaning |
//! |--------|---------|
//! | `i` | ignore case |
//! | `m` | `^` and `$` match at line boundaries |
//! | `s` | `.` matches newlines |
//! | `x` | free-spacing: whitespace and `#` comments are ignored |
//! | `N` | plain groups capture positionally |
//! | `^` | match only at the start of the text |
//! | `$` | match only at the end of the text |
//! | `c` | match anywhere (the default) |

use fx_regex::PatternOptions;

use crate::LibraryError;

/// Options used when the argument is omitted.
pub const DEFAULT_OPTIONS: &str = "c";

pub fn parse_options(letters: &str) -> Result<PatternOptions, LibraryError> {
    letters.chars().try_fold(PatternOptions::empty(), |options, letter| {
        let flag = match letter {
            'i' => PatternOptions::IGNORE_CASE,
            'm' => PatternOptions::MULTILINE,
            's' => PatternOptions::DOT_ALL,
            'x' => PatternOptions::FREE_SPACING,
            'N' => PatternOptions::NUMBERED_CAPTURES,
            '^' => PatternOptions::BEGINS_ANCHOR,
            '$' => PatternOptions::ENDS_ANCHOR,
            'c' => PatternOptions::empty(),
            other => return Err(LibraryError::UnknownOption(other)),
        };
        Ok(options | flag)
    })
}
