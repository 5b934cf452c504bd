//! Pattern mode flags and result shapes.

use bitflags::bitflags;

bitflags! {
    /// Mode flags resolved before a pattern is scanned.
    ///
    /// Never mutated during a scan. Inline option groups at the very start
    /// of a pattern are folded in by the validator before scanning begins.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct PatternOptions: u8 {
        /// `i`: case-insensitive matching.
        const IGNORE_CASE = 1 << 0;
        /// `m`: `^`/`$` match at line boundaries.
        const MULTILINE = 1 << 1;
        /// `x`: whitespace and `#` comments are ignored.
        const FREE_SPACING = 1 << 2;
        /// `s`: `.` also matches newlines.
        const DOT_ALL = 1 << 3;
        /// `N`: plain groups capture positionally; named captures are
        /// not allowed.
        const NUMBERED_CAPTURES = 1 << 4;
        /// `^`: the whole pattern is anchored at the start.
        const BEGINS_ANCHOR = 1 << 5;
        /// `$`: the whole pattern is anchored at the end.
        const ENDS_ANCHOR = 1 << 6;
    }
}

impl PatternOptions {
    /// Flags that change what a pattern means to the validator.
    ///
    /// Everything else only changes runtime matching behavior, so it is
    /// left out of the cache key.
    pub const SCHEMA_AFFECTING: Self =
        Self::from_bits_truncate(Self::NUMBERED_CAPTURES.bits() | Self::FREE_SPACING.bits());

    #[inline]
    pub const fn free_spacing(self) -> bool {
        self.contains(Self::FREE_SPACING)
    }

    #[inline]
    pub const fn numbered(self) -> bool {
        self.contains(Self::NUMBERED_CAPTURES)
    }

    /// Map one inline option letter (`(?imsx)`) to its flag.
    pub fn from_inline_letter(letter: char) -> Option<Self> {
        match letter {
            'i' => Some(Self::IGNORE_CASE),
            'm' => Some(Self::MULTILINE),
            's' => Some(Self::DOT_ALL),
            'x' => Some(Self::FREE_SPACING),
            _ => None,
        }
    }
}

/// The structural shape a pattern-matching function returns.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ResultShape {
    /// `IsMatch`: a Boolean.
    Boolean,
    /// `Match`: one record of captures.
    Record,
    /// `MatchAll`: a table of capture records.
    Table,
}

impl ResultShape {
    /// Single-character prefix used in cache keys.
    pub const fn key_prefix(self) -> char {
        match self {
            ResultShape::Boolean => 'b',
            ResultShape::Record => 'r',
            ResultShape::Table => 't',
        }
    }
}
