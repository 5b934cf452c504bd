//! Minimal rewriting of a valid pattern for the runtime engines.
//!
//! Only changes that preserve meaning exactly: free-spacing trivia and
//! comments are dropped (so the engines never see `x` mode), code points
//! above U+FFFF are spelled as `\u{...}`, and the anchor options are
//! applied as a wrapper around the pattern.

use std::fmt::Write as _;

use crate::classify::{leading_inline_options, Classifier};
use crate::error::ValidationError;
use crate::token::{Escape, Spanned, Token};
use crate::PatternOptions;

/// A pattern ready for the runtime engines.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Normalized {
    pub pattern: String,
    /// Options still to be passed to the engine. Free-spacing and the
    /// anchor wrappers have been applied to `pattern`.
    pub options: PatternOptions,
}

/// Normalize a pattern that has passed validation.
///
/// Only tokenization errors can surface here; structural problems are the
/// validator's to report.
#[tracing::instrument(level = "trace", skip_all, fields(pattern_len = pattern.len()))]
pub fn normalize(pattern: &str, options: PatternOptions) -> Result<Normalized, ValidationError> {
    let (folded, start) = leading_inline_options(pattern, options);
    let applied =
        PatternOptions::FREE_SPACING | PatternOptions::BEGINS_ANCHOR | PatternOptions::ENDS_ANCHOR;

    let mut out = String::with_capacity(pattern.len() + 8);
    let inline = folded.difference(options).difference(applied);
    if !inline.is_empty() {
        out.push_str("(?");
        for (letter, flag) in [
            ('i', PatternOptions::IGNORE_CASE),
            ('m', PatternOptions::MULTILINE),
            ('s', PatternOptions::DOT_ALL),
        ] {
            if inline.contains(flag) {
                out.push(letter);
            }
        }
        out.push(')');
    }

    let wrap = options.intersects(PatternOptions::BEGINS_ANCHOR | PatternOptions::ENDS_ANCHOR);
    if options.contains(PatternOptions::BEGINS_ANCHOR) {
        out.push('^');
    }
    if wrap {
        out.push_str("(?:");
    }

    // Set while the last emitted token is a numbered backreference, which
    // would absorb a digit that trivia used to keep apart.
    let mut after_numbered_backref = false;
    for spanned in Classifier::new(pattern, start, folded) {
        let Spanned { token, offset, len } = spanned?;
        let text = &pattern[offset..offset + len];
        match &token {
            Token::Trivia => continue,
            Token::Escape(Escape::Char(c @ (' ' | '#'))) => out.push(*c),
            Token::Literal(c) => {
                if after_numbered_backref && c.is_ascii_digit() {
                    out.push_str("(?:)");
                }
                push_char(&mut out, *c);
            }
            Token::Class { .. } => push_class(&mut out, text),
            _ => out.push_str(text),
        }
        // `\k<1>` is delimited; `\1` is not.
        after_numbered_backref =
            matches!(&token, Token::Backref(backref) if backref.numeric && !text.ends_with('>'));
    }

    if wrap {
        out.push(')');
    }
    if options.contains(PatternOptions::ENDS_ANCHOR) {
        out.push('$');
    }

    Ok(Normalized {
        pattern: out,
        options: options.difference(applied),
    })
}

fn push_char(out: &mut String, c: char) {
    if u32::from(c) > 0xFFFF {
        let _ = write!(out, "\\u{{{:X}}}", u32::from(c));
    } else {
        out.push(c);
    }
}

/// Copy a `[...]` span, rewriting escaped spaces and astral characters.
fn push_class(out: &mut String, class: &str) {
    let mut chars = class.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            push_char(out, c);
            continue;
        }
        match chars.next() {
            Some(' ') => out.push(' '),
            Some(escaped) => {
                out.push('\\');
                out.push(escaped);
            }
            None => out.push('\\'),
        }
    }
}
