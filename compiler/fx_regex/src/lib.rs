//! Regular expression dialect validator for the pattern-matching functions.
//!
//! `IsMatch`, `Match` and `MatchAll` accept only patterns that behave the
//! same on every engine a formula may run on. This crate decides whether a
//! pattern belongs to that portable subset and, if it does, what type a
//! match produces.
//!
//! # Pipeline
//!
//! ```text
//! pattern + options
//!   -> classify  (ordered token categories)
//!   -> class     (inside each [...])
//!   -> tracker   (groups, quantifiers, backreferences)
//!   -> schema    (capture fields + reserved fields)
//! ```
//!
//! [`validate`] runs the pipeline behind a process-wide [`RegexCache`].
//! Validation never executes a match and stops at the first problem.
//! [`normalize`] rewrites an accepted pattern for the runtime engines.

mod cache;
mod class;
mod classify;
mod error;
mod normalize;
mod options;
mod schema;
mod token;
mod tracker;
mod validate;

pub use cache::{shared as shared_cache, CacheEntry, CacheKey, RegexCache};
pub use error::{ErrorSeverity, RegexErrorKind, ValidationError, CONTEXT_EXCERPT_CHARS};
pub use normalize::{normalize, Normalized};
pub use options::{PatternOptions, ResultShape};
pub use schema::{FULL_MATCH, START_MATCH, SUB_MATCHES, SUB_MATCH_VALUE};
pub use tracker::{MAX_GROUP_DEPTH, MAX_LOOKBEHIND_LENGTH};
pub use validate::{validate, validate_uncached, Validated};
