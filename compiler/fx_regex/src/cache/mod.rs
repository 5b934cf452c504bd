//! Validation cache.
//!
//! Pattern arguments are constants, so the same pattern tends to be
//! validated at many call sites and again on every re-check of a formula.
//! Results (failures included) are memoized per key for the life of the
//! process.
//!
//! Two threads may validate the same key at once; both compute the same
//! entry and the later insert wins.

use std::fmt;
use std::sync::OnceLock;

use dashmap::DashMap;
use fx_types::DType;
use rustc_hash::FxBuildHasher;

use crate::validate::{validate_uncached, Validated};
use crate::{PatternOptions, ResultShape, ValidationError};

/// Result shape, schema-affecting flags and pattern text.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(shape: ResultShape, options: PatternOptions, pattern: &str) -> Self {
        let mut key = String::with_capacity(pattern.len() + 3);
        key.push(shape.key_prefix());
        key.push(if options.numbered() { 'N' } else { '-' });
        key.push(if options.free_spacing() { 'x' } else { '-' });
        key.push_str(pattern);
        CacheKey(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CacheKey({:?})", self.0)
    }
}

/// A memoized validation result.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CacheEntry {
    /// `DType::Error` when validation failed.
    pub return_type: DType,
    /// The severe error, or the suggestion accompanying a valid schema.
    pub error: Option<ValidationError>,
}

impl CacheEntry {
    pub fn from_result(result: &Result<Validated, ValidationError>) -> Self {
        match result {
            Ok(validated) => CacheEntry {
                return_type: validated.ty.clone(),
                error: validated.suggestion.clone(),
            },
            Err(error) => CacheEntry {
                return_type: DType::Error,
                error: Some(error.clone()),
            },
        }
    }

    pub fn to_result(&self) -> Result<Validated, ValidationError> {
        match &self.error {
            Some(error) if error.is_severe() => Err(error.clone()),
            suggestion => Ok(Validated {
                ty: self.return_type.clone(),
                suggestion: suggestion.clone(),
            }),
        }
    }
}

/// Concurrent map from [`CacheKey`] to [`CacheEntry`].
pub struct RegexCache {
    entries: DashMap<CacheKey, CacheEntry, FxBuildHasher>,
}

impl RegexCache {
    pub fn new() -> Self {
        RegexCache {
            entries: DashMap::with_hasher(FxBuildHasher),
        }
    }

    pub fn lookup(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    pub fn insert(&self, key: CacheKey, entry: CacheEntry) {
        self.entries.insert(key, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate through this cache.
    pub fn validate(
        &self,
        pattern: &str,
        options: PatternOptions,
        shape: ResultShape,
    ) -> Result<Validated, ValidationError> {
        let key = CacheKey::new(shape, options, pattern);
        if let Some(entry) = self.lookup(&key) {
            tracing::trace!(key = key.as_str(), "regex cache hit");
            return entry.to_result();
        }
        tracing::debug!(key = key.as_str(), "regex cache miss");
        let result = validate_uncached(pattern, options, shape);
        self.insert(key, CacheEntry::from_result(&result));
        result
    }
}

impl Default for RegexCache {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide cache behind [`crate::validate`].
pub fn shared() -> &'static RegexCache {
    static CACHE: OnceLock<RegexCache> = OnceLock::new();
    CACHE.get_or_init(RegexCache::new)
}
