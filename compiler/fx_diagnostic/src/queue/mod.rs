//! Diagnostic queue for collecting and ordering diagnostics.
//!
//! Type-checking a formula visits call sites in tree order, not source
//! order, so diagnostics are sorted by their primary span on flush.
//! Exact duplicates (same code, message, and span) are reported once.

use crate::{Diagnostic, Severity};

/// Queue for collecting, deduplicating, and sorting diagnostics.
///
/// # Example
///
/// ```text
/// let mut queue = DiagnosticQueue::new();
/// queue.push(diagnostic);
/// if queue.has_errors() { ... }
/// let sorted = queue.flush();
/// ```
#[derive(Clone, Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic. Exact duplicates are dropped.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        if self.diagnostics.contains(&diagnostic) {
            return;
        }
        if diagnostic.severity == Severity::Error {
            self.error_count += 1;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Number of error-severity diagnostics collected so far.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Iterate diagnostics in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Drain the queue, returning diagnostics sorted by source position.
    ///
    /// Diagnostics without a primary span sort last. The sort is stable, so
    /// diagnostics at the same position keep insertion order.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        let mut out = std::mem::take(&mut self.diagnostics);
        self.error_count = 0;
        out.sort_by_key(|d| d.primary_span().map_or(u32::MAX, |s| s.start));
        out
    }
}
