//! Snapshot Diff
//!
//! Turns two ordered snapshots into positioned deletions and insertions.
//! This is a **pure algorithm module**: no I/O and no state kept between calls.
//!
//! # Algorithm
//!
//! 1. Compute an LCS of `old` and `new`
//! 2. Walk `old`, consuming LCS heads; everything else is deleted
//! 3. Walk `new` the same way; everything else is inserted
//!
//! Deletions index into `old`, insertions index into `new`. Apply all
//! deletions before any insertion.
//!
//! # Duplicates
//!
//! Matching is by value: an element is consumed when it equals the current
//! LCS head. With repeated values this may attribute a change to a different
//! occurrence than an identity-aware diff would. Give elements a stable
//! identity in their `PartialEq` if that matters.

use tracing::{debug, trace};

use crate::error::SnapError;

use super::lcs::Lcs;
use super::table::table_lcs_refs;

/// Default maximum combined length of `old` and `new`.
const DEFAULT_MAX_LEN: usize = 2000;

/// Default maximum number of memo entries.
const DEFAULT_MAX_MEMO: usize = 250_000;

// =============================================================================
// Configuration
// =============================================================================

/// LCS algorithm used by [`diff_with_config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Memoized prefix-first solver. Fast for lightly edited snapshots.
    #[default]
    Memoized,
    /// Classic O(n * m) DP table. Predictable on heavily reordered input.
    Table,
}

/// Configuration for diff limits.
///
/// When a limit is exceeded the diff falls back to replacing everything:
/// all of `old` is deleted and all of `new` is inserted.
#[derive(Debug, Clone, Copy)]
pub struct DiffConfig {
    /// Maximum `old.len() + new.len()` before fallback.
    /// Default: 2000
    pub max_len: usize,
    /// Maximum memo entries for [`Strategy::Memoized`] before fallback.
    /// Default: 250_000
    pub max_memo: usize,
    /// LCS algorithm.
    pub strategy: Strategy,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            max_len: DEFAULT_MAX_LEN,
            max_memo: DEFAULT_MAX_MEMO,
            strategy: Strategy::Memoized,
        }
    }
}

impl DiffConfig {
    /// Create config with custom limits.
    pub fn new(max_len: usize, max_memo: usize) -> Self {
        Self {
            max_len,
            max_memo,
            strategy: Strategy::Memoized,
        }
    }

    /// Config for long lists (higher limits).
    pub fn large() -> Self {
        Self {
            max_len: 20_000,
            max_memo: 4_000_000,
            strategy: Strategy::Memoized,
        }
    }

    /// Config for short lists (lower limits, faster fallback).
    pub fn small() -> Self {
        Self {
            max_len: 200,
            max_memo: 10_000,
            strategy: Strategy::Memoized,
        }
    }

    /// Config without limits. Never falls back.
    pub fn unbounded() -> Self {
        Self {
            max_len: usize::MAX,
            max_memo: usize::MAX,
            strategy: Strategy::Memoized,
        }
    }

    /// Set the LCS strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the combined length limit.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Set the memo entry limit.
    pub fn with_max_memo(mut self, max_memo: usize) -> Self {
        self.max_memo = max_memo;
        self
    }
}

// =============================================================================
// Result Types
// =============================================================================

/// An element together with its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Change<T> {
    pub element: T,
    /// Index into `old` for deletions, into `new` for insertions
    pub index: usize,
}

impl<T> Change<T> {
    pub fn new(element: T, index: usize) -> Self {
        Self { element, index }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Change<U> {
        Change {
            element: f(self.element),
            index: self.index,
        }
    }

    pub fn into_parts(self) -> (T, usize) {
        (self.element, self.index)
    }
}

impl<T> From<(T, usize)> for Change<T> {
    fn from((element, index): (T, usize)) -> Self {
        Self { element, index }
    }
}

/// Statistics from a diff
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DiffStats {
    /// Elements matched by the LCS
    pub kept: usize,
    pub deleted: usize,
    pub inserted: usize,
    /// Memo entries computed (0 for the table strategy and for fallbacks)
    pub memo_entries: usize,
}

impl DiffStats {
    /// Total number of edit operations (not counting keeps)
    pub fn edit_count(&self) -> usize {
        self.deleted + self.inserted
    }

    pub fn is_empty(&self) -> bool {
        self.edit_count() == 0
    }
}

/// Result of a snapshot diff.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct DiffResult<T> {
    /// Removed elements, ascending indices into `old`
    pub deleted: Vec<Change<T>>,
    /// Added elements, ascending indices into `new`
    pub inserted: Vec<Change<T>>,
    /// Statistics about the diff
    pub stats: DiffStats,
    /// Why the diff fell back to replacing everything (if it did)
    pub fallback: Option<SnapError>,
}

impl<T> Default for DiffResult<T> {
    fn default() -> Self {
        Self {
            deleted: Vec::new(),
            inserted: Vec::new(),
            stats: DiffStats::default(),
            fallback: None,
        }
    }
}

impl<T> DiffResult<T> {
    /// Check if neither deletions nor insertions were produced.
    pub fn is_empty(&self) -> bool {
        self.deleted.is_empty() && self.inserted.is_empty()
    }

    /// Check if a limit forced a full replacement.
    pub fn is_replace_all(&self) -> bool {
        self.fallback.is_some()
    }

    /// Indices into `old`, for batch removal.
    pub fn deleted_indices(&self) -> Vec<usize> {
        self.deleted.iter().map(|c| c.index).collect()
    }

    /// Indices into `new`, for batch insertion.
    pub fn inserted_indices(&self) -> Vec<usize> {
        self.inserted.iter().map(|c| c.index).collect()
    }

    /// Transform the elements, keeping positions.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> DiffResult<U> {
        DiffResult {
            deleted: self.deleted.into_iter().map(|c| c.map(&mut f)).collect(),
            inserted: self.inserted.into_iter().map(|c| c.map(&mut f)).collect(),
            stats: self.stats,
            fallback: self.fallback,
        }
    }
}

impl<T: Clone> DiffResult<T> {
    /// Build a result that deletes all of `old` and inserts all of `new`.
    pub fn replace_all(old: &[T], new: &[T], reason: SnapError) -> Self {
        Self {
            deleted: enumerate_changes(old),
            inserted: enumerate_changes(new),
            stats: DiffStats {
                kept: 0,
                deleted: old.len(),
                inserted: new.len(),
                memo_entries: 0,
            },
            fallback: Some(reason),
        }
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Diff two snapshots.
///
/// Always computes the real LCS with the memoized solver. Use
/// [`diff_with_config`] to bound the work.
///
/// # Example
///
/// ```
/// use snapdiff::{diff, Change};
///
/// let result = diff(&[1, 2, 3, 4, 5], &[1, 3, 4, 5, 6]);
/// assert_eq!(result.deleted, vec![Change::new(2, 1)]);
/// assert_eq!(result.inserted, vec![Change::new(6, 4)]);
/// ```
pub fn diff<T: PartialEq + Clone>(old: &[T], new: &[T]) -> DiffResult<T> {
    let mut solver = Lcs::new(old, new);
    let lcs = match solver.solve(None) {
        Ok(root) => solver.collect(root),
        Err(err) => unreachable!("unbounded solve failed: {err}"),
    };
    extract(old, new, &lcs, solver.memo_len())
}

/// Diff two snapshots with custom limits and strategy.
///
/// Never fails: when a limit is exceeded, the result deletes everything and
/// inserts everything, and [`DiffResult::fallback`] records why.
pub fn diff_with_config<T: PartialEq + Clone>(
    old: &[T],
    new: &[T],
    config: DiffConfig,
) -> DiffResult<T> {
    let len = old.len().saturating_add(new.len());
    if len > config.max_len {
        debug!(len, limit = config.max_len, "diff input too large, replacing all");
        return DiffResult::replace_all(old, new, SnapError::too_large(len, config.max_len));
    }

    match config.strategy {
        Strategy::Table => extract(old, new, &table_lcs_refs(old, new), 0),
        Strategy::Memoized => {
            let mut solver = Lcs::new(old, new);
            match solver.solve(Some(config.max_memo)) {
                Ok(root) => {
                    let lcs = solver.collect(root);
                    trace!(memo = solver.memo_len(), kept = lcs.len(), "lcs solved");
                    extract(old, new, &lcs, solver.memo_len())
                }
                Err(err) => {
                    debug!(error = %err, "lcs gave up, replacing all");
                    DiffResult::replace_all(old, new, err)
                }
            }
        }
    }
}

// =============================================================================
// Extraction
// =============================================================================

fn extract<T: PartialEq + Clone>(old: &[T], new: &[T], lcs: &[&T], memo_entries: usize) -> DiffResult<T> {
    let deleted = unmatched(old, lcs);
    let inserted = unmatched(new, lcs);

    DiffResult {
        stats: DiffStats {
            kept: lcs.len(),
            deleted: deleted.len(),
            inserted: inserted.len(),
            memo_entries,
        },
        deleted,
        inserted,
        fallback: None,
    }
}

/// Elements of `seq` not consumed by an in-order walk over `lcs`.
fn unmatched<T: PartialEq + Clone>(seq: &[T], lcs: &[&T]) -> Vec<Change<T>> {
    let mut heads = lcs.iter().copied().peekable();

    seq.iter()
        .enumerate()
        .filter_map(|(index, element)| match heads.next_if(|head| *head == element) {
            Some(_) => None,
            None => Some(Change::new(element.clone(), index)),
        })
        .collect()
}

fn enumerate_changes<T: Clone>(seq: &[T]) -> Vec<Change<T>> {
    seq.iter()
        .enumerate()
        .map(|(index, element)| Change::new(element.clone(), index))
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
