//! Memoized Longest Common Subsequence
//!
//! Divide-and-conquer LCS over suffixes of the two inputs, tuned for
//! snapshots of live lists where most of the sequence is an unchanged prefix.
//!
//! # Algorithm
//!
//! For a pair of ranges:
//!
//! 1. Either range empty: LCS is empty.
//! 2. Walk the shorter range against the longer one while elements match.
//! 3. Whole shorter range matched: LCS is that prefix.
//! 4. Otherwise, at the first mismatch `p`, solve both
//!    `(shorter[p+1..], longer[p..])` and `(shorter[p..], longer[p+1..])`,
//!    keep the longer one (ties keep the first), and prepend the prefix.
//!
//! Results are memoized under an unordered pair of ranges, so a pair reached
//! in either order shares one entry.
//!
//! # Implementation Notes
//!
//! - Recursion runs on an explicit worklist: stack depth is constant.
//! - A memo entry stores `(prefix, len, next)` instead of a copied subsequence.
//!   The LCS is rebuilt by following `next` links from the root.
//! - The memo lives in the solver and is dropped with it. Nothing is shared
//!   between calls.
//!
//! # Complexity
//!
//! - Time: linear when the inputs share a long common prefix. Heavily
//!   interleaved inputs approach O(n * m * min(n, m)).
//! - Space: O(number of range pairs reached), at most (n + 1) * (m + 1).
//!
//! Use [`table_lcs`](super::table_lcs) when inputs are large and heavily
//! reordered.

use rustc_hash::FxHashMap;
use smallvec::{SmallVec, smallvec};

use crate::error::{SnapError, SnapResult};

// =============================================================================
// Public API
// =============================================================================

/// Compute a longest common subsequence of `old` and `new`.
///
/// Ties between equal-length candidates are broken deterministically, so the
/// same inputs always produce the same subsequence.
///
/// # Example
///
/// ```
/// use snapdiff::longest_common_subsequence;
///
/// let lcs = longest_common_subsequence(&[1, 2, 3, 4, 5], &[1, 3, 4, 5, 6]);
/// assert_eq!(lcs, vec![1, 3, 4, 5]);
/// ```
pub fn longest_common_subsequence<T: PartialEq + Clone>(old: &[T], new: &[T]) -> Vec<T> {
    let mut solver = Lcs::new(old, new);
    match solver.solve(None) {
        Ok(root) => solver.collect(root).into_iter().cloned().collect(),
        Err(err) => unreachable!("unbounded solve failed: {err}"),
    }
}

/// Like [`longest_common_subsequence`], giving up once the memo would hold
/// more than `max_memo` entries.
pub fn try_longest_common_subsequence<T: PartialEq + Clone>(
    old: &[T],
    new: &[T],
    max_memo: usize,
) -> SnapResult<Vec<T>> {
    let mut solver = Lcs::new(old, new);
    let root = solver.solve(Some(max_memo))?;
    Ok(solver.collect(root).into_iter().cloned().collect())
}

// =============================================================================
// Ranges and Memo Keys
// =============================================================================

/// Which input a range belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum Side {
    Old,
    New,
}

/// Contiguous range `start..end` of one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct SliceRef {
    side: Side,
    start: usize,
    end: usize,
}

impl SliceRef {
    pub(crate) fn new(side: Side, start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { side, start, end }
    }

    #[inline]
    fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Drop the first `n` elements (clamped to the range).
    #[inline]
    fn skip(self, n: usize) -> Self {
        Self {
            start: (self.start + n).min(self.end),
            ..self
        }
    }
}

/// Unordered pair of ranges.
///
/// `MemoKey::new(a, b) == MemoKey::new(b, a)`: the pair is stored in
/// canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct MemoKey {
    lo: SliceRef,
    hi: SliceRef,
}

impl MemoKey {
    pub(crate) fn new(a: SliceRef, b: SliceRef) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.lo.is_empty() || self.hi.is_empty()
    }

    /// Split into `(shorter, longer)`. On equal length the canonically
    /// smaller range (the `old` side) counts as shorter.
    #[inline]
    fn oriented(&self) -> (SliceRef, SliceRef) {
        if self.lo.len() <= self.hi.len() {
            (self.lo, self.hi)
        } else {
            (self.hi, self.lo)
        }
    }
}

// =============================================================================
// Solver
// =============================================================================

#[derive(Debug, Clone, Copy)]
struct Entry {
    /// Matched elements at the start of the shorter range
    prefix: usize,
    /// Total LCS length for this pair
    len: usize,
    /// Pair whose LCS follows the prefix
    next: Option<MemoKey>,
}

enum Frame {
    Visit(MemoKey),
    Join {
        key: MemoKey,
        prefix: usize,
        left: MemoKey,
        right: MemoKey,
    },
}

/// Per-call LCS solver. Owns its memo table.
pub(crate) struct Lcs<'a, T> {
    old: &'a [T],
    new: &'a [T],
    memo: FxHashMap<MemoKey, Entry>,
}

impl<'a, T: PartialEq> Lcs<'a, T> {
    pub(crate) fn new(old: &'a [T], new: &'a [T]) -> Self {
        Self {
            old,
            new,
            memo: FxHashMap::default(),
        }
    }

    /// Key covering both inputs in full.
    pub(crate) fn root(&self) -> MemoKey {
        MemoKey::new(
            SliceRef::new(Side::Old, 0, self.old.len()),
            SliceRef::new(Side::New, 0, self.new.len()),
        )
    }

    /// Number of memo entries computed so far.
    pub(crate) fn memo_len(&self) -> usize {
        self.memo.len()
    }

    /// Solve for the root pair. Returns the root key to pass to [`Self::collect`].
    pub(crate) fn solve(&mut self, budget: Option<usize>) -> SnapResult<MemoKey> {
        let root = self.root();
        self.solve_key(root, budget)?;
        Ok(root)
    }

    /// Solve an arbitrary pair of ranges.
    pub(crate) fn solve_key(&mut self, root: MemoKey, budget: Option<usize>) -> SnapResult<()> {
        let mut stack: SmallVec<[Frame; 32]> = smallvec![Frame::Visit(root)];

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Visit(key) => {
                    if key.is_empty() || self.memo.contains_key(&key) {
                        continue;
                    }

                    let (shorter, longer) = key.oriented();
                    let prefix = self.common_prefix(shorter, longer);

                    if prefix == shorter.len() {
                        self.store(key, Entry { prefix, len: prefix, next: None }, budget)?;
                        continue;
                    }

                    let left = MemoKey::new(shorter.skip(prefix + 1), longer.skip(prefix));
                    let right = MemoKey::new(shorter.skip(prefix), longer.skip(prefix + 1));

                    // Join runs after both children are resolved
                    stack.push(Frame::Join { key, prefix, left, right });
                    stack.push(Frame::Visit(right));
                    stack.push(Frame::Visit(left));
                }
                Frame::Join { key, prefix, left, right } => {
                    let left_len = self.len_of(&left);
                    let right_len = self.len_of(&right);

                    let (chosen, chosen_len) = if left_len >= right_len {
                        (left, left_len)
                    } else {
                        (right, right_len)
                    };

                    let entry = Entry {
                        prefix,
                        len: prefix + chosen_len,
                        next: (chosen_len > 0).then_some(chosen),
                    };
                    self.store(key, entry, budget)?;
                }
            }
        }

        Ok(())
    }

    /// Rebuild the subsequence for a solved key.
    pub(crate) fn collect(&self, root: MemoKey) -> Vec<&'a T> {
        let mut out = Vec::with_capacity(self.len_of(&root));
        let mut cursor = Some(root);

        while let Some(key) = cursor {
            let Some(entry) = self.memo.get(&key) else {
                break;
            };
            let (shorter, _) = key.oriented();
            out.extend(&self.slice(shorter)[..entry.prefix]);
            cursor = entry.next;
        }

        out
    }

    /// LCS length of a solved key (0 for empty pairs).
    pub(crate) fn len_of(&self, key: &MemoKey) -> usize {
        if key.is_empty() {
            return 0;
        }
        self.memo.get(key).map_or(0, |e| e.len)
    }

    fn store(&mut self, key: MemoKey, entry: Entry, budget: Option<usize>) -> SnapResult<()> {
        if let Some(limit) = budget {
            if self.memo.len() >= limit {
                return Err(SnapError::MemoBudgetExceeded { limit });
            }
        }
        self.memo.insert(key, entry);
        Ok(())
    }

    fn common_prefix(&self, shorter: SliceRef, longer: SliceRef) -> usize {
        self.slice(shorter)
            .iter()
            .zip(self.slice(longer))
            .take_while(|(a, b)| a == b)
            .count()
    }

    #[inline]
    fn slice(&self, range: SliceRef) -> &'a [T] {
        let seq = match range.side {
            Side::Old => self.old,
            Side::New => self.new,
        };
        &seq[range.start..range.end]
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::hash::{BuildHasher, Hash, Hasher};

    use rustc_hash::FxBuildHasher;

    use super::*;
    use crate::algo::table_lcs;

    fn is_subsequence<T: PartialEq>(sub: &[T], seq: &[T]) -> bool {
        let mut it = seq.iter();
        sub.iter().all(|x| it.any(|y| y == x))
    }

    fn hash_of(key: &MemoKey) -> u64 {
        let mut h = FxBuildHasher.build_hasher();
        key.hash(&mut h);
        h.finish()
    }

    #[test]
    fn test_empty_inputs() {
        let empty: [u32; 0] = [];
        assert!(longest_common_subsequence(&empty, &empty).is_empty());
        assert!(longest_common_subsequence(&empty, &[1, 2]).is_empty());
        assert!(longest_common_subsequence(&[1, 2], &empty).is_empty());
    }

    #[test]
    fn test_identical() {
        let x = vec!["a", "b", "c", "d"];
        assert_eq!(longest_common_subsequence(&x, &x), x);
    }

    #[test]
    fn test_single_removal_and_append() {
        let lcs = longest_common_subsequence(&[1, 2, 3, 4, 5], &[1, 3, 4, 5, 6]);
        assert_eq!(lcs, vec![1, 3, 4, 5]);
    }

    #[test]
    fn test_reversed_picks_left_branch() {
        // Every candidate has length 1; the left-first tie-break yields "c"
        let lcs = longest_common_subsequence(&["a", "b", "c"], &["c", "b", "a"]);
        assert_eq!(lcs, vec!["c"]);
    }

    #[test]
    fn test_prefix_is_whole_shorter() {
        let lcs = longest_common_subsequence(&[1, 2, 3], &[1, 2, 3, 4, 5, 6]);
        assert_eq!(lcs, vec![1, 2, 3]);

        let lcs = longest_common_subsequence(&[1, 2, 3, 4, 5, 6], &[1, 2]);
        assert_eq!(lcs, vec![1, 2]);
    }

    #[test]
    fn test_no_common_elements() {
        assert!(longest_common_subsequence(&[1, 2, 3], &[4, 5, 6]).is_empty());
    }

    #[test]
    fn test_interleaved() {
        let old = [1, 2, 3, 4, 5, 6, 7, 8];
        let new = [2, 1, 4, 3, 6, 5, 8, 7];
        let lcs = longest_common_subsequence(&old, &new);
        assert_eq!(lcs.len(), 4);
        assert!(is_subsequence(&lcs, &old));
        assert!(is_subsequence(&lcs, &new));
    }

    #[test]
    fn test_deterministic_across_calls() {
        let old = [3, 1, 4, 1, 5, 9, 2, 6];
        let new = [2, 7, 1, 8, 2, 8, 1, 8];
        let first = longest_common_subsequence(&old, &new);
        for _ in 0..5 {
            assert_eq!(longest_common_subsequence(&old, &new), first);
        }
    }

    #[test]
    fn test_memo_key_is_unordered() {
        let a = SliceRef::new(Side::Old, 2, 9);
        let b = SliceRef::new(Side::New, 0, 4);

        assert_eq!(MemoKey::new(a, b), MemoKey::new(b, a));
        assert_eq!(hash_of(&MemoKey::new(a, b)), hash_of(&MemoKey::new(b, a)));
        assert_ne!(MemoKey::new(a, b), MemoKey::new(a, a));
    }

    #[test]
    fn test_orientation_ignores_argument_order() {
        // Equal lengths: the old side is always treated as shorter
        let a = SliceRef::new(Side::Old, 0, 3);
        let b = SliceRef::new(Side::New, 0, 3);
        assert_eq!(MemoKey::new(a, b).oriented(), MemoKey::new(b, a).oriented());
        assert_eq!(MemoKey::new(b, a).oriented().0, a);
    }

    #[test]
    fn test_solving_either_order_gives_same_entry() {
        let old = [1, 5, 2, 6, 3, 7];
        let new = [5, 1, 6, 2, 7, 3, 9];
        let a = SliceRef::new(Side::Old, 0, old.len());
        let b = SliceRef::new(Side::New, 0, new.len());

        let mut forward = Lcs::new(&old, &new);
        forward.solve_key(MemoKey::new(a, b), None).unwrap();
        let forward_lcs = forward.collect(MemoKey::new(a, b));

        let mut backward = Lcs::new(&old, &new);
        backward.solve_key(MemoKey::new(b, a), None).unwrap();
        let backward_lcs = backward.collect(MemoKey::new(b, a));

        assert_eq!(forward_lcs, backward_lcs);
        assert_eq!(forward.memo_len(), backward.memo_len());

        // A key solved one way is a cache hit the other way
        let before = forward.memo_len();
        forward.solve_key(MemoKey::new(b, a), None).unwrap();
        assert_eq!(forward.memo_len(), before);
    }

    #[test]
    fn test_swapped_arguments_same_length() {
        let x = ["a", "b", "c", "a", "b"];
        let y = ["b", "a", "c", "b", "a", "c"];
        let xy = longest_common_subsequence(&x, &y);
        let yx = longest_common_subsequence(&y, &x);
        assert_eq!(xy.len(), yx.len());
    }

    #[test]
    fn test_memo_is_per_call() {
        let solver = Lcs::new(&[1, 2, 3], &[3, 2, 1]);
        assert_eq!(solver.memo_len(), 0);

        let mut solver = Lcs::new(&[1, 2, 3], &[1, 2, 3]);
        solver.solve(None).unwrap();
        // Full prefix match stores a single entry
        assert_eq!(solver.memo_len(), 1);
    }

    #[test]
    fn test_budget_exceeded() {
        let err = try_longest_common_subsequence(&[1, 2, 3], &[3, 2, 1], 1).unwrap_err();
        assert_eq!(err, SnapError::MemoBudgetExceeded { limit: 1 });
    }

    #[test]
    fn test_budget_not_needed_for_empty() {
        let empty: [u8; 0] = [];
        assert_eq!(try_longest_common_subsequence(&empty, &[1], 0), Ok(vec![]));
    }

    #[test]
    fn test_budget_sufficient() {
        let lcs = try_longest_common_subsequence(&[1, 2, 3, 4], &[1, 3, 4], 64).unwrap();
        assert_eq!(lcs, vec![1, 3, 4]);
    }

    #[test]
    fn test_append_only_uses_single_entry() {
        let old: Vec<u32> = (0..10_000).collect();
        let new: Vec<u32> = (0..10_001).collect();

        let mut solver = Lcs::new(&old, &new);
        let root = solver.solve(None).unwrap();
        assert_eq!(solver.memo_len(), 1);
        assert_eq!(solver.collect(root).len(), 10_000);
    }

    #[test]
    fn test_interleaved_medium_input() {
        let old: Vec<u32> = (0..120).collect();
        let new: Vec<u32> = (0..120).map(|i| if i % 2 == 0 { i } else { i + 1000 }).collect();
        let lcs = longest_common_subsequence(&old, &new);
        assert_eq!(lcs.len(), 60);
        assert_eq!(lcs.len(), table_lcs(&old, &new).len());
    }

    #[test]
    fn test_matches_table_length_exhaustive() {
        // All sequences over {0, 1, 2} up to length 4
        fn all(len: usize) -> Vec<Vec<u8>> {
            if len == 0 {
                return vec![vec![]];
            }
            let mut out = Vec::new();
            for prefix in all(len - 1) {
                for x in 0..3 {
                    let mut v = prefix.clone();
                    v.push(x);
                    out.push(v);
                }
            }
            out
        }

        let seqs: Vec<Vec<u8>> = (0..=4).flat_map(all).collect();
        for old in &seqs {
            for new in &seqs {
                let lcs = longest_common_subsequence(old, new);
                assert_eq!(lcs.len(), table_lcs(old, new).len(), "{old:?} vs {new:?}");
                assert!(is_subsequence(&lcs, old));
                assert!(is_subsequence(&lcs, new));
            }
        }
    }
}
