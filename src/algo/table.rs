//! Dynamic-programming LCS
//!
//! Classic O(n * m) table. Slower than the memoized solver on lightly edited
//! snapshots, but its cost does not depend on how the inputs interleave.

/// Compute a longest common subsequence using a full DP table.
///
/// Backtracking prefers dropping from `new` when both directions keep the
/// same length, so results are deterministic.
pub fn table_lcs<T: PartialEq + Clone>(old: &[T], new: &[T]) -> Vec<T> {
    table_lcs_refs(old, new).into_iter().cloned().collect()
}

pub(crate) fn table_lcs_refs<'a, T: PartialEq>(old: &'a [T], new: &[T]) -> Vec<&'a T> {
    let n = old.len();
    let m = new.len();

    if n == 0 || m == 0 {
        return Vec::new();
    }

    // Strip common prefix; it is always part of some LCS
    let prefix = old.iter().zip(new).take_while(|(a, b)| a == b).count();
    let old_mid = &old[prefix..];
    let new_mid = &new[prefix..];

    let mut lcs: Vec<&T> = old[..prefix].iter().collect();
    lcs.extend(dp_backtrack(old_mid, new_mid));
    lcs
}

/// DP table + backtrack. `dp[i][j]` = LCS length of `old[..i]` and `new[..j]`.
fn dp_backtrack<'a, T: PartialEq>(old: &'a [T], new: &[T]) -> Vec<&'a T> {
    let n = old.len();
    let m = new.len();

    if n == 0 || m == 0 {
        return Vec::new();
    }

    // Flat row-major table for cache efficiency
    let width = m + 1;
    let mut dp = vec![0u32; (n + 1) * width];

    for i in 1..=n {
        for j in 1..=m {
            dp[i * width + j] = if old[i - 1] == new[j - 1] {
                dp[(i - 1) * width + (j - 1)] + 1
            } else {
                dp[(i - 1) * width + j].max(dp[i * width + (j - 1)])
            };
        }
    }

    let mut lcs = Vec::with_capacity(dp[n * width + m] as usize);
    let mut i = n;
    let mut j = m;

    while i > 0 && j > 0 {
        if old[i - 1] == new[j - 1] {
            lcs.push(&old[i - 1]);
            i -= 1;
            j -= 1;
        } else if dp[(i - 1) * width + j] > dp[i * width + (j - 1)] {
            i -= 1;
        } else {
            j -= 1;
        }
    }

    lcs.reverse();
    lcs
}
