//! Algorithm implementations for snapshot diffing.
//!
//! - `lcs`: memoized prefix-first LCS (default)
//! - `table`: classic DP-table LCS
//! - `diff`: positioned deletions/insertions built on an LCS

mod diff;
mod lcs;
mod table;

pub use diff::{Change, DiffConfig, DiffResult, DiffStats, Strategy, diff, diff_with_config};
pub use lcs::{longest_common_subsequence, try_longest_common_subsequence};
pub use table::table_lcs;
