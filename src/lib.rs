//! snapdiff - Positioned diffs between ordered snapshots
//!
//! ## Core Concepts
//!
//! A live data feed delivers the full current list on every change. To animate
//! the change instead of reloading the list, diff the previous snapshot
//! against the new one: the result lists which elements to delete (indices
//! into the old list) and which to insert (indices into the new list).
//! Apply all deletions before any insertion.
//!
//! The diff is derived from a longest common subsequence. The default solver
//! is memoized and tuned for append-mostly lists; a DP-table solver is
//! available for heavily reordered input.
//!
//! ## Modules
//! - `algo`: LCS solvers and the diff itself
//! - `patch`: applying a diff to the old sequence
//! - `feed`: live list state that diffs each incoming snapshot
//! - `stream`: snapshot stream adapter (`async` feature)
//! - `batch`: diffing many pairs at once (`parallel` feature for rayon)
//! - `error`: error types
//!
//! ## Usage
//!
//! ```
//! use snapdiff::{diff, Change};
//!
//! let old = vec!["hello", "how are you", "bye"];
//! let new = vec!["hello", "bye", "see you"];
//!
//! let result = diff(&old, &new);
//! assert_eq!(result.deleted, vec![Change::new("how are you", 1)]);
//! assert_eq!(result.inserted, vec![Change::new("see you", 2)]);
//! assert_eq!(result.apply(&old).unwrap(), new);
//! ```

/// Algorithms: LCS solvers and diff
pub mod algo;

/// Applying diffs
pub mod patch;

/// Live list state
pub mod feed;

/// Snapshot streams
#[cfg(feature = "async")]
pub mod stream;

/// Batch diffing
pub mod batch;

/// Error types
pub mod error;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Algorithms
pub use algo::{
    Change, DiffConfig, DiffResult, DiffStats, Strategy, diff, diff_with_config,
    longest_common_subsequence, table_lcs, try_longest_common_subsequence,
};

// Live list
pub use feed::{LiveList, SharedLiveList};

// Batch
pub use batch::diff_batch;

#[cfg(feature = "async")]
pub use stream::diff_stream;

// Error types
pub use error::{SnapError, SnapResult};
