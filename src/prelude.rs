//! Prelude for common imports.
//!
//! ```
//! use snapdiff::prelude::*;
//! ```

// Algorithms
pub use crate::algo::{
    diff, diff_with_config, longest_common_subsequence, table_lcs, try_longest_common_subsequence,
    Change, DiffConfig, DiffResult, DiffStats, Strategy,
};

// Batch
pub use crate::batch::diff_batch;

// Live list
pub use crate::feed::{LiveList, SharedLiveList};

#[cfg(feature = "async")]
pub use crate::stream::diff_stream;

// Error
pub use crate::error::{SnapError, SnapResult};
