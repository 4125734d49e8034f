//! Error types for snapdiff.
//!
//! Computing a diff never fails. These errors describe guard limits
//! (reported as fallback reasons) and malformed patches.

use thiserror::Error;

/// Errors that can occur during diff operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapError {
    /// Combined input length exceeds the configured limit
    #[error("input too large: {len} elements, limit is {limit}")]
    InputTooLarge {
        /// Combined length of `old` and `new`
        len: usize,
        /// Configured `max_len`
        limit: usize,
    },

    /// The memo table grew past its budget
    #[error("memo budget exceeded: more than {limit} entries")]
    MemoBudgetExceeded {
        /// Configured `max_memo`
        limit: usize,
    },

    /// A patch index does not fit the sequence it refers to
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// Offending index
        index: usize,
        /// Length of the sequence at that point
        len: usize,
    },

    /// Patch indices are not strictly ascending
    #[error("change at index {index} is out of order")]
    UnorderedChanges {
        /// First index that breaks the ordering
        index: usize,
    },
}

/// Result type alias for snapdiff operations.
pub type SnapResult<T> = Result<T, SnapError>;

impl SnapError {
    /// Create an input size error.
    pub fn too_large(len: usize, limit: usize) -> Self {
        Self::InputTooLarge { len, limit }
    }

    /// Check whether this error came from a guard limit rather than a bad patch.
    pub fn is_limit(&self) -> bool {
        matches!(self, Self::InputTooLarge { .. } | Self::MemoBudgetExceeded { .. })
    }
}
