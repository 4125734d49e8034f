//! Applying a diff to a sequence.
//!
//! Mirrors how a list view consumes a [`DiffResult`]: remove every deleted
//! index from the old items, then insert every inserted element at its index
//! in ascending order.

use crate::algo::{Change, DiffResult};
use crate::error::{SnapError, SnapResult};

impl<T: Clone> DiffResult<T> {
    /// Apply this diff to `old`, producing the new sequence.
    ///
    /// # Errors
    ///
    /// - [`SnapError::UnorderedChanges`] if indices are not strictly ascending
    /// - [`SnapError::IndexOutOfBounds`] if an index does not fit the sequence
    ///   it refers to
    ///
    /// # Example
    ///
    /// ```
    /// use snapdiff::diff;
    ///
    /// let old = vec!["a", "b", "c"];
    /// let new = vec!["a", "c", "d"];
    /// assert_eq!(diff(&old, &new).apply(&old).unwrap(), new);
    /// ```
    pub fn apply(&self, old: &[T]) -> SnapResult<Vec<T>> {
        check_ascending(&self.deleted)?;
        check_ascending(&self.inserted)?;

        if let Some(last) = self.deleted.last() {
            if last.index >= old.len() {
                return Err(SnapError::IndexOutOfBounds {
                    index: last.index,
                    len: old.len(),
                });
            }
        }

        // 1. Deletions (indices refer to `old`)
        let mut deleted = self.deleted.iter().map(|c| c.index).peekable();
        let mut survivors = old
            .iter()
            .enumerate()
            .filter(|(i, _)| deleted.next_if_eq(i).is_none())
            .map(|(_, item)| item.clone());

        // 2. Insertions (indices refer to the result)
        let len = old.len() - self.deleted.len() + self.inserted.len();
        let mut out = Vec::with_capacity(len);
        let mut inserted = self.inserted.iter().peekable();

        loop {
            if let Some(change) = inserted.next_if(|c| c.index == out.len()) {
                out.push(change.element.clone());
            } else if let Some(item) = survivors.next() {
                out.push(item);
            } else {
                break;
            }
        }

        match inserted.next() {
            Some(change) => Err(SnapError::IndexOutOfBounds {
                index: change.index,
                len: out.len(),
            }),
            None => Ok(out),
        }
    }
}

fn check_ascending<T>(changes: &[Change<T>]) -> SnapResult<()> {
    match changes.windows(2).find(|w| w[0].index >= w[1].index) {
        Some(w) => Err(SnapError::UnorderedChanges { index: w[1].index }),
        None => Ok(()),
    }
}
