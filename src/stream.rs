//! Snapshot streams.
//!
//! Only available with the `async` feature. Runtime-agnostic: built on
//! `futures-util` combinators.

use futures_util::stream::{Stream, StreamExt};

use crate::algo::{DiffConfig, DiffResult};
use crate::feed::LiveList;

/// Turn a stream of full snapshots into a stream of diffs.
///
/// The first diff is against an empty list; each later one is against the
/// previous snapshot.
///
/// # Example
///
/// ```ignore
/// let diffs = diff_stream(listener.snapshots(), DiffConfig::default());
/// pin_mut!(diffs);
/// while let Some(diff) = diffs.next().await {
///     view.delete_rows(diff.deleted_indices());
///     view.insert_rows(diff.inserted_indices());
/// }
/// ```
pub fn diff_stream<S, T>(snapshots: S, config: DiffConfig) -> impl Stream<Item = DiffResult<T>>
where
    S: Stream<Item = Vec<T>>,
    T: PartialEq + Clone,
{
    let mut list = LiveList::with_config(config);
    snapshots.map(move |snapshot| list.replace(snapshot))
}
