//! Live list state driven by full snapshots.
//!
//! A data feed delivers the whole current list on every change. [`LiveList`]
//! keeps the last snapshot, diffs each new one against it and hands the
//! positioned changes to the caller. Because every update goes through
//! `replace`, the `old` side of each diff is exactly the previous `new`.

use std::ops::Index;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::algo::{DiffConfig, DiffResult, diff_with_config};

// =============================================================================
// LiveList
// =============================================================================

/// Current items of a live list plus the config used to diff updates.
#[derive(Debug, Clone)]
pub struct LiveList<T> {
    items: Vec<T>,
    config: DiffConfig,
    /// Number of snapshots applied
    version: u64,
}

impl<T> Default for LiveList<T> {
    fn default() -> Self {
        Self::with_config(DiffConfig::default())
    }
}

impl<T> LiveList<T> {
    /// Create an empty list with the default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty list with a specific config.
    pub fn with_config(config: DiffConfig) -> Self {
        Self {
            items: Vec::new(),
            config,
            version: 0,
        }
    }

    /// Start from existing items without producing a diff.
    pub fn from_items(items: Vec<T>, config: DiffConfig) -> Self {
        Self {
            items,
            config,
            version: 0,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn config(&self) -> DiffConfig {
        self.config
    }

    /// Take the items out, consuming the list.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T: PartialEq + Clone> LiveList<T> {
    /// Replace the items with `snapshot` and return what changed.
    pub fn replace(&mut self, snapshot: Vec<T>) -> DiffResult<T> {
        let result = diff_with_config(&self.items, &snapshot, self.config);
        self.items = snapshot;
        self.version += 1;

        debug!(
            version = self.version,
            deleted = result.stats.deleted,
            inserted = result.stats.inserted,
            replace_all = result.is_replace_all(),
            "live list updated"
        );
        result
    }
}

impl<T> Index<usize> for LiveList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

// =============================================================================
// SharedLiveList
// =============================================================================

/// Thread-safe live list.
///
/// Uses `parking_lot::RwLock`. Updates hold the write lock, so concurrent
/// feeds are applied one at a time and history stays linear.
#[derive(Debug)]
pub struct SharedLiveList<T> {
    inner: Arc<RwLock<LiveList<T>>>,
}

impl<T> Clone for SharedLiveList<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for SharedLiveList<T> {
    fn default() -> Self {
        Self::new(LiveList::default())
    }
}

impl<T> SharedLiveList<T> {
    pub fn new(list: LiveList<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(list)),
        }
    }

    /// Execute a closure with read access to the list.
    pub fn with_read<R>(&self, f: impl FnOnce(&LiveList<T>) -> R) -> R {
        let guard = self.inner.read();
        f(&guard)
    }

    pub fn len(&self) -> usize {
        self.with_read(|l| l.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn version(&self) -> u64 {
        self.with_read(|l| l.version())
    }
}

impl<T: Clone> SharedLiveList<T> {
    /// Clone the current items.
    pub fn snapshot(&self) -> Vec<T> {
        self.with_read(|l| l.items().to_vec())
    }
}

impl<T: PartialEq + Clone> SharedLiveList<T> {
    /// Replace the items and return what changed.
    pub fn replace(&self, snapshot: Vec<T>) -> DiffResult<T> {
        self.inner.write().replace(snapshot)
    }

    /// Replace the items, then run `f` with the new items and the diff while
    /// still holding the write lock.
    pub fn replace_with<R>(&self, snapshot: Vec<T>, f: impl FnOnce(&[T], &DiffResult<T>) -> R) -> R {
        let mut guard = self.inner.write();
        let result = guard.replace(snapshot);
        f(guard.items(), &result)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::algo::Change;

    #[derive(Debug, Clone, PartialEq)]
    struct Message {
        id: u32,
        text: &'static str,
    }

    fn msg(id: u32, text: &'static str) -> Message {
        Message { id, text }
    }

    #[test]
    fn test_first_snapshot_inserts_everything() {
        let mut list = LiveList::new();
        let result = list.replace(vec![msg(1, "hi"), msg(2, "yo")]);

        assert!(result.deleted.is_empty());
        assert_eq!(result.inserted_indices(), vec![0, 1]);
        assert_eq!(list.len(), 2);
        assert_eq!(list.version(), 1);
        assert_eq!(list[1].text, "yo");
    }

    #[test]
    fn test_history_is_linear() {
        let snapshots = vec![
            vec![msg(1, "a")],
            vec![msg(1, "a"), msg(2, "b")],
            vec![msg(2, "b"), msg(3, "c")],
            vec![],
            vec![msg(4, "d")],
        ];

        let mut list = LiveList::new();
        for snapshot in snapshots {
            let before = list.items().to_vec();
            let result = list.replace(snapshot.clone());
            assert_eq!(result.apply(&before), Ok(snapshot.clone()));
            assert_eq!(list.items(), snapshot.as_slice());
        }
        assert_eq!(list.version(), 5);
    }

    #[test]
    fn test_edited_message_is_delete_plus_insert() {
        let mut list = LiveList::from_items(vec![msg(1, "a"), msg(2, "b")], DiffConfig::default());
        let result = list.replace(vec![msg(1, "a"), msg(2, "b!")]);

        assert_eq!(result.deleted, vec![Change::new(msg(2, "b"), 1)]);
        assert_eq!(result.inserted, vec![Change::new(msg(2, "b!"), 1)]);
    }

    #[test]
    fn test_unchanged_snapshot() {
        let mut list = LiveList::from_items(vec![1, 2, 3], DiffConfig::default());
        assert!(list.replace(vec![1, 2, 3]).is_empty());
        assert_eq!(list.get(2), Some(&3));
        assert_eq!(list.get(3), None);
    }

    #[test]
    fn test_config_is_used() {
        let mut list = LiveList::with_config(DiffConfig::small().with_max_len(2));
        let result = list.replace(vec![1, 2, 3]);
        assert!(result.is_replace_all());
        assert_eq!(list.into_items(), vec![1, 2, 3]);
    }

    #[test]
    fn test_shared_replace_with() {
        let shared = SharedLiveList::default();
        let _ = shared.replace(vec!["a", "b"]);

        let (len, deleted) = shared.replace_with(vec!["b"], |items, diff| (items.len(), diff.deleted_indices()));
        assert_eq!(len, 1);
        assert_eq!(deleted, vec![0]);
        assert_eq!(shared.snapshot(), vec!["b"]);
        assert_eq!(shared.version(), 2);
    }

    #[test]
    fn test_shared_across_threads() {
        let shared: SharedLiveList<u32> = SharedLiveList::default();

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..10 {
                        let snapshot: Vec<u32> = (0..(t * 10 + i)).collect();
                        let _ = shared.replace(snapshot);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(shared.version(), 40);
        let len = shared.len();
        assert_eq!(shared.snapshot(), (0..len as u32).collect::<Vec<_>>());
    }

    #[test]
    fn test_shared_is_send_sync() {
        static_assertions::assert_impl_all!(SharedLiveList<String>: Send, Sync, Clone);
    }
}
