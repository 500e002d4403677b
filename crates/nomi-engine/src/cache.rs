//! Copy-on-write snapshot cell.
//!
//! Holds an `Arc<T>` that is replaced wholesale; readers clone the `Arc` and
//! never observe a partially updated value.

use std::sync::Arc;

use parking_lot::RwLock;

#[derive(Debug)]
pub struct SnapshotCell<T> {
    inner: RwLock<Arc<T>>,
}

impl<T> SnapshotCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: RwLock::new(Arc::new(value)),
        }
    }

    /// The current snapshot.
    pub fn load(&self) -> Arc<T> {
        self.inner.read().clone()
    }

    /// Replace the snapshot. Existing readers keep their old `Arc`.
    pub fn store(&self, value: Arc<T>) {
        *self.inner.write() = value;
    }
}

impl<T: Default> Default for SnapshotCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readers_keep_old_snapshot() {
        let cell = SnapshotCell::new(vec![1, 2, 3]);
        let before = cell.load();
        cell.store(Arc::new(vec![4]));
        assert_eq!(*before, vec![1, 2, 3]);
        assert_eq!(*cell.load(), vec![4]);
    }

    #[test]
    fn default_is_empty() {
        let cell: SnapshotCell<Vec<u8>> = SnapshotCell::default();
        assert!(cell.load().is_empty());
    }
}
