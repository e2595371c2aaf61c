//! Dependency-keyed memoization.

use std::sync::Arc;

/// Cache of one value, recomputed only when its dependency key changes.
///
/// The key is a tuple of everything the value depends on, compared by
/// value. Recompute closures receive the previous value so they can reuse
/// its allocation.
#[derive(Debug)]
pub struct Memo<K, V> {
    key: Option<K>,
    value: V,
    recomputes: u64,
}

impl<K: PartialEq, V: Default> Default for Memo<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialEq, V: Default> Memo<K, V> {
    /// Empty cache; the first [`get_or_update`](Self::get_or_update)
    /// always computes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            key: None,
            value: V::default(),
            recomputes: 0,
        }
    }

    /// Return the cached value, recomputing it in place first if `key`
    /// differs from the key it was computed with.
    pub fn get_or_update(
        &mut self,
        key: K,
        compute: impl FnOnce(&K, &mut V),
    ) -> &V {
        if self.key.as_ref() != Some(&key) {
            compute(&key, &mut self.value);
            self.key = Some(key);
            self.recomputes += 1;
        }
        &self.value
    }

    /// How many times the value has been recomputed.
    #[must_use]
    pub fn recomputes(&self) -> u64 {
        self.recomputes
    }
}

/// Shared data compared by pointer identity rather than by contents.
///
/// Lets a large, immutable input (tens of thousands of atoms) sit in a
/// memo key without an element-wise comparison every frame. Holding the
/// `Arc` keeps the allocation alive, so the address cannot be reused by a
/// different value while the key exists.
#[derive(Debug)]
pub struct ByIdentity<T: ?Sized>(pub Arc<T>);

impl<T: ?Sized> Clone for ByIdentity<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: ?Sized> PartialEq for ByIdentity<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> Eq for ByIdentity<T> {}
