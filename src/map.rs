//! The keyed-value façade: wraps [`OrderedContainer`], adding `at` and the
//! default-inserting index operator unique maps get (spec.md §4.4,
//! "Unique-map adds `at(key)`..."). Covers `map`/`pmap`/`multimap`/
//! `pmultimap` (spec.md §6).

use std::ops::{Deref, DerefMut};

use crate::comparator::{DefaultComparator, KeyComparator};
use crate::cursor::Cursor;
use crate::dup::DupPolicy;
use crate::error::{Error, Result};
use crate::node::Augment;
use crate::containers::{InsertResult, OrderedContainer};

pub struct Map<K, V, D: DupPolicy, A: Augment, C: KeyComparator<K> = DefaultComparator> {
    inner: OrderedContainer<K, V, D, A, C>,
}

impl<K, V, D: DupPolicy, A: Augment, C: KeyComparator<K> + Default> Default for Map<K, V, D, A, C> {
    fn default() -> Self {
        Map {
            inner: OrderedContainer::with_comparator(C::default()),
        }
    }
}

impl<K, V, D: DupPolicy, A: Augment, C: KeyComparator<K>> Map<K, V, D, A, C> {
    pub fn with_comparator(cmp: C) -> Self {
        Map {
            inner: OrderedContainer::with_comparator(cmp),
        }
    }

    pub fn insert(&self, key: K, value: V) -> InsertResult<K, V, D, A, C> {
        self.inner.insert(key, value)
    }

    pub fn insert_hint(&self, hint: &Cursor<K, V, D, A, C>, key: K, value: V) -> InsertResult<K, V, D, A, C> {
        self.inner.insert_hint(hint, key, value)
    }

    pub fn insert_range<I: IntoIterator<Item = (K, V)>>(&self, iter: I) {
        self.inner.insert_range(iter);
    }

    pub fn emplace_ascending<I: IntoIterator<Item = (K, V)>>(&self, iter: I) -> Result<()> {
        self.inner.emplace_ascending(iter)
    }

    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.find(key).value().ok()
    }

    /// Fails with [`Error::KeyNotFound`] on a miss (spec.md §4.4).
    pub fn at(&self, key: &K) -> Result<V>
    where
        V: Clone,
    {
        self.inner.find(key).value().map_err(|_| Error::KeyNotFound)
    }
}

impl<K, V: Default, D: DupPolicy, A: Augment, C: KeyComparator<K>> Map<K, V, D, A, C> {
    /// Looks up `key`, inserting a default-valued entry on a miss, and
    /// returns its value (spec.md §4.4, "an index operator that creates a
    /// default-valued entry on miss"). Exposed as a named method rather than
    /// `std::ops::Index`: that trait must return `&V`, but every value here
    /// lives behind the façade's shared `RefCell`, so there is no borrow to
    /// hand back without either cloning (this method) or unsafely
    /// extending a `Ref` guard's lifetime.
    pub fn index_or_default(&self, key: K) -> V
    where
        K: Clone,
        V: Clone,
    {
        let cursor = self.inner.find(&key);
        if let Ok(v) = cursor.value() {
            return v;
        }
        let result = self.inner.insert(key, V::default());
        result.cursor.value().expect("just-inserted cursor must be live")
    }
}

impl<K, V, D: DupPolicy, A: Augment, C: KeyComparator<K>> Deref for Map<K, V, D, A, C> {
    type Target = OrderedContainer<K, V, D, A, C>;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<K, V, D: DupPolicy, A: Augment, C: KeyComparator<K>> DerefMut for Map<K, V, D, A, C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl<K, V, D: DupPolicy, A: Augment, C: KeyComparator<K> + Default> FromIterator<(K, V)> for Map<K, V, D, A, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let map = Map::default();
        map.insert_range(iter);
        map
    }
}

impl<K: Clone, V: Clone, D: DupPolicy, A: Augment, C: KeyComparator<K>> Clone for Map<K, V, D, A, C> {
    fn clone(&self) -> Self {
        Map {
            inner: self.inner.clone(),
        }
    }
}

impl<K: PartialEq, V: PartialEq, D: DupPolicy, A: Augment, C: KeyComparator<K>> PartialEq for Map<K, V, D, A, C> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}
