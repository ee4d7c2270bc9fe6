//! The keyed-only façade: wraps [`OrderedContainer`] with `V = ()`, covering
//! the `set`/`pset`/`multiset`/`pmultiset` variants (spec.md §6).

use std::ops::{Deref, DerefMut};

use crate::comparator::{DefaultComparator, KeyComparator};
use crate::cursor::Cursor;
use crate::dup::DupPolicy;
use crate::node::Augment;
use crate::node_handle::NodeHandle;
use crate::containers::{InsertResult, OrderedContainer};

pub struct Set<K, D: DupPolicy, A: Augment, C: KeyComparator<K> = DefaultComparator> {
    inner: OrderedContainer<K, (), D, A, C>,
}

impl<K, D: DupPolicy, A: Augment, C: KeyComparator<K> + Default> Default for Set<K, D, A, C> {
    fn default() -> Self {
        Set {
            inner: OrderedContainer::with_comparator(C::default()),
        }
    }
}

impl<K, D: DupPolicy, A: Augment, C: KeyComparator<K>> Set<K, D, A, C> {
    pub fn with_comparator(cmp: C) -> Self {
        Set {
            inner: OrderedContainer::with_comparator(cmp),
        }
    }

    pub fn insert(&self, key: K) -> InsertResult<K, (), D, A, C> {
        self.inner.insert(key, ())
    }

    pub fn insert_hint(&self, hint: &Cursor<K, (), D, A, C>, key: K) -> InsertResult<K, (), D, A, C> {
        self.inner.insert_hint(hint, key, ())
    }

    pub fn insert_range<I: IntoIterator<Item = K>>(&self, iter: I) {
        self.inner.insert_range(iter.into_iter().map(|k| (k, ())));
    }

    pub fn emplace_ascending<I: IntoIterator<Item = K>>(&self, iter: I) -> crate::error::Result<()> {
        self.inner.emplace_ascending(iter.into_iter().map(|k| (k, ())))
    }

    pub fn extract_key(&self, key: &K) -> crate::error::Result<NodeHandle<K, ()>> {
        self.inner.extract_key(key)
    }
}

impl<K, D: DupPolicy, A: Augment, C: KeyComparator<K>> Deref for Set<K, D, A, C> {
    type Target = OrderedContainer<K, (), D, A, C>;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<K, D: DupPolicy, A: Augment, C: KeyComparator<K>> DerefMut for Set<K, D, A, C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl<K, D: DupPolicy, A: Augment, C: KeyComparator<K> + Default> FromIterator<K> for Set<K, D, A, C> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let set = Set::default();
        set.insert_range(iter);
        set
    }
}

impl<K: Clone, D: DupPolicy, A: Augment, C: KeyComparator<K>> Clone for Set<K, D, A, C> {
    fn clone(&self) -> Self {
        Set {
            inner: self.inner.clone(),
        }
    }
}

impl<K: PartialEq, D: DupPolicy, A: Augment, C: KeyComparator<K>> PartialEq for Set<K, D, A, C> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}
