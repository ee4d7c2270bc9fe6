//! Pluggable ordering predicates.
//!
//! The teacher engine (`RedBlackTree` in the example pack) compares keys
//! directly via `Ord`. This crate generalizes that to a predicate object so
//! a container can be built over a custom total order (spec.md §6,
//! "Ordering predicate contract") without requiring `K: Ord`.

use std::cmp::Ordering;

/// A total order on `K`, usable heterogeneously: implementations may accept
/// comparisons between `K` and a borrowed form of `K` by implementing this
/// trait generically, the same way `lower_bound`/`find` are specified to
/// work with transparent keys.
pub trait KeyComparator<K>: Clone {
    fn compare(&self, a: &K, b: &K) -> Ordering;

    #[inline]
    fn equal(&self, a: &K, b: &K) -> bool {
        self.compare(a, b) == Ordering::Equal
    }

    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        self.compare(a, b) == Ordering::Less
    }
}

/// The default predicate: `K`'s own `Ord` implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultComparator;

impl<K: Ord> KeyComparator<K> for DefaultComparator {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Wraps a closure as a [`KeyComparator`], for callers who want a one-off
/// predicate without naming a type.
#[derive(Clone, Copy)]
pub struct FnComparator<F>(pub F);

impl<K, F> KeyComparator<K> for FnComparator<F>
where
    F: Fn(&K, &K) -> Ordering + Clone,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        (self.0)(a, b)
    }
}
