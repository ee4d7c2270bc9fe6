//! Detached node protocol (spec.md §4.5): a node removed from a tree by
//! `extract` but not destroyed, held until it is re-attached by `insert` or
//! dropped.
//!
//! The spec's `get_allocator`/allocator-propagation language mirrors the
//! real (nightly) `std` `allocator_api` convention of parameterizing
//! collections over an `Allocator` type defaulting to `Global`; this crate
//! follows that naming rather than inventing its own. Because this engine's
//! arena lives inside each `Tree` rather than behind a shared allocator
//! handle, a [`NodeHandle`] here simply owns the detached key/value pair —
//! there is no pooled memory to reclaim or reuse across containers, so
//! `swap` between handles is a plain value swap regardless of `Alloc`
//! (documented as a deliberate simplification in `DESIGN.md`).

use std::marker::PhantomData;

/// An allocator tag. `Global` is the only implementation this crate
/// provides; it exists so `NodeHandle` and the container façades carry the
/// same allocator-generic shape the spec describes, even though there is
/// currently only one allocator to name.
pub trait Allocator: Clone + Default + std::fmt::Debug {}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Global;
impl Allocator for Global {}

/// A detached node: owns exactly one key/value pair until it is consumed by
/// re-insertion or dropped (spec.md §4.5, "Owns one detached node").
pub struct NodeHandle<K, V, Alloc: Allocator = Global> {
    payload: Option<(K, V)>,
    _alloc: PhantomData<Alloc>,
}

impl<K, V, Alloc: Allocator> NodeHandle<K, V, Alloc> {
    pub(crate) fn new(key: K, value: V) -> Self {
        NodeHandle {
            payload: Some((key, value)),
            _alloc: PhantomData,
        }
    }

    /// An empty handle, as returned by `insert_return_type.node` when
    /// insertion actually succeeded (spec.md §4.4, "`node` is non-empty only
    /// if insertion was rejected").
    pub fn empty() -> Self {
        NodeHandle {
            payload: None,
            _alloc: PhantomData,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_none()
    }

    pub fn get_allocator(&self) -> Alloc {
        Alloc::default()
    }

    /// Exchanges the detached payloads (not the allocators — see module
    /// docs) of `self` and `other`.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.payload, &mut other.payload);
    }

    pub(crate) fn key(&self) -> Option<&K> {
        self.payload.as_ref().map(|(k, _)| k)
    }

    pub(crate) fn into_parts(self) -> Option<(K, V)> {
        self.payload
    }
}

impl<K, V, Alloc: Allocator> From<NodeHandle<K, V, Alloc>> for Option<(K, V)> {
    fn from(handle: NodeHandle<K, V, Alloc>) -> Self {
        handle.payload
    }
}

impl<K, V, Alloc: Allocator> Default for NodeHandle<K, V, Alloc> {
    fn default() -> Self {
        Self::empty()
    }
}
