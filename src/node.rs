//! Node payload and the indexed/plain augmentation.
//!
//! Ported from `RBNode`/`TreeField` in the teacher's `src/red_black_tree.rs`
//! and `src/node_allocator.rs`: a node there is a fixed-layout struct with
//! `key`, `value`, and register slots for `left`/`right`/`parent`/color. The
//! difference here is the subtree-size register is not always present — it
//! exists only for the indexed variant (spec.md §3, "indexed variant").
//! That's modeled as a generic `Augment` parameter rather than a runtime
//! flag, per spec.md §9's "tagged variant or compile-time generic
//! parameter" note, so a plain container pays zero memory for sizes it
//! never uses.

use crate::arena::SENTINEL;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Dir {
    Left,
    Right,
}

impl Dir {
    #[inline(always)]
    pub(crate) fn opposite(self) -> Dir {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

/// The per-node augmentation. `Plain` carries nothing; `Indexed` carries the
/// subtree-size counter that makes rank/select queries logarithmic.
pub trait Augment: Copy + Default + std::fmt::Debug {
    /// `true` for the indexed variant. Lets `Tree` pick the O(log N)
    /// rank/select algorithm when sizes are actually maintained, and fall
    /// back to an O(N) traversal when they aren't, without a second copy of
    /// the tree's insert/erase code.
    const INDEXED: bool;

    fn subtree_size(&self) -> usize;
    fn set_subtree_size(&mut self, size: usize);
}

/// The non-augmented node layout: no memory overhead, `advance`/`index_of`
/// degrade to O(N) traversal (spec.md §4.1, "Non-indexed variant").
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Plain;

impl Augment for Plain {
    const INDEXED: bool = false;

    #[inline(always)]
    fn subtree_size(&self) -> usize {
        0
    }

    #[inline(always)]
    fn set_subtree_size(&mut self, _size: usize) {}
}

/// The rank/select-augmented node layout.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Indexed {
    size: usize,
}

impl Augment for Indexed {
    const INDEXED: bool = true;

    #[inline(always)]
    fn subtree_size(&self) -> usize {
        self.size
    }

    #[inline(always)]
    fn set_subtree_size(&mut self, size: usize) {
        self.size = size;
    }
}

/// One tree node: structural links plus the stored element.
///
/// Equality and ordering of the surrounding tree operate on `key` only
/// (spec.md §3); `value` is mutable in place for map/multimap variants and
/// is `()` for set/multiset variants.
#[derive(Debug, Clone)]
pub(crate) struct NodeData<K, V, A: Augment> {
    pub(crate) left: u32,
    pub(crate) right: u32,
    pub(crate) parent: u32,
    pub(crate) color: Color,
    pub(crate) aug: A,
    pub(crate) key: K,
    pub(crate) value: V,
}

impl<K, V, A: Augment> NodeData<K, V, A> {
    pub(crate) fn new_red(key: K, value: V) -> Self {
        NodeData {
            left: SENTINEL,
            right: SENTINEL,
            parent: SENTINEL,
            color: Color::Red,
            aug: A::default(),
            key,
            value,
        }
    }
}
