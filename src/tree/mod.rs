//! The red-black tree engine. Ported from the teacher's
//! `src/red_black_tree.rs`, generalized from a fixed-capacity,
//! `bytemuck`-overlaid buffer to a growable arena (`crate::arena`), and
//! augmented with the optional subtree-size bookkeeping that makes
//! rank/select logarithmic (spec.md §4.1–§4.2).
//!
//! Submodules hold one concern each, mirroring the split the pack's
//! `scapegoat` crate uses for its own arena-backed tree
//! (`arena.rs`/`node.rs`/`tree.rs`):
//! - [`rotate`] — the four rotation primitives and subtree-size propagation.
//! - [`insert`] — hinted/unhinted insertion and red-red fixup.
//! - [`erase`] — extraction, erasure, and double-black fixup.
//! - [`rank`] — minimum/maximum/successor/predecessor/advance/index_of.
//! - [`bulk`] — flatten-to-list and build-from-list bulk construction.
//! - [`debug`] — colour-highlighted tree rendering and invariant checking.

pub(crate) mod bulk;
pub(crate) mod debug;
pub(crate) mod erase;
pub(crate) mod insert;
pub(crate) mod rank;
pub(crate) mod rotate;

use std::marker::PhantomData;

use crate::arena::{Arena, SENTINEL};
use crate::comparator::KeyComparator;
use crate::dup::DupPolicy;
use crate::node::{Augment, Color, Dir, NodeData};

pub(crate) struct Tree<K, V, D: DupPolicy, A: Augment, C: KeyComparator<K>> {
    pub(crate) arena: Arena<NodeData<K, V, A>>,
    pub(crate) root: u32,
    pub(crate) len: usize,
    pub(crate) version: u64,
    pub(crate) cmp: C,
    _dup: PhantomData<D>,
}

impl<K, V, D: DupPolicy, A: Augment, C: KeyComparator<K>> Tree<K, V, D, A, C> {
    pub(crate) fn new(cmp: C) -> Self {
        Tree {
            arena: Arena::new(),
            root: SENTINEL,
            len: 0,
            version: 0,
            cmp,
            _dup: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn version(&self) -> u64 {
        self.version
    }

    #[inline]
    pub(crate) fn bump_version(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    #[inline]
    pub(crate) fn root(&self) -> u32 {
        self.root
    }

    #[inline]
    pub(crate) fn key(&self, node: u32) -> &K {
        &self.arena.get(node).key
    }

    #[inline]
    pub(crate) fn value(&self, node: u32) -> &V {
        &self.arena.get(node).value
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, node: u32) -> &mut V {
        &mut self.arena.get_mut(node).value
    }

    #[inline]
    pub(crate) fn get_left(&self, node: u32) -> u32 {
        if node == SENTINEL {
            SENTINEL
        } else {
            self.arena.get(node).left
        }
    }

    #[inline]
    pub(crate) fn get_right(&self, node: u32) -> u32 {
        if node == SENTINEL {
            SENTINEL
        } else {
            self.arena.get(node).right
        }
    }

    #[inline]
    pub(crate) fn get_parent(&self, node: u32) -> u32 {
        if node == SENTINEL {
            SENTINEL
        } else {
            self.arena.get(node).parent
        }
    }

    #[inline]
    pub(crate) fn get_dir(&self, node: u32, dir: Dir) -> u32 {
        match dir {
            Dir::Left => self.get_left(node),
            Dir::Right => self.get_right(node),
        }
    }

    #[inline]
    pub(crate) fn color(&self, node: u32) -> Color {
        // A null child is conventionally black (spec.md §3 inv. 2 treats
        // every root-to-null path as terminating in an implicit black leaf).
        if node == SENTINEL {
            Color::Black
        } else {
            self.arena.get(node).color
        }
    }

    #[inline]
    pub(crate) fn is_red(&self, node: u32) -> bool {
        node != SENTINEL && self.color(node) == Color::Red
    }

    #[inline]
    pub(crate) fn is_black(&self, node: u32) -> bool {
        !self.is_red(node)
    }

    #[inline]
    pub(crate) fn color_red(&mut self, node: u32) {
        if node != SENTINEL {
            self.arena.get_mut(node).color = Color::Red;
        }
    }

    #[inline]
    pub(crate) fn color_black(&mut self, node: u32) {
        if node != SENTINEL {
            self.arena.get_mut(node).color = Color::Black;
        }
    }

    #[inline]
    pub(crate) fn color_node(&mut self, node: u32, color: Color) {
        if node != SENTINEL {
            self.arena.get_mut(node).color = color;
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self, node: u32) -> bool {
        self.get_left(node) == SENTINEL && self.get_right(node) == SENTINEL
    }

    pub(crate) fn child_dir(&self, parent: u32, child: u32) -> Dir {
        if self.get_left(parent) == child {
            Dir::Left
        } else if self.get_right(parent) == child {
            Dir::Right
        } else {
            panic!("nodes are not connected")
        }
    }

    /// Attaches `child` under `parent` on side `dir`, and sets `child`'s
    /// parent link to match (spec.md §3 inv. 3). A `SENTINEL` child is a
    /// no-op on the child side (there is nothing to update).
    pub(crate) fn connect(&mut self, parent: u32, child: u32, dir: Dir) {
        if parent != SENTINEL {
            match dir {
                Dir::Left => self.arena.get_mut(parent).left = child,
                Dir::Right => self.arena.get_mut(parent).right = child,
            }
        }
        if child != SENTINEL {
            self.arena.get_mut(child).parent = parent;
        }
    }

    #[inline]
    pub(crate) fn subtree_size(&self, node: u32) -> usize {
        if node == SENTINEL {
            0
        } else {
            self.arena.get(node).aug.subtree_size()
        }
    }

    /// Recomputes `node`'s own size from its (already-correct) children,
    /// then climbs toward the root, stopping as soon as an ancestor's size
    /// doesn't change (spec.md §4.2, "Subtree-size updates propagate upward
    /// only as far as a node whose size is unchanged, then stop").
    pub(crate) fn propagate_sizes(&mut self, mut node: u32) {
        if !A::INDEXED {
            return;
        }
        while node != SENTINEL {
            let new_size = 1 + self.subtree_size(self.get_left(node)) + self.subtree_size(self.get_right(node));
            let old_size = self.subtree_size(node);
            self.arena.get_mut(node).aug.set_subtree_size(new_size);
            if new_size == old_size {
                break;
            }
            node = self.get_parent(node);
        }
    }

    // ---- lookup -----------------------------------------------------

    /// Deepest node whose key is `>= key`, or `SENTINEL` if none (spec.md
    /// §4.2, `lower_bound`).
    pub(crate) fn lower_bound_node(&self, key: &K) -> u32 {
        let mut node = self.root;
        let mut result = SENTINEL;
        while node != SENTINEL {
            if !self.cmp.less(self.key(node), key) {
                result = node;
                node = self.get_left(node);
            } else {
                node = self.get_right(node);
            }
        }
        result
    }

    /// Deepest node whose key is `> key`, or `SENTINEL` if none (spec.md
    /// §4.2, `upper_bound`).
    pub(crate) fn upper_bound_node(&self, key: &K) -> u32 {
        let mut node = self.root;
        let mut result = SENTINEL;
        while node != SENTINEL {
            if self.cmp.less(key, self.key(node)) {
                result = node;
                node = self.get_left(node);
            } else {
                node = self.get_right(node);
            }
        }
        result
    }

    pub(crate) fn find_node(&self, key: &K) -> u32 {
        let node = self.lower_bound_node(key);
        if node != SENTINEL && self.cmp.equal(self.key(node), key) {
            node
        } else {
            SENTINEL
        }
    }

    /// `count(k) = index_of(upper_bound(k)) - index_of(lower_bound(k))`
    /// (spec.md §4.2). O(log N) when indexed, O(N) otherwise.
    pub(crate) fn count_key(&self, key: &K) -> usize {
        let lo = self.lower_bound_node(key);
        let hi = self.upper_bound_node(key);
        self.index_of(hi) - self.index_of(lo)
    }

    /// Post-order destruction: every node is removed only after both of its
    /// children are already gone (spec.md §4.2, "Clear"), matching the
    /// allocator discipline a manual-allocation backend needs even though
    /// this arena's `Vec` drop would be safe regardless.
    pub(crate) fn clear(&mut self) {
        let mut stack = vec![self.root];
        let mut post = Vec::with_capacity(self.len);
        while let Some(node) = stack.pop() {
            if node == SENTINEL {
                continue;
            }
            post.push(node);
            stack.push(self.get_left(node));
            stack.push(self.get_right(node));
        }
        for node in post.into_iter().rev() {
            self.arena.remove(node);
        }
        self.root = SENTINEL;
        self.len = 0;
        self.bump_version();
    }
}

impl<K: Clone, V: Clone, D: DupPolicy, A: Augment, C: KeyComparator<K>> Clone for Tree<K, V, D, A, C> {
    /// Structurally isomorphic copy (spec.md §4.2, "Copy"). Because this
    /// engine addresses nodes by arena index rather than by pointer, a
    /// straight arena clone already reproduces the source tree's exact
    /// link/color/augmentation structure under the same handles, with no
    /// need for the source's own pre-order reconstruct-and-rebalance walk.
    fn clone(&self) -> Self {
        Tree {
            arena: self.arena.clone(),
            root: self.root,
            len: self.len,
            version: 0,
            cmp: self.cmp.clone(),
            _dup: PhantomData,
        }
    }
}

impl<K: PartialEq, V: PartialEq, D: DupPolicy, A: Augment, C: KeyComparator<K>> PartialEq
    for Tree<K, V, D, A, C>
{
    /// Same size and pairwise-equal elements in order (spec.md §4.4,
    /// "Equality").
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }
        let mut a = self.minimum(self.root);
        let mut b = other.minimum(other.root);
        while a != SENTINEL && b != SENTINEL {
            if self.key(a) != other.key(b) || self.value(a) != other.value(b) {
                return false;
            }
            a = self.successor(a);
            b = other.successor(b);
        }
        a == SENTINEL && b == SENTINEL
    }
}
