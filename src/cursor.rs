//! The cursor protocol (spec.md §4.3): a weak, versioned handle to a tree
//! node that survives across mutations by detecting them rather than by
//! being notified of them.
//!
//! Grounded on the weak-reference-plus-generation-counter pattern in
//! `examples/other_examples/25071eaf_astral-sh-ruff__crates-ruff_rowan-src-cursor.rs.rs`:
//! there, a cursor holds a weak link to its owning tree plus a green-tree
//! identity check; here the identity check is a monotonic version counter
//! bumped by every mutating `Tree` operation (spec.md §4.2, "Version
//! counter"), per the reject-on-mismatch policy resolved in SPEC_FULL.md's
//! Open Questions.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::arena::SENTINEL;
use crate::comparator::KeyComparator;
use crate::dup::DupPolicy;
use crate::error::{Error, Result};
use crate::node::Augment;
use crate::tree::Tree;

/// A cursor into a container's tree. `node == SENTINEL` means "one past the
/// last element" in this cursor's direction of travel (`end()`/`rend()`).
///
/// Cursors hold no ownership over the tree (spec.md §4.2, "Cursors hold no
/// ownership; they are spectators") — only a [`Weak`] reference, so a
/// container can be dropped out from under a live cursor without a panic;
/// the cursor simply starts reporting [`Error::StaleCursor`].
pub struct Cursor<K, V, D: DupPolicy, A: Augment, C: KeyComparator<K>> {
    pub(crate) tree: Weak<RefCell<Tree<K, V, D, A, C>>>,
    pub(crate) node: u32,
    pub(crate) version: u64,
    pub(crate) reverse: bool,
}

impl<K, V, D: DupPolicy, A: Augment, C: KeyComparator<K>> Clone for Cursor<K, V, D, A, C> {
    fn clone(&self) -> Self {
        Cursor {
            tree: self.tree.clone(),
            node: self.node,
            version: self.version,
            reverse: self.reverse,
        }
    }
}

impl<K, V, D: DupPolicy, A: Augment, C: KeyComparator<K>> Cursor<K, V, D, A, C> {
    pub(crate) fn new(tree: &Rc<RefCell<Tree<K, V, D, A, C>>>, node: u32, reverse: bool) -> Self {
        Cursor {
            tree: Rc::downgrade(tree),
            node,
            version: tree.borrow().version(),
            reverse,
        }
    }

    fn upgrade(&self) -> Result<Rc<RefCell<Tree<K, V, D, A, C>>>> {
        self.tree.upgrade().ok_or(Error::StaleCursor)
    }

    /// Re-reads the tree's current version, accepting whatever mutation has
    /// happened since this cursor was created or last resynced (spec.md
    /// §4.3, "Cursors expose an explicit `resync`").
    pub fn resync(&mut self) -> Result<()> {
        let tree = self.upgrade()?;
        self.version = tree.borrow().version();
        Ok(())
    }

    fn checked_tree(&self) -> Result<Rc<RefCell<Tree<K, V, D, A, C>>>> {
        let tree = self.upgrade()?;
        if tree.borrow().version() != self.version {
            return Err(Error::StaleCursor);
        }
        Ok(tree)
    }

    /// `true` if this cursor addresses no element (`end()`/`rend()`).
    pub fn is_null(&self) -> bool {
        self.node == SENTINEL
    }

    /// Calls `f` with the key and value this cursor addresses. Fails with
    /// [`Error::OutOfBounds`] for a null cursor, or [`Error::StaleCursor`]
    /// if the tree is gone or has mutated since this cursor observed it
    /// (spec.md §4.3, "Access").
    pub fn with<R>(&self, f: impl FnOnce(&K, &V) -> R) -> Result<R> {
        let tree = self.checked_tree()?;
        if self.node == SENTINEL {
            return Err(Error::OutOfBounds);
        }
        let tree = tree.borrow();
        Ok(f(tree.key(self.node), tree.value(self.node)))
    }

    /// Clones the key this cursor addresses.
    pub fn key(&self) -> Result<K>
    where
        K: Clone,
    {
        self.with(|k, _| k.clone())
    }

    /// Clones the value this cursor addresses.
    pub fn value(&self) -> Result<V>
    where
        V: Clone,
    {
        self.with(|_, v| v.clone())
    }

    /// This cursor's in-order position: `0` for the smallest element, `len`
    /// for `end()`. Reverse cursors count from the back, so `rbegin()` is
    /// position `0` and `rend()` is position `len` (spec.md §4.3,
    /// "Arithmetic", "reversed for reverse cursors").
    pub fn index(&self) -> Result<usize> {
        let tree = self.checked_tree()?;
        let tree = tree.borrow();
        let len = tree.len();
        let fwd = tree.index_of(self.node);
        Ok(if self.reverse {
            if self.node == SENTINEL {
                len
            } else {
                len - 1 - fwd
            }
        } else {
            fwd
        })
    }

    /// Steps `delta` positions in this cursor's direction of travel.
    /// `delta` is negated for reverse cursors, so `next`/`prev` are simply
    /// `advance(1)`/`advance(-1)` regardless of direction.
    pub fn advance(&mut self, delta: i64) -> Result<()> {
        let tree = self.checked_tree()?;
        let signed = if self.reverse { -delta } else { delta };
        let next = tree.borrow().advance(self.node, signed);
        if signed != 0 && next == SENTINEL && !Self::delta_lands_on_end(&tree, self.node, signed) {
            return Err(Error::OutOfBounds);
        }
        self.node = next;
        Ok(())
    }

    /// `advance` on a fresh-enough cursor can only legitimately land on
    /// `SENTINEL` if the destination position is exactly `len` (one past the
    /// end) or, symmetrically, `-1`; [`Tree::advance`] already returns
    /// `SENTINEL` for both "landed on end" and "fell outside `[0, len]`", so
    /// this re-derives which one happened from the starting index.
    fn delta_lands_on_end(tree: &Rc<RefCell<Tree<K, V, D, A, C>>>, from: u32, delta: i64) -> bool {
        let tree = tree.borrow();
        let start = tree.index_of(from) as i64;
        let target = start + delta;
        target == tree.len() as i64
    }

    pub fn next(&mut self) -> Result<()> {
        self.advance(1)
    }

    pub fn prev(&mut self) -> Result<()> {
        self.advance(-1)
    }
}

/// Ordering/distance between cursors (spec.md §4.3, "Comparison"). Both
/// cursors must be alive, current, and from the same container, or the
/// comparison fails outright rather than guessing.
pub fn distance<K, V, D: DupPolicy, A: Augment, C: KeyComparator<K>>(
    a: &Cursor<K, V, D, A, C>,
    b: &Cursor<K, V, D, A, C>,
) -> Result<i64> {
    let ta = a.upgrade()?;
    let tb = b.upgrade()?;
    if !Rc::ptr_eq(&ta, &tb) {
        return Err(Error::CrossContainerCompare);
    }
    let ia = a.index()? as i64;
    let ib = b.index()? as i64;
    Ok(ia - ib)
}

pub fn compare<K, V, D: DupPolicy, A: Augment, C: KeyComparator<K>>(
    a: &Cursor<K, V, D, A, C>,
    b: &Cursor<K, V, D, A, C>,
) -> Result<std::cmp::Ordering> {
    distance(a, b).map(|d| d.cmp(&0))
}
