//! The container façade shared by every variant (spec.md §4.4): translates
//! key/value operations into `Tree` calls, wraps cursors around the
//! `Rc<RefCell<Tree>>` the façade owns, and bumps the version counter on
//! every mutation by simply delegating to `Tree`, which already does so.
//!
//! Grounded on the teacher's top-level `RedBlackTree` inherent impl
//! (`src/red_black_tree.rs`) for the shape of the public surface (insert /
//! remove / get / contains / iter), generalized to the `Rc<RefCell<_>>`
//! shared-ownership model spec.md §4.2 requires so cursors can outlive
//! individual calls.

use std::cell::RefCell;
use std::rc::Rc;

use crate::arena::SENTINEL;
use crate::comparator::{DefaultComparator, KeyComparator};
use crate::cursor::Cursor;
use crate::dup::DupPolicy;
use crate::error::{Error, Result};
use crate::node::Augment;
use crate::node_handle::{Allocator, Global, NodeHandle};
use crate::tree::Tree;

/// Returned by `insert`-family calls (spec.md §4.4, "`insert_return_type`").
/// `node` is non-empty only when insertion was rejected as a duplicate in
/// unique mode, in which case it hands the caller's element back.
pub struct InsertResult<K, V, D: DupPolicy, A: Augment, C: KeyComparator<K>, Alloc: Allocator = Global> {
    pub cursor: Cursor<K, V, D, A, C>,
    pub inserted: bool,
    pub node: NodeHandle<K, V, Alloc>,
}

/// The shared container façade. `Set`/`Map` (and their eight type-alias
/// combinations) are thin wrappers around this with value-shape-specific
/// extras layered on top.
pub struct OrderedContainer<K, V, D: DupPolicy, A: Augment, C: KeyComparator<K> = DefaultComparator> {
    pub(crate) tree: Rc<RefCell<Tree<K, V, D, A, C>>>,
}

impl<K, V, D: DupPolicy, A: Augment, C: KeyComparator<K>> OrderedContainer<K, V, D, A, C> {
    pub fn with_comparator(cmp: C) -> Self {
        OrderedContainer {
            tree: Rc::new(RefCell::new(Tree::new(cmp))),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Renders the underlying tree for debugging (spec.md's ambient-stack
    /// "logging" section: no `log`/`tracing` dependency, just the teacher's
    /// own `colored`-highlighted outline).
    pub fn fmt_tree(&self) -> String
    where
        K: std::fmt::Debug,
    {
        self.tree.borrow().fmt_tree()
    }

    fn cursor(&self, node: u32) -> Cursor<K, V, D, A, C> {
        Cursor::new(&self.tree, node, false)
    }

    fn rcursor(&self, node: u32) -> Cursor<K, V, D, A, C> {
        Cursor::new(&self.tree, node, true)
    }

    pub fn begin(&self) -> Cursor<K, V, D, A, C> {
        let root = self.tree.borrow().root();
        self.cursor(self.tree.borrow().minimum(root))
    }

    pub fn end(&self) -> Cursor<K, V, D, A, C> {
        self.cursor(SENTINEL)
    }

    pub fn rbegin(&self) -> Cursor<K, V, D, A, C> {
        let root = self.tree.borrow().root();
        self.rcursor(self.tree.borrow().maximum(root))
    }

    pub fn rend(&self) -> Cursor<K, V, D, A, C> {
        self.rcursor(SENTINEL)
    }

    // ---- lookup ------------------------------------------------------

    pub fn contains(&self, key: &K) -> bool {
        self.tree.borrow().find_node(key) != SENTINEL
    }

    pub fn count(&self, key: &K) -> usize {
        self.tree.borrow().count_key(key)
    }

    pub fn find(&self, key: &K) -> Cursor<K, V, D, A, C> {
        self.cursor(self.tree.borrow().find_node(key))
    }

    pub fn lower_bound(&self, key: &K) -> Cursor<K, V, D, A, C> {
        self.cursor(self.tree.borrow().lower_bound_node(key))
    }

    pub fn upper_bound(&self, key: &K) -> Cursor<K, V, D, A, C> {
        self.cursor(self.tree.borrow().upper_bound_node(key))
    }

    pub fn equal_range(&self, key: &K) -> (Cursor<K, V, D, A, C>, Cursor<K, V, D, A, C>) {
        (self.lower_bound(key), self.upper_bound(key))
    }

    // ---- mutation ------------------------------------------------------

    pub fn insert(&self, key: K, value: V) -> InsertResult<K, V, D, A, C> {
        let (node, inserted) = self.tree.borrow_mut().insert_entry(key, value);
        InsertResult {
            cursor: self.cursor(node),
            inserted,
            node: NodeHandle::empty(),
        }
    }

    /// `hint` is a conjectured insertion neighborhood; a valid hint makes
    /// this amortized O(1) instead of O(log N) (spec.md §4.2, "Hint
    /// validation"). An invalid or stale hint silently falls back to a
    /// normal search — never an error, since the hint is only ever advice.
    pub fn insert_hint(&self, hint: &Cursor<K, V, D, A, C>, key: K, value: V) -> InsertResult<K, V, D, A, C> {
        let hint_node = if hint.tree.ptr_eq(&Rc::downgrade(&self.tree)) {
            hint.node
        } else {
            SENTINEL
        };
        let (node, inserted) = self.tree.borrow_mut().insert_with_hint(hint_node, key, value);
        InsertResult {
            cursor: self.cursor(node),
            inserted,
            node: NodeHandle::empty(),
        }
    }

    pub fn insert_range<I: IntoIterator<Item = (K, V)>>(&self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }

    pub fn emplace(&self, key: K, value: V) -> InsertResult<K, V, D, A, C> {
        self.insert(key, value)
    }

    pub fn emplace_hint(&self, hint: &Cursor<K, V, D, A, C>, key: K, value: V) -> InsertResult<K, V, D, A, C> {
        self.insert_hint(hint, key, value)
    }

    /// Consumes an ascending iterator in one pass via
    /// `construct_from_ascending_iterator` (spec.md §4.2). Replaces any
    /// existing contents; on an order violation the container is left
    /// empty and no nodes leak.
    pub fn emplace_ascending<I: IntoIterator<Item = (K, V)>>(&self, iter: I) -> Result<()> {
        self.tree.borrow_mut().construct_from_ascending_iterator(iter)
    }

    /// Erases the element `cursor` addresses, returning a cursor to the
    /// element that followed it.
    pub fn erase_cursor(&self, cursor: &Cursor<K, V, D, A, C>) -> Result<Cursor<K, V, D, A, C>> {
        if !cursor.tree.ptr_eq(&Rc::downgrade(&self.tree)) {
            return Err(Error::CrossContainerCompare);
        }
        if cursor.node == SENTINEL {
            return Err(Error::OutOfBounds);
        }
        if self.tree.borrow().version() != cursor.version {
            return Err(Error::StaleCursor);
        }
        let next = self.tree.borrow().successor(cursor.node);
        self.tree.borrow_mut().extract_at(cursor.node);
        Ok(self.cursor(next))
    }

    /// Erases every element in `[first, last)`, returning a cursor to
    /// `last`'s element. `last` must still resolve correctly after each
    /// single-node erase, which is exactly what its explicit `resync` is
    /// for (spec.md §4.3, "`erase(begin, end)` can re-use an `end` cursor
    /// across many single-node erases").
    pub fn erase_range(
        &self,
        first: &Cursor<K, V, D, A, C>,
        last: &mut Cursor<K, V, D, A, C>,
    ) -> Result<Cursor<K, V, D, A, C>> {
        if !first.tree.ptr_eq(&Rc::downgrade(&self.tree)) || !last.tree.ptr_eq(&Rc::downgrade(&self.tree)) {
            return Err(Error::CrossContainerCompare);
        }
        let mut cur = first.clone();
        loop {
            last.resync()?;
            if cur.node == last.node {
                break;
            }
            if cur.node == SENTINEL {
                return Err(Error::OutOfBounds);
            }
            cur = self.erase_cursor(&cur)?;
        }
        Ok(self.cursor(last.node))
    }

    pub fn erase_key(&self, key: &K) -> usize {
        let mut count = 0;
        loop {
            let node = self.tree.borrow().find_node(key);
            if node == SENTINEL {
                break;
            }
            self.tree.borrow_mut().extract_at(node);
            count += 1;
            if !D::ALLOW_DUPLICATES {
                break;
            }
        }
        count
    }

    pub fn clear(&self) {
        self.tree.borrow_mut().clear();
    }

    /// Exchanges the underlying trees wholesale: O(1), and leaves neither
    /// side in an intermediate state (spec.md §4.4, "Swap, move-assign").
    /// Bumps both sides' version counters, since every cursor into either
    /// container now addresses the other container's tree (spec.md §4.2,
    /// "Bumped by every mutating operation ... swap").
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.tree, &mut other.tree);
        self.tree.borrow_mut().bump_version();
        other.tree.borrow_mut().bump_version();
    }

    /// Rebuilds the tree to minimum height over its current elements, via
    /// flatten-to-list followed by build-from-list (spec.md §1,
    /// "rebalance-from-flat-list"). Useful after a long run of deletions has
    /// left the tree taller than it needs to be.
    pub fn rebalance(&self) {
        self.tree.borrow_mut().rebalance();
    }

    /// Transfers every element of `other` into `self`, re-inserting each
    /// one; in unique mode, elements `self` already has stay behind in
    /// `other` instead of overwriting it (spec.md §4.4, "falling back to
    /// returning not-insertable items to the source").
    pub fn merge(&self, other: &Self) {
        if Rc::ptr_eq(&self.tree, &other.tree) {
            return;
        }
        let mut node = {
            let tree = other.tree.borrow();
            tree.minimum(tree.root())
        };
        while node != SENTINEL {
            let next = other.tree.borrow().successor(node);
            let already_present = !D::ALLOW_DUPLICATES && {
                let tree = other.tree.borrow();
                self.contains(tree.key(node))
            };
            if !already_present {
                let data = other.tree.borrow_mut().extract_at(node);
                self.tree.borrow_mut().insert_entry(data.key, data.value);
            }
            node = next;
        }
    }

    // ---- detached node protocol ----------------------------------------

    pub fn extract_cursor(&self, cursor: &Cursor<K, V, D, A, C>) -> Result<NodeHandle<K, V>> {
        if !cursor.tree.ptr_eq(&Rc::downgrade(&self.tree)) {
            return Err(Error::CrossContainerCompare);
        }
        if cursor.node == SENTINEL {
            return Err(Error::OutOfBounds);
        }
        if self.tree.borrow().version() != cursor.version {
            return Err(Error::StaleCursor);
        }
        let data = self.tree.borrow_mut().extract_at(cursor.node);
        Ok(NodeHandle::new(data.key, data.value))
    }

    pub fn extract_key(&self, key: &K) -> Result<NodeHandle<K, V>> {
        let node = self.tree.borrow().find_node(key);
        if node == SENTINEL {
            return Err(Error::KeyNotFound);
        }
        let data = self.tree.borrow_mut().extract_at(node);
        Ok(NodeHandle::new(data.key, data.value))
    }

    /// Re-attaches a detached handle. In unique mode, a key already present
    /// rejects the insertion outright: the existing element is left
    /// untouched, and the caller's own `(key, value)` is handed back in
    /// `node` rather than overwriting it (spec.md §4.4, "`node` is
    /// non-empty only if insertion was rejected as a duplicate in unique
    /// mode").
    pub fn insert_node(&self, handle: NodeHandle<K, V>) -> InsertResult<K, V, D, A, C> {
        match handle.into_parts() {
            None => InsertResult {
                cursor: self.end(),
                inserted: false,
                node: NodeHandle::empty(),
            },
            Some((key, value)) => {
                if !D::ALLOW_DUPLICATES {
                    let existing = self.tree.borrow().find_node(&key);
                    if existing != SENTINEL {
                        return InsertResult {
                            cursor: self.cursor(existing),
                            inserted: false,
                            node: NodeHandle::new(key, value),
                        };
                    }
                }
                let (node, _) = self.tree.borrow_mut().insert_entry(key, value);
                InsertResult {
                    cursor: self.cursor(node),
                    inserted: true,
                    node: NodeHandle::empty(),
                }
            }
        }
    }
}

impl<K: Clone, V: Clone, D: DupPolicy, A: Augment, C: KeyComparator<K>> Clone for OrderedContainer<K, V, D, A, C> {
    fn clone(&self) -> Self {
        OrderedContainer {
            tree: Rc::new(RefCell::new(self.tree.borrow().clone())),
        }
    }
}

impl<K: PartialEq, V: PartialEq, D: DupPolicy, A: Augment, C: KeyComparator<K>> PartialEq
    for OrderedContainer<K, V, D, A, C>
{
    fn eq(&self, other: &Self) -> bool {
        *self.tree.borrow() == *other.tree.borrow()
    }
}

impl<K, V, D: DupPolicy, A: Augment, C: KeyComparator<K> + Default> FromIterator<(K, V)>
    for OrderedContainer<K, V, D, A, C>
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let container = OrderedContainer::with_comparator(C::default());
        container.insert_range(iter);
        container
    }
}
