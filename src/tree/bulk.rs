//! Bulk construction from an already-sorted sequence (spec.md §4.2, "Bulk
//! build from sorted sequence") and rebalancing an existing tree (spec.md
//! §1, "rebalance-from-flat-list"). Both share the same two phases: flatten
//! a tree into an ascending linked list, then build a balanced,
//! correctly-colored tree back up from a list of a known length.
//!
//! The teacher has no equivalent of this (sokoban's tree is always built by
//! repeated `insert`), so this module is grounded on spec.md §4.2 directly,
//! following the structure the teacher uses elsewhere for multi-step
//! arena-index bookkeeping (explicit `u32` links, no recursion helpers
//! beyond what the call stack itself provides).

use crate::arena::SENTINEL;
use crate::comparator::KeyComparator;
use crate::dup::DupPolicy;
use crate::error::{Error, Result};
use crate::node::{Augment, Color, Dir, NodeData};

use super::Tree;

impl<K, V, D: DupPolicy, A: Augment, C: KeyComparator<K>> Tree<K, V, D, A, C> {
    /// In-order traversal that overwrites each visited node's `right` link
    /// with its in-order successor, zeroing `left` and `parent`: turns the
    /// tree into a singly linked ascending list. Returns `(head, len)`.
    /// `self.root` is left pointing at whatever the caller intends to
    /// rebuild into; callers that mean to discard the old structure should
    /// set `self.root = SENTINEL` themselves once they've captured `head`.
    pub(crate) fn flatten_to_list(&mut self) -> (u32, usize) {
        let head = self.minimum(self.root);
        let mut node = self.root;
        let mut stack = Vec::new();
        let mut prev = SENTINEL;
        let mut count = 0;
        while node != SENTINEL || !stack.is_empty() {
            while node != SENTINEL {
                stack.push(node);
                node = self.get_left(node);
            }
            node = stack.pop().unwrap();
            self.arena.get_mut(node).left = SENTINEL;
            self.arena.get_mut(node).parent = SENTINEL;
            if prev != SENTINEL {
                self.arena.get_mut(prev).right = node;
            }
            let next = self.get_right(node);
            prev = node;
            count += 1;
            node = next;
        }
        if prev != SENTINEL {
            self.arena.get_mut(prev).right = SENTINEL;
        }
        (head, count)
    }

    /// Rebuilds the tree to minimum height over its current elements:
    /// flatten to an ascending list, then build back up from it (spec.md
    /// §1, "rebalance-from-flat-list"). A no-op on an empty tree.
    pub(crate) fn rebalance(&mut self) {
        let (head, len) = self.flatten_to_list();
        self.build_from_list(head, len);
    }

    /// Rebuilds a balanced, validly-colored tree from an ascending singly
    /// linked list of `len` nodes (`right`-linked, as produced by
    /// [`Self::flatten_to_list`]). Recursively picks the middle element of
    /// each sublist as that subtree's root; nodes at `max_depth =
    /// ceil(log2(len))` are red, everything shallower is black, and when
    /// `len` is an exact power of two there is no red frontier at all
    /// (spec.md §4.2, "Build-from-list").
    pub(crate) fn build_from_list(&mut self, head: u32, len: usize) {
        if len == 0 {
            self.root = SENTINEL;
            self.len = 0;
            return;
        }
        let max_depth = ceil_log2(len);
        let mut cursor = head;
        let root = self.build_subtree(&mut cursor, len, 0, max_depth);
        self.arena.get_mut(root).parent = SENTINEL;
        self.color_black(root);
        self.root = root;
        self.len = len;
        self.propagate_sizes(root);
        self.bump_version();
    }

    /// Consumes exactly `count` nodes from the front of the `cursor` list,
    /// wiring up a balanced subtree over them, and returns its root. `depth`
    /// is this subtree root's depth in the final tree; a node is colored red
    /// only if `depth == max_depth` (the single allowed red frontier).
    fn build_subtree(&mut self, cursor: &mut u32, count: usize, depth: usize, max_depth: usize) -> u32 {
        if count == 0 {
            return SENTINEL;
        }
        let left_count = (count - 1) / 2;
        let right_count = count - 1 - left_count;

        let left = self.build_subtree(cursor, left_count, depth + 1, max_depth);

        let root = *cursor;
        let next = self.get_right(root);
        *cursor = next;

        let right = self.build_subtree(cursor, right_count, depth + 1, max_depth);

        self.connect(root, left, Dir::Left);
        self.connect(root, right, Dir::Right);
        self.color_node(root, if depth == max_depth { Color::Red } else { Color::Black });
        self.propagate_sizes(root);
        root
    }

    /// Consumes `iter`'s elements in order, verifying they arrive in
    /// non-decreasing order (strictly increasing when `!D::ALLOW_DUPLICATES`),
    /// and builds a balanced tree from the result. On an order violation,
    /// every node allocated so far is deallocated and `self` is left empty
    /// (spec.md §4.2, "`construct_from_ascending_iterator`"; §7, "bulk build
    /// ... must deallocate the N partial allocations before returning the
    /// error").
    pub(crate) fn construct_from_ascending_iterator<I>(&mut self, iter: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.clear();
        let mut nodes: Vec<u32> = Vec::new();
        let mut last_key: Option<u32> = None;

        for (key, value) in iter {
            if let Some(last) = last_key {
                let ordered = if D::ALLOW_DUPLICATES {
                    !self.cmp.less(&key, self.key(last))
                } else {
                    self.cmp.less(self.key(last), &key)
                };
                if !ordered {
                    for node in nodes {
                        self.arena.remove(node);
                    }
                    return Err(Error::OrderViolation);
                }
            }
            let node = self.arena.insert(NodeData::new_red(key, value));
            if let Some(last) = last_key {
                self.arena.get_mut(last).right = node;
            }
            last_key = Some(node);
            nodes.push(node);
        }

        let len = nodes.len();
        let head = nodes.first().copied().unwrap_or(SENTINEL);
        self.build_from_list(head, len);
        Ok(())
    }
}

fn ceil_log2(n: usize) -> usize {
    debug_assert!(n > 0);
    if n == 1 {
        return 0;
    }
    let mut depth = 0;
    let mut cap = 1usize;
    while cap < n {
        cap <<= 1;
        depth += 1;
    }
    depth
}

#[cfg(test)]
mod tests {
    use crate::comparator::DefaultComparator;
    use crate::dup::{Multi, Unique};
    use crate::error::Error;
    use crate::node::{Indexed, Plain};

    use super::Tree;

    fn new_tree() -> Tree<u64, (), Unique, Indexed, DefaultComparator> {
        Tree::new(DefaultComparator)
    }

    fn count_red(tree: &Tree<u64, (), Unique, Indexed, DefaultComparator>, node: u32) -> usize {
        if node == crate::arena::SENTINEL {
            return 0;
        }
        let red = tree.is_red(node) as usize;
        red + count_red(tree, tree.get_left(node)) + count_red(tree, tree.get_right(node))
    }

    /// A perfectly-fillable size (`2^d - 1`) bulk-builds with no red nodes
    /// at all: spec.md §8's worked example for this shape.
    #[test]
    fn ascending_build_of_exact_perfect_size_is_all_black() {
        let mut tree = new_tree();
        tree.construct_from_ascending_iterator((1..=7u64).map(|k| (k, ()))).unwrap();
        assert!(tree.is_valid_red_black_tree());
        assert_eq!(count_red(&tree, tree.root()), 0);
        assert_eq!(tree.subtree_size(tree.root()), 7);
    }

    /// `L = 8` is one more than the perfect size 7, so a minimum-height
    /// tree needs exactly one red leaf at the deepest level — not zero
    /// (see `DESIGN.md`'s note on spec.md §8's scenario 5).
    #[test]
    fn ascending_build_of_eight_elements_has_one_red_leaf() {
        let mut tree = new_tree();
        tree.construct_from_ascending_iterator((1..=8u64).map(|k| (k, ()))).unwrap();
        assert!(tree.is_valid_red_black_tree());
        assert_eq!(count_red(&tree, tree.root()), 1);
        assert_eq!(tree.subtree_size(tree.root()), 8);
    }

    #[test]
    fn ascending_build_rejects_out_of_order_input_and_leaves_tree_empty() {
        let mut tree = new_tree();
        let result = tree.construct_from_ascending_iterator([(1, ()), (3, ()), (2, ())]);
        assert_eq!(result, Err(Error::OrderViolation));
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.root(), crate::arena::SENTINEL);
    }

    #[test]
    fn ascending_build_in_multi_mode_allows_non_strict_order() {
        let mut tree: Tree<u64, (), Multi, Plain, DefaultComparator> = Tree::new(DefaultComparator);
        tree.construct_from_ascending_iterator([(1, ()), (1, ()), (2, ())]).unwrap();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.count_key(&1), 2);
    }

    #[test]
    fn ascending_build_in_unique_mode_rejects_strict_duplicates() {
        let mut tree = new_tree();
        let result = tree.construct_from_ascending_iterator([(1, ()), (1, ())]);
        assert_eq!(result, Err(Error::OrderViolation));
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn rebalance_preserves_elements_and_validity() {
        let mut tree = new_tree();
        for key in 0..50u64 {
            tree.insert_entry(key, ());
        }
        let version_before = tree.version();

        tree.rebalance();

        assert!(tree.is_valid_red_black_tree());
        assert_eq!(tree.len(), 50);
        assert_ne!(tree.version(), version_before);
        for key in 0..50u64 {
            assert_ne!(tree.find_node(&key), crate::arena::SENTINEL);
        }
    }

    #[test]
    fn rebalance_on_empty_tree_is_a_no_op() {
        let mut tree = new_tree();
        tree.rebalance();
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.root(), crate::arena::SENTINEL);
    }
}
