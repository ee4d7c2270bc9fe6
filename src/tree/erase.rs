//! Extraction, erasure, and the double-black fixup.
//!
//! Grounded on the teacher's `transplant`/`fix_remove`/`_remove`
//! (`src/red_black_tree.rs`), with two corrections against the teacher's
//! version:
//!
//! 1. The teacher's two-children case reattaches the spliced-in
//!    predecessor's children with what looks like a transposed
//!    left/right — and its own test suite has a `panic!("Stop here")` left
//!    inside `test_delete_multiple_random`'s per-step deletion loop at a
//!    specific iteration, which reads as an abandoned repro for a deletion
//!    bug rather than finished code. This crate instead uses the standard
//!    CLRS successor-splice (z's successor, not predecessor, takes z's
//!    place; z's left and right subtrees are reattached to the successor's
//!    left and right respectively), which is straightforward to verify
//!    against the red-black invariants directly.
//! 2. `fix_remove`'s sibling lookup needs to know which side the
//!    "doubly-black" node was on even when that node is `SENTINEL` (a null
//!    child can't answer `child_dir`, and a parent can have two `SENTINEL`
//!    children at once, which is ambiguous). The teacher threads an
//!    `Option<(parent, dir)>` through for exactly this reason; this crate
//!    does the same via an explicit `dir` parameter on the first loop
//!    iteration, recomputing it from the (now-real) node on every
//!    subsequent iteration.

use crate::arena::SENTINEL;
use crate::comparator::KeyComparator;
use crate::dup::DupPolicy;
use crate::node::{Augment, Color, Dir, NodeData};

use super::Tree;

impl<K, V, D: DupPolicy, A: Augment, C: KeyComparator<K>> Tree<K, V, D, A, C> {
    /// Connects `target`'s parent to `source`, the first step of removing
    /// `target` from the tree (spec.md §4.2, "transplant").
    pub(crate) fn transplant(&mut self, target: u32, source: u32) {
        let parent = self.get_parent(target);
        if parent == SENTINEL {
            self.root = source;
            if source != SENTINEL {
                self.arena.get_mut(source).parent = SENTINEL;
            }
            return;
        }
        let dir = self.child_dir(parent, target);
        self.connect(parent, source, dir);
    }

    /// Detaches `node` from the tree and returns its payload, restoring the
    /// red-black invariants. Used by both `extract` (the caller keeps the
    /// payload, e.g. wrapped in a node handle) and `erase` (the caller
    /// drops it) — per spec.md §4.2, the two differ only in what happens to
    /// the detached node afterward, not in how the tree is repaired.
    pub(crate) fn extract_at(&mut self, z: u32) -> NodeData<K, V, A> {
        let left = self.get_left(z);
        let right = self.get_right(z);

        let original_color;
        let (mut fixup_x, mut fixup_parent, mut fixup_dir);

        if left == SENTINEL {
            original_color = self.color(z);
            fixup_x = right;
            fixup_parent = self.get_parent(z);
            fixup_dir = if fixup_parent != SENTINEL {
                self.child_dir(fixup_parent, z)
            } else {
                Dir::Left
            };
            self.transplant(z, right);
            self.propagate_sizes(fixup_parent);
        } else if right == SENTINEL {
            original_color = self.color(z);
            fixup_x = left;
            fixup_parent = self.get_parent(z);
            fixup_dir = if fixup_parent != SENTINEL {
                self.child_dir(fixup_parent, z)
            } else {
                Dir::Left
            };
            self.transplant(z, left);
            self.propagate_sizes(fixup_parent);
        } else {
            // Successor splice: y is the minimum of z's right subtree, so
            // it has no left child.
            let y = self.minimum(right);
            original_color = self.color(y);
            let x = self.get_right(y);

            if self.get_parent(y) == z {
                fixup_x = x;
                fixup_parent = y;
                fixup_dir = Dir::Right;
            } else {
                let y_parent = self.get_parent(y);
                fixup_x = x;
                fixup_parent = y_parent;
                fixup_dir = Dir::Left;
                self.transplant(y, x);
                self.connect(y, right, Dir::Right);
                self.propagate_sizes(y_parent);
            }
            self.connect(y, left, Dir::Left);
            self.transplant(z, y);
            self.color_node(y, self.color(z));
            self.propagate_sizes(y);
            // fixup_parent was computed before `y` moved into `z`'s spot;
            // when y was z's direct child, y (now in z's old position) is
            // still the correct fixup parent.
            let _ = &mut fixup_dir;
        }

        let data = self.arena.remove(z);
        self.len -= 1;

        if original_color == Color::Black {
            self.fix_remove(fixup_x, fixup_parent, fixup_dir);
        }
        self.bump_version();
        data
    }

    /// Restores the red-black invariants after a black node has been
    /// spliced out, leaving `x` "doubly black" (spec.md §4.2, "Fix
    /// deletion").
    fn fix_remove(&mut self, mut x: u32, mut parent: u32, mut dir: Dir) {
        while x != self.root && self.is_black(x) {
            if parent == SENTINEL {
                break;
            }
            let mut sibling = self.get_dir(parent, dir.opposite());

            if self.is_red(sibling) {
                self.color_black(sibling);
                self.color_red(parent);
                self.rotate_dir(parent, dir);
                sibling = self.get_dir(parent, dir.opposite());
            }

            if self.is_black(self.get_left(sibling)) && self.is_black(self.get_right(sibling)) {
                self.color_red(sibling);
                x = parent;
                parent = self.get_parent(x);
                if parent != SENTINEL {
                    dir = self.child_dir(parent, x);
                }
            } else {
                if self.is_black(self.get_dir(sibling, dir.opposite())) {
                    self.color_black(self.get_dir(sibling, dir));
                    self.color_red(sibling);
                    self.rotate_dir(sibling, dir.opposite());
                    sibling = self.get_dir(parent, dir.opposite());
                }
                self.color_node(sibling, self.color(parent));
                self.color_black(parent);
                self.color_black(self.get_dir(sibling, dir.opposite()));
                self.rotate_dir(parent, dir);
                x = self.root;
                parent = SENTINEL;
            }
        }
        self.color_black(x);
    }
}

#[cfg(test)]
mod tests {
    use crate::comparator::DefaultComparator;
    use crate::dup::{Multi, Unique};
    use crate::node::{Indexed, Plain};

    use super::Tree;

    fn new_tree() -> Tree<u64, (), Unique, Plain, DefaultComparator> {
        Tree::new(DefaultComparator)
    }

    #[test]
    fn erase_leaf_node() {
        let mut tree = new_tree();
        for key in [50, 25, 75, 10] {
            tree.insert_entry(key, ());
        }
        let leaf = tree.find_node(&10);
        tree.extract_at(leaf);
        assert_eq!(tree.len(), 3);
        assert!(tree.is_valid_red_black_tree());
        assert_eq!(tree.find_node(&10), crate::arena::SENTINEL);
    }

    #[test]
    fn erase_node_with_two_children_uses_successor_splice() {
        let mut tree = new_tree();
        for key in [50, 25, 75, 10, 30, 60, 90] {
            tree.insert_entry(key, ());
        }
        let target = tree.find_node(&50);
        tree.extract_at(target);
        assert!(tree.is_valid_red_black_tree());
        assert_eq!(tree.len(), 6);
        // 60 was 50's in-order successor and must now sit at the root.
        assert_eq!(tree.key(tree.root()), &60);
    }

    #[test]
    fn erase_every_node_in_random_order_preserves_invariants() {
        let mut tree = new_tree();
        let keys: Vec<u64> = (0..200).collect();
        for &key in &keys {
            tree.insert_entry(key, ());
        }
        // Deterministic pseudo-shuffle: no external RNG dependency needed for
        // a unit test that just wants "not insertion order".
        let mut order = keys.clone();
        for i in 0..order.len() {
            order.swap(i, (i * 37 + 11) % order.len());
        }
        for key in order {
            let node = tree.find_node(&key);
            tree.extract_at(node);
            assert!(tree.is_valid_red_black_tree());
        }
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn erase_updates_subtree_sizes_for_indexed_variant() {
        let mut tree: Tree<u64, (), Multi, Indexed, DefaultComparator> = Tree::new(DefaultComparator);
        for key in [1, 2, 3, 4, 5] {
            tree.insert_entry(key, ());
        }
        let node = tree.find_node(&3);
        tree.extract_at(node);
        assert_eq!(tree.subtree_size(tree.root()), 4);
    }
}
