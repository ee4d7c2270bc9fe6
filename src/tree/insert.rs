//! Insertion, hint validation, and the red-red fixup. Ported from the
//! teacher's `_insert`/`fix_insert` (`src/red_black_tree.rs`), generalized
//! over the unique/multi policy (the teacher only ever overwrites on a key
//! match; multi-mode instead always descends right on equal keys, per
//! spec.md §4.2 "Multi mode").

use std::cmp::Ordering;

use crate::arena::SENTINEL;
use crate::comparator::KeyComparator;
use crate::dup::DupPolicy;
use crate::node::{Augment, Dir, NodeData};

use super::Tree;

impl<K, V, D: DupPolicy, A: Augment, C: KeyComparator<K>> Tree<K, V, D, A, C> {
    /// Unhinted insertion: descend from the root comparing `key` against
    /// every visited node (spec.md §4.2, "Insertion").
    pub(crate) fn insert_entry(&mut self, key: K, value: V) -> (u32, bool) {
        if self.root == SENTINEL {
            let node = self.arena.insert(NodeData::new_red(key, value));
            self.color_black(node);
            self.root = node;
            self.len = 1;
            self.bump_version();
            return (node, true);
        }

        let mut reference = self.root;
        loop {
            let dir = match self.cmp.compare(&key, self.key(reference)) {
                Ordering::Less => Dir::Left,
                Ordering::Greater => Dir::Right,
                Ordering::Equal => {
                    if !D::ALLOW_DUPLICATES {
                        *self.value_mut(reference) = value;
                        self.bump_version();
                        return (reference, false);
                    }
                    Dir::Right
                }
            };
            let target = self.get_dir(reference, dir);
            if target == SENTINEL {
                return (self.attach_new(reference, dir, key, value), true);
            }
            reference = target;
        }
    }

    /// Hinted insertion (spec.md §4.2, "Hint validation"). `hint`'s nearest
    /// predecessor/successor are computed via the parent chain
    /// ([`Tree::predecessor`]/[`Tree::successor`], which is exactly the
    /// "walk the spine, ascend to ancestors when necessary" procedure the
    /// spec describes); if `key` falls strictly between them the new node
    /// attaches directly under `hint` or its predecessor/successor, with no
    /// search from the root.
    pub(crate) fn insert_with_hint(&mut self, hint: u32, key: K, value: V) -> (u32, bool) {
        if hint == SENTINEL || self.root == SENTINEL {
            return self.insert_entry(key, value);
        }
        match self.cmp.compare(&key, self.key(hint)) {
            Ordering::Equal => self.insert_entry(key, value),
            Ordering::Less => {
                let pred = self.predecessor(hint);
                let bounded = pred == SENTINEL || self.cmp.less(self.key(pred), &key);
                if !bounded {
                    return self.insert_entry(key, value);
                }
                let (parent, dir) = if self.get_left(hint) == SENTINEL {
                    (hint, Dir::Left)
                } else {
                    // `pred` is the maximum of hint's left subtree, so it
                    // has no right child.
                    (pred, Dir::Right)
                };
                (self.attach_new(parent, dir, key, value), true)
            }
            Ordering::Greater => {
                let succ = self.successor(hint);
                let bounded = succ == SENTINEL || self.cmp.less(&key, self.key(succ));
                if !bounded {
                    return self.insert_entry(key, value);
                }
                let (parent, dir) = if self.get_right(hint) == SENTINEL {
                    (hint, Dir::Right)
                } else {
                    // `succ` is the minimum of hint's right subtree, so it
                    // has no left child.
                    (succ, Dir::Left)
                };
                (self.attach_new(parent, dir, key, value), true)
            }
        }
    }

    fn attach_new(&mut self, parent: u32, dir: Dir, key: K, value: V) -> u32 {
        let node = self.arena.insert(NodeData::new_red(key, value));
        self.connect(parent, node, dir);
        self.len += 1;
        self.propagate_sizes(parent);
        self.fix_insert(node);
        self.bump_version();
        node
    }

    /// Restores the red-black invariants after attaching a red leaf
    /// (spec.md §4.2, "Rebalancing after insertion").
    pub(crate) fn fix_insert(&mut self, mut node: u32) {
        while self.is_red(self.get_parent(node)) {
            let mut parent = self.get_parent(node);
            let mut grandparent = self.get_parent(parent);
            if grandparent == SENTINEL {
                // parent is the root; roots are recolored black below.
                break;
            }
            let dir = self.child_dir(grandparent, parent);
            let uncle = self.get_dir(grandparent, dir.opposite());
            if self.is_red(uncle) {
                self.color_black(uncle);
                self.color_black(parent);
                self.color_red(grandparent);
                node = grandparent;
            } else {
                if self.child_dir(parent, node) == dir.opposite() {
                    self.rotate_dir(parent, dir);
                    node = parent;
                }
                parent = self.get_parent(node);
                grandparent = self.get_parent(parent);
                self.color_black(parent);
                self.color_red(grandparent);
                self.rotate_dir(grandparent, dir.opposite());
            }
        }
        self.color_black(self.root);
    }
}

#[cfg(test)]
mod tests {
    use crate::arena::SENTINEL;
    use crate::comparator::DefaultComparator;
    use crate::dup::Unique;
    use crate::node::Plain;

    use super::Tree;

    fn new_tree() -> Tree<u64, (), Unique, Plain, DefaultComparator> {
        Tree::new(DefaultComparator)
    }

    /// Parent and uncle both red: resolved by recoloring parent and uncle
    /// black and the grandparent red, then continuing the fixup from there.
    #[test]
    fn insert_with_red_parent_and_uncle() {
        let mut tree = new_tree();
        for key in [61, 52, 85, 76, 93] {
            tree.insert_entry(key, ());
        }
        let grandparent = tree.find_node(&85);
        let parent = tree.find_node(&93);
        let uncle = tree.find_node(&76);
        assert!(tree.is_red(parent) && tree.is_red(uncle));
        assert!(tree.is_black(grandparent));

        tree.insert_entry(100, ());
        assert!(tree.is_black(parent) && tree.is_black(uncle));
        assert!(tree.is_red(grandparent));
        assert!(tree.is_valid_red_black_tree());
    }

    /// Parent red, uncle black, new leaf and parent both right children:
    /// resolved by a single left rotation at the grandparent.
    #[test]
    fn insert_with_red_parent_black_uncle_triggers_rotation() {
        let mut tree = new_tree();
        for key in [10, 5, 20] {
            tree.insert_entry(key, ());
        }
        tree.insert_entry(25, ());
        assert!(tree.is_valid_red_black_tree());
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn insert_duplicate_in_unique_mode_overwrites_and_reports_not_inserted() {
        let mut tree = new_tree();
        tree.insert_entry(1, ());
        let (_, inserted) = tree.insert_entry(1, ());
        assert!(!inserted);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn hinted_insertion_matches_unhinted_search() {
        let mut tree = new_tree();
        for key in [10, 20, 30, 40, 50] {
            tree.insert_entry(key, ());
        }
        let hint = tree.find_node(&30);
        let (node, inserted) = tree.insert_with_hint(hint, 35, ());
        assert!(inserted);
        assert_eq!(tree.successor(node), tree.find_node(&40));
        assert_eq!(tree.predecessor(node), tree.find_node(&30));
        assert!(tree.is_valid_red_black_tree());
    }

    #[test]
    fn invalid_hint_falls_back_to_full_search() {
        let mut tree = new_tree();
        for key in [10, 20, 30] {
            tree.insert_entry(key, ());
        }
        let bad_hint = tree.find_node(&10);
        let (node, inserted) = tree.insert_with_hint(bad_hint, 25, ());
        assert!(inserted);
        assert_ne!(node, SENTINEL);
        assert_eq!(tree.find_node(&25), node);
        assert!(tree.is_valid_red_black_tree());
    }
}
