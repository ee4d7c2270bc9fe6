//! Rotation primitive, ported from the teacher's `rotate_dir`
//! (`src/red_black_tree.rs`). One function handles all four named
//! configurations (left, right, left-right, right-left) because the
//! left/right-rotate distinction is entirely captured by `dir`; the
//! compound rotations fall out of calling this twice with opposite
//! directions (see `insert::fix_insert`).

use crate::arena::SENTINEL;
use crate::comparator::KeyComparator;
use crate::dup::DupPolicy;
use crate::node::{Augment, Dir};

use super::Tree;

impl<K, V, D: DupPolicy, A: Augment, C: KeyComparator<K>> Tree<K, V, D, A, C> {
    /// Rotates `parent_index` in direction `dir`: its child on the opposite
    /// side (the "sibling" here, i.e. the new subtree root) comes up, takes
    /// over `parent_index`'s position, and `parent_index` becomes its child
    /// on side `dir`. Returns the new subtree root, or `None` if there is no
    /// opposite-side child to rotate up.
    pub(crate) fn rotate_dir(&mut self, parent_index: u32, dir: Dir) -> Option<u32> {
        let grandparent_index = self.get_parent(parent_index);
        let sibling_index = self.get_dir(parent_index, dir.opposite());
        if sibling_index == SENTINEL {
            return None;
        }
        let child_index = self.get_dir(sibling_index, dir);

        self.connect(sibling_index, parent_index, dir);
        self.connect(parent_index, child_index, dir.opposite());

        if grandparent_index != SENTINEL {
            let grandparent_dir = self.child_dir(grandparent_index, parent_index);
            self.connect(grandparent_index, sibling_index, grandparent_dir);
        } else {
            self.arena.get_mut(sibling_index).parent = SENTINEL;
            self.root = sibling_index;
        }

        // parent_index moved down, so recompute it first; propagate_sizes
        // then climbs through its new parent (sibling_index) and beyond.
        self.propagate_sizes(parent_index);
        Some(sibling_index)
    }
}
