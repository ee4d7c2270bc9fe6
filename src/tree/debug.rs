//! Debug rendering and invariant checking. Grounded on the teacher's
//! `pretty_print`/`is_valid_red_black_tree` (`src/red_black_tree.rs`), with
//! the `colored` crate's `Colorize` actually driving the red highlighting
//! (the teacher imports `Colorize` but never calls it, writing the ANSI
//! escape for red directly instead).

use colored::Colorize;

use crate::arena::SENTINEL;
use crate::comparator::KeyComparator;
use crate::dup::DupPolicy;
use crate::node::Augment;

use super::Tree;

impl<K: std::fmt::Debug, V, D: DupPolicy, A: Augment, C: KeyComparator<K>> Tree<K, V, D, A, C> {
    /// Renders the tree as an indented, colour-highlighted outline (red
    /// nodes in red) — a debugging aid, not part of the stable API.
    pub fn fmt_tree(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(self.root, String::new(), String::new())];
        while let Some((node, mut padding, pointer)) = stack.pop() {
            if node == SENTINEL {
                continue;
            }
            out.push_str(&padding);
            out.push_str(&pointer);
            let label = format!("{:?}", self.key(node));
            if self.is_red(node) {
                out.push_str(&label.red().to_string());
            } else {
                out.push_str(&label);
            }
            out.push('\n');
            padding.push_str("│  ");

            let right_pointer = "└──".to_string();
            let left_pointer = if self.get_right(node) != SENTINEL {
                "├──".to_string()
            } else {
                "└──".to_string()
            };
            stack.push((self.get_right(node), padding.clone(), right_pointer));
            stack.push((self.get_left(node), padding, left_pointer));
        }
        out
    }
}

#[cfg(test)]
impl<K, V, D: DupPolicy, A: Augment, C: KeyComparator<K>> Tree<K, V, D, A, C> {
    /// Checks the three red-black invariants (spec.md §3): root is black,
    /// no red node has a red child, and every root-to-null path carries the
    /// same number of black nodes. Used only by this crate's own unit
    /// tests, mirroring the teacher's `is_valid_red_black_tree`.
    pub(crate) fn is_valid_red_black_tree(&self) -> bool {
        if self.is_red(self.root) {
            return false;
        }
        let mut stack = vec![(self.root, 0u32)];
        let mut black_counts = Vec::new();
        while let Some((node, mut count)) = stack.pop() {
            if self.is_black(node) {
                count += 1;
            }
            if node == SENTINEL {
                black_counts.push(count);
                continue;
            }
            if self.is_red(node) && (self.is_red(self.get_left(node)) || self.is_red(self.get_right(node))) {
                return false;
            }
            stack.push((self.get_left(node), count));
            stack.push((self.get_right(node), count));
        }
        black_counts.iter().all(|&c| c == black_counts[0])
    }
}
