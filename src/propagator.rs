//! Safe hide/show with bounded ancestor collapsing
//!
//! Hiding a node can leave its container rendering nothing but padding, so
//! the walk collapses ancestors that become entirely empty, and only
//! those. The collapsed-by-engine marker is the sole authority for what
//! `show` may re-reveal: an ancestor hidden by anything else is never
//! forced visible.

use std::collections::HashSet;
use tracing::debug;

use crate::constants::walk::MAX_ANCESTOR_DEPTH;
use crate::tree::{NodeId, UiTree};

#[derive(Debug, Default)]
pub struct VisibilityPropagator {
    /// Ancestors this engine collapsed; cleared as `show` restores them
    collapsed: HashSet<NodeId>,
}

impl VisibilityPropagator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide or show a node, dispatching to the matching walk.
    pub fn apply(&mut self, tree: &mut impl UiTree, node: NodeId, visible: bool) {
        if visible {
            self.show(tree, node);
        } else {
            self.hide(tree, node);
        }
    }

    /// Hide `node`, then collapse each ancestor whose layout-relevant
    /// children are now all invisible. The walk stops at the document
    /// root, at any structural boundary, at the first ancestor with a
    /// visible child, and after [`MAX_ANCESTOR_DEPTH`] levels. Idempotent.
    pub fn hide(&mut self, tree: &mut impl UiTree, node: NodeId) {
        tree.set_visible(node, false);

        let mut current = tree.parent(node);
        let mut steps = 0;
        while steps < MAX_ANCESTOR_DEPTH {
            let Some(cur) = current else { break };
            if tree.parent(cur).is_none() || tree.is_boundary(cur) {
                break;
            }

            let relevant: Vec<NodeId> = tree
                .children(cur)
                .into_iter()
                .filter(|&child| tree.tag(child).is_layout_relevant())
                .collect();
            if relevant.is_empty() || relevant.iter().any(|&child| tree.is_visible(child)) {
                break;
            }

            debug!(node = cur, "Collapsing emptied ancestor");
            self.collapsed.insert(cur);
            tree.set_visible(cur, false);
            current = tree.parent(cur);
            steps += 1;
        }
    }

    /// Show `node`, then restore each ancestor this engine collapsed,
    /// innermost first, clearing its marker. The walk stops at the
    /// document root, at the first unmarked ancestor, and after
    /// [`MAX_ANCESTOR_DEPTH`] levels. Idempotent.
    pub fn show(&mut self, tree: &mut impl UiTree, node: NodeId) {
        tree.set_visible(node, true);

        let mut current = tree.parent(node);
        let mut steps = 0;
        while steps < MAX_ANCESTOR_DEPTH {
            let Some(cur) = current else { break };
            if tree.parent(cur).is_none() {
                break;
            }
            if !self.collapsed.remove(&cur) {
                // Hidden by something else, or never collapsed: leave it
                break;
            }

            debug!(node = cur, "Restoring collapsed ancestor");
            tree.set_visible(cur, true);
            current = tree.parent(cur);
            steps += 1;
        }
    }

    /// Whether `node` currently carries the collapsed-by-engine marker.
    pub fn is_collapsed(&self, node: NodeId) -> bool {
        self.collapsed.contains(&node)
    }

    /// Number of ancestors currently marked collapsed.
    pub fn collapsed_len(&self) -> usize {
        self.collapsed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_tree::MemoryTree;
    use crate::tree::NodeTag;

    /// Root → a → b → c → leaf, all containers, nothing else.
    fn chain() -> (MemoryTree, NodeId, NodeId, NodeId, NodeId) {
        let mut tree = MemoryTree::new();
        let a = tree.add_node(tree.root(), NodeTag::Container);
        let b = tree.add_node(a, NodeTag::Container);
        let c = tree.add_node(b, NodeTag::Container);
        let leaf = tree.add_node(c, NodeTag::Container);
        (tree, a, b, c, leaf)
    }

    #[test]
    fn test_hide_collapses_emptied_chain_show_restores_it() {
        let (mut tree, a, b, c, leaf) = chain();
        let mut propagator = VisibilityPropagator::new();

        propagator.hide(&mut tree, leaf);
        for node in [leaf, c, b, a] {
            assert!(!tree.is_visible(node));
        }
        for node in [c, b, a] {
            assert!(propagator.is_collapsed(node));
        }
        assert!(tree.is_visible(tree.root()));

        propagator.show(&mut tree, leaf);
        for node in [leaf, c, b, a] {
            assert!(tree.is_visible(node));
        }
        assert_eq!(propagator.collapsed_len(), 0);
    }

    #[test]
    fn test_hide_stops_at_visible_sibling() {
        let (mut tree, a, b, c, leaf) = chain();
        let sibling = tree.add_node(b, NodeTag::Button);
        let mut propagator = VisibilityPropagator::new();

        propagator.hide(&mut tree, leaf);
        // c emptied and collapsed; b still has the visible button
        assert!(!tree.is_visible(c));
        assert!(propagator.is_collapsed(c));
        assert!(tree.is_visible(b));
        assert!(tree.is_visible(a));
        assert!(tree.is_visible(sibling));
        assert_eq!(propagator.collapsed_len(), 1);
    }

    #[test]
    fn test_text_children_do_not_keep_a_container_open() {
        let mut tree = MemoryTree::new();
        let section = tree.add_node(tree.root(), NodeTag::Container);
        let row = tree.add_node(section, NodeTag::Container);
        tree.add_text(section, "decorative caption");
        let mut propagator = VisibilityPropagator::new();

        propagator.hide(&mut tree, row);
        // The text child is not layout-relevant, so the section collapses
        assert!(!tree.is_visible(section));
        assert!(propagator.is_collapsed(section));
    }

    #[test]
    fn test_walk_never_crosses_structural_boundary() {
        let (mut tree, a, b, _c, leaf) = chain();
        tree.mark_boundary(b);
        let mut propagator = VisibilityPropagator::new();

        propagator.hide(&mut tree, leaf);
        // c collapses, b is a boundary and stays untouched, a is never reached
        assert!(tree.is_visible(b));
        assert!(tree.is_visible(a));
        assert!(!propagator.is_collapsed(b));
        assert_eq!(propagator.collapsed_len(), 1);
    }

    #[test]
    fn test_walk_is_capped() {
        // A chain two levels deeper than the cap allows
        let mut tree = MemoryTree::new();
        let mut chain = vec![tree.add_node(tree.root(), NodeTag::Container)];
        for _ in 0..(MAX_ANCESTOR_DEPTH + 2) {
            let next = tree.add_node(*chain.last().unwrap(), NodeTag::Container);
            chain.push(next);
        }
        let leaf = *chain.last().unwrap();
        let mut propagator = VisibilityPropagator::new();

        propagator.hide(&mut tree, leaf);
        assert_eq!(propagator.collapsed_len(), MAX_ANCESTOR_DEPTH);
        // The ancestors beyond the cap are left alone even though empty
        assert!(tree.is_visible(chain[0]));
        assert!(tree.is_visible(chain[1]));
    }

    #[test]
    fn test_show_never_reveals_ancestor_hidden_by_others() {
        let (mut tree, _a, _b, c, leaf) = chain();
        // c was hidden by unrelated host logic, not by the engine
        tree.set_visible(c, false);
        tree.set_visible(leaf, false);
        let mut propagator = VisibilityPropagator::new();

        propagator.show(&mut tree, leaf);
        assert!(tree.is_visible(leaf));
        assert!(!tree.is_visible(c));
    }

    #[test]
    fn test_hide_and_show_are_idempotent() {
        let (mut tree, a, b, c, leaf) = chain();
        let mut propagator = VisibilityPropagator::new();

        propagator.hide(&mut tree, leaf);
        let collapsed_after_first = propagator.collapsed_len();
        propagator.hide(&mut tree, leaf);
        assert_eq!(propagator.collapsed_len(), collapsed_after_first);

        propagator.show(&mut tree, leaf);
        propagator.show(&mut tree, leaf);
        assert_eq!(propagator.collapsed_len(), 0);
        for node in [leaf, c, b, a] {
            assert!(tree.is_visible(node));
        }
    }

    #[test]
    fn test_overlapping_targets_restore_pairwise() {
        // Two leaves under one parent; hiding both collapses it, showing
        // one leaf restores it, showing the other touches nothing extra.
        let mut tree = MemoryTree::new();
        let parent = tree.add_node(tree.root(), NodeTag::Container);
        let left = tree.add_node(parent, NodeTag::Container);
        let right = tree.add_node(parent, NodeTag::Container);
        let mut propagator = VisibilityPropagator::new();

        propagator.hide(&mut tree, left);
        assert!(tree.is_visible(parent));
        propagator.hide(&mut tree, right);
        assert!(!tree.is_visible(parent));
        assert!(propagator.is_collapsed(parent));

        propagator.show(&mut tree, left);
        assert!(tree.is_visible(parent));
        assert_eq!(propagator.collapsed_len(), 0);

        propagator.show(&mut tree, right);
        assert!(tree.is_visible(parent));
        assert!(tree.is_visible(left));
        assert!(tree.is_visible(right));
    }
}
