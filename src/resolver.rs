//! Maps a target's selector to concrete UI-tree nodes.

use std::collections::HashSet;
use tracing::debug;

use crate::target::{Selector, Target};
use crate::tree::{NodeId, UiTree};

/// Resolve a target to the de-duplicated set of nodes it denotes, in scan
/// order. An explicit component id resolves to at most one node; label
/// terms scan the addressable components for substring matches and keep
/// only the innermost of any nested pair. Resolving nothing is a normal,
/// silent no-op: the target may refer to UI that is not currently
/// rendered.
pub fn resolve(tree: &impl UiTree, target: &Target) -> Vec<NodeId> {
    match &target.selector {
        Selector::ComponentId(component_id) => {
            tree.node_by_component_id(component_id).into_iter().collect()
        }
        Selector::Labels(terms) => resolve_labels(tree, terms),
    }
}

fn resolve_labels(tree: &impl UiTree, terms: &[String]) -> Vec<NodeId> {
    let addressable = tree.addressable_nodes();
    let mut seen = HashSet::new();
    let mut resolved = Vec::new();

    for term in terms {
        let needle = normalize(term);
        if needle.is_empty() {
            // An empty needle is contained in everything
            debug!(term = %term, "Skipping empty label term");
            continue;
        }

        let candidates: Vec<NodeId> = addressable
            .iter()
            .copied()
            .filter(|&node| normalize(&tree.text_content(node)).contains(&needle))
            .collect();

        for node in innermost(tree, &candidates) {
            if seen.insert(node) {
                resolved.push(node);
            }
        }
    }

    resolved
}

/// Whitespace-collapsed, trimmed, case-folded text for matching. Matching
/// is substring containment, trading precision for coverage; callers pick
/// sufficiently specific terms.
pub(crate) fn normalize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Keep only candidates that are not a strict ancestor of another
/// candidate, so a match never toggles both a node and its container.
fn innermost(tree: &impl UiTree, candidates: &[NodeId]) -> Vec<NodeId> {
    candidates
        .iter()
        .copied()
        .filter(|&node| {
            !candidates
                .iter()
                .any(|&other| other != node && is_strict_ancestor(tree, node, other))
        })
        .collect()
}

/// True when `ancestor` lies strictly above `node` on its parent chain.
fn is_strict_ancestor(tree: &impl UiTree, ancestor: NodeId, node: NodeId) -> bool {
    let mut current = tree.parent(node);
    while let Some(cur) = current {
        if cur == ancestor {
            return true;
        }
        current = tree.parent(cur);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_tree::MemoryTree;
    use crate::tree::NodeTag;

    fn labels_target(terms: &[&str]) -> Target {
        Target {
            id: "t".to_string(),
            name: "T".to_string(),
            selector: Selector::Labels(terms.iter().map(|s| s.to_string()).collect()),
            is_custom: false,
            default_visible: None,
        }
    }

    fn component_target(component_id: &str) -> Target {
        Target {
            id: "t".to_string(),
            name: "T".to_string(),
            selector: Selector::ComponentId(component_id.to_string()),
            is_custom: false,
            default_visible: None,
        }
    }

    /// Root → outer component wrapping an inner component, both carrying
    /// the label text, plus an unrelated sibling component.
    fn nested_tree() -> (MemoryTree, NodeId, NodeId, NodeId) {
        let mut tree = MemoryTree::new();
        let outer = tree.add_component(tree.root(), NodeTag::Container, "component-1");
        let inner = tree.add_component(outer, NodeTag::Container, "component-2");
        tree.add_text(inner, "  Prompt   text ");
        let other = tree.add_component(tree.root(), NodeTag::Container, "component-3");
        tree.add_text(other, "Sampler Steps");
        (tree, outer, inner, other)
    }

    #[test]
    fn test_normalize_collapses_and_casefolds() {
        assert_eq!(normalize("  Prompt \n  Text "), "prompt text");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_component_id_resolves_single_node() {
        let (tree, _, inner, _) = nested_tree();
        assert_eq!(resolve(&tree, &component_target("component-2")), vec![inner]);
    }

    #[test]
    fn test_component_id_absent_is_empty() {
        let (tree, ..) = nested_tree();
        assert!(resolve(&tree, &component_target("component-99")).is_empty());
    }

    #[test]
    fn test_label_match_keeps_innermost_only() {
        let (tree, outer, inner, _) = nested_tree();
        // Both outer and inner contain "prompt"; only the inner may survive
        let resolved = resolve(&tree, &labels_target(&["Prompt"]));
        assert_eq!(resolved, vec![inner]);
        assert!(!resolved.contains(&outer));
    }

    #[test]
    fn test_label_match_is_case_insensitive_substring() {
        let (tree, _, _, other) = nested_tree();
        assert_eq!(resolve(&tree, &labels_target(&["sampler st"])), vec![other]);
    }

    #[test]
    fn test_multiple_terms_union_without_duplicates() {
        let (tree, _, inner, other) = nested_tree();
        let resolved = resolve(&tree, &labels_target(&["Prompt", "Steps", "prompt"]));
        assert_eq!(resolved, vec![inner, other]);
    }

    #[test]
    fn test_unmatched_term_resolves_nothing() {
        let (tree, ..) = nested_tree();
        assert!(resolve(&tree, &labels_target(&["does not exist"])).is_empty());
    }

    #[test]
    fn test_empty_term_is_skipped() {
        let (tree, ..) = nested_tree();
        assert!(resolve(&tree, &labels_target(&["   "])).is_empty());
    }

    #[test]
    fn test_sibling_matches_both_kept() {
        let mut tree = MemoryTree::new();
        let a = tree.add_component(tree.root(), NodeTag::Container, "component-1");
        tree.add_text(a, "Advanced options");
        let b = tree.add_component(tree.root(), NodeTag::Container, "component-2");
        tree.add_text(b, "Advanced sampler");

        let resolved = resolve(&tree, &labels_target(&["advanced"]));
        assert_eq!(resolved, vec![a, b]);
    }
}
