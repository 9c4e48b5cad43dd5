//! Detached element detection.
//!
//! An element-like node that no other node claims through a
//! parent-style edge is a detachment candidate. This is a name-based
//! heuristic over direct edges, not a reachability check: a node
//! held only through a non-parent reference (an event listener list,
//! a closure) still shows up here, which is exactly the retained-but-
//! detached shape worth flagging.

use std::collections::HashSet;

use petgraph::visit::EdgeRef;

use heapscope_core::model::{HeapNode, HeapSnapshot};

use crate::index::GraphIndex;

/// Edge labels that mark a parent→child containment reference.
const PARENT_EDGE_NAMES: [&str; 4] = ["childNodes", "children", "firstChild", "lastChild"];

fn is_element_like(name: &str) -> bool {
    (name.contains("HTML") && name.contains("Element"))
        || name.contains("DocumentFragment")
        || name.contains("Document")
}

fn is_document_like(name: &str) -> bool {
    name == "HTMLDocument" || name == "Document" || name.contains("Window")
}

/// Element-like nodes with positive retained size and no parent edge.
///
/// When the snapshot contains no document-like node at all,
/// detachment cannot be evaluated and the heuristic reports nothing.
#[must_use]
pub fn detached_elements<'a>(
    snapshot: &'a HeapSnapshot,
    index: &GraphIndex<'a>,
) -> Vec<&'a HeapNode> {
    if !snapshot
        .nodes
        .iter()
        .any(|node| is_document_like(&node.name))
    {
        return Vec::new();
    }

    let parented: HashSet<u64> = index
        .graph()
        .edge_references()
        .filter(|edge| PARENT_EDGE_NAMES.contains(&edge.weight().name.as_str()))
        .map(|edge| index.graph()[edge.target()].id)
        .collect();

    snapshot
        .nodes
        .iter()
        .filter(|node| {
            is_element_like(&node.name)
                && node.retained_size > 0
                && !parented.contains(&node.id)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use heapscope_core::model::{EdgeType, HeapEdge, HeapNode, HeapSnapshot, MemoryMetrics, NodeType};

    use super::*;

    fn node(id: u64, name: &str, retained_size: u64, edges: Vec<HeapEdge>) -> HeapNode {
        HeapNode {
            id,
            name: name.to_string(),
            self_size: 8,
            retained_size,
            node_type: NodeType::Native,
            edges,
        }
    }

    fn edge(name: &str, to_node: u64) -> HeapEdge {
        HeapEdge {
            name: name.to_string(),
            edge_type: EdgeType::Internal,
            to_node,
        }
    }

    fn snapshot_of(nodes: Vec<HeapNode>) -> HeapSnapshot {
        let mut snapshot = HeapSnapshot::empty(MemoryMetrics::default());
        snapshot.object_count = nodes.len();
        snapshot.nodes = nodes;
        snapshot
    }

    fn detached_ids(snapshot: &HeapSnapshot) -> Vec<u64> {
        let index = GraphIndex::from_snapshot(snapshot);
        let mut ids: Vec<u64> = detached_elements(snapshot, &index)
            .into_iter()
            .map(|n| n.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn unparented_element_with_retained_size_is_detached() {
        let snapshot = snapshot_of(vec![
            node(1, "HTMLDocument", 100, vec![edge("childNodes", 2)]),
            node(2, "HTMLDivElement", 64, vec![]),
            node(3, "HTMLSpanElement", 32, vec![]),
        ]);

        // Node 2 is parented via childNodes; node 3 is not.
        // HTMLDocument itself has no parent edge and counts too.
        assert_eq!(detached_ids(&snapshot), vec![1, 3]);
    }

    #[test]
    fn zero_retained_size_is_not_flagged() {
        let snapshot = snapshot_of(vec![
            node(1, "Document", 100, vec![]),
            node(2, "HTMLDivElement", 0, vec![]),
        ]);
        assert_eq!(detached_ids(&snapshot), vec![1]);
    }

    #[test]
    fn non_parent_edges_do_not_count_as_parenting() {
        let snapshot = snapshot_of(vec![
            node(1, "Document", 100, vec![edge("listener", 2)]),
            node(2, "HTMLDivElement", 64, vec![]),
        ]);
        assert_eq!(detached_ids(&snapshot), vec![1, 2]);
    }

    #[test]
    fn skipped_entirely_without_a_document_like_node() {
        let snapshot = snapshot_of(vec![
            node(2, "HTMLDivElement", 64, vec![]),
            node(3, "DocumentFragment", 32, vec![]),
        ]);
        // DocumentFragment is element-like but not document-like, so
        // detachment cannot be evaluated at all.
        assert!(detached_ids(&snapshot).is_empty());
    }

    #[test]
    fn window_presence_enables_the_check() {
        let snapshot = snapshot_of(vec![
            node(1, "DOMWindow", 10, vec![]),
            node(2, "HTMLDivElement", 64, vec![]),
        ]);
        assert_eq!(detached_ids(&snapshot), vec![2]);
    }
}
