//! Shallow circular-reference detection.
//!
//! Flags self-loops and bidirectional neighbor pairs (A→B with B→A).
//! This checks direct neighbors only — it is NOT full cycle
//! detection, and longer cycles (A→B→C→A) pass through unflagged.
//! Preserved as a documented limitation: widening it to real cycle
//! detection changes which nodes get reported.

use heapscope_core::model::{HeapNode, HeapSnapshot};

use crate::index::GraphIndex;

/// Nodes with a self-loop or a bidirectional reference to a direct
/// neighbor.
#[must_use]
pub fn circular_references<'a>(
    snapshot: &'a HeapSnapshot,
    index: &GraphIndex<'a>,
) -> Vec<&'a HeapNode> {
    snapshot
        .nodes
        .iter()
        .filter(|node| {
            let self_loop = node.edges.iter().any(|edge| edge.to_node == node.id);
            let back_ref = node.edges.iter().any(|edge| {
                edge.to_node != node.id && index.has_edge_between(edge.to_node, node.id)
            });
            self_loop || back_ref
        })
        .collect()
}
