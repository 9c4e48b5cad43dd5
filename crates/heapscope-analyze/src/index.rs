//! Graph index construction from a parsed snapshot.
//!
//! # Overview
//!
//! Builds a [`petgraph`] directed graph over a snapshot's nodes so
//! the analyzers get O(1) id lookup and neighbor queries instead of
//! rescanning `snapshot.nodes` per edge. The index borrows the
//! snapshot — nodes are never copied.
//!
//! ## Dangling edges
//!
//! An edge whose `to_node` has no parsed node cannot be added to the
//! graph; it is counted and skipped, matching the tolerate-never-fail
//! contract for dangling references.
//!
//! ## Content hash
//!
//! The index carries a BLAKE3 hash of the edge set (source id, target
//! id, edge name, in node order). Callers can compare hashes against
//! a stored value to decide whether cached analysis derived from the
//! edge set is still valid.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use tracing::trace;

use heapscope_core::error::ErrorCode;
use heapscope_core::model::{HeapEdge, HeapNode, HeapSnapshot};

/// A directed borrow-view of one snapshot's heap graph.
#[derive(Debug)]
pub struct GraphIndex<'a> {
    graph: DiGraph<&'a HeapNode, &'a HeapEdge>,
    node_map: HashMap<u64, NodeIndex>,
    content_hash: String,
    dangling_edges: usize,
}

impl<'a> GraphIndex<'a> {
    /// Build an index over `snapshot`.
    ///
    /// On duplicate node ids the last node wins, matching the
    /// parser's edge-attachment rule.
    #[must_use]
    pub fn from_snapshot(snapshot: &'a HeapSnapshot) -> Self {
        let mut graph =
            DiGraph::with_capacity(snapshot.nodes.len(), snapshot.nodes.len());
        let mut node_map: HashMap<u64, NodeIndex> =
            HashMap::with_capacity(snapshot.nodes.len());

        for node in &snapshot.nodes {
            let idx = graph.add_node(node);
            node_map.insert(node.id, idx);
        }

        let mut hasher = blake3::Hasher::new();
        let mut dangling_edges = 0_usize;

        for idx in graph.node_indices().collect::<Vec<_>>() {
            let node = graph[idx];
            for edge in &node.edges {
                hasher.update(&node.id.to_le_bytes());
                hasher.update(&edge.to_node.to_le_bytes());
                hasher.update(edge.name.as_bytes());
                hasher.update(&[0]);

                match node_map.get(&edge.to_node) {
                    Some(&target) => {
                        graph.add_edge(idx, target, edge);
                    }
                    None => dangling_edges += 1,
                }
            }
        }

        if dangling_edges > 0 {
            trace!(
                code = %ErrorCode::DanglingEdgeTarget,
                count = dangling_edges,
                "edges with missing targets excluded from graph index"
            );
        }

        Self {
            graph,
            node_map,
            content_hash: format!("blake3:{}", hasher.finalize().to_hex()),
            dangling_edges,
        }
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: u64) -> Option<&'a HeapNode> {
        self.node_map.get(&id).map(|&idx| self.graph[idx])
    }

    /// Whether an edge `from → to` exists between two node ids.
    /// Either id may be dangling; the answer is then `false`.
    #[must_use]
    pub fn has_edge_between(&self, from: u64, to: u64) -> bool {
        match (self.node_map.get(&from), self.node_map.get(&to)) {
            (Some(&from_idx), Some(&to_idx)) => {
                self.graph.find_edge(from_idx, to_idx).is_some()
            }
            _ => false,
        }
    }

    /// The underlying directed graph.
    #[must_use]
    pub const fn graph(&self) -> &DiGraph<&'a HeapNode, &'a HeapEdge> {
        &self.graph
    }

    /// BLAKE3 hash of the edge set, for cache invalidation.
    #[must_use]
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    /// Edges excluded because their target id was not in the
    /// snapshot.
    #[must_use]
    pub const fn dangling_edge_count(&self) -> usize {
        self.dangling_edges
    }
}
