use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::clock;
use crate::id::generate_snapshot_id;
use crate::model::node::HeapNode;

/// Aggregate heap counters at a point in time.
///
/// Wire names follow the flat-metrics capture payload
/// (`totalJSHeapSize` and friends). The `timestamp` is the capture
/// time reported by the source and may differ from the owning
/// snapshot's parse-time [`HeapSnapshot::timestamp`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryMetrics {
    #[serde(rename = "totalJSHeapSize", default)]
    pub total_heap_size: u64,
    #[serde(rename = "usedJSHeapSize", default)]
    pub used_heap_size: u64,
    #[serde(rename = "jsHeapSizeLimit", default)]
    pub heap_size_limit: u64,
    #[serde(default)]
    pub timestamp: i64,
}

/// A parsed heap snapshot: the normalized node/edge model plus
/// aggregate metrics.
///
/// Snapshots are immutable once constructed — the parser produces one
/// and every consumer only reads it. Derived structures (diff results,
/// leak lists) borrow the same nodes rather than copying them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeapSnapshot {
    /// Globally unique snapshot id, generated at parse time.
    pub id: String,
    /// Parse-time clock in milliseconds (not the capture time).
    pub timestamp: i64,
    pub nodes: Vec<HeapNode>,
    /// Ids of nodes whose name carries a root marker.
    pub root_node_ids: BTreeSet<u64>,
    /// Always equal to `nodes.len()`.
    pub object_count: usize,
    pub metrics: MemoryMetrics,
}

impl HeapSnapshot {
    /// A snapshot with no graph, carrying only `metrics`.
    ///
    /// Produced for flat-metrics captures and for every degraded
    /// parse (capture unavailable, malformed input).
    #[must_use]
    pub fn empty(metrics: MemoryMetrics) -> Self {
        Self {
            id: generate_snapshot_id(),
            timestamp: clock::now_millis(),
            nodes: Vec::new(),
            root_node_ids: BTreeSet::new(),
            object_count: 0,
            metrics,
        }
    }

    /// Look up a node by id. Linear scan; analyzers that do repeated
    /// lookups build a `GraphIndex` instead.
    #[must_use]
    pub fn node(&self, id: u64) -> Option<&HeapNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Whether this snapshot carries any graph data.
    ///
    /// An empty snapshot is also how degraded parses surface, so
    /// callers distinguish "no leaks found" from "analysis
    /// unavailable" only through this check.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
