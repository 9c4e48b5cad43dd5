//! Memory pressure and usage summaries.

use std::cmp::Reverse;
use std::collections::HashMap;

use heapscope_core::model::{HeapNode, HeapSnapshot};

/// Default pressure threshold: 1 MB retained.
pub const DEFAULT_PRESSURE_THRESHOLD: u64 = 1_000_000;

/// Nodes retaining more than `threshold` bytes, largest first.
#[must_use]
pub fn memory_pressure_objects(snapshot: &HeapSnapshot, threshold: u64) -> Vec<&HeapNode> {
    let mut nodes: Vec<&HeapNode> = snapshot
        .nodes
        .iter()
        .filter(|node| node.retained_size > threshold)
        .collect();
    nodes.sort_by_key(|node| Reverse(node.retained_size));
    nodes
}

/// Self size summed per node name.
#[must_use]
pub fn memory_usage_summary(snapshot: &HeapSnapshot) -> HashMap<String, u64> {
    let mut usage: HashMap<String, u64> = HashMap::new();
    for node in &snapshot.nodes {
        *usage.entry(node.name.clone()).or_default() += node.self_size;
    }
    usage
}
