//! Leak candidate detection.
//!
//! # Overview
//!
//! [`find_memory_leaks`] is the union of four independent heuristics,
//! deduplicated by node id:
//!
//! 1. [`detached`] — element-like nodes with no parent edge.
//! 2. Large objects — retained size above a byte threshold.
//! 3. [`circular`] — self-loops and bidirectional neighbor pairs.
//! 4. [`counts`] — suspiciously many instances of one name.
//!
//! Every heuristic is a shallow approximation by contract: there is
//! no reachability-from-roots traversal here, and results are leak
//! *candidates*, not proof.

pub mod circular;
pub mod counts;
pub mod detached;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use heapscope_core::model::{HeapNode, HeapSnapshot};

use crate::index::GraphIndex;

/// Thresholds for the size- and count-based heuristics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeakConfig {
    /// Retained bytes above which a single object is suspicious.
    #[serde(default = "default_large_object_bytes")]
    pub large_object_bytes: u64,
    /// Instances of one name above which the group is suspicious.
    #[serde(default = "default_object_count_threshold")]
    pub object_count_threshold: usize,
    /// How many nodes of a suspicious group to report.
    #[serde(default = "default_count_sample_limit")]
    pub count_sample_limit: usize,
}

impl Default for LeakConfig {
    fn default() -> Self {
        Self {
            large_object_bytes: default_large_object_bytes(),
            object_count_threshold: default_object_count_threshold(),
            count_sample_limit: default_count_sample_limit(),
        }
    }
}

fn default_large_object_bytes() -> u64 {
    1_000_000
}

fn default_object_count_threshold() -> usize {
    1000
}

fn default_count_sample_limit() -> usize {
    10
}

/// Union of all leak heuristics at default thresholds.
#[must_use]
pub fn find_memory_leaks(snapshot: &HeapSnapshot) -> Vec<&HeapNode> {
    find_memory_leaks_with(snapshot, &LeakConfig::default())
}

/// Union of all leak heuristics, deduplicated by node id
/// (last-write-wins; output order is unspecified).
#[must_use]
pub fn find_memory_leaks_with<'a>(
    snapshot: &'a HeapSnapshot,
    config: &LeakConfig,
) -> Vec<&'a HeapNode> {
    let index = GraphIndex::from_snapshot(snapshot);

    let mut candidates: Vec<&HeapNode> = Vec::new();
    candidates.extend(detached::detached_elements(snapshot, &index));
    candidates.extend(large_objects(snapshot, config.large_object_bytes));
    candidates.extend(circular::circular_references(snapshot, &index));
    candidates.extend(counts::unexpected_object_counts(snapshot, config));

    let mut unique: HashMap<u64, &HeapNode> = HashMap::with_capacity(candidates.len());
    for node in candidates {
        unique.insert(node.id, node);
    }
    unique.into_values().collect()
}

/// Nodes whose retained size exceeds `threshold` bytes.
fn large_objects(snapshot: &HeapSnapshot, threshold: u64) -> Vec<&HeapNode> {
    snapshot
        .nodes
        .iter()
        .filter(|node| node.retained_size > threshold)
        .collect()
}

#[cfg(test)]
mod tests {
    use heapscope_core::model::{HeapNode, HeapSnapshot, MemoryMetrics, NodeType};

    use super::*;

    fn sized_node(id: u64, name: &str, retained_size: u64) -> HeapNode {
        HeapNode {
            id,
            name: name.to_string(),
            self_size: 8,
            retained_size,
            node_type: NodeType::Object,
            edges: Vec::new(),
        }
    }

    fn snapshot_of(nodes: Vec<HeapNode>) -> HeapSnapshot {
        let mut snapshot = HeapSnapshot::empty(MemoryMetrics::default());
        snapshot.object_count = nodes.len();
        snapshot.nodes = nodes;
        snapshot
    }

    #[test]
    fn leak_config_serde_defaults() {
        let config: LeakConfig =
            serde_json::from_value(serde_json::json!({})).expect("all fields optional");
        assert_eq!(config, LeakConfig::default());
        assert_eq!(config.large_object_bytes, 1_000_000);
        assert_eq!(config.object_count_threshold, 1000);
        assert_eq!(config.count_sample_limit, 10);
    }

    #[test]
    fn large_objects_respect_the_threshold() {
        let snapshot = snapshot_of(vec![
            sized_node(1, "Big", 2_000_000),
            sized_node(2, "Borderline", 1_000_000),
            sized_node(3, "Small", 50),
        ]);

        let ids: Vec<u64> = large_objects(&snapshot, 1_000_000)
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec![1], "strictly greater than the threshold");
    }

    #[test]
    fn results_are_deduplicated_by_id() {
        // One node that is both large and part of an oversized name
        // group must appear once.
        let mut nodes = vec![sized_node(0, "Widget", 5_000_000)];
        for id in 1..=1200 {
            nodes.push(sized_node(id, "Widget", 10));
        }
        let snapshot = snapshot_of(nodes);

        let config = LeakConfig {
            object_count_threshold: 1000,
            ..LeakConfig::default()
        };
        let leaks = find_memory_leaks_with(&snapshot, &config);

        let mut ids: Vec<u64> = leaks.iter().map(|n| n.id).collect();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before, "no id appears twice");
        assert!(ids.contains(&0));
    }

    #[test]
    fn empty_snapshot_has_no_leaks() {
        let snapshot = snapshot_of(Vec::new());
        assert!(find_memory_leaks(&snapshot).is_empty());
    }
}
