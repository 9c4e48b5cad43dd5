//! Unexpected object-count detection.
//!
//! Thousands of live instances sharing one constructor name usually
//! means something is accumulating. Groups above the threshold are
//! reported through a bounded sample of their earliest nodes rather
//! than all of them.

use std::collections::HashMap;

use heapscope_core::model::{HeapNode, HeapSnapshot};

use super::LeakConfig;

/// Up to `count_sample_limit` representative nodes from every name
/// group larger than `object_count_threshold`.
#[must_use]
pub fn unexpected_object_counts<'a>(
    snapshot: &'a HeapSnapshot,
    config: &LeakConfig,
) -> Vec<&'a HeapNode> {
    let mut groups: HashMap<&str, Vec<&HeapNode>> = HashMap::new();
    for node in &snapshot.nodes {
        groups.entry(node.name.as_str()).or_default().push(node);
    }

    let mut offenders = Vec::new();
    for nodes in groups.into_values() {
        if nodes.len() > config.object_count_threshold {
            offenders.extend(nodes.into_iter().take(config.count_sample_limit));
        }
    }
    offenders
}
