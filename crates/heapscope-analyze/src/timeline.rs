//! Component memory usage over a snapshot series.

use serde::{Deserialize, Serialize};

use heapscope_core::model::HeapSnapshot;

use crate::attribution::component_memory_usage;

/// One point in a component's memory timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryTimePoint {
    /// Snapshot parse-time in milliseconds.
    pub timestamp: i64,
    /// Retained bytes attributed to the component; 0 when the
    /// component does not appear in that snapshot.
    pub memory_usage: u64,
}

/// Per-snapshot usage of one component, ordered by snapshot
/// timestamp (stable: ties keep input order).
#[must_use]
pub fn component_memory_over_time(
    snapshots: &[HeapSnapshot],
    component_name: &str,
) -> Vec<MemoryTimePoint> {
    let mut ordered: Vec<&HeapSnapshot> = snapshots.iter().collect();
    ordered.sort_by_key(|snapshot| snapshot.timestamp);

    ordered
        .into_iter()
        .map(|snapshot| MemoryTimePoint {
            timestamp: snapshot.timestamp,
            memory_usage: component_memory_usage(snapshot)
                .get(component_name)
                .copied()
                .unwrap_or(0),
        })
        .collect()
}
