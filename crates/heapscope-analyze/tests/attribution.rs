//! Attribution and timeline tests over parsed and hand-built
//! snapshots.

use heapscope_analyze::{component_memory_over_time, component_memory_usage};
use heapscope_core::model::{EdgeType, HeapEdge, HeapNode, HeapSnapshot, MemoryMetrics, NodeType};
use heapscope_core::parse::parse;
use serde_json::json;

fn node(id: u64, name: &str, retained_size: u64, edges: Vec<(&str, u64)>) -> HeapNode {
    HeapNode {
        id,
        name: name.to_string(),
        self_size: 8,
        retained_size,
        node_type: NodeType::Object,
        edges: edges
            .into_iter()
            .map(|(name, to_node)| HeapEdge {
                name: name.to_string(),
                edge_type: EdgeType::Internal,
                to_node,
            })
            .collect(),
    }
}

fn snapshot_of(nodes: Vec<HeapNode>) -> HeapSnapshot {
    let mut snapshot = HeapSnapshot::empty(MemoryMetrics::default());
    snapshot.object_count = nodes.len();
    snapshot.nodes = nodes;
    snapshot
}

#[test]
fn attribution_works_on_a_parsed_indexed_payload() {
    // A fiber whose `type` edge points at a function component, plus
    // a directly-labeled component instance.
    let payload = json!({
        "snapshot": { "meta": {
            "node_fields": ["id", "name", "size", "retained_size", "type"],
            "edge_fields": ["from_node", "to_node", "name", "type"],
        }},
        "nodes": [
            1, 0, 8, 64,  0,
            2, 1, 8, 0,   3,
            3, 2, 8, 100, 0,
        ],
        "edges": [1, 2, 3, 3],
        "strings": ["FiberNode", "function Sidebar() {}", "ReactComponent(Sidebar)", "type"],
    });

    let snapshot = parse(Some(&payload));
    let usage = component_memory_usage(&snapshot);

    // 64 through the fiber, 100 through the labeled instance.
    assert_eq!(usage.get("Sidebar"), Some(&164));
}

#[test]
fn fibers_without_resolvable_names_contribute_nothing() {
    let snapshot = snapshot_of(vec![
        node(1, "FiberNode", 64, vec![("sibling", 2)]),
        node(2, "FiberNode", 32, vec![("type", 999)]),
    ]);

    assert!(component_memory_usage(&snapshot).is_empty());
}

#[test]
fn timeline_reads_zero_for_snapshots_missing_the_component() {
    let mut with = snapshot_of(vec![node(1, "ReactComponent(Sidebar)", 100, vec![])]);
    with.timestamp = 200;
    let mut without = snapshot_of(vec![node(1, "ReactComponent(Topbar)", 10, vec![])]);
    without.timestamp = 100;

    let timeline = component_memory_over_time(&[with, without], "Sidebar");

    let points: Vec<(i64, u64)> = timeline.iter().map(|p| (p.timestamp, p.memory_usage)).collect();
    assert_eq!(points, vec![(100, 0), (200, 100)]);
}

#[test]
fn usage_is_additive_across_wrapper_forms_of_one_component() {
    let snapshot = snapshot_of(vec![
        node(1, "ReactComponent(Sidebar)", 100, vec![]),
        node(2, "ReactElement(Sidebar)", 50, vec![]),
        node(3, "React.Component[Sidebar]", 25, vec![]),
    ]);

    let usage = component_memory_usage(&snapshot);
    assert_eq!(usage.get("Sidebar"), Some(&175));
}
