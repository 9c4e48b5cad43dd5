//! Component name resolution for fiber-like nodes.
//!
//! Internal reconciler nodes rarely carry a component name
//! themselves; the name lives one hop away behind a labeled edge.
//! Resolution follows those edges through the graph index and
//! re-applies the usual name extraction on the target. Dangling
//! edges resolve to nothing.

use heapscope_core::model::HeapNode;

use crate::attribution::names::extract_component_name;
use crate::index::GraphIndex;

/// Edges that typically point at the component behind a fiber.
const FIBER_NAME_EDGES: [&str; 5] = ["type", "elementType", "tag", "key", "ctor"];

const DISPLAY_NAME_EDGE: &str = "displayName";
const STATE_NODE_EDGE: &str = "stateNode";

/// Whether a node label looks like an internal reconciler node.
#[must_use]
pub fn is_fiber_like(name: &str) -> bool {
    name.contains("Fiber")
}

/// Resolve the component name behind a fiber-like node, if any.
///
/// Edges are walked in the node's own edge order. For each candidate
/// edge the target's label goes through name extraction; failing
/// that, a `displayName` edge on the target is followed and that
/// node's label is used verbatim. As a last resort the `stateNode`
/// edge is followed and extracted.
#[must_use]
pub fn resolve_fiber_component_name(node: &HeapNode, index: &GraphIndex<'_>) -> Option<String> {
    for edge in &node.edges {
        if !FIBER_NAME_EDGES.contains(&edge.name.as_str()) {
            continue;
        }
        let Some(target) = index.node(edge.to_node) else {
            continue;
        };

        if let Some(name) = extract_component_name(&target.name) {
            return Some(name);
        }

        if let Some(display_edge) = target.find_edge(DISPLAY_NAME_EDGE) {
            if let Some(display_node) = index.node(display_edge.to_node) {
                return Some(display_node.name.clone());
            }
        }
    }

    let state_edge = node.find_edge(STATE_NODE_EDGE)?;
    let state_node = index.node(state_edge.to_node)?;
    extract_component_name(&state_node.name)
}
