//! Component memory attribution.
//!
//! # Overview
//!
//! Attributes retained bytes to component names by two independent
//! scans over the snapshot:
//!
//! 1. Component-labeled nodes ([`names::is_component_like`]) whose
//!    name yields an extraction.
//! 2. Fiber-like reconciler nodes whose component name resolves
//!    through labeled edges ([`fiber`]).
//!
//! Both scans accumulate additively into one map; a node matched by
//! both contributes twice. Nodes with no resolvable name contribute
//! nothing — that is expected, not an error.

pub mod fiber;
pub mod names;

use std::collections::HashMap;

use tracing::trace;

use heapscope_core::error::ErrorCode;
use heapscope_core::model::HeapSnapshot;

use crate::index::GraphIndex;

pub use fiber::{is_fiber_like, resolve_fiber_component_name};
pub use names::{extract_component_name, is_component_like};

/// Retained bytes summed per extracted component name.
#[must_use]
pub fn component_memory_usage(snapshot: &HeapSnapshot) -> HashMap<String, u64> {
    let index = GraphIndex::from_snapshot(snapshot);
    let mut usage: HashMap<String, u64> = HashMap::new();

    for node in snapshot
        .nodes
        .iter()
        .filter(|node| is_component_like(&node.name))
    {
        match extract_component_name(&node.name) {
            Some(name) => *usage.entry(name).or_default() += node.retained_size,
            None => trace!(
                code = %ErrorCode::UnattributableComponent,
                node_name = %node.name,
                "component-like node without extractable name"
            ),
        }
    }

    for node in snapshot
        .nodes
        .iter()
        .filter(|node| is_fiber_like(&node.name))
    {
        if let Some(name) = resolve_fiber_component_name(node, &index) {
            *usage.entry(name).or_default() += node.retained_size;
        }
    }

    usage
}
