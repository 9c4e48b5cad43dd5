//! Indexed-graph record decoding.
//!
//! Turns the flat node/edge sequences of an [`IndexedGraphPayload`]
//! into a [`HeapSnapshot`]. Decoding is total: a schema that cannot
//! identify records degrades the whole parse to the empty snapshot,
//! and individually bad records (trailing partial record, edge from
//! an unknown node) are skipped rather than failing the parse.

use std::collections::{BTreeSet, HashMap};

use tracing::{trace, warn};

use crate::clock;
use crate::error::ErrorCode;
use crate::id::generate_snapshot_id;
use crate::model::{EdgeType, HeapEdge, HeapNode, HeapSnapshot, MemoryMetrics, NodeType};
use crate::parse::raw::IndexedGraphPayload;
use crate::parse::schema::{DEFAULT_EDGE_FIELDS, DEFAULT_NODE_FIELDS, FieldSchema};

/// Substrings that mark a node as a GC root.
const ROOT_MARKERS: [&str; 2] = ["(Root)", "(GC roots)"];

/// Name used when a string-table index does not resolve.
const UNKNOWN_NAME: &str = "Unknown";

const REQUIRED_NODE_FIELDS: [&str; 1] = ["id"];
const REQUIRED_EDGE_FIELDS: [&str; 2] = ["from_node", "to_node"];

pub(crate) fn build_snapshot(payload: &IndexedGraphPayload) -> HeapSnapshot {
    let meta = &payload.snapshot.meta;
    let node_fields = declared_or_default(meta.node_fields.as_deref(), &DEFAULT_NODE_FIELDS);
    let edge_fields = declared_or_default(meta.edge_fields.as_deref(), &DEFAULT_EDGE_FIELDS);

    let (node_schema, edge_schema) = match (
        FieldSchema::resolve(&node_fields, &REQUIRED_NODE_FIELDS),
        FieldSchema::resolve(&edge_fields, &REQUIRED_EDGE_FIELDS),
    ) {
        (Ok(node_schema), Ok(edge_schema)) => (node_schema, edge_schema),
        (Err(err), _) | (_, Err(err)) => {
            warn!(
                code = %ErrorCode::SchemaFieldMissing,
                error = %err,
                "unusable record schema; producing empty snapshot"
            );
            return HeapSnapshot::empty(header_metrics(payload));
        }
    };

    let (mut nodes, root_node_ids, index_of_id) = decode_nodes(payload, &node_schema);
    attach_edges(payload, &edge_schema, &mut nodes, &index_of_id);

    let object_count = nodes.len();
    HeapSnapshot {
        id: generate_snapshot_id(),
        timestamp: clock::now_millis(),
        nodes,
        root_node_ids,
        object_count,
        metrics: header_metrics(payload),
    }
}

fn declared_or_default(declared: Option<&[String]>, default: &[&str]) -> Vec<String> {
    declared.map_or_else(
        || default.iter().map(ToString::to_string).collect(),
        <[String]>::to_vec,
    )
}

fn header_metrics(payload: &IndexedGraphPayload) -> MemoryMetrics {
    MemoryMetrics {
        total_heap_size: payload.snapshot.total_heap_size,
        used_heap_size: payload.snapshot.used_heap_size,
        heap_size_limit: payload.snapshot.max_heap_size,
        timestamp: clock::now_millis(),
    }
}

/// Decode node records in order. Returns the nodes, the ids whose
/// names carry a root marker, and an id → vec-index map used for
/// edge attachment (last record wins on duplicate ids).
fn decode_nodes(
    payload: &IndexedGraphPayload,
    schema: &FieldSchema,
) -> (Vec<HeapNode>, BTreeSet<u64>, HashMap<u64, usize>) {
    let record_count = payload.nodes.len() / schema.width();
    let mut nodes = Vec::with_capacity(record_count);
    let mut root_node_ids = BTreeSet::new();
    let mut index_of_id = HashMap::with_capacity(record_count);

    for record in payload.nodes.chunks_exact(schema.width()) {
        let Some(id) = schema.read(record, "id") else {
            continue;
        };
        let name = resolve_string(&payload.strings, schema.read(record, "name"));
        let self_size = schema.read(record, "size").unwrap_or(0);
        let retained_size = schema.read(record, "retained_size").unwrap_or(0);
        let node_type = schema
            .read(record, "type")
            .map_or_else(NodeType::default, NodeType::from_code);

        if ROOT_MARKERS.iter().any(|marker| name.contains(marker)) {
            root_node_ids.insert(id);
        }

        index_of_id.insert(id, nodes.len());
        nodes.push(HeapNode {
            id,
            name,
            self_size,
            retained_size,
            node_type,
            edges: Vec::new(),
        });
    }

    let remainder = payload.nodes.len() % schema.width();
    if remainder != 0 {
        trace!(remainder, "trailing partial node record skipped");
    }

    (nodes, root_node_ids, index_of_id)
}

/// Attach edge records to their source nodes in traversal order.
/// An edge whose `from_node` has no parsed node is skipped, never an
/// error; dangling `to_node` values are kept as-is for consumers to
/// tolerate.
fn attach_edges(
    payload: &IndexedGraphPayload,
    schema: &FieldSchema,
    nodes: &mut [HeapNode],
    index_of_id: &HashMap<u64, usize>,
) {
    let mut skipped = 0_usize;

    for record in payload.edges.chunks_exact(schema.width()) {
        let (Some(from_node), Some(to_node)) = (
            schema.read(record, "from_node"),
            schema.read(record, "to_node"),
        ) else {
            continue;
        };
        let name = resolve_string(&payload.strings, schema.read(record, "name"));
        let edge_type = schema
            .read(record, "type")
            .map_or_else(EdgeType::default, EdgeType::from_code);

        match index_of_id.get(&from_node).and_then(|&i| nodes.get_mut(i)) {
            Some(source) => source.edges.push(HeapEdge {
                name,
                edge_type,
                to_node,
            }),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        trace!(skipped, "edges with unknown source node skipped");
    }

    let remainder = payload.edges.len() % schema.width();
    if remainder != 0 {
        trace!(remainder, "trailing partial edge record skipped");
    }
}

fn resolve_string(strings: &[String], index: Option<u64>) -> String {
    index
        .and_then(|i| usize::try_from(i).ok())
        .and_then(|i| strings.get(i))
        .cloned()
        .unwrap_or_else(|| UNKNOWN_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_string_defaults_to_unknown() {
        let strings = vec!["Foo".to_string()];
        assert_eq!(resolve_string(&strings, Some(0)), "Foo");
        assert_eq!(resolve_string(&strings, Some(1)), UNKNOWN_NAME);
        assert_eq!(resolve_string(&strings, None), UNKNOWN_NAME);
        assert_eq!(resolve_string(&strings, Some(u64::MAX)), UNKNOWN_NAME);
    }
}
