//! Snapshot parser: raw capture payloads → [`HeapSnapshot`].
//!
//! # Overview
//!
//! The acquisition collaborator hands over one `serde_json::Value`
//! per capture (or `None` when the capture failed); [`parse`] turns
//! it into an immutable snapshot. Three payload shapes exist,
//! distinguished structurally by [`RawPayload::classify`]:
//!
//! - **Indexed graph**: flat node/edge numeric records plus a string
//!   table, with field order declared in `snapshot.meta`.
//! - **Flat metrics**: aggregate heap counters only, no graph.
//! - **Anything else**: degrades to the empty snapshot.
//!
//! Parsing never fails and never panics. Malformed input produces
//! the empty snapshot plus a log line; callers distinguish "nothing
//! captured" from "empty heap" only via [`HeapSnapshot::is_empty`].
//!
//! Every snapshot gets a fresh unique id and a parse-time
//! `timestamp`, regardless of any capture timestamp embedded in the
//! payload (`metrics.timestamp` keeps the capture time where the
//! source reports one).

mod graph;
mod raw;
mod schema;

pub use raw::{FlatMetricsPayload, IndexedGraphPayload, RawPayload, SnapshotHeader, SnapshotMeta};
pub use schema::{DEFAULT_EDGE_FIELDS, DEFAULT_NODE_FIELDS, FieldSchema, SchemaError};

use serde_json::Value;

use crate::clock;
use crate::model::{HeapSnapshot, MemoryMetrics};

/// Parse one raw capture payload into a snapshot.
#[must_use]
pub fn parse(raw: Option<&Value>) -> HeapSnapshot {
    match RawPayload::classify(raw) {
        RawPayload::IndexedGraph(payload) => graph::build_snapshot(&payload),
        RawPayload::FlatMetrics(payload) => metrics_snapshot(&payload),
        RawPayload::Empty => HeapSnapshot::empty(MemoryMetrics {
            timestamp: clock::now_millis(),
            ..MemoryMetrics::default()
        }),
    }
}

fn metrics_snapshot(payload: &FlatMetricsPayload) -> HeapSnapshot {
    HeapSnapshot::empty(MemoryMetrics {
        total_heap_size: payload.total_heap_size,
        used_heap_size: payload.used_heap_size,
        heap_size_limit: payload.heap_size_limit,
        timestamp: payload.timestamp.unwrap_or_else(clock::now_millis),
    })
}
